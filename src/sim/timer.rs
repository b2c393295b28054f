use std::cell::RefCell;

use crate::gbn::{PeerId, Timer};

use super::event::{Event, EventKind};
use super::scheduler::Scheduler;

/// Adapts the shared [`Scheduler`] to the [`Timer`] trait. Borrows the
/// scheduler through a `RefCell` rather than `&mut` so a sibling
/// [`super::channel::SimChannel`] can be live in the same call.
pub struct SimTimer<'a> {
    scheduler: &'a RefCell<Scheduler>,
}

impl<'a> SimTimer<'a> {
    pub fn new(scheduler: &'a RefCell<Scheduler>) -> Self {
        SimTimer { scheduler }
    }
}

impl<'a> Timer for SimTimer<'a> {
    fn start(&mut self, owner: PeerId, duration: f64) {
        let mut scheduler = self.scheduler.borrow_mut();
        if scheduler.has_pending_timer(owner) {
            log::warn!("{}: attempt to start a timer that is already running", owner);
            return;
        }
        let at = scheduler.now() + duration;
        scheduler.schedule(Event::new(at, owner, EventKind::TimerInterrupt));
    }

    fn stop(&mut self, owner: PeerId) {
        if !self.scheduler.borrow_mut().cancel_timer(owner) {
            log::warn!("{}: attempt to cancel a timer that wasn't running", owner);
        }
    }
}
