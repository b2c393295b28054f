use std::collections::BinaryHeap;

use log::trace;

use crate::gbn::PeerId;

use super::event::{Event, EventKind};

/// Time-ordered event queue driving the simulation. A `BinaryHeap` gives
/// O(log n) insert/pop; unlike the original implementation's doubly-linked
/// list, timer cancellation is O(n) only over currently-pending timer
/// events rather than the whole list, since those are the only events a
/// caller ever needs to retract.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Event>,
    now: f64,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler {
            heap: BinaryHeap::new(),
            now: 0.0,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule(&mut self, event: Event) {
        trace!(
            "scheduling {:?} for {} at t={:.3}",
            event.kind,
            event.entity,
            event.time
        );
        self.heap.push(event);
    }

    /// Removes the next pending timer-interrupt event for `owner`, if any.
    /// Mirrors `stoptimer`'s linear scan, but only over the heap's backing
    /// storage rather than walking linked-list pointers. Returns whether an
    /// event was actually removed, so callers can warn on a no-op cancel.
    pub fn cancel_timer(&mut self, owner: PeerId) -> bool {
        let mut remaining: Vec<Event> = self.heap.drain().collect();
        let removed = match remaining
            .iter()
            .position(|e| e.entity == owner && matches!(e.kind, EventKind::TimerInterrupt))
        {
            Some(pos) => {
                remaining.remove(pos);
                true
            }
            None => false,
        };
        self.heap = remaining.into_iter().collect();
        removed
    }

    pub fn has_pending_timer(&self, owner: PeerId) -> bool {
        self.heap
            .iter()
            .any(|e| e.entity == owner && matches!(e.kind, EventKind::TimerInterrupt))
    }

    /// Pops and returns the earliest-scheduled event, advancing the
    /// simulated clock to its time.
    pub fn pop(&mut self) -> Option<Event> {
        let event = self.heap.pop()?;
        self.now = event.time;
        Some(event)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    pub fn heap_len_for_test(&self) -> usize {
        self.heap.len()
    }

    /// Latest scheduled time among pending packet-arrival events destined
    /// for `entity`, or `None` if the medium currently carries nothing for
    /// it. Used to keep per-destination packet arrivals in FIFO order even
    /// though the heap itself is unordered by destination.
    pub fn latest_pending_arrival(&self, entity: PeerId) -> Option<f64> {
        self.heap
            .iter()
            .filter(|e| e.entity == entity && matches!(e.kind, EventKind::PacketArrival(_)))
            .map(|e| e.time)
            .fold(None, |acc, t| Some(acc.map_or(t, |a: f64| a.max(t))))
    }
}
