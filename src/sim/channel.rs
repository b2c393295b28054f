use std::cell::RefCell;

use log::trace;
use rand::Rng;

use crate::gbn::{Channel, Packet, PeerId};

use super::event::{Event, EventKind};
use super::scheduler::Scheduler;

/// A lossy, corrupting, non-reordering medium. Every packet handed to
/// `send` is independently dropped with probability `loss_prob` and, if it
/// survives, independently corrupted with probability `corrupt_prob`. Over
/// both points the medium is FIFO towards any single destination: a
/// packet's arrival time is never scheduled earlier than the latest
/// already-pending arrival for that destination.
///
/// Shares the scheduler with a sibling [`super::timer::SimTimer`] through a
/// `RefCell` rather than an exclusive `&mut Scheduler`: a single
/// `Sender`/`Receiver` call site needs both a `Channel` and a `Timer` live
/// at once, which two independent `&mut` borrows of the same scheduler
/// cannot express.
pub struct SimChannel<'a, R: Rng> {
    scheduler: &'a RefCell<Scheduler>,
    rng: &'a mut R,
    loss_prob: f64,
    corrupt_prob: f64,
    pub stats: &'a mut ChannelStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelStats {
    pub sent: u64,
    pub lost: u64,
    pub corrupted: u64,
}

impl<'a, R: Rng> SimChannel<'a, R> {
    pub fn new(
        scheduler: &'a RefCell<Scheduler>,
        rng: &'a mut R,
        loss_prob: f64,
        corrupt_prob: f64,
        stats: &'a mut ChannelStats,
    ) -> Self {
        SimChannel {
            scheduler,
            rng,
            loss_prob,
            corrupt_prob,
            stats,
        }
    }
}

impl<'a, R: Rng> Channel for SimChannel<'a, R> {
    fn send(&mut self, from: PeerId, packet: Packet) {
        self.stats.sent += 1;

        if self.rng.gen::<f64>() < self.loss_prob {
            self.stats.lost += 1;
            trace!("channel: packet from {} lost in transit", from);
            return;
        }

        let mut packet = packet;
        if self.rng.gen::<f64>() < self.corrupt_prob {
            self.stats.corrupted += 1;
            corrupt(&mut packet, self.rng);
        }

        let destination = from.other();
        let mut scheduler = self.scheduler.borrow_mut();
        let now = scheduler.now();
        let earliest = scheduler.latest_pending_arrival(destination).unwrap_or(now);
        let arrival = earliest.max(now) + 1.0 + 9.0 * self.rng.gen::<f64>();

        scheduler.schedule(Event::new(arrival, destination, EventKind::PacketArrival(packet)));
    }
}

/// Corrupts exactly one field of the packet, matching the three-way split
/// of the original emulator: most commonly the payload, occasionally the
/// sequence number, rarely the ack number.
fn corrupt<R: Rng>(packet: &mut Packet, rng: &mut R) {
    let x: f64 = rng.gen();
    if x < 0.75 {
        packet.payload[0] = b'Z';
    } else if x < 0.875 {
        packet.seqnum = 999_999;
    } else {
        packet.acknum = 999_999;
    }
}
