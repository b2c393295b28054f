use std::cmp::Ordering;

use crate::gbn::{PeerId, Packet};

/// A single scheduled occurrence in the simulated timeline.
#[derive(Debug, Clone)]
pub struct Event {
    pub time: f64,
    pub entity: PeerId,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    /// The application layer has a new message ready to send.
    Arrival,
    /// A packet has arrived at `entity` from the channel.
    PacketArrival(Packet),
    /// `entity`'s retransmission timer has fired.
    TimerInterrupt,
}

impl Event {
    pub fn new(time: f64, entity: PeerId, kind: EventKind) -> Self {
        Event { time, entity, kind }
    }
}

// Ordered for use in a min-heap (`BinaryHeap` is a max-heap by default, so
// comparisons are reversed): the event with the smallest `time` sorts as
// "greatest".
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
    }
}
