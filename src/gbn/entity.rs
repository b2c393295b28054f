use super::packet::{Packet, Payload};
use super::peer::PeerId;
use super::receiver::Receiver;
use super::sender::Sender;
use super::traits::{ApplicationSink, Channel, Timer};
use crate::err::Error;

/// One side of a connection: bundles a [`Sender`] and a [`Receiver`] behind
/// the handful of entry points an external driver needs. Collaborators
/// (`Channel`, `Timer`, `ApplicationSink`) are passed in per call rather
/// than owned, so a single shared scheduler and channel can drive two
/// independent entities without shared mutable state.
#[derive(Debug)]
pub struct TransportEntity {
    id: PeerId,
    sender: Sender,
    receiver: Receiver,
}

impl TransportEntity {
    pub fn new(id: PeerId) -> Self {
        TransportEntity {
            id,
            sender: Sender::new(id),
            receiver: Receiver::new(id),
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Resets the entity to its just-constructed state: empty buffer,
    /// sequence numbers back to zero. Exposed separately from `new` so a
    /// driver can reuse one entity across repeated runs.
    pub fn init(&mut self) {
        let id = self.id;
        self.sender = Sender::new(id);
        self.receiver = Receiver::new(id);
    }

    /// Outstanding (transmitted, unacknowledged) packet count.
    pub fn in_flight(&self) -> i32 {
        self.sender.in_flight()
    }

    /// Accepts an application message for transmission to the peer.
    pub fn submit<C: Channel, T: Timer>(
        &mut self,
        payload: Payload,
        channel: &mut C,
        timer: &mut T,
    ) -> Result<(), Error> {
        self.sender.submit(payload, channel, timer)
    }

    /// Routes an inbound packet to the sender (if it's an ACK) or the
    /// receiver (if it's DATA).
    pub fn on_packet<C: Channel, T: Timer, S: ApplicationSink>(
        &mut self,
        pkt: Packet,
        channel: &mut C,
        timer: &mut T,
        sink: &mut S,
    ) {
        if pkt.is_ack() {
            self.sender.on_ack(pkt, channel, timer);
        } else {
            self.receiver.on_data(pkt, channel, sink);
        }
    }

    /// Fires when this entity's retransmission timer expires.
    pub fn on_timeout<C: Channel, T: Timer>(&mut self, channel: &mut C, timer: &mut T) {
        self.sender.on_timeout(channel, timer);
    }
}
