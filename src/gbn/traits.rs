use super::packet::{Packet, Payload};
use super::peer::PeerId;

/// The medium a `TransportEntity` hands outbound packets to. A real
/// simulation routes these through loss/corruption/delay; test mocks just
/// record what was sent.
pub trait Channel {
    fn send(&mut self, from: PeerId, packet: Packet);
}

/// The retransmission timer owned by the sender side of an entity. At most
/// one timer is ever outstanding per entity, mirroring the single shared
/// timer of the original design.
pub trait Timer {
    fn start(&mut self, owner: PeerId, duration: f64);
    fn stop(&mut self, owner: PeerId);
}

/// Where a receiver hands payloads once they've been accepted in order.
pub trait ApplicationSink {
    fn deliver(&mut self, to: PeerId, payload: Payload);
}
