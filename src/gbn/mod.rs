//! Go-Back-N sliding-window transport: a packet/checksum wire format, a
//! sender with a single retransmission timer, an in-order-only receiver,
//! and the [`TransportEntity`] facade that wires them together.

mod buffer;
mod checksum;
mod entity;
mod packet;
mod peer;
mod receiver;
mod sender;
mod traits;

pub mod mocks;

pub use entity::TransportEntity;
pub use packet::{Packet, Payload, ACK_SEQNUM, PAYLOAD_LEN};
pub use peer::PeerId;
pub use sender::TIMER_INCREMENT;
pub use traits::{ApplicationSink, Channel, Timer};
