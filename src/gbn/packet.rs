/// Length in bytes of both the application `Message` and the packet payload.
pub const PAYLOAD_LEN: usize = 20;

/// The wire unit exchanged between peers.
pub type Payload = [u8; PAYLOAD_LEN];

/// Sentinel `seqnum` identifying an ACK packet; any non-negative value
/// identifies a DATA packet.
pub const ACK_SEQNUM: i32 = -1;

/// The fixed-size packet format shared by the sender and receiver halves.
///
/// `acknum` is unused (conventionally 0) on DATA packets, and `payload` is
/// unused (conventionally all zero) on ACK packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub seqnum: i32,
    pub acknum: i32,
    pub checksum: i32,
    pub payload: Payload,
}

impl Packet {
    pub fn is_ack(&self) -> bool {
        self.seqnum == ACK_SEQNUM
    }
}
