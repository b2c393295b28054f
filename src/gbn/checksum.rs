use super::packet::{Packet, Payload, ACK_SEQNUM};

/// Integrity tag over `seqnum + acknum + sum(payload bytes)`, accumulated in
/// an unsigned 32-bit register with wraparound. The `checksum` field itself
/// is excluded from the computation.
pub fn checksum(pkt: &Packet) -> i32 {
    let mut sum = (pkt.seqnum as u32).wrapping_add(pkt.acknum as u32);
    for byte in pkt.payload {
        sum = sum.wrapping_add(byte as u32);
    }
    sum as i32
}

/// DATA packets store the bitwise complement of the checksum. A packet is
/// valid iff the stored field and the recomputed checksum sum to all-ones.
pub fn verify_data(pkt: &Packet) -> bool {
    pkt.checksum.wrapping_add(checksum(pkt)) == -1
}

/// ACK packets store the checksum directly.
pub fn verify_ack(pkt: &Packet) -> bool {
    pkt.checksum == checksum(pkt)
}

/// Builds a DATA packet carrying `payload` at `seqnum`, with a correctly
/// complemented checksum.
pub fn encode_data(seqnum: i32, payload: Payload) -> Packet {
    let mut pkt = Packet {
        seqnum,
        acknum: 0,
        checksum: 0,
        payload,
    };
    pkt.checksum = !checksum(&pkt);
    pkt
}

/// Builds an ACK packet cumulatively acknowledging `acknum`.
pub fn encode_ack(acknum: i32) -> Packet {
    let mut pkt = Packet {
        seqnum: ACK_SEQNUM,
        acknum,
        checksum: 0,
        payload: [0u8; super::packet::PAYLOAD_LEN],
    };
    pkt.checksum = checksum(&pkt);
    pkt
}
