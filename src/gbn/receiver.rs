use log::{debug, trace};

use super::checksum::{encode_ack, verify_data};
use super::packet::Packet;
use super::peer::PeerId;
use super::traits::{ApplicationSink, Channel};

/// The receiving half of a transport entity. Accepts only the next
/// in-order DATA packet; a corrupted packet is dropped with no ACK at all
/// (the sender's timeout will recover it), while an uncorrupted
/// out-of-order arrival re-ACKs the last sequence number actually
/// delivered.
#[derive(Debug)]
pub(crate) struct Receiver {
    id: PeerId,
    expected_seq: i32,
}

impl Receiver {
    pub fn new(id: PeerId) -> Self {
        Receiver {
            id,
            expected_seq: 0,
        }
    }

    /// Processes an inbound DATA packet per the three-way split: corrupted
    /// packets are dropped silently; an in-order packet is delivered and
    /// ACKed; any other (duplicate or out-of-order) uncorrupted packet is
    /// re-ACKed with `expected_seq - 1` without being delivered.
    pub fn on_data<C: Channel, S: ApplicationSink>(
        &mut self,
        pkt: Packet,
        channel: &mut C,
        sink: &mut S,
    ) {
        if !verify_data(&pkt) {
            trace!("{}: dropping corrupted DATA packet", self.id);
            return;
        }

        if pkt.seqnum == self.expected_seq {
            debug!("{}: accepted DATA seq {}", self.id, pkt.seqnum);
            sink.deliver(self.id, pkt.payload);
            self.expected_seq += 1;
            channel.send(self.id, encode_ack(self.expected_seq - 1));
        } else {
            trace!(
                "{}: re-acking last in-order seq, got {} expected {}",
                self.id,
                pkt.seqnum,
                self.expected_seq
            );
            channel.send(self.id, encode_ack(self.expected_seq - 1));
        }
    }
}
