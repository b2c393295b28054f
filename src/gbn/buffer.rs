use std::collections::VecDeque;

use super::packet::Packet;

/// Maximum number of outstanding (assigned but not yet acknowledged)
/// packets a sender will hold before dropping new submissions.
pub const BUFFER_CAPACITY: usize = 51;

/// Sliding-window size: at most this many transmitted-but-unacknowledged
/// packets may be in flight at once.
pub const WINDOW_SIZE: i32 = 8;

#[derive(Debug, Clone)]
struct Entry {
    packet: Packet,
    transmitted: bool,
}

/// Holds outbound packets in sequence-number order, indexed by absolute
/// sequence number. Entries to the left of `base` have been acknowledged
/// and are dropped; nothing at or past `next_index` has been assigned yet.
#[derive(Debug, Default)]
pub(crate) struct SendBuffer {
    entries: VecDeque<Entry>,
    base: i32,
    next_index: i32,
}

impl SendBuffer {
    pub fn new() -> Self {
        SendBuffer {
            entries: VecDeque::new(),
            base: 0,
            next_index: 0,
        }
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn next_index(&self) -> i32 {
        self.next_index
    }

    /// Right edge of the current send window, capped by what has actually
    /// been assigned a sequence number so far.
    pub fn window_end(&self) -> i32 {
        std::cmp::min(self.base + WINDOW_SIZE, self.next_index)
    }

    pub fn is_full(&self) -> bool {
        (self.next_index - self.base) as usize >= BUFFER_CAPACITY
    }

    /// Assigns the next sequence number to `packet`, buffers it
    /// un-transmitted, and returns the sequence number assigned.
    pub fn push(&mut self, packet: Packet) -> i32 {
        let seqnum = self.next_index;
        self.entries.push_back(Entry {
            packet,
            transmitted: false,
        });
        self.next_index += 1;
        seqnum
    }

    fn offset_of(&self, seqnum: i32) -> Option<usize> {
        let offset = seqnum - self.base;
        if offset < 0 {
            None
        } else {
            Some(offset as usize)
        }
    }

    pub fn packet_at(&self, seqnum: i32) -> Option<Packet> {
        self.offset_of(seqnum)
            .and_then(|o| self.entries.get(o))
            .map(|e| e.packet)
    }

    pub fn is_transmitted(&self, seqnum: i32) -> bool {
        self.offset_of(seqnum)
            .and_then(|o| self.entries.get(o))
            .map(|e| e.transmitted)
            .unwrap_or(false)
    }

    pub fn mark_transmitted(&mut self, seqnum: i32) {
        if let Some(offset) = self.offset_of(seqnum) {
            if let Some(entry) = self.entries.get_mut(offset) {
                entry.transmitted = true;
            }
        }
    }

    /// Slides `base` forward to `new_base`, dropping every entry this
    /// leaves behind. `new_base` must not exceed `next_index`.
    pub fn advance_base(&mut self, new_base: i32) {
        while self.base < new_base {
            self.entries.pop_front();
            self.base += 1;
        }
    }

    /// Packets with sequence numbers in `[from, to)` that exist in the
    /// buffer, in order.
    pub fn packets_in_range(&self, from: i32, to: i32) -> Vec<Packet> {
        let mut out = Vec::new();
        let mut seq = from.max(self.base);
        while seq < to {
            match self.packet_at(seq) {
                Some(packet) => out.push(packet),
                None => break,
            }
            seq += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbn::checksum::encode_data;

    fn pkt(seq: i32) -> Packet {
        encode_data(seq, [0u8; super::super::packet::PAYLOAD_LEN])
    }

    #[test]
    fn push_assigns_increasing_seqnums() {
        let mut buf = SendBuffer::new();
        assert_eq!(buf.push(pkt(0)), 0);
        assert_eq!(buf.push(pkt(1)), 1);
        assert_eq!(buf.next_index(), 2);
        assert_eq!(buf.base(), 0);
    }

    #[test]
    fn window_end_caps_at_next_index() {
        let mut buf = SendBuffer::new();
        for i in 0..3 {
            buf.push(pkt(i));
        }
        assert_eq!(buf.window_end(), 3);
        for i in 3..12 {
            buf.push(pkt(i));
        }
        assert_eq!(buf.window_end(), WINDOW_SIZE);
    }

    #[test]
    fn advance_base_drops_acknowledged_entries() {
        let mut buf = SendBuffer::new();
        for i in 0..5 {
            buf.push(pkt(i));
        }
        buf.advance_base(3);
        assert_eq!(buf.base(), 3);
        assert!(buf.packet_at(2).is_none());
        assert!(buf.packet_at(3).is_some());
    }

    #[test]
    fn full_buffer_is_detected_by_outstanding_count() {
        let mut buf = SendBuffer::new();
        for i in 0..BUFFER_CAPACITY as i32 {
            buf.push(pkt(i));
        }
        assert!(buf.is_full());
        buf.advance_base(1);
        assert!(!buf.is_full());
    }
}
