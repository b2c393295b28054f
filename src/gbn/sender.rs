use log::{debug, trace, warn};

use super::buffer::{SendBuffer, WINDOW_SIZE};
use super::checksum::{encode_data, verify_ack};
use super::packet::{Packet, Payload};
use super::peer::PeerId;
use super::traits::{Channel, Timer};
use crate::err::Error;

/// Simulated duration, in abstract time units, a single retransmission
/// timer runs for before firing. Carried over from the original
/// implementation's timer increment.
pub const TIMER_INCREMENT: f64 = 17.0;

/// The sending half of a transport entity: owns the outbound window and the
/// single retransmission timer.
#[derive(Debug)]
pub(crate) struct Sender {
    id: PeerId,
    buffer: SendBuffer,
    timer_running: bool,
}

impl Sender {
    pub fn new(id: PeerId) -> Self {
        Sender {
            id,
            buffer: SendBuffer::new(),
            timer_running: false,
        }
    }

    /// Count of transmitted, not-yet-acknowledged packets: bounded by the
    /// window size `W`, unlike the total backlog (`next_index - base`)
    /// which also includes packets still waiting for room in the window.
    pub fn in_flight(&self) -> i32 {
        self.buffer.window_end() - self.buffer.base()
    }

    /// Accepts `payload` from the application, buffers it, and transmits it
    /// immediately if the window has room. Returns `Err` if the send buffer
    /// is already full, mirroring the original sender's backpressure.
    pub fn submit<C: Channel, T: Timer>(
        &mut self,
        payload: Payload,
        channel: &mut C,
        timer: &mut T,
    ) -> Result<(), Error> {
        if self.buffer.is_full() {
            warn!("{}: send buffer full, dropping submitted message", self.id);
            return Err(Error::SendBufferFull { peer: self.id_str() });
        }

        let seqnum = self.buffer.next_index();
        let pkt = encode_data(seqnum, payload);
        self.buffer.push(pkt);

        if seqnum < self.buffer.window_end() {
            self.transmit_one(seqnum, channel, timer);
        } else {
            trace!("{}: seq {} buffered outside window, awaiting slide", self.id, seqnum);
        }
        Ok(())
    }

    fn transmit_one<C: Channel, T: Timer>(&mut self, seqnum: i32, channel: &mut C, timer: &mut T) {
        if let Some(pkt) = self.buffer.packet_at(seqnum) {
            debug!("{}: transmitting seq {}", self.id, seqnum);
            channel.send(self.id, pkt);
            self.buffer.mark_transmitted(seqnum);
            if !self.timer_running {
                timer.start(self.id, TIMER_INCREMENT);
                self.timer_running = true;
            }
        }
    }

    /// Processes an inbound ACK. A corrupted ACK is treated as a timeout
    /// indicator: the whole current window is resent. A valid cumulative
    /// ACK slides the window base forward, transmitting any packets that
    /// were buffered but not yet sent and have now entered the window. A
    /// stale or duplicate ACK (`acknum < base`) is ignored outright.
    pub fn on_ack<C: Channel, T: Timer>(&mut self, ack: Packet, channel: &mut C, timer: &mut T) {
        if !verify_ack(&ack) {
            warn!("{}: corrupted ACK, resending window", self.id);
            self.resend_window(channel, timer, true);
            return;
        }

        if ack.acknum < self.buffer.base() {
            trace!("{}: ignoring stale ACK {}", self.id, ack.acknum);
            return;
        }

        timer.stop(self.id);
        let old_base = self.buffer.base();
        let new_base = ack.acknum + 1;
        self.buffer.advance_base(new_base);
        debug!("{}: window base advanced {} -> {}", self.id, old_base, new_base);

        let old_window_end = old_base + WINDOW_SIZE;
        let new_window_end = std::cmp::min(new_base + WINDOW_SIZE, self.buffer.next_index());
        for pkt in self.buffer.packets_in_range(old_window_end, new_window_end) {
            debug_assert!(
                !self.buffer.is_transmitted(pkt.seqnum),
                "slide-in range must only contain packets never transmitted"
            );
            debug!("{}: sending newly-windowed seq {}", self.id, pkt.seqnum);
            channel.send(self.id, pkt);
            self.buffer.mark_transmitted(pkt.seqnum);
        }

        if self.buffer.base() < self.buffer.next_index() {
            timer.start(self.id, TIMER_INCREMENT);
            self.timer_running = true;
        } else {
            self.timer_running = false;
        }
    }

    /// Resends every buffered packet in the current window and starts the
    /// timer. `stop_first` controls whether a pending timer is stopped
    /// beforehand: the corrupt-ACK path has one running and must stop it
    /// first, while a timeout fires because the timer already expired on
    /// its own and there is nothing left to stop.
    fn resend_window<C: Channel, T: Timer>(&mut self, channel: &mut C, timer: &mut T, stop_first: bool) {
        if stop_first {
            timer.stop(self.id);
        }
        let window_end = self.buffer.window_end();
        for pkt in self.buffer.packets_in_range(self.buffer.base(), window_end) {
            channel.send(self.id, pkt);
        }
        timer.start(self.id, TIMER_INCREMENT);
        self.timer_running = true;
    }

    /// Fires on retransmission timeout: resends every buffered packet
    /// currently in the window and starts the timer. The timer is already
    /// stopped by virtue of having fired, so unlike the corrupt-ACK path
    /// this never calls `timer.stop()`.
    pub fn on_timeout<C: Channel, T: Timer>(&mut self, channel: &mut C, timer: &mut T) {
        warn!(
            "{}: timeout, resending window [{}, {})",
            self.id,
            self.buffer.base(),
            self.buffer.window_end()
        );
        self.resend_window(channel, timer, false);
    }

    fn id_str(&self) -> &'static str {
        match self.id {
            PeerId::A => "A",
            PeerId::B => "B",
        }
    }
}
