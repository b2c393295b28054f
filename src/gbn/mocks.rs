//! In-memory stand-ins for [`Channel`], [`Timer`], and [`ApplicationSink`]
//! used by unit and integration tests. Unlike the simulated channel in
//! `sim`, these never drop, corrupt, or reorder anything — they just
//! record what happened so assertions can inspect it directly.

use super::packet::{Packet, Payload};
use super::peer::PeerId;
use super::traits::{ApplicationSink, Channel, Timer};

#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub sent: Vec<(PeerId, Packet)>,
}

impl Channel for RecordingChannel {
    fn send(&mut self, from: PeerId, packet: Packet) {
        self.sent.push((from, packet));
    }
}

#[derive(Debug, Default)]
pub struct RecordingTimer {
    pub running: Option<PeerId>,
    pub starts: u32,
    pub stops: u32,
}

impl Timer for RecordingTimer {
    fn start(&mut self, owner: PeerId, _duration: f64) {
        self.running = Some(owner);
        self.starts += 1;
    }

    fn stop(&mut self, owner: PeerId) {
        if self.running == Some(owner) {
            self.running = None;
        }
        self.stops += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub delivered: Vec<(PeerId, Payload)>,
}

impl ApplicationSink for RecordingSink {
    fn deliver(&mut self, to: PeerId, payload: Payload) {
        self.delivered.push((to, payload));
    }
}
