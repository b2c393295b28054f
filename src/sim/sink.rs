use crate::gbn::{ApplicationSink, PeerId, Payload};

/// Records every payload delivered to the application layer, in delivery
/// order, for post-run inspection and invariant checking.
#[derive(Debug, Default)]
pub struct DeliveryLog {
    delivered: Vec<(PeerId, Payload)>,
}

impl DeliveryLog {
    pub fn new() -> Self {
        DeliveryLog::default()
    }

    pub fn entries(&self) -> &[(PeerId, Payload)] {
        &self.delivered
    }

    pub fn count_for(&self, peer: PeerId) -> usize {
        self.delivered.iter().filter(|(p, _)| *p == peer).count()
    }
}

impl ApplicationSink for DeliveryLog {
    fn deliver(&mut self, to: PeerId, payload: Payload) {
        self.delivered.push((to, payload));
    }
}
