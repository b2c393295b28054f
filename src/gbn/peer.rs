use std::fmt;

/// Identifies one of the two transport endpoints in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerId {
    A,
    B,
}

impl PeerId {
    /// The entity on the other end of the channel.
    pub fn other(self) -> PeerId {
        match self {
            PeerId::A => PeerId::B,
            PeerId::B => PeerId::A,
        }
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerId::A => write!(f, "A"),
            PeerId::B => write!(f, "B"),
        }
    }
}
