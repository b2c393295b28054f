#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("probability {name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("arrival rate lambda must be positive, got {0}")]
    InvalidArrivalRate(f64),

    #[error("{peer}: send buffer full")]
    SendBufferFull { peer: &'static str },
}
