use clap::Parser;

use crate::err::Error;

/// Parameters governing a single simulation run: how many application
/// messages to generate, how unreliable the simulated medium is, and how
/// verbose the run's logging should be.
#[derive(Debug, Clone, Parser)]
#[command(name = "gbnsim", about = "Go-Back-N reliable transport simulator")]
pub struct SimConfig {
    /// Number of application-layer messages to simulate before stopping.
    #[arg(long, default_value_t = 50)]
    pub num_messages: u32,

    /// Probability in [0, 1] that a packet is lost in transit.
    #[arg(long, default_value_t = 0.0)]
    pub loss_prob: f64,

    /// Probability in [0, 1] that a packet is corrupted in transit.
    #[arg(long, default_value_t = 0.0)]
    pub corrupt_prob: f64,

    /// Mean interarrival time between application messages, in simulated
    /// time units. Must be strictly positive.
    #[arg(long, default_value_t = 1000.0)]
    pub lambda: f64,

    /// If set, both A and B generate outbound application messages;
    /// otherwise only A does.
    #[arg(long, default_value_t = false)]
    pub bidirectional: bool,

    /// Seed for the run's pseudo-random number generator, for
    /// reproducible traces.
    #[arg(long, default_value_t = 9999)]
    pub seed: u64,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), Error> {
        check_probability("loss_prob", self.loss_prob)?;
        check_probability("corrupt_prob", self.corrupt_prob)?;
        if self.lambda <= 0.0 {
            return Err(Error::InvalidArrivalRate(self.lambda));
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), Error> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidProbability { name, value });
    }
    Ok(())
}
