use clap::Parser;
use gbn_sim::sim::{Runner, SimConfig};

fn main() {
    env_logger::init();

    let config = SimConfig::parse();
    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    }

    log::info!(
        "starting run: {} messages, loss={}, corrupt={}, lambda={}, bidirectional={}",
        config.num_messages,
        config.loss_prob,
        config.corrupt_prob,
        config.lambda,
        config.bidirectional
    );

    let runner = Runner::new(config);
    let summary = runner.run();

    println!(
        "simulator terminated at t={:.3} after generating {} messages",
        summary.final_time, summary.messages_generated
    );
    println!(
        "delivered: A={} B={}",
        summary.messages_delivered_a, summary.messages_delivered_b
    );
    println!(
        "channel: sent={} lost={} corrupted={}",
        summary.channel_stats.sent, summary.channel_stats.lost, summary.channel_stats.corrupted
    );
}
