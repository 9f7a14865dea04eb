use anyhow::{Context, Result};
use clap::Parser;
use gesture_replay::app::{replay, Cli, ReplayOptions};
use gesture_replay::trace::parse_trace;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = ReplayOptions::from(Cli::parse());
    let text = std::fs::read_to_string(&options.trace)
        .with_context(|| format!("reading trace {}", options.trace.display()))?;
    let steps = parse_trace(&text)
        .with_context(|| format!("parsing trace {}", options.trace.display()))?;

    log::info!(
        "replaying {} steps from {} (swipe: {}, pan: {})",
        steps.len(),
        options.trace.display(),
        options.swipe.is_some(),
        options.pan
    );

    for line in replay(&steps, &options) {
        println!("{}", line);
    }
    Ok(())
}
