use anyhow::{bail, Context};
use pinchable::{
    logging::{init_logging, LoggingConfig},
    replay::{self, Script},
};

/// Replays a JSON gesture script and prints the resulting report
fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: pinchable-replay <script.json>");
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read script {}", path))?;
    let script = Script::from_json(&json).with_context(|| format!("invalid script {}", path))?;
    log::info!("replaying {} steps from {}", script.steps.len(), path);

    let report = replay::run(&script)?;
    println!("{}", report.to_json_pretty()?);
    Ok(())
}
