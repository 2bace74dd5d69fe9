use anyhow::Context;
use log::{debug, info};
use pricesense_inference::{serve, Config, PricePredictor};
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    debug!("config: {}", serde_json::to_string(&config)?);
    info!("loading model from {}", config.model_dir.display());

    let predictor = PricePredictor::new(&config)
        .with_context(|| format!("cannot load model from {}", config.model_dir.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = serve::run(&predictor, stdin.lock(), stdout.lock())?;

    info!("input closed after {served} requests");
    Ok(())
}
