//! Record a fake training run, chart it to SVG, and export it as CSV.

use std::path::PathBuf;

use anyhow::Result;
use lager::plot::SvgVisualizer;
use lager::{LoggerConfig, SeriesBuffer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // 1. Config: ./lager.yaml if present, defaults otherwise
    let config = LoggerConfig::load(&PathBuf::from("lager.yaml"))?
        .with_record_interval(10)
        .with_plot_interval(500);
    let mut logger = SeriesBuffer::new(["loss", "accuracy", "lr"], config)?;

    // 2. Charts land in ./lager_plots
    let mut viz = SvgVisualizer::new("lager_plots")?;

    // 3. Simulated training loop
    for step in 0..5_000u32 {
        let t = step as f64;
        let loss = 2.0 * (-t / 1500.0).exp() + 0.05 * (t * 0.05).sin().abs();
        let accuracy = 1.0 - 0.9 * (-t / 1200.0).exp();
        let lr = 1e-3 * 0.5f64.powi((step / 2000) as i32);

        logger.record(&[loss, accuracy, lr])?;
        logger.plot(&mut viz)?;
    }

    info!(samples = logger.len(), steps = logger.step(), "Training finished");
    logger.peek(5)?;

    // 4. Export
    let out = PathBuf::from("metrics.csv");
    logger.export(&out)?;
    println!("Charts: {}", viz.dir().display());
    println!("Metrics: {}", out.display());

    Ok(())
}
