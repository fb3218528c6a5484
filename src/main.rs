//! Dataset Dashboard - hosting entry point
//!
//! Renders both data pages with their default selections and prints the view models
//! as JSON for the rendering layer.

use anyhow::Context;
use dataset_dashboard::config::DashboardConfig;
use dataset_dashboard::data::{DatasetCache, UberFilter};
use dataset_dashboard::pages::{GymPage, UberPage};
use serde::Serialize;
use tracing::metadata::LevelFilter;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize)]
struct Dashboard<V, W> {
    uber: V,
    gym: W,
}

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::from(config.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut cache = DatasetCache::new();

    let uber = UberPage::open(&mut cache, &config.uber_csv)
        .with_context(|| format!("opening pickups page {}", config.uber_csv.display()))?
        .with_preview_rows(config.preview_rows);
    let gym = GymPage::open(&mut cache, &config.gym_csv)
        .with_context(|| format!("opening gym page {}", config.gym_csv.display()))?
        .with_preview_rows(config.preview_rows);
    info!(datasets = cache.len(), "datasets ready");

    let dashboard = Dashboard {
        uber: uber.render(&UberFilter::all())?,
        gym: gym.render()?,
    };
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
