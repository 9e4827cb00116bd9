use anyhow::{bail, Context, Result};
use statclean::{
    clean::{cpih, journeys},
    config::Config,
    export,
};
use std::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) load configuration + validate inputs ─────────────────────
    let config = Config::load()?;
    let cpih_path = config.cpih_path();
    let journeys_path = config.journeys_path();
    for path in [&cpih_path, &journeys_path] {
        if !path.exists() {
            bail!("input workbook {} does not exist", path.display());
        }
    }
    fs::create_dir_all(&config.interim_data_dir)
        .with_context(|| format!("creating {}", config.interim_data_dir.display()))?;

    // ─── 3) clean the cost-of-living index ───────────────────────────
    info!("cleaning cost-of-living index from {}", cpih_path.display());
    let cpih_series = cpih::clean(&cpih_path, &config)
        .with_context(|| format!("cleaning {}", cpih_path.display()))?;

    // ─── 4) clean the passenger journeys table ───────────────────────
    info!(
        "cleaning passenger journeys from {}",
        journeys_path.display()
    );
    let journeys_series = journeys::clean(&journeys_path, &config)
        .with_context(|| format!("cleaning {}", journeys_path.display()))?;

    // ─── 5) write outputs ────────────────────────────────────────────
    let cpih_out = config.interim_data_dir.join("cpih_clean.csv");
    export::write_csv(&cpih_series, &cpih_out)?;
    info!("wrote {}", cpih_out.display());

    let journeys_out = config
        .interim_data_dir
        .join("passenger_journeys_clean.csv");
    export::write_csv(&journeys_series, &journeys_out)?;
    info!("wrote {}", journeys_out.display());

    info!("all done");
    Ok(())
}
