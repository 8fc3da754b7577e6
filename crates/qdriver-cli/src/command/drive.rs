use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use qdriver_engine::{TrackParams, TrackSimulator};
use qdriver_training::{config::DriverConfig, driver::QDriver, race};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    schema::run_report::RunReport,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DriveArg {
    /// Number of episodes to drive
    #[arg(long, default_value_t = 200)]
    episodes: usize,
    /// Ticks after which an episode is cut off
    #[arg(long, default_value_t = 5000)]
    tick_limit: u64,
    /// Seed for the track, the exploration and the initial weights
    #[arg(long)]
    seed: Option<u64>,
    /// Driver configuration JSON file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Standard deviation of range finder noise (meters)
    #[arg(long, default_value_t = 0.0)]
    sensor_noise: f64,
    /// Output file path for the run report
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DriveArg) -> anyhow::Result<()> {
    let DriveArg {
        episodes,
        tick_limit,
        seed,
        config,
        sensor_noise,
        output,
    } = arg;

    let config = match config {
        Some(path) => util::read_json_file::<DriverConfig, _>("driver config", path)?,
        None => DriverConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let track = TrackParams {
        sensor_noise: *sensor_noise,
        ..TrackParams::default()
    };

    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut simulator = TrackSimulator::new(track, &mut rng);
    let mut driver = QDriver::new(&config, Pcg64Mcg::from_rng(&mut rng))
        .context("Invalid driver configuration")?;

    log::info!("driving {episodes} episodes (seed {seed}, tick limit {tick_limit})");
    let started_at = Utc::now();
    let outcomes = race::run_race(&mut simulator, &mut driver, *episodes, *tick_limit);
    let finished_at = Utc::now();

    let context = driver.context();
    log::info!(
        "best distance {:.1} after {} games, final temperature {:.5}",
        context.best_distance(),
        context.games_played(),
        context.temperature()
    );
    if driver.rejected_steps() > 0 {
        log::warn!("{} training steps were rejected", driver.rejected_steps());
    }

    let report = RunReport {
        started_at,
        finished_at,
        seed,
        config,
        track,
        best_distance: context.best_distance(),
        final_temperature: context.temperature(),
        explore: context.explore(),
        rejected_steps: driver.rejected_steps(),
        outcomes,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
