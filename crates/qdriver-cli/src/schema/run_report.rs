use chrono::{DateTime, Utc};
use qdriver_engine::TrackParams;
use qdriver_training::{config::DriverConfig, race::EpisodeOutcome};
use serde::{Deserialize, Serialize};

/// Summary of one `drive` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the first episode started (ISO 8601 format)
    pub started_at: DateTime<Utc>,
    /// When the last episode ended (ISO 8601 format)
    pub finished_at: DateTime<Utc>,
    /// Seed the track, exploration and initial weights were derived from
    pub seed: u64,
    pub config: DriverConfig,
    pub track: TrackParams,
    /// Longest distance raced in any single episode
    pub best_distance: f64,
    /// Exploration temperature when the run ended
    pub final_temperature: f64,
    /// Whether the driver was still exploring when the run ended
    pub explore: bool,
    /// Training steps skipped because they would have corrupted the weights
    pub rejected_steps: u64,
    /// Outcome of every episode, in order
    pub outcomes: Vec<EpisodeOutcome>,
}
