//! Episode bookkeeping and temperature annealing.
//!
//! The exploration temperature after `n` completed games is
//!
//! ```text
//! T(n) = base_temperature · decayⁿ
//! ```
//!
//! so `T(n + 1) = decay · T(n)`. Exploration stays on while `T(n) > explore_floor`. With
//! `decay < 1` the temperature only decreases, which means exploration switches off at
//! most once per run and never comes back.

use serde::{Deserialize, Serialize};

/// Exponential temperature decay over games played.
///
/// # Example
///
/// ```
/// use qdriver_training::episode::TemperatureSchedule;
///
/// let schedule = TemperatureSchedule::new(1.0, 0.5, 0.2);
/// assert_eq!(schedule.temperature(0), 1.0);
/// assert_eq!(schedule.temperature(2), 0.25);
/// assert!(schedule.explores(schedule.temperature(2)));
/// assert!(!schedule.explores(schedule.temperature(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSchedule {
    base_temperature: f64,
    decay: f64,
    explore_floor: f64,
}

impl TemperatureSchedule {
    #[must_use]
    pub const fn new(base_temperature: f64, decay: f64, explore_floor: f64) -> Self {
        Self {
            base_temperature,
            decay,
            explore_floor,
        }
    }

    #[must_use]
    pub fn temperature(&self, games_played: u32) -> f64 {
        self.base_temperature * self.decay.powf(f64::from(games_played))
    }

    #[must_use]
    pub fn explores(&self, temperature: f64) -> bool {
        temperature > self.explore_floor
    }
}

/// Run-wide learning state threaded through every tick.
///
/// `games_played` and `best_distance` persist for the whole run; the step counter and the
/// last-distance reference are reset at the start of every episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeContext {
    schedule: TemperatureSchedule,
    temperature: f64,
    explore: bool,
    step: u64,
    games_played: u32,
    best_distance: f64,
    last_distance: f64,
}

impl EpisodeContext {
    #[must_use]
    pub fn new(schedule: TemperatureSchedule) -> Self {
        let temperature = schedule.temperature(0);
        Self {
            schedule,
            temperature,
            explore: schedule.explores(temperature),
            step: 0,
            games_played: 0,
            best_distance: 0.0,
            last_distance: 0.0,
        }
    }

    /// Closes the current episode and prepares the next one.
    pub fn start_next_episode(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
        self.temperature = self.schedule.temperature(self.games_played);
        self.explore = self.schedule.explores(self.temperature);
        self.step = 0;
        self.last_distance = 0.0;
    }

    /// Counts a tick of the current episode and returns the new step count.
    pub fn advance_step(&mut self) -> u64 {
        self.step += 1;
        self.step
    }

    /// Stores the distance raced at the current tick and returns the previous reference.
    ///
    /// Also raises the best distance seen during the run.
    pub fn record_distance(&mut self, distance: f64) -> f64 {
        self.best_distance = self.best_distance.max(distance);
        std::mem::replace(&mut self.last_distance, distance)
    }

    #[must_use]
    pub const fn schedule(&self) -> &TemperatureSchedule {
        &self.schedule
    }

    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub const fn explore(&self) -> bool {
        self.explore
    }

    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub const fn best_distance(&self) -> f64 {
        self.best_distance
    }

    #[must_use]
    pub const fn last_distance(&self) -> f64 {
        self.last_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_schedule() -> TemperatureSchedule {
        TemperatureSchedule::new(1.0, 0.99, 0.002)
    }

    #[test]
    fn test_temperature_decays_geometrically() {
        let mut context = EpisodeContext::new(default_schedule());
        assert_eq!(context.temperature(), 1.0);
        for _ in 0..50 {
            let previous = context.temperature();
            context.start_next_episode();
            assert!((context.temperature() - 0.99 * previous).abs() < 1e-12);
            assert!(context.temperature() < previous);
        }
        assert_eq!(context.games_played(), 50);
    }

    #[test]
    fn test_explore_switches_off_once() {
        let mut context = EpisodeContext::new(default_schedule());
        assert!(context.explore());
        let mut flips = 0;
        let mut previous = context.explore();
        for _ in 0..2000 {
            context.start_next_episode();
            assert!(!(context.explore() && !previous), "exploration came back");
            if previous != context.explore() {
                flips += 1;
            }
            previous = context.explore();
        }
        assert_eq!(flips, 1);
        assert!(!context.explore());
    }

    #[test]
    fn test_explore_switches_off_at_floor() {
        // 0.99^n <= 0.002  <=>  n >= ln(0.002) / ln(0.99) ≈ 618.4
        let schedule = default_schedule();
        assert!(schedule.explores(schedule.temperature(618)));
        assert!(!schedule.explores(schedule.temperature(619)));
    }

    #[test]
    fn test_reset_clears_per_episode_counters() {
        let mut context = EpisodeContext::new(default_schedule());
        context.advance_step();
        context.advance_step();
        context.record_distance(120.0);
        context.start_next_episode();

        assert_eq!(context.step(), 0);
        assert_eq!(context.last_distance(), 0.0);
        assert_eq!(context.best_distance(), 120.0);
        assert_eq!(context.games_played(), 1);
    }

    #[test]
    fn test_record_distance_tracks_best() {
        let mut context = EpisodeContext::new(default_schedule());
        assert_eq!(context.record_distance(50.0), 0.0);
        assert_eq!(context.record_distance(53.0), 50.0);
        assert_eq!(context.record_distance(40.0), 53.0);
        assert_eq!(context.best_distance(), 53.0);
        assert_eq!(context.last_distance(), 40.0);
    }
}
