//! Episode runner connecting a [`Controller`] to a [`TrackSimulator`].

use qdriver_engine::{Controller, TrackSimulator};
use serde::{Deserialize, Serialize};

/// Summary of one finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub ticks: u64,
    pub distance_raced: f64,
    /// The controller asked for a restart before the tick limit.
    pub crashed: bool,
}

/// Drives one episode until the controller asks for a restart or `tick_limit` is reached.
///
/// The simulator is not reset here.
pub fn run_episode<C>(
    simulator: &mut TrackSimulator,
    controller: &mut C,
    tick_limit: u64,
) -> EpisodeOutcome
where
    C: Controller + ?Sized,
{
    let mut outcome = EpisodeOutcome {
        ticks: 0,
        distance_raced: 0.0,
        crashed: false,
    };
    while outcome.ticks < tick_limit {
        let sensors = simulator.observe();
        let command = controller.control(&sensors);
        outcome.ticks += 1;
        outcome.distance_raced = sensors.distance_raced();
        if command.restart {
            outcome.crashed = true;
            break;
        }
        simulator.step(&command);
    }
    outcome
}

/// Runs `episodes` consecutive episodes on the same track.
///
/// The simulator is reset and [`Controller::on_episode_reset`] is called between episodes;
/// [`Controller::on_shutdown`] is called once at the end.
pub fn run_race<C>(
    simulator: &mut TrackSimulator,
    controller: &mut C,
    episodes: usize,
    tick_limit: u64,
) -> Vec<EpisodeOutcome>
where
    C: Controller + ?Sized,
{
    let mut outcomes = Vec::with_capacity(episodes);
    for episode in 0..episodes {
        if episode > 0 {
            simulator.reset();
            controller.on_episode_reset();
        }
        outcomes.push(run_episode(simulator, controller, tick_limit));
    }
    controller.on_shutdown();
    outcomes
}

#[cfg(test)]
mod tests {
    use qdriver_engine::{Command, SensorSnapshot, TrackParams};

    use super::*;

    /// Steers hard left at full throttle, so it always leaves the track.
    #[derive(Debug, Default)]
    struct ScriptedController {
        ticks: u64,
        resets: u32,
        shutdowns: u32,
    }

    impl Controller for ScriptedController {
        fn control(&mut self, sensors: &SensorSnapshot) -> Command {
            self.ticks += 1;
            Command {
                steering: 1.0,
                accelerate: 1.0,
                gear: 1,
                restart: sensors.has_collided(),
            }
        }

        fn on_episode_reset(&mut self) {
            self.resets += 1;
        }

        fn on_shutdown(&mut self) {
            self.shutdowns += 1;
        }
    }

    #[test]
    fn test_episode_stops_on_restart() {
        let mut simulator = TrackSimulator::with_seed(TrackParams::default(), 1);
        let mut controller = ScriptedController::default();
        let outcome = run_episode(&mut simulator, &mut controller, 100_000);
        assert!(outcome.crashed);
        assert!(outcome.ticks < 100_000);
        assert_eq!(outcome.ticks, controller.ticks);
    }

    #[test]
    fn test_episode_stops_at_tick_limit() {
        let mut simulator = TrackSimulator::with_seed(TrackParams::default(), 2);
        let mut controller = ScriptedController::default();
        let outcome = run_episode(&mut simulator, &mut controller, 5);
        assert!(!outcome.crashed);
        assert_eq!(outcome.ticks, 5);
    }

    #[test]
    fn test_race_resets_between_episodes() {
        let mut simulator = TrackSimulator::with_seed(TrackParams::default(), 3);
        let mut controller = ScriptedController::default();
        let outcomes = run_race(&mut simulator, &mut controller, 4, 100_000);
        assert_eq!(outcomes.len(), 4);
        assert_eq!(controller.resets, 3);
        assert_eq!(controller.shutdowns, 1);
        // same track and same script: every episode plays out identically
        assert!(outcomes.iter().all(|o| *o == outcomes[0]));
    }

    #[test]
    fn test_zero_episodes_still_shuts_down() {
        let mut simulator = TrackSimulator::with_seed(TrackParams::default(), 4);
        let mut controller = ScriptedController::default();
        assert!(run_race(&mut simulator, &mut controller, 0, 10).is_empty());
        assert_eq!(controller.shutdowns, 1);
    }
}
