use crate::{Command, SensorSnapshot};

/// A driving agent invoked by the simulator harness.
///
/// The harness calls [`control`](Controller::control) once per tick, strictly sequentially.
/// [`on_episode_reset`](Controller::on_episode_reset) runs between episodes (after a
/// crash/restart) and [`on_shutdown`](Controller::on_shutdown) once when the race is abandoned.
pub trait Controller {
    /// Produces the command for the current tick.
    fn control(&mut self, sensors: &SensorSnapshot) -> Command;

    /// Called when the simulator restarts the race.
    fn on_episode_reset(&mut self);

    /// Called once before the process shuts down.
    fn on_shutdown(&mut self);
}
