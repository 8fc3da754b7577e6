use serde::{Deserialize, Serialize};

/// Driving command returned to the simulator for one tick.
///
/// - `steering` - Steering value in `[-1.0, 1.0]`
/// - `accelerate` - Throttle in `[0.0, 1.0]`
/// - `gear` - Gear to engage on the next tick
/// - `restart` - Asks the simulator to end the episode and restart the race
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub steering: f64,
    pub accelerate: f64,
    pub gear: i32,
    pub restart: bool,
}
