//! State encoding: sensor readings + candidate action to network input.
//!
//! The state vector has [`STATE_LEN`] components:
//!
//! | index | source                                     |
//! |-------|--------------------------------------------|
//! | 0-2   | flank beams 0, 3, 6                        |
//! | 3     | front: `max(beam 8, beam 9, beam 10)`      |
//! | 4-6   | flank beams 12, 15, 18                     |
//! | 7     | candidate steering value (unscaled)        |
//!
//! All sensor components are divided by [`NORMALIZATION`]. Encoding is pure: identical
//! inputs give bit-identical outputs, and changing only the action changes only the last
//! component.

use std::ops::Index;

use qdriver_engine::SensorSnapshot;

use crate::action::ActionCandidate;

/// Number of components in a [`StateVector`].
pub const STATE_LEN: usize = 8;

/// Divisor applied to every range finder reading.
pub const NORMALIZATION: f64 = 200.0;

const LEFT_FLANK_BEAMS: [usize; 3] = [0, 3, 6];
const FRONT_BEAMS: [usize; 3] = [8, 9, 10];
const RIGHT_FLANK_BEAMS: [usize; 3] = [12, 15, 18];

/// Network input for one (state, action) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector([f64; STATE_LEN]);

impl StateVector {
    #[must_use]
    pub const fn from_components(components: [f64; STATE_LEN]) -> Self {
        Self(components)
    }

    #[must_use]
    pub const fn components(&self) -> &[f64; STATE_LEN] {
        &self.0
    }

    /// Returns the appended action component.
    #[must_use]
    pub const fn action_value(&self) -> f64 {
        self.0[STATE_LEN - 1]
    }

    /// Returns a copy with the action component replaced.
    #[must_use]
    pub const fn with_action(mut self, action: ActionCandidate) -> Self {
        self.0[STATE_LEN - 1] = action.steering();
        self
    }
}

impl Index<usize> for StateVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Encodes a snapshot and a candidate action into a [`StateVector`].
///
/// # Example
///
/// ```
/// use qdriver_engine::SensorSnapshot;
/// use qdriver_evaluator::{action::ActionCandidate, state_encoder};
///
/// let mut edges = [100.0; 19];
/// edges[9] = 200.0;
/// let sensors = SensorSnapshot::new(&edges).unwrap();
///
/// let state = state_encoder::encode(&sensors, ActionCandidate::LAST);
/// assert_eq!(state[0], 0.5);
/// assert_eq!(state[3], 1.0);
/// assert_eq!(state.action_value(), 1.0);
/// ```
#[must_use]
pub fn encode(sensors: &SensorSnapshot, action: ActionCandidate) -> StateVector {
    let edges = sensors.track_edges();
    let front = FRONT_BEAMS
        .iter()
        .map(|&i| edges[i])
        .fold(f64::NEG_INFINITY, f64::max);
    let [l0, l1, l2] = LEFT_FLANK_BEAMS.map(|i| edges[i]);
    let [r0, r1, r2] = RIGHT_FLANK_BEAMS.map(|i| edges[i]);

    StateVector([
        l0 / NORMALIZATION,
        l1 / NORMALIZATION,
        l2 / NORMALIZATION,
        front / NORMALIZATION,
        r0 / NORMALIZATION,
        r1 / NORMALIZATION,
        r2 / NORMALIZATION,
        action.steering(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_sensors() -> SensorSnapshot {
        let edges: Vec<f64> = (0..19).map(|i| f64::from(i) * 10.0).collect();
        SensorSnapshot::new(&edges).unwrap()
    }

    #[test]
    fn test_selects_flank_beams() {
        let state = encode(&ramp_sensors(), ActionCandidate::STRAIGHT);
        assert_eq!(
            state.components(),
            &[0.0, 0.15, 0.3, 0.5, 0.6, 0.75, 0.9, 0.0]
        );
    }

    #[test]
    fn test_front_is_max_of_forward_cluster() {
        for peak in FRONT_BEAMS {
            let mut edges = [20.0; 19];
            edges[peak] = 180.0;
            let sensors = SensorSnapshot::new(&edges).unwrap();
            assert_eq!(encode(&sensors, ActionCandidate::STRAIGHT)[3], 0.9);
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let sensors = ramp_sensors();
        let a = encode(&sensors, ActionCandidate::ALL[2]);
        let b = encode(&sensors, ActionCandidate::ALL[2]);
        for (x, y) in a.components().iter().zip(b.components()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_action_changes_only_last_component() {
        let sensors = ramp_sensors();
        let base = encode(&sensors, ActionCandidate::ALL[0]);
        for action in ActionCandidate::ALL {
            let state = encode(&sensors, action);
            assert_eq!(state.components()[..STATE_LEN - 1], base.components()[..STATE_LEN - 1]);
            assert_eq!(state.action_value(), action.steering());
            assert_eq!(base.with_action(action), state);
        }
    }
}
