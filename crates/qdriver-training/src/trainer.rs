//! One-step temporal-difference training.
//!
//! The decision taken on tick `t` can only be rewarded once the snapshot of tick `t + 1`
//! arrives. The acting step therefore hands back a [`PendingTransition`] which the next
//! tick feeds to [`Trainer::train_step`] together with the new snapshot.
//!
//! # Target
//!
//! ```text
//! target = (1 − α)·Q_prev + α·(reward + max_a Q(s', a))
//! ```
//!
//! `α` (the blend rate) is separate from the network's gradient step size: the target is
//! smoothed towards the previous estimate before backpropagation takes its own step.

use qdriver_engine::SensorSnapshot;
use qdriver_evaluator::{
    network::{TrainError, ValueNetwork},
    q_table::QEstimateTable,
    state_encoder::StateVector,
};

use crate::reward;

/// The previous decision awaiting its reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTransition {
    /// Encoded state of the action that was actually taken.
    pub state: StateVector,
    /// Network output for `state` at the time of the decision.
    pub q_estimate: f64,
}

/// Blends the previous estimate with the one-step bootstrap.
///
/// # Example
///
/// ```
/// use qdriver_training::trainer::td_target;
///
/// let target = td_target(0.2, 1.0, 0.4, 0.1);
/// assert!((target - (0.9 * 0.2 + 0.1 * 1.4)).abs() < 1e-12);
/// ```
#[must_use]
pub fn td_target(pending_q: f64, reward: f64, best_next: f64, blend_rate: f64) -> f64 {
    (1.0 - blend_rate) * pending_q + blend_rate * (reward + best_next)
}

/// Everything computed by a single accepted training step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainStep {
    pub reward: f64,
    pub best_next: f64,
    pub target: f64,
    /// Network error on the pending state before the update.
    pub error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trainer {
    blend_rate: f64,
    learning_rate: f64,
    momentum: f64,
}

impl Trainer {
    #[must_use]
    pub const fn new(blend_rate: f64, learning_rate: f64, momentum: f64) -> Self {
        Self {
            blend_rate,
            learning_rate,
            momentum,
        }
    }

    #[must_use]
    pub const fn blend_rate(&self) -> f64 {
        self.blend_rate
    }

    #[must_use]
    pub const fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[must_use]
    pub const fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Rewards `pending` against the new snapshot and trains the network once.
    ///
    /// `best_next` is read from the network before it is updated. On error the network is
    /// unchanged.
    pub fn train_step(
        &self,
        network: &mut ValueNetwork,
        pending: &PendingTransition,
        previous_distance: f64,
        sensors: &SensorSnapshot,
    ) -> Result<TrainStep, TrainError> {
        let reward = reward::reward(
            previous_distance,
            sensors.distance_raced(),
            sensors.damage(),
        );
        let best_next = QEstimateTable::evaluate(network, sensors).max_estimate();
        let target = td_target(pending.q_estimate, reward, best_next, self.blend_rate);
        let error = network.train(&pending.state, target, self.learning_rate, self.momentum)?;
        Ok(TrainStep {
            reward,
            best_next,
            target,
            error,
        })
    }
}
