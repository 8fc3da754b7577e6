//! The learning driver.
//!
//! [`QDriver`] owns the value network and everything else that persists across ticks, and
//! implements [`Controller`] so it can be plugged into any simulator loop.
//!
//! # Tick Sequence
//!
//! 1. Train on the pending transition (if any) against the new snapshot
//! 2. Record the distance raced and count the step
//! 3. Evaluate all candidate actions and select one
//! 4. Cache the chosen (state, estimate) for the next tick
//! 5. Assemble the command: steering, throttle, gear, restart on damage
//!
//! The pending transition is dropped on episode reset, so the first tick of an episode
//! never trains.

use log::{debug, info, warn};
use qdriver_engine::{Command, Controller, GearShifter, SensorSnapshot};
use qdriver_evaluator::{
    action::ActionCandidate, action_selector::ActionSelector, network::ValueNetwork,
    q_table::QEstimateTable, state_encoder,
};
use rand::Rng;

use crate::{
    config::{ConfigError, DriverConfig},
    episode::EpisodeContext,
    trainer::{PendingTransition, TrainStep, Trainer},
};

#[derive(Debug)]
pub struct QDriver<R> {
    network: ValueNetwork,
    selector: ActionSelector,
    trainer: Trainer,
    gear_shifter: GearShifter,
    max_speed: f64,
    context: EpisodeContext,
    pending: Option<PendingTransition>,
    last_step: Option<TrainStep>,
    rejected_steps: u64,
    rng: R,
}

impl<R> QDriver<R>
where
    R: Rng,
{
    /// Creates a driver with freshly initialized weights.
    ///
    /// Weights come from `learning.seed` when configured, otherwise from `rng`.
    pub fn new(config: &DriverConfig, mut rng: R) -> Result<Self, ConfigError> {
        let network = match config.learning.seed {
            Some(seed) => ValueNetwork::with_seed(seed),
            None => ValueNetwork::random(&mut rng),
        };
        Self::with_network(config, network, rng)
    }

    /// Creates a driver around an existing network.
    pub fn with_network(
        config: &DriverConfig,
        network: ValueNetwork,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let DriverConfig {
            exploration,
            learning,
            control,
            gears,
        } = config;
        Ok(Self {
            network,
            selector: ActionSelector::new(exploration.min_temperature),
            trainer: Trainer::new(
                learning.blend_rate,
                learning.network_learning_rate,
                learning.momentum,
            ),
            gear_shifter: *gears,
            max_speed: control.max_speed,
            context: EpisodeContext::new(exploration.schedule()),
            pending: None,
            last_step: None,
            rejected_steps: 0,
            rng,
        })
    }

    #[must_use]
    pub fn context(&self) -> &EpisodeContext {
        &self.context
    }

    #[must_use]
    pub fn network(&self) -> &ValueNetwork {
        &self.network
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// The most recent accepted training step.
    #[must_use]
    pub fn last_step(&self) -> Option<&TrainStep> {
        self.last_step.as_ref()
    }

    /// Number of training steps rejected because they would corrupt the weights.
    #[must_use]
    pub fn rejected_steps(&self) -> u64 {
        self.rejected_steps
    }

    fn learn(&mut self, pending: &PendingTransition, sensors: &SensorSnapshot) {
        let previous_distance = self.context.last_distance();
        match self
            .trainer
            .train_step(&mut self.network, pending, previous_distance, sensors)
        {
            Ok(step) => {
                debug!(
                    "step {}: reward={} target={:.4} best_next={:.4} error={:.4}",
                    self.context.step(),
                    step.reward,
                    step.target,
                    step.best_next,
                    step.error
                );
                self.last_step = Some(step);
            }
            Err(err) => {
                self.rejected_steps += 1;
                warn!("step {}: training skipped: {err}", self.context.step());
            }
        }
    }

    /// Picks an action for `sensors` and returns it with the transition to train next tick.
    pub fn act(&mut self, sensors: &SensorSnapshot) -> (ActionCandidate, PendingTransition) {
        let table = QEstimateTable::evaluate(&self.network, sensors);
        let action = self.selector.select(
            &table,
            self.context.explore(),
            self.context.temperature(),
            &mut self.rng,
        );
        let pending = PendingTransition {
            state: state_encoder::encode(sensors, action),
            q_estimate: table.get(action),
        };
        (action, pending)
    }

    fn throttle(&self, speed: f64) -> f64 {
        if speed < self.max_speed { 1.0 } else { 0.0 }
    }
}

impl<R> Controller for QDriver<R>
where
    R: Rng,
{
    fn control(&mut self, sensors: &SensorSnapshot) -> Command {
        if let Some(pending) = self.pending.take() {
            self.learn(&pending, sensors);
        }
        self.context.record_distance(sensors.distance_raced());
        self.context.advance_step();

        let (action, pending) = self.act(sensors);
        self.pending = Some(pending);

        Command {
            steering: action.steering(),
            accelerate: self.throttle(sensors.speed()),
            gear: self.gear_shifter.next_gear(sensors.gear(), sensors.rpm()),
            restart: sensors.has_collided(),
        }
    }

    fn on_episode_reset(&mut self) {
        info!(
            "game {} over after {} steps: distance={:.1} best={:.1} temperature={:.5} explore={}",
            self.context.games_played() + 1,
            self.context.step(),
            self.context.last_distance(),
            self.context.best_distance(),
            self.context.temperature(),
            self.context.explore()
        );
        self.pending = None;
        self.context.start_next_episode();
    }

    fn on_shutdown(&mut self) {
        info!(
            "race abandoned after {} games, best distance {:.1}",
            self.context.games_played(),
            self.context.best_distance()
        );
        self.pending = None;
    }
}
