//! Feed-forward value network used as the Q-function approximator.
//!
//! # Topology
//!
//! ```text
//! 8 inputs ──▶ 22 tanh hidden units (+bias) ──▶ 1 tanh output unit (+bias)
//! ```
//!
//! Layers are fully connected. Weights are drawn uniformly from `[-1.0, 1.0]` at
//! construction.
//!
//! # Training
//!
//! [`ValueNetwork::train`] performs exactly one backpropagation step on a single
//! (state, target) pair, minimizing `½·(target − output)²`. Every weight moves by
//!
//! ```text
//! Δw(t) = learning_rate · gradient + momentum · Δw(t−1)
//! ```
//!
//! where `Δw(t−1)` is the change applied to the same weight by the previous step.
//! [`ValueNetwork::compute`] never mutates; `train` is the only mutating operation.
//!
//! A step that would leave any weight non-finite is rejected with [`TrainError`] and the
//! network is left exactly as it was.

use std::iter;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::state_encoder::{STATE_LEN, StateVector};

/// Number of hidden units.
pub const HIDDEN_UNITS: usize = 22;

const INITIAL_WEIGHT_RANGE: f64 = 1.0;

/// Error returned when a training step is rejected.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainError {
    #[display("training target is not finite: {target}")]
    NonFiniteTarget { target: f64 },
    #[display("training step would make network weights non-finite")]
    Diverged,
}

/// A fully connected tanh layer with a bias unit.
#[derive(Debug, Clone, PartialEq)]
struct DenseLayer {
    inputs: usize,
    outputs: usize,
    /// Row-major: each row holds `inputs` weights followed by the bias weight.
    weights: Vec<f64>,
    /// Weight changes applied by the previous training step (momentum memory).
    previous_deltas: Vec<f64>,
}

impl DenseLayer {
    fn random<R>(inputs: usize, outputs: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let len = outputs * (inputs + 1);
        let weights = (0..len)
            .map(|_| rng.random_range(-INITIAL_WEIGHT_RANGE..=INITIAL_WEIGHT_RANGE))
            .collect();
        Self {
            inputs,
            outputs,
            weights,
            previous_deltas: vec![0.0; len],
        }
    }

    fn row(&self, unit: usize) -> &[f64] {
        let width = self.inputs + 1;
        &self.weights[unit * width..(unit + 1) * width]
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.inputs);
        (0..self.outputs)
            .map(|unit| {
                let (weights, bias) = self.row(unit).split_at(self.inputs);
                let sum: f64 = iter::zip(weights, input).map(|(w, x)| w * x).sum();
                (sum + bias[0]).tanh()
            })
            .collect()
    }

    /// Moves every weight along its gradient, `unit_gradients[u] · input[k]`, with momentum.
    fn apply_gradients(
        &mut self,
        input: &[f64],
        unit_gradients: &[f64],
        learning_rate: f64,
        momentum: f64,
    ) {
        let width = self.inputs + 1;
        for (unit, gradient) in unit_gradients.iter().enumerate() {
            let activations = input.iter().chain(iter::once(&1.0));
            for (k, x) in activations.enumerate() {
                let i = unit * width + k;
                let delta = learning_rate * gradient * x + momentum * self.previous_deltas[i];
                self.weights[i] += delta;
                self.previous_deltas[i] = delta;
            }
        }
    }

    fn is_finite(&self) -> bool {
        self.weights.iter().all(|w| w.is_finite())
    }
}

/// The Q-value approximator: `state vector → scalar estimate in (-1, 1)`.
///
/// # Example
///
/// ```
/// use qdriver_evaluator::{network::ValueNetwork, state_encoder::StateVector};
///
/// let mut network = ValueNetwork::with_seed(7);
/// let state = StateVector::from_components([0.1, 0.2, 0.3, 0.9, 0.3, 0.2, 0.1, 0.0]);
///
/// let before = (network.compute(&state) - 0.5).abs();
/// for _ in 0..20 {
///     network.train(&state, 0.5, 0.02, 0.0).unwrap();
/// }
/// let after = (network.compute(&state) - 0.5).abs();
/// assert!(after < before);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNetwork {
    hidden: DenseLayer,
    output: DenseLayer,
}

impl ValueNetwork {
    /// Creates a network with weights drawn from the given random source.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            hidden: DenseLayer::random(STATE_LEN, HIDDEN_UNITS, rng),
            output: DenseLayer::random(HIDDEN_UNITS, 1, rng),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::random(&mut Pcg64Mcg::seed_from_u64(seed))
    }

    /// Forward pass. Does not mutate the network.
    #[must_use]
    pub fn compute(&self, state: &StateVector) -> f64 {
        let hidden = self.hidden.forward(state.components());
        self.output.forward(&hidden)[0]
    }

    /// Performs one gradient-descent step towards `target` for `state`.
    ///
    /// Returns the output error (`target − output`) measured before the step.
    pub fn train(
        &mut self,
        state: &StateVector,
        target: f64,
        learning_rate: f64,
        momentum: f64,
    ) -> Result<f64, TrainError> {
        if !target.is_finite() {
            return Err(TrainError::NonFiniteTarget { target });
        }

        let input = state.components();
        let hidden = self.hidden.forward(input);
        let output = self.output.forward(&hidden)[0];
        let error = target - output;

        // tanh'(net) = 1 − y²
        let output_gradient = error * (1.0 - output * output);
        let output_weights = self.output.row(0);
        let hidden_gradients: Vec<f64> = iter::zip(&hidden, output_weights)
            .map(|(h, w)| (1.0 - h * h) * output_gradient * w)
            .collect();

        let mut next = self.clone();
        next.output
            .apply_gradients(&hidden, &[output_gradient], learning_rate, momentum);
        next.hidden
            .apply_gradients(input, &hidden_gradients, learning_rate, momentum);
        if !(next.hidden.is_finite() && next.output.is_finite()) {
            return Err(TrainError::Diverged);
        }

        *self = next;
        Ok(error)
    }
}
