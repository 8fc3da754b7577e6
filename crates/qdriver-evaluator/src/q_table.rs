//! Q-estimates for every steering candidate on one snapshot.

use std::array;

use qdriver_engine::SensorSnapshot;

use crate::{
    action::{ACTION_COUNT, ActionCandidate},
    network::ValueNetwork,
    state_encoder,
};

/// Q-estimates for all candidates, stored in action order.
///
/// # Example
///
/// ```
/// use qdriver_evaluator::{action::ActionCandidate, q_table::QEstimateTable};
///
/// let table = QEstimateTable::from_estimates([0.5, 0.9, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0]);
/// let (best, q) = table.best();
/// assert_eq!(best, ActionCandidate::ALL[1]);
/// assert_eq!(q, 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QEstimateTable {
    estimates: [f64; ACTION_COUNT],
}

impl QEstimateTable {
    /// Evaluates every candidate action on `sensors` with the current network weights.
    #[must_use]
    pub fn evaluate(network: &ValueNetwork, sensors: &SensorSnapshot) -> Self {
        let estimates = ActionCandidate::ALL.map(|action| {
            let state = state_encoder::encode(sensors, action);
            network.compute(&state)
        });
        Self { estimates }
    }

    #[must_use]
    pub const fn from_estimates(estimates: [f64; ACTION_COUNT]) -> Self {
        Self { estimates }
    }

    #[must_use]
    pub const fn get(&self, action: ActionCandidate) -> f64 {
        self.estimates[action.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionCandidate, f64)> + '_ {
        ActionCandidate::ALL.into_iter().zip(self.estimates)
    }

    /// Returns the candidate with the strictly greatest estimate.
    ///
    /// Ties go to the candidate seen first in action order: a later equal value never
    /// replaces the current best.
    #[must_use]
    pub fn best(&self) -> (ActionCandidate, f64) {
        let mut best = (ActionCandidate::ALL[0], self.estimates[0]);
        for (action, q) in self.iter().skip(1) {
            if q > best.1 {
                best = (action, q);
            }
        }
        best
    }

    /// Returns the greatest estimate over all candidates.
    #[must_use]
    pub fn max_estimate(&self) -> f64 {
        self.best().1
    }

    /// Returns Boltzmann (softmax) selection probabilities `exp(Qᵢ/T) / Σⱼ exp(Qⱼ/T)`.
    ///
    /// The exponent is shifted by the maximum estimate before exponentiation, which leaves
    /// the probabilities unchanged and keeps every weight in `(0, 1]`.
    /// `temperature` must be strictly positive.
    #[must_use]
    pub fn boltzmann_probabilities(&self, temperature: f64) -> [f64; ACTION_COUNT] {
        let max = self.max_estimate();
        let weights: [f64; ACTION_COUNT] =
            array::from_fn(|i| ((self.estimates[i] - max) / temperature).exp());
        let total: f64 = weights.iter().sum();
        weights.map(|w| w / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_prefers_first_of_equal_values() {
        let table =
            QEstimateTable::from_estimates([0.5, 0.9, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(table.best().0.index(), 1);

        let flat = QEstimateTable::from_estimates([0.3; ACTION_COUNT]);
        assert_eq!(flat.best().0, ActionCandidate::ALL[0]);
    }

    #[test]
    fn test_max_estimate() {
        let table =
            QEstimateTable::from_estimates([-0.5, -0.2, -0.9, -0.1, -0.4, -0.3, -0.8, -0.6, -0.7]);
        assert_eq!(table.max_estimate(), -0.1);
    }

    #[test]
    fn test_boltzmann_probabilities_sum_to_one() {
        let table =
            QEstimateTable::from_estimates([0.2, -0.4, 0.9, 0.0, 0.1, -1.0, 0.5, 0.3, -0.2]);
        for temperature in [1e-3, 0.01, 0.1, 1.0, 10.0, 1000.0] {
            let probs = table.boltzmann_probabilities(temperature);
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "temperature {temperature}");
            assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_boltzmann_matches_unshifted_formula() {
        let estimates = [0.2, -0.4, 0.9, 0.0, 0.1, -1.0, 0.5, 0.3, -0.2];
        let table = QEstimateTable::from_estimates(estimates);
        let temperature = 0.7;
        let total: f64 = estimates.iter().map(|q| (q / temperature).exp()).sum();
        for (p, q) in table.boltzmann_probabilities(temperature).iter().zip(estimates) {
            assert!((p - (q / temperature).exp() / total).abs() < 1e-12);
        }
    }

    #[test]
    fn test_high_temperature_is_nearly_uniform() {
        let table =
            QEstimateTable::from_estimates([0.2, -0.4, 0.9, 0.0, 0.1, -1.0, 0.5, 0.3, -0.2]);
        #[expect(clippy::cast_precision_loss)]
        let uniform = 1.0 / ACTION_COUNT as f64;
        for p in table.boltzmann_probabilities(1e6) {
            assert!((p - uniform).abs() < 1e-5);
        }
    }

    #[test]
    fn test_evaluate_uses_every_action() {
        let network = ValueNetwork::with_seed(11);
        let sensors = SensorSnapshot::new(&[30.0; 19]).unwrap();
        let table = QEstimateTable::evaluate(&network, &sensors);
        for (action, q) in table.iter() {
            let expected = network.compute(&state_encoder::encode(&sensors, action));
            assert_eq!(q.to_bits(), expected.to_bits());
        }
    }
}
