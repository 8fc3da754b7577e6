//! Exploration vs. exploitation: choosing a steering action from Q-estimates.
//!
//! # Policies
//!
//! - **Exploit** - The candidate with the strictly greatest estimate, ties broken by action
//!   order ([`QEstimateTable::best`]).
//! - **Explore** - Boltzmann sampling: draw `u ∈ [0, 1)`, walk the candidates in action
//!   order accumulating `pᵢ = exp(Qᵢ/T) / Σⱼ exp(Qⱼ/T)`, and pick the first candidate whose
//!   running sum reaches `u`. If rounding leaves the final sum just below `u`, the last
//!   candidate is picked.
//!
//! Exploration at a temperature below the selector's floor falls back to exploitation.
//!
//! The random source is always injected, so selection is reproducible with a seeded
//! generator.

use rand::Rng;

use crate::{action::ActionCandidate, q_table::QEstimateTable};

/// Default temperature floor for Boltzmann sampling.
pub const DEFAULT_MIN_TEMPERATURE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSelector {
    min_temperature: f64,
}

impl Default for ActionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TEMPERATURE)
    }
}

impl ActionSelector {
    #[must_use]
    pub const fn new(min_temperature: f64) -> Self {
        Self { min_temperature }
    }

    #[must_use]
    pub const fn min_temperature(&self) -> f64 {
        self.min_temperature
    }

    /// Selects an action, sampling when `explore` is set and the temperature is usable.
    pub fn select<R>(
        &self,
        table: &QEstimateTable,
        explore: bool,
        temperature: f64,
        rng: &mut R,
    ) -> ActionCandidate
    where
        R: Rng + ?Sized,
    {
        if explore && self.can_explore(temperature) {
            let draw: f64 = rng.random();
            sample_with_draw(table, temperature, draw)
        } else {
            table.best().0
        }
    }

    fn can_explore(&self, temperature: f64) -> bool {
        temperature.is_finite() && temperature >= self.min_temperature
    }
}

/// Boltzmann sampling with an explicit uniform draw `u ∈ [0, 1)`.
#[must_use]
pub fn sample_with_draw(table: &QEstimateTable, temperature: f64, draw: f64) -> ActionCandidate {
    let probabilities = table.boltzmann_probabilities(temperature);
    let mut cumulative = 0.0;
    for (action, p) in ActionCandidate::ALL.into_iter().zip(probabilities) {
        cumulative += p;
        if cumulative >= draw {
            return action;
        }
    }
    ActionCandidate::LAST
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::action::ACTION_COUNT;

    fn sample_table() -> QEstimateTable {
        QEstimateTable::from_estimates([0.5, 0.9, 0.9, 0.1, -0.3, 0.0, 0.2, -0.8, 0.4])
    }

    #[test]
    fn test_exploit_picks_first_maximum() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let selector = ActionSelector::default();
        for _ in 0..10 {
            let action = selector.select(&sample_table(), false, 1.0, &mut rng);
            assert_eq!(action.index(), 1);
        }
    }

    #[test]
    fn test_explore_below_floor_exploits() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let selector = ActionSelector::new(1e-3);
        for temperature in [0.0, -1.0, 1e-4, f64::NAN] {
            let action = selector.select(&sample_table(), true, temperature, &mut rng);
            assert_eq!(action.index(), 1);
        }
    }

    #[test]
    fn test_draw_walks_cumulative_probabilities() {
        let table = QEstimateTable::from_estimates([0.0; ACTION_COUNT]);
        // uniform: each candidate owns a 1/9 slice
        assert_eq!(sample_with_draw(&table, 1.0, 0.0).index(), 0);
        assert_eq!(sample_with_draw(&table, 1.0, 0.05).index(), 0);
        assert_eq!(sample_with_draw(&table, 1.0, 0.15).index(), 1);
        assert_eq!(sample_with_draw(&table, 1.0, 0.5).index(), 4);
        assert_eq!(sample_with_draw(&table, 1.0, 0.95).index(), 8);
    }

    #[test]
    fn test_draw_above_rounded_total_falls_back_to_last() {
        let table = sample_table();
        assert_eq!(sample_with_draw(&table, 0.5, 1.0 + 1e-9), ActionCandidate::LAST);
    }

    #[test]
    fn test_every_draw_selects_a_candidate() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let table = sample_table();
        for temperature in [0.01, 0.1, 1.0, 100.0] {
            for _ in 0..1000 {
                let draw: f64 = rng.random();
                let action = sample_with_draw(&table, temperature, draw);
                assert!(action.index() < ACTION_COUNT);
            }
        }
    }

    #[test]
    fn test_sampling_frequencies_follow_probabilities() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let selector = ActionSelector::default();
        let table = sample_table();
        let temperature = 0.5;
        let probabilities = table.boltzmann_probabilities(temperature);

        let draws = 20_000;
        let mut counts = [0_u32; ACTION_COUNT];
        for _ in 0..draws {
            counts[selector.select(&table, true, temperature, &mut rng).index()] += 1;
        }
        for (count, p) in counts.iter().zip(probabilities) {
            let frequency = f64::from(*count) / f64::from(draws);
            assert!((frequency - p).abs() < 0.02, "{frequency} vs {p}");
        }
    }

    #[test]
    fn test_low_temperature_sampling_is_greedy() {
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let selector = ActionSelector::default();
        let table = QEstimateTable::from_estimates([0.1, 0.2, 0.3, 0.9, 0.2, 0.1, 0.0, 0.0, 0.0]);
        for _ in 0..100 {
            assert_eq!(selector.select(&table, true, 1e-3, &mut rng).index(), 3);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let selector = ActionSelector::default();
        let table = sample_table();
        let mut rng1 = Pcg64Mcg::seed_from_u64(5);
        let mut rng2 = Pcg64Mcg::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(
                selector.select(&table, true, 1.0, &mut rng1),
                selector.select(&table, true, 1.0, &mut rng2)
            );
        }
    }
}
