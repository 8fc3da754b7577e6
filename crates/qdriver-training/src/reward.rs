//! Reward signal derived from progress and collisions.

/// Reward when the car advanced since the previous tick.
pub const PROGRESS_REWARD: f64 = 1.0;

/// Reward when the car did not advance.
pub const STALL_REWARD: f64 = -1.0;

/// Reward whenever damage is present. Overrides the progress term.
pub const COLLISION_REWARD: f64 = -5.0;

/// Computes the reward for the transition ending in the current tick.
///
/// # Example
///
/// ```
/// use qdriver_training::reward::reward;
///
/// assert_eq!(reward(100.0, 110.0, 0.0), 1.0);
/// assert_eq!(reward(100.0, 95.0, 0.0), -1.0);
/// assert_eq!(reward(100.0, 110.0, 3.0), -5.0);
/// ```
#[must_use]
pub fn reward(previous_distance: f64, current_distance: f64, damage: f64) -> f64 {
    if damage > 0.0 {
        COLLISION_REWARD
    } else if current_distance > previous_distance {
        PROGRESS_REWARD
    } else {
        STALL_REWARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(reward(100.0, 110.0, 0.0), PROGRESS_REWARD);
    }

    #[test]
    fn test_no_progress() {
        assert_eq!(reward(100.0, 95.0, 0.0), STALL_REWARD);
        assert_eq!(reward(100.0, 100.0, 0.0), STALL_REWARD);
    }

    #[test]
    fn test_collision_overrides_progress() {
        assert_eq!(reward(100.0, 110.0, 3.0), COLLISION_REWARD);
        assert_eq!(reward(100.0, 90.0, 0.5), COLLISION_REWARD);
    }
}
