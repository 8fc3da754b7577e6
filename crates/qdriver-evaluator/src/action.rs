//! The fixed set of discrete steering actions.

use std::fmt;

/// Number of steering candidates.
pub const ACTION_COUNT: usize = 9;

/// Steering values of the candidates, in action order.
pub const STEERING_VALUES: [f64; ACTION_COUNT] =
    [-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0];

/// One of the [`ACTION_COUNT`] discrete steering candidates.
///
/// Candidates are identified by their position in the fixed action order, which is also
/// the tie-breaking order for action selection.
///
/// # Example
///
/// ```
/// use qdriver_evaluator::action::ActionCandidate;
///
/// assert_eq!(ActionCandidate::STRAIGHT.steering(), 0.0);
/// assert_eq!(ActionCandidate::ALL[0].steering(), -1.0);
/// assert_eq!(ActionCandidate::new(8).map(|a| a.steering()), Some(1.0));
/// assert!(ActionCandidate::new(9).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionCandidate(usize);

impl ActionCandidate {
    /// All candidates in action order.
    pub const ALL: [Self; ACTION_COUNT] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
    ];

    /// The zero-steering candidate.
    pub const STRAIGHT: Self = Self(4);

    /// The last candidate in action order.
    pub const LAST: Self = Self(ACTION_COUNT - 1);

    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < ACTION_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the position of this candidate in action order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn steering(self) -> f64 {
        STEERING_VALUES[self.0]
    }
}

impl fmt::Display for ActionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.steering())
    }
}
