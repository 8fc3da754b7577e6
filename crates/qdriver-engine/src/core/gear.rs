use serde::{Deserialize, Serialize};

/// Highest forward gear.
pub const MAX_GEAR: i32 = 6;

const GEAR_COUNT: usize = 6;

/// Upshift thresholds (RPM) indexed by `gear - 1`.
///
/// The top gear never shifts up, so its entry is unused.
pub const DEFAULT_UPSHIFT_RPM: [f64; GEAR_COUNT] = [7500.0, 7500.0, 7500.0, 7500.0, 7500.0, 0.0];

/// Downshift thresholds (RPM) indexed by `gear - 1`.
///
/// First gear never shifts down, so its entry is unused.
pub const DEFAULT_DOWNSHIFT_RPM: [f64; GEAR_COUNT] = [0.0, 2500.0, 3000.0, 3000.0, 3500.0, 3500.0];

/// Table-driven gear selection from engine RPM.
///
/// Rules, applied in order:
///
/// 1. Neutral or reverse (`gear < 1`) always selects first gear
/// 2. Below top gear, `rpm >= upshift[gear]` shifts up
/// 3. Above first gear, `rpm <= downshift[gear]` shifts down
/// 4. Otherwise the gear is kept
///
/// Gears reported above [`MAX_GEAR`] are treated as top gear.
///
/// # Example
///
/// ```
/// use qdriver_engine::GearShifter;
///
/// let shifter = GearShifter::default();
/// assert_eq!(shifter.next_gear(0, 9000.0), 1);
/// assert_eq!(shifter.next_gear(1, 7500.0), 2);
/// assert_eq!(shifter.next_gear(4, 2900.0), 3);
/// assert_eq!(shifter.next_gear(4, 5000.0), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearShifter {
    upshift_rpm: [f64; GEAR_COUNT],
    downshift_rpm: [f64; GEAR_COUNT],
}

impl Default for GearShifter {
    fn default() -> Self {
        Self::new(DEFAULT_UPSHIFT_RPM, DEFAULT_DOWNSHIFT_RPM)
    }
}

impl GearShifter {
    #[must_use]
    pub const fn new(upshift_rpm: [f64; GEAR_COUNT], downshift_rpm: [f64; GEAR_COUNT]) -> Self {
        Self {
            upshift_rpm,
            downshift_rpm,
        }
    }

    /// Returns the upshift threshold for a forward gear, or `None` outside `1..=MAX_GEAR`.
    #[must_use]
    pub fn upshift_rpm(&self, gear: i32) -> Option<f64> {
        table_index(gear).map(|i| self.upshift_rpm[i])
    }

    /// Returns the downshift threshold for a forward gear, or `None` outside `1..=MAX_GEAR`.
    #[must_use]
    pub fn downshift_rpm(&self, gear: i32) -> Option<f64> {
        table_index(gear).map(|i| self.downshift_rpm[i])
    }

    #[must_use]
    pub fn next_gear(&self, gear: i32, rpm: f64) -> i32 {
        if gear < 1 {
            return 1;
        }
        let gear = gear.min(MAX_GEAR);
        let Some(index) = table_index(gear) else {
            return gear;
        };
        if gear < MAX_GEAR && rpm >= self.upshift_rpm[index] {
            gear + 1
        } else if gear > 1 && rpm <= self.downshift_rpm[index] {
            gear - 1
        } else {
            gear
        }
    }

    /// Returns the first gear whose thresholds would oscillate (upshift at or below
    /// downshift), ignoring the unused top-gear upshift and first-gear downshift entries.
    #[must_use]
    pub fn first_inverted_gear(&self) -> Option<i32> {
        (2..MAX_GEAR).find(|&gear| {
            table_index(gear).is_some_and(|i| self.upshift_rpm[i] <= self.downshift_rpm[i])
        })
    }
}

fn table_index(gear: i32) -> Option<usize> {
    if (1..=MAX_GEAR).contains(&gear) {
        usize::try_from(gear - 1).ok()
    } else {
        None
    }
}
