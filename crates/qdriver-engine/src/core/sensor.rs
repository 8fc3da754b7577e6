use serde::{Deserialize, Serialize};

use crate::MalformedSnapshotError;

/// Number of track-edge range finders carried by every snapshot.
pub const TRACK_EDGE_SENSOR_COUNT: usize = 19;

/// Maximum distance (meters) reported by a track-edge range finder.
pub const MAX_TRACK_EDGE_RANGE: f64 = 200.0;

/// Sensor readings delivered by the simulator for a single tick.
///
/// The track-edge readings are stored in a fixed-size array, so a constructed snapshot
/// always holds exactly [`TRACK_EDGE_SENSOR_COUNT`] values and index lookups cannot go
/// out of range. Construction from a slice fails with [`MalformedSnapshotError`] when
/// fewer readings are supplied; extra trailing readings are ignored.
///
/// # Example
///
/// ```
/// use qdriver_engine::SensorSnapshot;
///
/// let edges = [50.0; 19];
/// let snapshot = SensorSnapshot::new(&edges)
///     .unwrap()
///     .with_speed(42.0)
///     .with_distance_raced(120.0);
///
/// assert_eq!(snapshot.speed(), 42.0);
/// assert_eq!(snapshot.track_edges()[9], 50.0);
///
/// assert!(SensorSnapshot::new(&[1.0; 10]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    track_edges: [f64; TRACK_EDGE_SENSOR_COUNT],
    speed: f64,
    rpm: f64,
    gear: i32,
    damage: f64,
    distance_raced: f64,
}

impl SensorSnapshot {
    /// Creates a snapshot from track-edge readings with all other readings at zero.
    pub fn new(track_edges: &[f64]) -> Result<Self, MalformedSnapshotError> {
        let track_edges = track_edges
            .get(..TRACK_EDGE_SENSOR_COUNT)
            .and_then(|edges| <[f64; TRACK_EDGE_SENSOR_COUNT]>::try_from(edges).ok())
            .ok_or(MalformedSnapshotError {
                required: TRACK_EDGE_SENSOR_COUNT,
                actual: track_edges.len(),
            })?;
        Ok(Self::from_track_edges(track_edges))
    }

    #[must_use]
    pub const fn from_track_edges(track_edges: [f64; TRACK_EDGE_SENSOR_COUNT]) -> Self {
        Self {
            track_edges,
            speed: 0.0,
            rpm: 0.0,
            gear: 0,
            damage: 0.0,
            distance_raced: 0.0,
        }
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn with_rpm(mut self, rpm: f64) -> Self {
        self.rpm = rpm;
        self
    }

    #[must_use]
    pub const fn with_gear(mut self, gear: i32) -> Self {
        self.gear = gear;
        self
    }

    #[must_use]
    pub const fn with_damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub const fn with_distance_raced(mut self, distance_raced: f64) -> Self {
        self.distance_raced = distance_raced;
        self
    }

    /// Returns the track-edge range finder readings, ordered from one flank to the other.
    #[must_use]
    pub const fn track_edges(&self) -> &[f64; TRACK_EDGE_SENSOR_COUNT] {
        &self.track_edges
    }

    /// Returns the car speed in km/h.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub const fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Returns the current gear (`-1` reverse, `0` neutral, `1..` forward gears).
    #[must_use]
    pub const fn gear(&self) -> i32 {
        self.gear
    }

    /// Returns the cumulative damage. Any positive value means the car has collided.
    #[must_use]
    pub const fn damage(&self) -> f64 {
        self.damage
    }

    #[must_use]
    pub const fn distance_raced(&self) -> f64 {
        self.distance_raced
    }

    #[must_use]
    pub fn has_collided(&self) -> bool {
        self.damage > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sequence_is_rejected() {
        let err = SensorSnapshot::new(&[10.0; 18]).unwrap_err();
        assert_eq!(
            err,
            MalformedSnapshotError {
                required: TRACK_EDGE_SENSOR_COUNT,
                actual: 18
            }
        );
        assert!(err.to_string().contains("got 18"));
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        assert!(SensorSnapshot::new(&[]).is_err());
    }

    #[test]
    fn test_extra_readings_are_ignored() {
        let edges: Vec<f64> = (0..25).map(f64::from).collect();
        let snapshot = SensorSnapshot::new(&edges).unwrap();
        assert_eq!(snapshot.track_edges()[0], 0.0);
        assert_eq!(snapshot.track_edges()[18], 18.0);
    }

    #[test]
    fn test_builder_sets_readings() {
        let snapshot = SensorSnapshot::new(&[1.0; 19])
            .unwrap()
            .with_speed(55.0)
            .with_rpm(4200.0)
            .with_gear(3)
            .with_damage(2.0)
            .with_distance_raced(310.5);
        assert_eq!(snapshot.speed(), 55.0);
        assert_eq!(snapshot.rpm(), 4200.0);
        assert_eq!(snapshot.gear(), 3);
        assert_eq!(snapshot.damage(), 2.0);
        assert_eq!(snapshot.distance_raced(), 310.5);
        assert!(snapshot.has_collided());
    }

    #[test]
    fn test_serde_format() {
        let snapshot = SensorSnapshot::new(&[3.0; 19]).unwrap().with_gear(2);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"gear\":2"));
        let back: SensorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
