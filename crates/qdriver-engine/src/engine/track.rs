use std::f64::consts::PI;

use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::{Command, MAX_GEAR, MAX_TRACK_EDGE_RANGE, SensorSnapshot, TRACK_EDGE_SENSOR_COUNT};

/// Beam angles (degrees, relative to the car heading, positive towards the left edge) of
/// the track-edge range finders.
pub const TRACK_EDGE_ANGLES_DEG: [f64; TRACK_EDGE_SENSOR_COUNT] = [
    -90.0, -75.0, -60.0, -45.0, -30.0, -20.0, -15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0,
    30.0, 45.0, 60.0, 75.0, 90.0,
];

/// Simulated time per tick.
pub const TICK_SECONDS: f64 = 0.02;

/// Reading reported by every range finder while the car is outside the track.
pub const OFF_TRACK_READING: f64 = -1.0;

const SEGMENT_COUNT: usize = 64;
const IDLE_RPM: f64 = 1000.0;
const REDLINE_RPM: f64 = 9000.0;
const DRAG_PER_SECOND: f64 = 0.02;
const MPS_TO_KMH: f64 = 3.6;

/// Engine RPM per m/s of road speed, indexed by gear (`0` = neutral).
const RPM_PER_MPS: [f64; 7] = [0.0, 600.0, 420.0, 310.0, 240.0, 190.0, 160.0];

/// Full-throttle acceleration (m/s²) at idle RPM, indexed by gear.
const GEAR_ACCELERATION: [f64; 7] = [0.0, 6.0, 4.5, 3.5, 2.8, 2.2, 1.8];

/// Geometry and sensing parameters of a [`TrackSimulator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackParams {
    /// Distance between the two track edges (meters).
    pub width: f64,
    /// Length of a constant-curvature track segment (meters).
    pub segment_length: f64,
    /// Largest absolute curvature of a segment (1/meters).
    pub max_curvature: f64,
    /// Heading change per second at full steering lock (radians).
    pub steering_rate: f64,
    /// Standard deviation of the Gaussian noise added to range finder readings (meters).
    pub sensor_noise: f64,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            width: 12.0,
            segment_length: 120.0,
            max_curvature: 0.004,
            steering_rate: 1.2,
            sensor_noise: 0.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct CarState {
    /// Offset from the track axis, positive towards the left edge.
    lateral: f64,
    /// Angle between car and track axis, positive towards the left edge.
    heading: f64,
    /// Road speed (m/s).
    speed: f64,
    gear: i32,
    damage: f64,
    distance: f64,
}

/// A looping corridor track with piecewise-constant curvature.
///
/// The track is generated once from the random source and reused across episodes;
/// [`reset`](TrackSimulator::reset) only puts the car back on the start line. Range finders
/// treat the track as locally straight: each beam reports the distance to the edge it
/// points at, clamped to [`MAX_TRACK_EDGE_RANGE`]. Leaving the track adds damage on every
/// tick spent outside and makes all range finders report [`OFF_TRACK_READING`].
#[derive(Debug, Clone)]
pub struct TrackSimulator {
    params: TrackParams,
    curvatures: Vec<f64>,
    noise: Option<Normal<f64>>,
    rng: Pcg64Mcg,
    car: CarState,
}

impl TrackSimulator {
    /// Generates a new track from the given random source.
    pub fn new<R>(params: TrackParams, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let curvatures = (0..SEGMENT_COUNT)
            .map(|_| rng.random_range(-1.0..=1.0) * params.max_curvature)
            .collect();
        let noise = (params.sensor_noise > 0.0)
            .then(|| Normal::new(0.0, params.sensor_noise).ok())
            .flatten();
        Self {
            params,
            curvatures,
            noise,
            rng: Pcg64Mcg::seed_from_u64(rng.random()),
            car: CarState::default(),
        }
    }

    #[must_use]
    pub fn with_seed(params: TrackParams, seed: u64) -> Self {
        Self::new(params, &mut Pcg64Mcg::seed_from_u64(seed))
    }

    #[must_use]
    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    /// Puts the car back on the start line, undamaged and in neutral.
    pub fn reset(&mut self) {
        log::debug!(
            "track reset after {:.1} m (damage {})",
            self.car.distance,
            self.car.damage
        );
        self.car = CarState::default();
    }

    /// Reads all sensors for the current tick.
    pub fn observe(&mut self) -> SensorSnapshot {
        let off_track = self.is_off_track();
        let mut edges: [f64; TRACK_EDGE_SENSOR_COUNT] = std::array::from_fn(|i| {
            if off_track {
                OFF_TRACK_READING
            } else {
                self.edge_distance(TRACK_EDGE_ANGLES_DEG[i].to_radians())
            }
        });
        if let (false, Some(noise)) = (off_track, self.noise) {
            for edge in &mut edges {
                *edge = (*edge + noise.sample(&mut self.rng)).clamp(0.0, MAX_TRACK_EDGE_RANGE);
            }
        }

        SensorSnapshot::from_track_edges(edges)
            .with_speed(self.car.speed * MPS_TO_KMH)
            .with_rpm(self.rpm())
            .with_gear(self.car.gear)
            .with_damage(self.car.damage)
            .with_distance_raced(self.car.distance)
    }

    /// Advances the simulation by one tick.
    ///
    /// The restart flag is ignored here; the harness decides when to call
    /// [`reset`](TrackSimulator::reset).
    pub fn step(&mut self, command: &Command) {
        let dt = TICK_SECONDS;
        self.car.gear = command.gear.clamp(0, MAX_GEAR);

        let throttle = command.accelerate.clamp(0.0, 1.0);
        let headroom = (1.0 - self.rpm() / REDLINE_RPM).max(0.0);
        let acceleration = throttle * GEAR_ACCELERATION[gear_index(self.car.gear)] * headroom
            - DRAG_PER_SECOND * self.car.speed;
        self.car.speed = (self.car.speed + acceleration * dt).max(0.0);

        let curvature = self.curvature_at(self.car.distance);
        let turn = command.steering.clamp(-1.0, 1.0) * self.params.steering_rate
            - curvature * self.car.speed;
        self.car.heading = wrap_angle(self.car.heading + turn * dt);

        self.car.lateral += self.car.speed * self.car.heading.sin() * dt;
        self.car.distance += self.car.speed * self.car.heading.cos() * dt;

        if self.is_off_track() {
            self.car.damage += 1.0;
        }
    }

    fn is_off_track(&self) -> bool {
        self.car.lateral.abs() > self.params.width / 2.0
    }

    fn rpm(&self) -> f64 {
        (IDLE_RPM + self.car.speed * RPM_PER_MPS[gear_index(self.car.gear)]).min(REDLINE_RPM)
    }

    fn edge_distance(&self, beam: f64) -> f64 {
        let half_width = self.params.width / 2.0;
        let sin = (self.car.heading + beam).sin();
        let range = if sin > f64::EPSILON {
            (half_width - self.car.lateral) / sin
        } else if sin < -f64::EPSILON {
            (half_width + self.car.lateral) / -sin
        } else {
            MAX_TRACK_EDGE_RANGE
        };
        range.clamp(0.0, MAX_TRACK_EDGE_RANGE)
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn curvature_at(&self, distance: f64) -> f64 {
        let segment = (distance / self.params.segment_length).floor();
        let index = segment.rem_euclid(self.curvatures.len() as f64) as usize;
        self.curvatures.get(index).copied().unwrap_or_default()
    }
}

fn gear_index(gear: i32) -> usize {
    usize::try_from(gear.clamp(0, MAX_GEAR)).unwrap_or_default()
}

fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_throttle(gear: i32, steering: f64) -> Command {
        Command {
            steering,
            accelerate: 1.0,
            gear,
            restart: false,
        }
    }

    #[test]
    fn test_centered_car_sees_symmetric_edges() {
        let mut sim = TrackSimulator::with_seed(TrackParams::default(), 1);
        let edges = *sim.observe().track_edges();
        for i in 0..TRACK_EDGE_SENSOR_COUNT {
            let mirrored = edges[TRACK_EDGE_SENSOR_COUNT - 1 - i];
            assert!((edges[i] - mirrored).abs() < 1e-9, "beam {i}");
        }
        assert!((edges[0] - 6.0).abs() < 1e-9);
        assert_eq!(edges[9], MAX_TRACK_EDGE_RANGE);
    }

    #[test]
    fn test_throttle_moves_car_forward() {
        let mut sim = TrackSimulator::with_seed(TrackParams::default(), 2);
        for _ in 0..100 {
            sim.step(&full_throttle(1, 0.0));
        }
        let snapshot = sim.observe();
        assert!(snapshot.speed() > 0.0);
        assert!(snapshot.distance_raced() > 0.0);
        assert!(snapshot.rpm() > IDLE_RPM);
        assert_eq!(snapshot.gear(), 1);
    }

    #[test]
    fn test_leaving_track_causes_damage() {
        let mut sim = TrackSimulator::with_seed(TrackParams::default(), 3);
        let mut snapshot = sim.observe();
        for _ in 0..5000 {
            sim.step(&full_throttle(1, 1.0));
            snapshot = sim.observe();
            if snapshot.has_collided() {
                break;
            }
        }
        assert!(snapshot.has_collided());
        assert!(
            snapshot
                .track_edges()
                .iter()
                .all(|&e| e == OFF_TRACK_READING)
        );
    }

    #[test]
    fn test_reset_restores_start_state() {
        let mut sim = TrackSimulator::with_seed(TrackParams::default(), 4);
        let start = sim.observe();
        for _ in 0..200 {
            sim.step(&full_throttle(2, 0.3));
        }
        sim.reset();
        assert_eq!(sim.observe(), start);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let params = TrackParams {
            sensor_noise: 0.5,
            ..TrackParams::default()
        };
        let mut sim1 = TrackSimulator::with_seed(params, 99);
        let mut sim2 = TrackSimulator::with_seed(params, 99);
        for tick in 0..300 {
            let command = full_throttle(1, if tick % 50 < 25 { 0.25 } else { -0.25 });
            sim1.step(&command);
            sim2.step(&command);
            assert_eq!(sim1.observe(), sim2.observe());
        }
    }

    #[test]
    fn test_noisy_readings_stay_in_range() {
        let params = TrackParams {
            sensor_noise: 50.0,
            ..TrackParams::default()
        };
        let mut sim = TrackSimulator::with_seed(params, 5);
        for _ in 0..50 {
            let snapshot = sim.observe();
            assert!(
                snapshot
                    .track_edges()
                    .iter()
                    .all(|e| (0.0..=MAX_TRACK_EDGE_RANGE).contains(e))
            );
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-12);
    }
}
