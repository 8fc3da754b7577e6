//! Simulation harness.
//!
//! - [`Controller`] - The per-tick interface a driving agent implements
//! - [`TrackSimulator`] - Deterministic corridor track producing [`SensorSnapshot`]s
//!
//! # Example
//!
//! ```
//! use qdriver_engine::{Command, TrackParams, TrackSimulator};
//!
//! let mut sim = TrackSimulator::with_seed(TrackParams::default(), 7);
//! let snapshot = sim.observe();
//! assert!(!snapshot.has_collided());
//!
//! sim.step(&Command { steering: 0.0, accelerate: 1.0, gear: 1, restart: false });
//! assert!(sim.observe().speed() > 0.0);
//! ```
//!
//! [`SensorSnapshot`]: crate::SensorSnapshot

pub use self::{controller::*, track::*};

mod controller;
mod track;
