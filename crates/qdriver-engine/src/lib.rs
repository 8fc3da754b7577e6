//! Simulator-side types for the Q-learning race driver.
//!
//! This crate holds everything that sits on the simulator side of the control boundary:
//!
//! - [`core`] - Per-tick data exchanged with the simulator ([`SensorSnapshot`], [`Command`])
//!   and the deterministic [`GearShifter`]
//! - [`engine`] - The [`Controller`] harness trait and a built-in [`TrackSimulator`] that
//!   produces snapshots without an external racing simulator
//!
//! # Tick Protocol
//!
//! ```text
//! Simulator ──SensorSnapshot──▶ Controller::control ──Command──▶ Simulator
//!     │                                                              │
//!     └──────── restart requested ──▶ Controller::on_episode_reset ◀─┘
//! ```
//!
//! Exactly one `control` call runs at a time. The controller must finish all work for a
//! tick before returning its command.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a sensor snapshot does not carry enough track-edge readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("track-edge sensor sequence too short: expected at least {required} readings, got {actual}")]
pub struct MalformedSnapshotError {
    pub required: usize,
    pub actual: usize,
}
