//! Data exchanged with the simulator on every tick.
//!
//! - [`SensorSnapshot`] - Validated sensor readings for one tick
//! - [`Command`] - Driving command returned to the simulator
//! - [`GearShifter`] - RPM-threshold gear selection

pub use self::{command::*, gear::*, sensor::*};

mod command;
mod gear;
mod sensor;
