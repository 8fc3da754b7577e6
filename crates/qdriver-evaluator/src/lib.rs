//! Action evaluation for the Q-learning race driver.
//!
//! This crate turns a [`SensorSnapshot`](qdriver_engine::SensorSnapshot) into a steering
//! decision:
//!
//! 1. **State Encoding** ([`state_encoder`]) - Builds an 8-component feature vector from
//!    seven track-edge readings and a candidate steering value.
//!
//! 2. **Value Estimation** ([`network`]) - A small feed-forward network approximates the
//!    Q-value of each (state, action) pair and is trained online, one step per tick.
//!
//! 3. **Estimate Table** ([`q_table`]) - Q-estimates for all nine [`action`] candidates on
//!    the current snapshot, in the fixed action order.
//!
//! 4. **Action Selection** ([`action_selector`]) - Arg-max (exploit) or Boltzmann sampling
//!    (explore) over the estimate table.
//!
//! # Architecture
//!
//! ```text
//! SensorSnapshot ──▶ encode(·, action) ──▶ ValueNetwork::compute ──▶ QEstimateTable
//!                      (for each of 9 actions)                            │
//!                                                                         ▼
//!                                                              ActionSelector::select
//! ```
//!
//! # Example
//!
//! ```
//! use qdriver_engine::SensorSnapshot;
//! use qdriver_evaluator::{
//!     action_selector::ActionSelector, network::ValueNetwork, q_table::QEstimateTable,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//!
//! let mut rng = Pcg64Mcg::seed_from_u64(42);
//! let network = ValueNetwork::random(&mut rng);
//! let sensors = SensorSnapshot::new(&[40.0; 19]).unwrap();
//!
//! let table = QEstimateTable::evaluate(&network, &sensors);
//! let action = ActionSelector::default().select(&table, true, 0.5, &mut rng);
//! assert!((-1.0..=1.0).contains(&action.steering()));
//! ```
//!
//! # Current Limitations
//!
//! - **Coarse state**: Only seven of the nineteen range finders are used; speed, heading and
//!   track position are not part of the state.
//! - **Discrete steering**: Nine fixed steering values; throttle and gear are not learned.

pub mod action;
pub mod action_selector;
pub mod network;
pub mod q_table;
pub mod state_encoder;
