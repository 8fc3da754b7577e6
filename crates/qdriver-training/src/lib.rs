//! Online Q-learning for the race driver.
//!
//! This crate closes the learning loop around the evaluator: every tick it rewards the
//! previous decision, trains the value network one step towards a temporal-difference
//! target, and picks the next steering action.
//!
//! # How Learning Works
//!
//! 1. **Reward** ([`reward`]) - `+1` for progress, `-1` otherwise, `-5` on collision
//! 2. **TD Target** ([`trainer`]) - Blend the previous estimate with a one-step bootstrap:
//!    `(1 − α)·Q_prev + α·(reward + max_a Q(s', a))`
//! 3. **Train** - One backpropagation step on the previous (state, action) pair
//! 4. **Act** - Evaluate all actions on the new snapshot and select one (explore/exploit)
//! 5. **Cache** - Keep the chosen state and estimate as a [`PendingTransition`] for the
//!    next tick
//!
//! Between episodes the [`episode`] controller anneals the exploration temperature
//! (`T = base · decayⁿ` after `n` games) and switches to pure exploitation once it drops
//! to the exploration floor.
//!
//! # Architecture
//!
//! ```text
//! Controller::control(snapshot)
//!     │
//!     ├─ pending? ──▶ Trainer::train_step ──▶ ValueNetwork::train
//!     │
//!     └─ QDriver::act ──▶ QEstimateTable ──▶ ActionSelector ──▶ Command
//!                                                   │
//!                                                   └──▶ PendingTransition (next tick)
//! ```
//!
//! # Example
//!
//! ```
//! use qdriver_engine::{TrackParams, TrackSimulator};
//! use qdriver_training::{config::DriverConfig, driver::QDriver, race};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//!
//! let config = DriverConfig::default();
//! let mut driver = QDriver::new(&config, Pcg64Mcg::seed_from_u64(1)).unwrap();
//! let mut simulator = TrackSimulator::with_seed(TrackParams::default(), 2);
//!
//! let outcomes = race::run_race(&mut simulator, &mut driver, 3, 200);
//! assert_eq!(outcomes.len(), 3);
//! assert_eq!(driver.context().games_played(), 2);
//! ```
//!
//! # Current Limitations
//!
//! - **No persistence**: Learned weights live only as long as the process.
//! - **Single-sample updates**: No replay memory or batching; each tick trains on exactly
//!   one transition.
//! - **Live bootstrap**: The bootstrap estimate uses the same network being trained (no
//!   frozen target network).

pub mod config;
pub mod driver;
pub mod episode;
pub mod race;
pub mod reward;
pub mod trainer;

pub use self::trainer::PendingTransition;
