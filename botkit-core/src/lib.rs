// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `botkit` Core
//!
//! Shared building blocks for the `botkit` crates that do no network I/O:
//!
//! - [`CooldownGate`] - per-key throttling with a near-expiry renew rule
//! - [`Clock`] - wall-clock source, swappable for tests
//! - [`Config`] - JSON configuration with defaults for every field
//! - [`logging::init_tracing`] - tracing subscriber setup
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use botkit_core::CooldownGate;
//!
//! let mut gate = CooldownGate::new(Duration::from_secs(10));
//! assert!(!gate.hold_default("user:42").is_held());
//! assert!(gate.hold_default("user:42").is_held());
//! assert!(gate.check("user:42").is_held());
//! ```

pub mod clock;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod logging;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, CooldownConfig, FetchConfig, PanelConfig, ScraperConfig};
pub use cooldown::{CooldownGate, GateState, DEFAULT_HOLD_DELAY, RENEW_THRESHOLD};
pub use error::CoreError;
