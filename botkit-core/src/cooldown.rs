//! Per-key cooldown gate.
//!
//! A [`CooldownGate`] answers "is this key still cooling down?" for opaque
//! string keys (user IDs, chat IDs, command names). Each key is either
//! **free** (no record, or a record old enough) or **held** (a record inside
//! the strict window).
//!
//! ```text
//!  last_touched                     window - delay
//!  |--------------- held ----------------|------- renew ------->
//! ```
//!
//! [`CooldownGate::hold`] consumes: it starts tracking unknown keys and
//! re-arms keys whose remaining time, `window - delay - age` floored at
//! zero, is under [`RENEW_THRESHOLD`].
//! [`CooldownGate::check`] only reads, always with [`DEFAULT_HOLD_DELAY`].
//!
//! The gate is a plain owned value. `hold` takes `&mut self`, so sharing one
//! gate between tasks means wrapping it in a `Mutex` at the call site.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::CooldownConfig;

/// Margin subtracted from the window by [`CooldownGate::check`], and the
/// default margin for [`CooldownGate::hold`].
pub const DEFAULT_HOLD_DELAY: Duration = Duration::from_millis(3_000);

/// A key past the strict window is re-armed if its remaining time is below this.
pub const RENEW_THRESHOLD: Duration = Duration::from_millis(15_000);

// ============================================================================
// Gate State
// ============================================================================

/// Result of a gate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateState {
    /// `true` when the key is throttled and the caller must not proceed.
    pub state: bool,
}

impl GateState {
    /// Throttled.
    pub const HELD: Self = Self { state: true };
    /// Not throttled.
    pub const FREE: Self = Self { state: false };

    /// Returns true if the key is throttled.
    pub fn is_held(&self) -> bool {
        self.state
    }
}

// ============================================================================
// Cooldown Gate
// ============================================================================

/// Tracks when each key was last touched and whether it is still throttled.
///
/// Records are never evicted; the table lives as long as the gate.
#[derive(Debug)]
pub struct CooldownGate<C = SystemClock> {
    window: Duration,
    default_delay: Duration,
    records: HashMap<String, DateTime<Utc>>,
    clock: C,
}

impl CooldownGate<SystemClock> {
    /// Creates a gate with a total cooldown `window`, using the system clock.
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }

    /// Creates a gate from the `cooldown` configuration section.
    pub fn from_config(config: &CooldownConfig) -> Self {
        Self::new(config.window()).with_default_delay(config.hold_delay())
    }
}

impl<C: Clock> CooldownGate<C> {
    /// Creates a gate that reads time from `clock`.
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            window,
            default_delay: DEFAULT_HOLD_DELAY,
            records: HashMap::new(),
            clock,
        }
    }

    /// Sets the delay used by [`hold_default`](Self::hold_default).
    #[must_use]
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Returns the total cooldown window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Touches `key` and reports whether the caller is throttled.
    ///
    /// - Unknown key: starts tracking it, returns free.
    /// - Touched less than `window - delay` ago: returns held, no change.
    /// - Remaining time `max(window - delay - age, 0)` under
    ///   [`RENEW_THRESHOLD`]: re-arms the record to now, returns free.
    /// - Otherwise: returns free and leaves the record as it is. Past the
    ///   strict window the remaining time is always zero, so with a positive
    ///   threshold every hold there re-arms.
    pub fn hold(&mut self, key: &str, delay: Duration) -> GateState {
        let now = self.clock.now();
        let window = to_delta(self.window);
        let strict = window - to_delta(delay);

        let Some(last_touched) = self.records.get_mut(key) else {
            debug!(key, "Cooldown started");
            self.records.insert(key.to_owned(), now);
            return GateState::FREE;
        };

        let age = now - *last_touched;
        if age < strict {
            trace!(key, age_ms = age.num_milliseconds(), "Cooldown held");
            return GateState::HELD;
        }

        let remaining = strict
            .checked_sub(&age)
            .unwrap_or(TimeDelta::zero())
            .max(TimeDelta::zero());
        if remaining < to_delta(RENEW_THRESHOLD) {
            debug!(key, remaining_ms = remaining.num_milliseconds(), "Cooldown renewed");
            *last_touched = now;
            return GateState::FREE;
        }

        // Remaining time at or above the threshold: the record stays.
        GateState::FREE
    }

    /// [`hold`](Self::hold) with the gate's default delay.
    pub fn hold_default(&mut self, key: &str) -> GateState {
        self.hold(key, self.default_delay)
    }

    /// Reports whether `key` is throttled without touching it.
    pub fn check(&self, key: &str) -> GateState {
        let Some(last_touched) = self.records.get(key) else {
            return GateState::FREE;
        };

        let strict = to_delta(self.window) - to_delta(DEFAULT_HOLD_DELAY);
        if self.clock.now() - *last_touched < strict {
            GateState::HELD
        } else {
            GateState::FREE
        }
    }

    /// Returns when `key` was last touched, if it is tracked.
    pub fn last_touched(&self, key: &str) -> Option<DateTime<Utc>> {
        self.records.get(key).copied()
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

// ============================================================================
// Tests
// ============================================================================
