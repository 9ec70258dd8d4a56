//! Wall-clock pacing of a live session.
//!
//! # Design
//!
//! Simulated time is measured in *ticks*: one tick is the interval at which a
//! traveling truck advances along its edge and is charged travel cost, and
//! also the unit idle cost is charged in.  Unlike a batch simulation there is
//! no global tick counter; every truck sleeps on its own thread, so the only
//! shared piece is the tick *duration*, held by [`Pacing`].
//!
//! The duration may be changed while a session runs (a viewer speeding the
//! game up, say).  Because that changes how much wall time a manager gets per
//! simulated step, every change is appended to an audit log of
//! [`TickChange`] records.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::{CoreError, CoreResult};

// ── Pacing ────────────────────────────────────────────────────────────────────

/// One recorded change of the tick duration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickChange {
    /// Session-relative time of the change.
    pub at: Duration,
    pub from: Duration,
    pub to: Duration,
}

/// Shared, adjustable tick duration plus the log of adjustments.
pub struct Pacing {
    origin:  Instant,
    tick_us: AtomicU64,
    changes: Mutex<Vec<TickChange>>,
}

impl Pacing {
    pub fn new(tick: Duration) -> Self {
        Self {
            origin:  Instant::now(),
            tick_us: AtomicU64::new(duration_us(tick)),
            changes: Mutex::new(Vec::new()),
        }
    }

    /// Current tick duration.
    #[inline]
    pub fn tick(&self) -> Duration {
        Duration::from_micros(self.tick_us.load(Ordering::Acquire))
    }

    /// Change the tick duration and record the change.  Zero is rejected.
    pub fn set_tick(&self, tick: Duration) -> CoreResult<()> {
        if tick.is_zero() {
            return Err(CoreError::Config("tick duration must be positive".into()));
        }
        let to = duration_us(tick);
        let mut log = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
        let from = self.tick_us.swap(to, Ordering::AcqRel);
        if from != to {
            log.push(TickChange {
                at:   self.origin.elapsed(),
                from: Duration::from_micros(from),
                to:   Duration::from_micros(to),
            });
            tracing::info!(from_us = from, to_us = to, "tick duration changed");
        }
        Ok(())
    }

    /// Every recorded change, oldest first.
    pub fn changes(&self) -> Vec<TickChange> {
        self.changes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

fn duration_us(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX).max(1)
}

// ── SessionConfig ─────────────────────────────────────────────────────────────

/// Timing knobs for one session.
///
/// Typically loaded from a TOML file by the application and handed to the
/// session builder.  All durations are in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Initial wall-clock length of one tick.  Default: 5 ms.
    pub tick_ms: u64,

    /// How long an idle truck sleeps between WAITING notifications.
    /// Default: 5 ms.
    pub wait_quantum_ms: u64,

    /// After a halt, how long to wait for truck threads to exit before
    /// detaching them.  Default: 1000 ms.
    pub shutdown_grace_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_ms:           5,
            wait_quantum_ms:   5,
            shutdown_grace_ms: 1_000,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_ms == 0 {
            return Err(CoreError::Config("tick_ms must be positive".into()));
        }
        if self.wait_quantum_ms == 0 {
            return Err(CoreError::Config("wait_quantum_ms must be positive".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[inline]
    pub fn wait_quantum(&self) -> Duration {
        Duration::from_millis(self.wait_quantum_ms)
    }

    #[inline]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    pub fn make_pacing(&self) -> Pacing {
        Pacing::new(self.tick())
    }
}
