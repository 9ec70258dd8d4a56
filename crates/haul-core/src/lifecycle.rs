//! Session lifecycle: a single phase value guarded by a mutex, with a condvar
//! so sleeping workers wake the moment the session stops.
//!
//! Workers never call `thread::sleep` directly.  They call
//! [`Lifecycle::sleep`], which returns early (and reports `false`) as soon as
//! the session leaves the running phase, so a halt is observed at the very
//! next suspension point.

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Where a session is in its life.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SessionStatus {
    #[default]
    Ready,
    Running,
    /// Every parcel was delivered and every truck returned to the depot.
    Finished,
    /// Stopped from outside (user request, timeout, drop).
    Halted(String),
    /// A manager callback failed or panicked.
    Faulted(String),
}

impl SessionStatus {
    /// `true` once the session can no longer make progress.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Ready | SessionStatus::Running)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Ready          => f.write_str("ready"),
            SessionStatus::Running        => f.write_str("running"),
            SessionStatus::Finished       => f.write_str("finished"),
            SessionStatus::Halted(reason) => write!(f, "halted: {reason}"),
            SessionStatus::Faulted(cause) => write!(f, "faulted: {cause}"),
        }
    }
}

/// Shared phase of one session.
#[derive(Default)]
pub struct Lifecycle {
    phase: Mutex<SessionStatus>,
    wake:  Condvar,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    fn phase(&self) -> MutexGuard<'_, SessionStatus> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> SessionStatus {
        self.phase().clone()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        *self.phase() == SessionStatus::Running
    }

    /// Ready → Running.  Returns `false` if the session was already started
    /// or stopped.
    pub fn start(&self) -> bool {
        self.transition(|p| matches!(p, SessionStatus::Ready), SessionStatus::Running)
    }

    /// Running → Finished.
    pub fn finish(&self) -> bool {
        self.transition(|p| *p == SessionStatus::Running, SessionStatus::Finished)
    }

    /// Ready/Running → Halted.  A session that already ended keeps its status.
    pub fn halt(&self, reason: impl Into<String>) -> bool {
        self.transition(|p| !p.is_terminal(), SessionStatus::Halted(reason.into()))
    }

    /// Ready/Running → Faulted.  Only the first fault is kept.
    pub fn fault(&self, cause: impl Into<String>) -> bool {
        self.transition(|p| !p.is_terminal(), SessionStatus::Faulted(cause.into()))
    }

    fn transition(&self, allowed: impl FnOnce(&SessionStatus) -> bool, next: SessionStatus) -> bool {
        let mut phase = self.phase();
        if !allowed(&phase) {
            return false;
        }
        *phase = next;
        drop(phase);
        self.wake.notify_all();
        true
    }

    /// Sleep for `dur` unless the session stops first.
    ///
    /// Returns `true` if the full duration elapsed with the session still
    /// running, `false` if it is (or became) not running.
    pub fn sleep(&self, dur: Duration) -> bool {
        let guard = self.phase();
        if *guard != SessionStatus::Running {
            return false;
        }
        let (guard, _) = self
            .wake
            .wait_timeout_while(guard, dur, |p| *p == SessionStatus::Running)
            .unwrap_or_else(PoisonError::into_inner);
        *guard == SessionStatus::Running
    }

    /// Block until the session reaches a terminal phase or `timeout` passes.
    /// Returns `true` if it stopped.  A timeout too large to form a deadline
    /// (`Duration::MAX`) waits indefinitely.
    pub fn wait_stopped(&self, timeout: Duration) -> bool {
        let mut guard = self.phase();
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !guard.is_terminal() {
                guard = self.wake.wait(guard).unwrap_or_else(PoisonError::into_inner);
            }
            return true;
        };
        while !guard.is_terminal() {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return false;
            }
            guard = self
                .wake
                .wait_timeout(guard, left)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }
}
