//! The running session.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use haul_board::Board;
use haul_core::{SessionConfig, SessionStatus, TickChange};
use haul_manager::{Dispatch, Manager};
use haul_score::Score;
use haul_truck::Truck;

use crate::worker::{self, Shared};
use crate::{SessionReport, SimError, SimResult};

/// One game: a board, a fleet and a manager, driven by worker threads.
///
/// Dropping a session halts it and gives its threads the configured grace
/// period to exit.
pub struct Session<M: Manager> {
    shared:   Arc<Shared<M>>,
    board:    Arc<Board>,
    score:    Arc<Score>,
    config:   SessionConfig,
    workers:  Vec<JoinHandle<()>>,
    detached: usize,
}

impl<M: Manager> Session<M> {
    pub(crate) fn new(shared: Arc<Shared<M>>, board: Arc<Board>, score: Arc<Score>, config: SessionConfig) -> Self {
        Self { shared, board, score, config, workers: Vec::new(), detached: 0 }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn trucks(&self) -> &[Arc<Truck>] {
        &self.shared.ctx.trucks
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.shared.ctx
    }

    pub fn manager(&self) -> &M {
        &self.shared.manager
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score.value()
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.lifecycle.status()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.shared.lifecycle.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Spawn the manager thread and one thread per truck.
    pub fn start(&mut self) -> SimResult<()> {
        if !self.shared.lifecycle.start() {
            return Err(SimError::NotReady(self.status()));
        }
        tracing::info!(
            trucks = self.trucks().len(),
            parcels = self.board.parcel_count(),
            tick_ms = self.config.tick_ms,
            "session started"
        );

        if self.trucks().is_empty() && self.board.all_delivered() {
            self.shared.lifecycle.finish();
        }

        let spawned = self.spawn_all();
        if let Err(e) = spawned {
            self.shared.lifecycle.fault(format!("spawn failed: {e}"));
            return Err(e);
        }
        Ok(())
    }

    fn spawn_all(&mut self) -> SimResult<()> {
        let shared = Arc::clone(&self.shared);
        self.workers.push(
            thread::Builder::new()
                .name("manager".into())
                .spawn(move || worker::manager_thread(shared))?,
        );
        for truck in self.shared.ctx.trucks.clone() {
            let shared = Arc::clone(&self.shared);
            self.workers.push(
                thread::Builder::new()
                    .name(format!("truck-{}", truck.id.0))
                    .spawn(move || worker::truck_thread(shared, truck))?,
            );
        }
        Ok(())
    }

    /// Stop the session.  Returns `false` if it had already ended.
    pub fn halt(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let halted = self.shared.lifecycle.halt(reason.clone());
        if halted {
            tracing::info!(%reason, score = self.score(), "session halted");
        }
        halted
    }

    /// Change the wall-clock length of a tick.  Every change is kept and
    /// reported in [`SessionReport::tick_changes`].
    pub fn set_tick_duration(&self, tick: Duration) -> SimResult<()> {
        self.shared.pacing.set_tick(tick)?;
        Ok(())
    }

    pub fn tick_changes(&self) -> Vec<TickChange> {
        self.shared.pacing.changes()
    }

    /// Wait up to `timeout` for the session to end on its own, halting it if
    /// it does not, then collect the worker threads and report.
    pub fn await_completion(&mut self, timeout: Duration) -> SessionReport {
        if !self.shared.lifecycle.wait_stopped(timeout) {
            self.halt(format!("timed out after {} ms", timeout.as_millis()));
        }
        self.join_workers();
        let report = self.report();
        tracing::info!(status = %report.status, score = report.score, delivered = report.delivered, "session over");
        report
    }

    /// Join finished workers, waiting up to the shutdown grace period.
    /// Threads still blocked after that (a manager that never returns) are
    /// detached.
    fn join_workers(&mut self) {
        let deadline = Instant::now().checked_add(self.config.shutdown_grace());
        let mut pending = std::mem::take(&mut self.workers);
        loop {
            let (done, rest): (Vec<_>, Vec<_>) = pending.into_iter().partition(|h| h.is_finished());
            for h in done {
                let _ = h.join();
            }
            pending = rest;
            if pending.is_empty() || deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        for h in &pending {
            tracing::warn!(thread = h.thread().name().unwrap_or("?"), "worker did not exit, detaching");
        }
        self.detached += pending.len();
    }

    /// Current account of the session.  Exact once it has ended.
    pub fn report(&self) -> SessionReport {
        let census = self.board.census();
        SessionReport {
            status:        self.status(),
            score:         self.score(),
            total_parcels: self.board.parcel_count(),
            delivered:     census.delivered,
            census,
            trucks_home:   self.board.trucks_at_depot(),
            truck_count:   self.trucks().len(),
            tick_changes:  self.tick_changes(),
            detached:      self.detached,
        }
    }
}

impl<M: Manager> Drop for Session<M> {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.halt("session dropped");
        self.join_workers();
    }
}
