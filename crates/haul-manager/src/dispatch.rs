//! Shared session handles passed to every manager callback.

use std::sync::Arc;
use std::time::Duration;

use haul_board::Board;
use haul_core::{Lifecycle, Pacing, TruckId};
use haul_score::Score;
use haul_truck::Truck;

/// Everything a manager may look at or command.
///
/// Built once by the session and shared by reference with the manager's
/// `run` thread and every truck thread.  The board and trucks are live: what
/// a manager reads may change under it as other trucks move.
pub struct Dispatch {
    pub board:     Arc<Board>,
    pub trucks:    Vec<Arc<Truck>>,
    score:         Arc<Score>,
    lifecycle:     Arc<Lifecycle>,
    pacing:        Arc<Pacing>,
}

impl Dispatch {
    pub fn new(
        board:     Arc<Board>,
        trucks:    Vec<Arc<Truck>>,
        score:     Arc<Score>,
        lifecycle: Arc<Lifecycle>,
        pacing:    Arc<Pacing>,
    ) -> Self {
        Self { board, trucks, score, lifecycle, pacing }
    }

    /// `false` once the session finished, was halted or faulted.  Long
    /// running `Manager::run` loops should poll this.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn truck(&self, id: TruckId) -> Option<&Arc<Truck>> {
        self.trucks.get(id.index())
    }

    /// Current score, read-only.
    #[inline]
    pub fn score(&self) -> i64 {
        self.score.value()
    }

    /// Current wall-clock length of a tick.
    #[inline]
    pub fn tick(&self) -> Duration {
        self.pacing.tick()
    }

    /// Sleep for `dur`, waking early if the session stops.  Returns `false`
    /// if the session is no longer running.
    pub fn sleep(&self, dur: Duration) -> bool {
        self.lifecycle.sleep(dur)
    }
}
