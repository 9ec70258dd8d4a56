use haul_board::ParcelCensus;
use haul_core::{SessionStatus, TickChange};

/// Final account of a session.
#[derive(Clone, Debug)]
pub struct SessionReport {
    pub status:        SessionStatus,
    pub score:         i64,
    pub total_parcels: usize,
    pub delivered:     usize,
    pub census:        ParcelCensus,
    /// Trucks waiting at the depot when the report was taken.
    pub trucks_home:   usize,
    pub truck_count:   usize,
    /// Every change to the tick duration made while the session ran.
    pub tick_changes:  Vec<TickChange>,
    /// Worker threads still running after the shutdown grace period.
    pub detached:      usize,
}

impl SessionReport {
    pub fn is_success(&self) -> bool {
        self.status == SessionStatus::Finished
    }
}
