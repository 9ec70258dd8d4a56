//! A manager that never issues a command.

use haul_truck::Truck;

use crate::{Dispatch, Manager, ManagerResult, Notification};

/// Trucks stay parked at the depot.  On a board with no parcels the session
/// finishes immediately; otherwise it runs until halted.
pub struct NoopManager;

impl Manager for NoopManager {
    fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
        Ok(())
    }
}
