//! Thread bodies: the truck loop and the manager's `run`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use haul_board::Node;
use haul_core::{Lifecycle, Pacing};
use haul_manager::{Dispatch, Manager, ManagerResult, Notification};
use haul_truck::{Truck, TruckError};

/// How a truck loop ended without a fault.
enum Exit {
    /// Terminal condition reached at the depot.
    Home,
    /// The session stopped first.
    Stopped,
}

/// Shared by every thread of one session.
pub(crate) struct Shared<M: Manager> {
    pub manager:      Arc<M>,
    pub ctx:          Arc<Dispatch>,
    pub lifecycle:    Arc<Lifecycle>,
    pub pacing:       Arc<Pacing>,
    pub wait_quantum: Duration,
    /// Trucks that reached their terminal condition.
    pub home:         AtomicUsize,
}

pub(crate) fn truck_thread<M: Manager>(shared: Arc<Shared<M>>, truck: Arc<Truck>) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| drive(&shared, &truck)));
    match outcome {
        Ok(Ok(Exit::Home)) => {
            let home = shared.home.fetch_add(1, Ordering::AcqRel) + 1;
            tracing::debug!(truck = %truck.id, home, "truck done");
            if home == shared.ctx.trucks.len() && shared.lifecycle.finish() {
                tracing::info!("all parcels delivered, all trucks home");
            }
        }
        Ok(Ok(Exit::Stopped)) => {}
        Ok(Err(e)) => {
            let cause = format!("{} ({}): {e}", truck.name, truck.id);
            tracing::error!(%cause, "manager fault");
            shared.lifecycle.fault(cause);
        }
        Err(payload) => {
            let cause = format!("{} ({}) panicked: {}", truck.name, truck.id, panic_message(&*payload));
            tracing::error!(%cause, "manager panic");
            shared.lifecycle.fault(cause);
        }
    }
}

fn drive<M: Manager>(shared: &Shared<M>, truck: &Truck) -> ManagerResult<Exit> {
    let lc = &shared.lifecycle;
    let notify = |event| shared.manager.on_event(truck, event, &shared.ctx);

    loop {
        if !truck.has_plan() {
            if !lc.sleep(shared.wait_quantum) {
                return Ok(Exit::Stopped);
            }
            // a plan may have landed while we slept
            if truck.has_plan() {
                continue;
            }
            if truck.is_home_and_done() {
                truck.charge_idle(shared.pacing.tick());
                return Ok(Exit::Home);
            }
            truck.charge_idle(shared.pacing.tick());
            notify(Notification::Waiting)?;
            continue;
        }

        match truck.depart() {
            Ok(Some(_)) => {}
            Ok(None) => continue,
            Err(e @ (TruckError::IllegalTravel { .. } | TruckError::UnknownEdge(_))) => {
                tracing::warn!(truck = %truck.id, error = %e, "travel plan dropped");
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        loop {
            if !lc.sleep(shared.pacing.tick()) {
                return Ok(Exit::Stopped);
            }
            if truck.advance()?.arrived {
                break;
            }
        }
        let at = truck.arrive()?;

        notify(Notification::LocationChanged)?;
        if shared.ctx.board.node(at).is_some_and(Node::has_parcels) {
            notify(Notification::ParcelAtNode)?;
        }
    }
}

pub(crate) fn manager_thread<M: Manager>(shared: Arc<Shared<M>>) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| shared.manager.run(&shared.ctx)));
    match outcome {
        Ok(Ok(())) => tracing::debug!("manager run returned"),
        Ok(Err(e)) => {
            let cause = format!("manager run: {e}");
            tracing::error!(%cause, "manager fault");
            shared.lifecycle.fault(cause);
        }
        Err(payload) => {
            let cause = format!("manager run panicked: {}", panic_message(&*payload));
            tracing::error!(%cause, "manager panic");
            shared.lifecycle.fault(cause);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
