//! A greedy courier: each idle truck claims the nearest unclaimed parcel,
//! fetches it, delivers it, and goes home when nothing is left to claim.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;

use haul_board::{Board, ParcelLocation};
use haul_core::{NodeId, ParcelId, TruckId};
use haul_manager::{Dispatch, Manager, ManagerError, ManagerResult, Notification};
use haul_truck::{Truck, TruckError};

use crate::routing::{ShortestPaths, shortest_route};

pub struct GreedyCourier {
    /// Parcel → truck sent to fetch it.
    claims:       Mutex<FxHashMap<ParcelId, TruckId>>,
    report_every: Duration,
}

impl Default for GreedyCourier {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl GreedyCourier {
    pub fn new(report_every: Duration) -> Self {
        Self { claims: Mutex::new(FxHashMap::default()), report_every }
    }

    pub fn claims(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<ParcelId, TruckId>> {
        self.claims.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, parcel: ParcelId) {
        self.lock().remove(&parcel);
    }

    /// The parcel `truck` is fetching and where it rests, claiming the
    /// nearest free one if it has none.
    fn claim_for(&self, truck: TruckId, here: NodeId, board: &Board) -> Option<(ParcelId, NodeId)> {
        let resting = |p: ParcelId| match board.parcel(p)?.location() {
            ParcelLocation::Resting(at) => Some(at),
            _ => None,
        };

        let mut claims = self.lock();
        let mine = claims.iter().find(|(_, t)| **t == truck).map(|(p, _)| *p);
        if let Some(p) = mine {
            match resting(p) {
                Some(at) => return Some((p, at)),
                None => {
                    claims.remove(&p);
                }
            }
        }

        let paths = ShortestPaths::compute(board, here);
        let (parcel, at) = board
            .parcels()
            .iter()
            .filter(|p| !claims.contains_key(&p.id))
            .filter_map(|p| {
                let at = resting(p.id)?;
                Some((paths.distance(at)?, p.id, at))
            })
            .min()
            .map(|(_, p, at)| (p, at))?;
        claims.insert(parcel, truck);
        tracing::debug!(%truck, %parcel, node = %at, "claimed");
        Some((parcel, at))
    }

    fn head_to(&self, truck: &Truck, board: &Board, here: NodeId, to: NodeId) -> ManagerResult<()> {
        let route = shortest_route(board, here, to)
            .ok_or_else(|| ManagerError::Strategy(format!("no route from {here} to {to}")))?;
        truck.set_travel_plan(route.edges)?;
        Ok(())
    }

    fn destination(board: &Board, parcel: ParcelId) -> ManagerResult<NodeId> {
        board
            .parcel(parcel)
            .map(|p| p.destination)
            .ok_or_else(|| ManagerError::Strategy(format!("unknown parcel {parcel}")))
    }

    /// Decide what an idle truck does next.
    fn steer(&self, truck: &Truck, ctx: &Dispatch) -> ManagerResult<()> {
        if truck.has_plan() {
            return Ok(());
        }
        let Some(here) = truck.location() else {
            return Ok(());
        };
        let board = &ctx.board;

        if let Some(held) = truck.load() {
            let dest = Self::destination(board, held)?;
            if dest != here {
                return self.head_to(truck, board, here, dest);
            }
            truck.drop_off()?;
            self.release(held);
            tracing::info!(truck = %truck.name, parcel = %held, "delivered");
        }

        match self.claim_for(truck.id, here, board) {
            Some((parcel, at)) if at == here => match truck.pick_up(parcel) {
                Ok(()) => self.head_to(truck, board, here, Self::destination(board, parcel)?),
                Err(TruckError::Board(e)) => {
                    tracing::warn!(truck = %truck.name, %parcel, error = %e, "pickup lost");
                    self.release(parcel);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            Some((_, at)) => self.head_to(truck, board, here, at),
            None if here != board.depot() => self.head_to(truck, board, here, board.depot()),
            None => Ok(()),
        }
    }
}

impl Manager for GreedyCourier {
    fn run(&self, ctx: &Dispatch) -> ManagerResult<()> {
        while ctx.sleep(self.report_every) {
            tracing::info!(
                score = ctx.score(),
                delivered = ctx.board.delivered_count(),
                remaining = ctx.board.undelivered_count(),
                "progress"
            );
        }
        Ok(())
    }

    fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
        tracing::trace!(truck = %truck.name, %event, "event");
        self.steer(truck, ctx)
    }
}
