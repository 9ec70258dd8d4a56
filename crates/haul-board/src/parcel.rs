//! Parcels and their three-state lifecycle.
//!
//! ```text
//!   RESTING(node) ──pick_up──▶ HELD(truck) ──drop_off at destination──▶ DELIVERED
//!         ▲                        │
//!         └──drop_off elsewhere────┘
//! ```
//!
//! The location lives behind the parcel's own mutex, and every transition
//! checks and changes it inside one critical section, so two trucks racing
//! for the same parcel cannot both win.

use std::sync::{Mutex, MutexGuard, PoisonError};

use haul_core::{Color, NodeId, ParcelId, TruckId, UserData};

use crate::{Board, BoardError, BoardResult};

/// Where a parcel is right now.  Exactly one of these holds at any instant.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParcelLocation {
    Resting(NodeId),
    Held(TruckId),
    Delivered,
}

/// Outcome of a successful drop-off.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DropOff {
    /// The parcel reached its destination and left the board.
    Delivered,
    /// The parcel was left at a node that is not its destination.
    Returned(NodeId),
}

pub struct Parcel {
    pub id:          ParcelId,
    pub color:       Color,
    pub origin:      NodeId,
    pub destination: NodeId,
    location:        Mutex<ParcelLocation>,
    pub user_data:   UserData,
}

impl Parcel {
    pub(crate) fn new(id: ParcelId, origin: NodeId, destination: NodeId, color: Color) -> Self {
        Self {
            id,
            color,
            origin,
            destination,
            location: Mutex::new(ParcelLocation::Resting(origin)),
            user_data: UserData::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ParcelLocation> {
        self.location.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn location(&self) -> ParcelLocation {
        *self.lock()
    }

    pub fn holder(&self) -> Option<TruckId> {
        match self.location() {
            ParcelLocation::Held(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.location() == ParcelLocation::Delivered
    }
}

impl std::fmt::Debug for Parcel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parcel")
            .field("id", &self.id)
            .field("color", &self.color)
            .field("destination", &self.destination)
            .field("location", &self.location())
            .finish()
    }
}

/// Counts of parcels in each lifecycle state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ParcelCensus {
    pub resting:   usize,
    pub held:      usize,
    pub delivered: usize,
}

impl ParcelCensus {
    pub fn total(&self) -> usize {
        self.resting + self.held + self.delivered
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

impl Board {
    /// RESTING(`at`) → HELD(`truck`).
    ///
    /// Fails with [`BoardError::ParcelNotHere`] unless the parcel is resting
    /// at `at`.  Cost accounting is the caller's job.
    pub fn pick_up(&self, parcel: ParcelId, truck: TruckId, at: NodeId) -> BoardResult<()> {
        let p = self.parcel(parcel).ok_or(BoardError::ParcelNotFound(parcel))?;
        let node = self.node(at).ok_or(BoardError::NodeNotFound(at))?;

        let mut loc = p.lock();
        if *loc != ParcelLocation::Resting(at) {
            return Err(BoardError::ParcelNotHere { parcel, node: at });
        }
        node.remove_parcel(parcel);
        *loc = ParcelLocation::Held(truck);
        tracing::debug!(%parcel, %truck, node = %node.name, "parcel picked up");
        Ok(())
    }

    /// HELD(`truck`) → DELIVERED when `at` is the destination, otherwise
    /// HELD(`truck`) → RESTING(`at`).
    pub fn drop_off(&self, parcel: ParcelId, truck: TruckId, at: NodeId) -> BoardResult<DropOff> {
        let p = self.parcel(parcel).ok_or(BoardError::ParcelNotFound(parcel))?;
        let node = self.node(at).ok_or(BoardError::NodeNotFound(at))?;

        let mut loc = p.lock();
        if *loc != ParcelLocation::Held(truck) {
            return Err(BoardError::ParcelNotHeld { parcel, truck });
        }
        if at == p.destination {
            *loc = ParcelLocation::Delivered;
            let left = {
                let mut undelivered = self.undelivered();
                undelivered.remove(&parcel);
                undelivered.len()
            };
            tracing::debug!(%parcel, %truck, node = %node.name, left, "parcel delivered");
            Ok(DropOff::Delivered)
        } else {
            node.add_parcel(parcel);
            *loc = ParcelLocation::Resting(at);
            tracing::debug!(%parcel, %truck, node = %node.name, "parcel dropped off");
            Ok(DropOff::Returned(at))
        }
    }

    /// Count parcels by state.  Each parcel is read under its own lock, so
    /// the census is exact once trucks have stopped and approximate while
    /// they run.
    pub fn census(&self) -> ParcelCensus {
        let mut c = ParcelCensus::default();
        for p in self.parcels() {
            match p.location() {
                ParcelLocation::Resting(_) => c.resting += 1,
                ParcelLocation::Held(_)    => c.held += 1,
                ParcelLocation::Delivered  => c.delivered += 1,
            }
        }
        c
    }
}
