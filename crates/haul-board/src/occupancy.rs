//! Which trucks are at a node or on an edge.
//!
//! Purely diagnostic: nothing in the kernel makes a decision from presence,
//! but observers and managers may.  Each registry has its own lock so trucks
//! on unrelated elements never contend.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use haul_core::TruckId;

#[derive(Debug, Default)]
pub struct Presence {
    trucks: Mutex<BTreeSet<TruckId>>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<TruckId>> {
        self.trucks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark `truck` present or absent.
    pub fn set(&self, truck: TruckId, present: bool) {
        let mut set = self.lock();
        if present {
            set.insert(truck);
        } else {
            set.remove(&truck);
        }
    }

    pub fn contains(&self, truck: TruckId) -> bool {
        self.lock().contains(&truck)
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the present trucks in id order.
    pub fn trucks(&self) -> Vec<TruckId> {
        self.lock().iter().copied().collect()
    }
}
