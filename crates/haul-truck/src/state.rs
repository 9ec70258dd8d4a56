//! Per-truck movement state.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use haul_core::{EdgeId, NodeId, ParcelId, TruckId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Status {
    Waiting,
    Traveling,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Status::Waiting   => "waiting",
            Status::Traveling => "traveling",
        })
    }
}

/// Where a truck is.  The two variants are the only way to read a location,
/// so the "waiting at" and "traveling along" fields can never be mixed up.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Motion {
    Waiting {
        at: NodeId,
    },
    Traveling {
        edge:     EdgeId,
        from:     NodeId,
        to:       NodeId,
        /// Units covered so far, `0..=length`.
        progress: u32,
        length:   u32,
    },
}

impl Motion {
    #[inline]
    pub fn status(&self) -> Status {
        match self {
            Motion::Waiting { .. }   => Status::Waiting,
            Motion::Traveling { .. } => Status::Traveling,
        }
    }

    /// Fraction of the current edge covered, in `[0.0, 1.0]`.  `1.0` while
    /// waiting.
    pub fn fraction(&self) -> f32 {
        match *self {
            Motion::Waiting { .. } => 1.0,
            Motion::Traveling { progress, length, .. } if length > 0 => {
                (progress as f32 / length as f32).min(1.0)
            }
            Motion::Traveling { .. } => 1.0,
        }
    }
}

/// Position for renderers: `fraction` of the way from `from` to `to`.
/// While waiting `from == to` and `fraction == 1.0`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct VisualPosition {
    pub from:     NodeId,
    pub to:       NodeId,
    pub fraction: f32,
}

/// Consistent copy of a truck's state, taken under one read lock.
#[derive(Clone, PartialEq, Debug)]
pub struct TruckSnapshot {
    pub id:       TruckId,
    pub motion:   Motion,
    pub plan:     Vec<EdgeId>,
    pub going_to: Option<NodeId>,
    pub load:     Option<ParcelId>,
    pub speed:    u32,
}

impl TruckSnapshot {
    #[inline]
    pub fn status(&self) -> Status {
        self.motion.status()
    }
}

/// Result of one travel tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Advance {
    /// Units covered this tick.
    pub units:   u32,
    /// Score delta charged for them.
    pub cost:    i64,
    /// `true` once the edge is fully covered.
    pub arrived: bool,
}

/// Everything behind the truck's lock.
#[derive(Debug)]
pub(crate) struct TruckState {
    pub motion:     Motion,
    pub plan:       VecDeque<EdgeId>,
    /// Node the plan ends at; `None` with an empty plan.
    pub plan_end:   Option<NodeId>,
    pub load:       Option<ParcelId>,
    /// Start of the idle interval not yet charged.
    pub idle_since: Instant,
    /// Uncharged idle time set aside while traveling.
    pub idle_held:  Duration,
}

impl TruckState {
    pub fn at(node: NodeId) -> Self {
        Self {
            motion:     Motion::Waiting { at: node },
            plan:       VecDeque::new(),
            plan_end:   None,
            load:       None,
            idle_since: Instant::now(),
            idle_held:  Duration::ZERO,
        }
    }

    /// Node new travel must start from: the current location, or the node
    /// being traveled toward.
    pub fn anchor(&self) -> NodeId {
        match self.motion {
            Motion::Waiting { at }        => at,
            Motion::Traveling { to, .. }  => to,
        }
    }

    pub fn clear_plan(&mut self) {
        self.plan.clear();
        self.plan_end = None;
    }
}
