//! The truck agent.
//!
//! Methods fall in three groups:
//!
//! - **accessors**, safe to call from any thread at any time;
//! - **commands** a manager issues (`set_travel_plan`, `pick_up`, …), which
//!   validate first and leave the truck untouched on failure;
//! - **worker steps** (`depart`, `advance`, `arrive`, `charge_idle`) called
//!   only by the session thread that drives this truck.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use haul_board::{Board, DropOff};
use haul_core::{Color, EdgeId, NodeId, ParcelId, TruckId, UserData};
use haul_score::cost::whole_ticks;
use haul_score::{EFFICIENT_SPEED, Score, clamp_speed, prorated_travel_cost, travel_cost};

use crate::state::TruckState;
use crate::{Advance, Motion, Status, TruckError, TruckResult, TruckSnapshot, VisualPosition};

pub struct Truck {
    pub id:        TruckId,
    pub name:      String,
    pub color:     Color,
    board:         Arc<Board>,
    score:         Arc<Score>,
    speed:         AtomicU32,
    state:         RwLock<TruckState>,
    pub user_data: UserData,
}

impl Truck {
    /// A truck waiting at the board's depot at efficient speed.
    pub fn new(id: TruckId, name: impl Into<String>, color: Color, board: Arc<Board>, score: Arc<Score>) -> Self {
        let depot = board.depot();
        if let Some(node) = board.node(depot) {
            node.presence.set(id, true);
        }
        Self {
            id,
            name: name.into(),
            color,
            board,
            score,
            speed: AtomicU32::new(EFFICIENT_SPEED),
            state: RwLock::new(TruckState::at(depot)),
            user_data: UserData::new(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TruckState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TruckState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn status(&self) -> Status {
        self.read().motion.status()
    }

    pub fn motion(&self) -> Motion {
        self.read().motion
    }

    /// Current node; `None` while traveling.
    pub fn location(&self) -> Option<NodeId> {
        match self.read().motion {
            Motion::Waiting { at } => Some(at),
            Motion::Traveling { .. } => None,
        }
    }

    /// Node being traveled toward; `None` while waiting.
    pub fn traveling_to(&self) -> Option<NodeId> {
        match self.read().motion {
            Motion::Traveling { to, .. } => Some(to),
            Motion::Waiting { .. } => None,
        }
    }

    /// Edge being traveled; `None` while waiting.
    pub fn traveling_along(&self) -> Option<EdgeId> {
        match self.read().motion {
            Motion::Traveling { edge, .. } => Some(edge),
            Motion::Waiting { .. } => None,
        }
    }

    /// Node the current edge started at; `None` while waiting.
    pub fn coming_from(&self) -> Option<NodeId> {
        match self.read().motion {
            Motion::Traveling { from, .. } => Some(from),
            Motion::Waiting { .. } => None,
        }
    }

    /// Where the truck will end up: the end of its plan, or the end of the
    /// current edge when the plan is empty.  `None` for an idle truck.
    pub fn going_to(&self) -> Option<NodeId> {
        let st = self.read();
        st.plan_end.or(match st.motion {
            Motion::Traveling { to, .. } => Some(to),
            Motion::Waiting { .. } => None,
        })
    }

    pub fn load(&self) -> Option<ParcelId> {
        self.read().load
    }

    /// Edges still queued, front first.
    pub fn travel_plan(&self) -> Vec<EdgeId> {
        self.read().plan.iter().copied().collect()
    }

    pub fn has_plan(&self) -> bool {
        !self.read().plan.is_empty()
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed.load(Ordering::Acquire)
    }

    /// Set the speed, clamped to the legal range.  Returns the speed actually
    /// stored.  Takes effect on the next travel tick.
    pub fn set_speed(&self, speed: u32) -> u32 {
        let s = clamp_speed(speed);
        self.speed.store(s, Ordering::Release);
        s
    }

    pub fn visual_position(&self) -> VisualPosition {
        let motion = self.read().motion;
        match motion {
            Motion::Waiting { at } => VisualPosition { from: at, to: at, fraction: 1.0 },
            Motion::Traveling { from, to, .. } => VisualPosition { from, to, fraction: motion.fraction() },
        }
    }

    pub fn snapshot(&self) -> TruckSnapshot {
        let st = self.read();
        TruckSnapshot {
            id:       self.id,
            motion:   st.motion,
            plan:     st.plan.iter().copied().collect(),
            going_to: st.plan_end.or(match st.motion {
                Motion::Traveling { to, .. } => Some(to),
                Motion::Waiting { .. } => None,
            }),
            load:     st.load,
            speed:    self.speed(),
        }
    }

    /// Waiting at the depot with nothing planned and nothing left to deliver.
    pub fn is_home_and_done(&self) -> bool {
        let st = self.read();
        st.motion == Motion::Waiting { at: self.board.depot() }
            && st.plan.is_empty()
            && self.board.all_delivered()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Replace the travel plan with `edges`.
    ///
    /// The edges must form a walk starting at the truck's location, or at
    /// the node it is traveling toward.  On failure the existing plan is
    /// kept.  An empty `edges` clears the plan.
    pub fn set_travel_plan(&self, edges: Vec<EdgeId>) -> TruckResult<()> {
        let mut st = self.write();
        let end = self.walk(st.anchor(), &edges)?;
        st.plan = VecDeque::from(edges);
        st.plan_end = end;
        tracing::trace!(truck = %self.id, len = st.plan.len(), "travel plan set");
        Ok(())
    }

    /// Append `edges` to the current plan, continuing from where it ends.
    pub fn extend_travel_plan(&self, edges: &[EdgeId]) -> TruckResult<()> {
        let mut st = self.write();
        let start = st.plan_end.unwrap_or_else(|| st.anchor());
        if let Some(end) = self.walk(start, edges)? {
            st.plan.extend(edges.iter().copied());
            st.plan_end = Some(end);
        }
        Ok(())
    }

    /// Replace the plan with the edges joining consecutive `path` nodes.
    /// `path[0]` must be where new travel starts.
    pub fn set_travel_path(&self, path: &[NodeId]) -> TruckResult<()> {
        let Some((&first, _)) = path.split_first() else {
            self.clear_travel_plan();
            return Ok(());
        };
        let anchor = self.read().anchor();
        if first != anchor {
            return Err(TruckError::PathStart { expected: anchor, got: first });
        }
        let edges = path
            .windows(2)
            .map(|w| self.board.edge_between(w[0], w[1]).ok_or(TruckError::NoEdge { a: w[0], b: w[1] }))
            .collect::<TruckResult<Vec<_>>>()?;
        self.set_travel_plan(edges)
    }

    pub fn clear_travel_plan(&self) {
        self.write().clear_plan();
    }

    /// Pick up `parcel` from the current node.  Charges the pickup cost.
    pub fn pick_up(&self, parcel: ParcelId) -> TruckResult<()> {
        let mut st = self.write();
        let Motion::Waiting { at } = st.motion else {
            return Err(TruckError::IllegalState { truck: self.id, status: Status::Traveling });
        };
        if let Some(held) = st.load {
            return Err(TruckError::AlreadyLoaded { truck: self.id, held });
        }
        self.board.pick_up(parcel, self.id, at)?;
        st.load = Some(parcel);
        drop(st);
        self.score.add(self.board.coefficients().pickup_cost);
        Ok(())
    }

    /// Put the held parcel down here.  Delivers it (and earns the payoff)
    /// when this is its destination, otherwise leaves it resting here and
    /// charges the drop-off cost.
    pub fn drop_off(&self) -> TruckResult<DropOff> {
        let mut st = self.write();
        let Motion::Waiting { at } = st.motion else {
            return Err(TruckError::IllegalState { truck: self.id, status: Status::Traveling });
        };
        let parcel = st.load.ok_or(TruckError::NotHolding(self.id))?;
        let outcome = self.board.drop_off(parcel, self.id, at)?;
        st.load = None;
        drop(st);

        let coeffs = self.board.coefficients();
        let delta = match outcome {
            DropOff::Delivered => {
                let color = self.board.parcel(parcel).map_or(self.color, |p| p.color);
                coeffs.delivery_payoff(self.color, color)
            }
            DropOff::Returned(_) => coeffs.dropoff_cost,
        };
        self.score.add(delta);
        Ok(outcome)
    }

    /// Check `edges` is a walk from `start`; return where it ends.
    fn walk(&self, start: NodeId, edges: &[EdgeId]) -> TruckResult<Option<NodeId>> {
        let mut cur = start;
        for &e in edges {
            let edge = self.board.edge(e).ok_or(TruckError::UnknownEdge(e))?;
            cur = edge
                .other(cur)
                .ok_or(TruckError::IllegalTravel { truck: self.id, edge: e, from: cur })?;
        }
        Ok(if edges.is_empty() { None } else { Some(cur) })
    }

    // ── Worker steps ──────────────────────────────────────────────────────

    /// Pop the next planned edge and start crossing it.
    ///
    /// Returns `Ok(None)` when nothing is planned.  If the edge does not
    /// touch the current location the whole plan is dropped and
    /// [`TruckError::IllegalTravel`] returned.
    pub fn depart(&self) -> TruckResult<Option<EdgeId>> {
        let mut st = self.write();
        let Motion::Waiting { at } = st.motion else {
            return Err(TruckError::IllegalState { truck: self.id, status: Status::Traveling });
        };
        let Some(e) = st.plan.pop_front() else {
            st.plan_end = None;
            return Ok(None);
        };
        if st.plan.is_empty() {
            st.plan_end = None;
        }
        let Some(edge) = self.board.edge(e) else {
            st.clear_plan();
            return Err(TruckError::UnknownEdge(e));
        };
        let Some(to) = edge.other(at) else {
            st.clear_plan();
            return Err(TruckError::IllegalTravel { truck: self.id, edge: e, from: at });
        };

        st.motion = Motion::Traveling { edge: e, from: at, to, progress: 0, length: edge.length };
        st.idle_held = st.idle_since.elapsed();
        if let Some(node) = self.board.node(at) {
            node.presence.set(self.id, false);
        }
        edge.presence.set(self.id, true);
        tracing::debug!(truck = %self.id, edge = %e, from = %at, to = %to, "departed");
        Ok(Some(e))
    }

    /// Cover one tick's worth of the current edge at the current speed and
    /// charge for it.
    pub fn advance(&self) -> TruckResult<Advance> {
        let speed = clamp_speed(self.speed());
        let mut st = self.write();
        let Motion::Traveling { progress, length, .. } = &mut st.motion else {
            return Err(TruckError::IllegalState { truck: self.id, status: Status::Waiting });
        };
        let remaining = length.saturating_sub(*progress);
        let units = speed.min(remaining);
        let cost = if units == speed {
            travel_cost(speed)?
        } else {
            prorated_travel_cost(speed, units)?
        };
        *progress += units;
        let arrived = *progress >= *length;
        drop(st);
        self.score.add(cost);
        Ok(Advance { units, cost, arrived })
    }

    /// Finish the current edge: wait at its far end.
    pub fn arrive(&self) -> TruckResult<NodeId> {
        let mut st = self.write();
        let Motion::Traveling { edge, to, progress, length, .. } = st.motion else {
            return Err(TruckError::IllegalState { truck: self.id, status: Status::Waiting });
        };
        debug_assert!(progress >= length);
        st.motion = Motion::Waiting { at: to };
        let now = Instant::now();
        st.idle_since = now.checked_sub(st.idle_held).unwrap_or(now);
        st.idle_held = Duration::ZERO;
        if let Some(e) = self.board.edge(edge) {
            e.presence.set(self.id, false);
        }
        if let Some(node) = self.board.node(to) {
            node.presence.set(self.id, true);
        }
        tracing::debug!(truck = %self.id, node = %to, "arrived");
        Ok(to)
    }

    /// Charge the idle cost for every whole `tick` spent waiting since the
    /// last charge.  Time spent traveling is not counted.  Returns the delta.
    pub fn charge_idle(&self, tick: Duration) -> i64 {
        let mut st = self.write();
        if st.motion.status() != Status::Waiting {
            return 0;
        }
        let (ticks, rest) = whole_ticks(st.idle_since.elapsed(), tick);
        if ticks == 0 {
            return 0;
        }
        let now = Instant::now();
        st.idle_since = now.checked_sub(rest).unwrap_or(now);
        drop(st);
        let delta = self.board.coefficients().idle_cost(ticks);
        self.score.add(delta);
        delta
    }
}

impl std::fmt::Debug for Truck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Truck")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("color", &self.color)
            .field("motion", &self.motion())
            .finish()
    }
}
