//! The board: nodes, undirected weighted edges and the parcel table.
//!
//! # Data layout
//!
//! Topology is fixed once the board is built.  Exits are stored in
//! **Compressed Sparse Row** form: the edges touching node `n` are
//!
//! ```text
//! exit_edges[ node_exit_start[n] .. node_exit_start[n+1] ]
//! ```
//!
//! Every undirected edge appears twice in `exit_edges`, once per endpoint.
//!
//! Mutable state (resting parcels, truck presence, parcel locations, the
//! undelivered set) sits behind per-object mutexes so the board can be shared
//! as `Arc<Board>` by every truck thread.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use haul_core::{EdgeId, NodeId, ParcelId, TruckId, UserData};
use haul_score::ScoreCoefficients;

use crate::{Parcel, Presence};

/// Length given to an edge that has been added but not yet measured.  A board
/// with any edge still at this length cannot be built.
pub const PENDING_LENGTH: u32 = 0;

// ── Node ──────────────────────────────────────────────────────────────────────

pub struct Node {
    pub id:        NodeId,
    pub name:      String,
    parcels:       Mutex<BTreeSet<ParcelId>>,
    pub presence:  Presence,
    pub user_data: UserData,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            parcels: Mutex::new(BTreeSet::new()),
            presence: Presence::new(),
            user_data: UserData::new(),
        }
    }

    fn lock_parcels(&self) -> MutexGuard<'_, BTreeSet<ParcelId>> {
        self.parcels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add_parcel(&self, parcel: ParcelId) {
        self.lock_parcels().insert(parcel);
    }

    pub(crate) fn remove_parcel(&self, parcel: ParcelId) -> bool {
        self.lock_parcels().remove(&parcel)
    }

    /// Snapshot of the parcels resting here, in id order.
    pub fn parcels(&self) -> Vec<ParcelId> {
        self.lock_parcels().iter().copied().collect()
    }

    pub fn has_parcels(&self) -> bool {
        !self.lock_parcels().is_empty()
    }

    pub fn has_parcel(&self, parcel: ParcelId) -> bool {
        self.lock_parcels().contains(&parcel)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("id", &self.id).field("name", &self.name).finish()
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

pub struct Edge {
    pub id:        EdgeId,
    pub a:         NodeId,
    pub b:         NodeId,
    /// Progress units needed to cross.  Always positive on a built board.
    pub length:    u32,
    pub presence:  Presence,
    pub user_data: UserData,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, a: NodeId, b: NodeId, length: u32) -> Self {
        Self { id, a, b, length, presence: Presence::new(), user_data: UserData::new() }
    }

    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Edge")
            .field("id", &self.id)
            .field("a", &self.a)
            .field("b", &self.b)
            .field("length", &self.length)
            .finish()
    }
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// Do not construct directly; use [`BoardBuilder`](crate::BoardBuilder) or
/// [`Board::from_spec`].
pub struct Board {
    pub(crate) nodes:           Vec<Node>,
    pub(crate) edges:           Vec<Edge>,
    pub(crate) node_exit_start: Vec<u32>,
    pub(crate) exit_edges:      Vec<EdgeId>,
    pub(crate) by_name:         FxHashMap<String, NodeId>,
    pub(crate) depot:           NodeId,
    pub(crate) coefficients:    ScoreCoefficients,
    pub(crate) parcels:         Vec<Parcel>,
    pub(crate) undelivered:     Mutex<BTreeSet<ParcelId>>,
}

impl Board {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }

    // ── Element access ────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    #[inline]
    pub fn parcel(&self, id: ParcelId) -> Option<&Parcel> {
        self.parcels.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    #[inline]
    pub fn coefficients(&self) -> &ScoreCoefficients {
        &self.coefficients
    }

    // ── Topology ──────────────────────────────────────────────────────────

    /// Edges touching `node`.  Empty for an unknown node.
    #[inline]
    pub fn exits(&self, node: NodeId) -> &[EdgeId] {
        let i = node.index();
        if i + 1 >= self.node_exit_start.len() {
            return &[];
        }
        let start = self.node_exit_start[i] as usize;
        let end   = self.node_exit_start[i + 1] as usize;
        &self.exit_edges[start..end]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.exits(node).len()
    }

    /// `(edge, neighbour)` pairs for every exit of `node`.
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId)> + '_ {
        self.exits(node)
            .iter()
            .filter_map(move |&e| self.edges[e.index()].other(node).map(|n| (e, n)))
    }

    /// The edge joining `a` and `b`, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.neighbours(a).find(|&(_, n)| n == b).map(|(e, _)| e)
    }

    pub fn min_edge_length(&self) -> Option<u32> {
        self.edges.iter().map(|e| e.length).min()
    }

    pub fn max_edge_length(&self) -> Option<u32> {
        self.edges.iter().map(|e| e.length).max()
    }

    // ── Parcels and presence ──────────────────────────────────────────────

    pub(crate) fn undelivered(&self) -> MutexGuard<'_, BTreeSet<ParcelId>> {
        self.undelivered.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parcels not yet delivered, whether resting or held.
    pub fn undelivered_count(&self) -> usize {
        self.undelivered().len()
    }

    pub fn all_delivered(&self) -> bool {
        self.undelivered().is_empty()
    }

    pub fn delivered_count(&self) -> usize {
        self.parcels.len() - self.undelivered_count()
    }

    /// Parcels resting at `node`; empty for an unknown node.
    pub fn parcels_at(&self, node: NodeId) -> Vec<ParcelId> {
        self.node(node).map(Node::parcels).unwrap_or_default()
    }

    pub fn trucks_at(&self, node: NodeId) -> Vec<TruckId> {
        self.node(node).map(|n| n.presence.trucks()).unwrap_or_default()
    }

    pub fn trucks_on(&self, edge: EdgeId) -> Vec<TruckId> {
        self.edge(edge).map(|e| e.presence.trucks()).unwrap_or_default()
    }

    pub fn trucks_at_depot(&self) -> usize {
        self.node(self.depot).map_or(0, |n| n.presence.count())
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("parcels", &self.parcels.len())
            .field("depot", &self.depot)
            .finish()
    }
}
