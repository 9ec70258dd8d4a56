//! Incremental board construction.

use std::collections::BTreeSet;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use haul_core::{Color, EdgeId, NodeId, ParcelId};
use haul_score::ScoreCoefficients;

use crate::{Board, BoardError, BoardResult, Edge, Node, PENDING_LENGTH, Parcel};

/// Construct a [`Board`] incrementally, then call [`build`](Self::build).
///
/// Edges may be added before their length is known with
/// [`add_pending_edge`](Self::add_pending_edge) and measured later with
/// [`set_length`](Self::set_length); `build()` refuses a board that still has
/// an unmeasured edge.
///
/// # Example
///
/// ```
/// use haul_board::BoardBuilder;
/// use haul_core::Color;
///
/// let mut b = BoardBuilder::new();
/// let depot = b.add_node("Truck Depot").unwrap();
/// let town = b.add_node("Town").unwrap();
/// b.add_edge(depot, town, 12).unwrap();
/// b.set_depot(depot);
/// b.add_parcel(town, depot, Color::SeaBlue).unwrap();
/// let board = b.build().unwrap();
/// assert_eq!(board.degree(depot), 1);
/// assert_eq!(board.undelivered_count(), 1);
/// ```
#[derive(Default)]
pub struct BoardBuilder {
    names:        Vec<String>,
    by_name:      FxHashMap<String, NodeId>,
    raw_edges:    Vec<RawEdge>,
    depot:        Option<NodeId>,
    raw_parcels:  Vec<RawParcel>,
    coefficients: ScoreCoefficients,
}

struct RawEdge {
    a:      NodeId,
    b:      NodeId,
    length: u32,
}

struct RawParcel {
    origin:      NodeId,
    destination: NodeId,
    color:       Color,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>) -> BoardResult<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(BoardError::DuplicateNode(name));
        }
        let id = NodeId::from_index(self.names.len()).ok_or(BoardError::TooMany("nodes"))?;
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    pub fn node_id(&self, name: &str) -> BoardResult<NodeId> {
        self.by_name.get(name).copied().ok_or_else(|| BoardError::UnknownNode(name.to_owned()))
    }

    /// Add an undirected edge of positive `length`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, length: u32) -> BoardResult<EdgeId> {
        if length == PENDING_LENGTH {
            return Err(BoardError::ZeroLength);
        }
        self.push_edge(a, b, length)
    }

    /// Add an undirected edge whose length is assigned later.
    pub fn add_pending_edge(&mut self, a: NodeId, b: NodeId) -> BoardResult<EdgeId> {
        self.push_edge(a, b, PENDING_LENGTH)
    }

    fn push_edge(&mut self, a: NodeId, b: NodeId, length: u32) -> BoardResult<EdgeId> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(BoardError::SelfLoop(a));
        }
        if self.connected(a, b) {
            return Err(BoardError::DuplicateEdge { a, b });
        }
        let id = EdgeId::from_index(self.raw_edges.len()).ok_or(BoardError::TooMany("edges"))?;
        self.raw_edges.push(RawEdge { a, b, length });
        Ok(id)
    }

    /// `true` if an edge between `a` and `b` was already added.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        self.raw_edges
            .iter()
            .any(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
    }

    pub fn set_length(&mut self, edge: EdgeId, length: u32) -> BoardResult<()> {
        if length == PENDING_LENGTH {
            return Err(BoardError::ZeroLength);
        }
        let e = self.raw_edges.get_mut(edge.index()).ok_or(BoardError::EdgeNotFound(edge))?;
        e.length = length;
        Ok(())
    }

    pub fn set_depot(&mut self, node: NodeId) {
        self.depot = Some(node);
    }

    pub fn add_parcel(&mut self, origin: NodeId, destination: NodeId, color: Color) -> BoardResult<ParcelId> {
        self.check_node(origin)?;
        self.check_node(destination)?;
        if origin == destination {
            return Err(BoardError::SameOriginDestination(origin));
        }
        let id = ParcelId::from_index(self.raw_parcels.len()).ok_or(BoardError::TooMany("parcels"))?;
        self.raw_parcels.push(RawParcel { origin, destination, color });
        Ok(id)
    }

    pub fn coefficients(&mut self, coefficients: ScoreCoefficients) -> &mut Self {
        self.coefficients = coefficients;
        self
    }

    fn check_node(&self, n: NodeId) -> BoardResult<()> {
        if n.index() < self.names.len() {
            Ok(())
        } else {
            Err(BoardError::NodeNotFound(n))
        }
    }

    /// Consume the builder and produce a [`Board`].
    ///
    /// Fails if the board is empty, has no depot, still has a pending edge
    /// length, or carries invalid coefficients.
    pub fn build(self) -> BoardResult<Board> {
        if self.names.is_empty() {
            return Err(BoardError::Empty);
        }
        let depot = self.depot.ok_or(BoardError::NoDepot)?;
        self.check_node(depot)?;
        self.coefficients.validate()?;
        if let Some(i) = self.raw_edges.iter().position(|e| e.length == PENDING_LENGTH) {
            return Err(BoardError::PendingLength(EdgeId(i as u32)));
        }

        let node_count = self.names.len();

        // Every edge is an exit of both endpoints; sort (node, edge) pairs
        // by node for CSR construction.
        let mut exits: Vec<(NodeId, EdgeId)> = Vec::with_capacity(self.raw_edges.len() * 2);
        for (i, e) in self.raw_edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            exits.push((e.a, id));
            exits.push((e.b, id));
        }
        exits.sort_unstable();

        let mut node_exit_start = vec![0u32; node_count + 1];
        for (n, _) in &exits {
            node_exit_start[n.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_exit_start[i] += node_exit_start[i - 1];
        }
        debug_assert_eq!(node_exit_start[node_count] as usize, exits.len());
        let exit_edges: Vec<EdgeId> = exits.into_iter().map(|(_, e)| e).collect();

        let nodes: Vec<Node> = self
            .names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Node::new(NodeId(i as u32), name))
            .collect();

        let edges: Vec<Edge> = self
            .raw_edges
            .iter()
            .enumerate()
            .map(|(i, e)| Edge::new(EdgeId(i as u32), e.a, e.b, e.length))
            .collect();

        let parcels: Vec<Parcel> = self
            .raw_parcels
            .iter()
            .enumerate()
            .map(|(i, p)| Parcel::new(ParcelId(i as u32), p.origin, p.destination, p.color))
            .collect();
        for p in &parcels {
            nodes[p.origin.index()].add_parcel(p.id);
        }
        let undelivered: BTreeSet<ParcelId> = parcels.iter().map(|p| p.id).collect();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            parcels = parcels.len(),
            "board built"
        );

        Ok(Board {
            nodes,
            edges,
            node_exit_start,
            exit_edges,
            by_name: self.by_name,
            depot,
            coefficients: self.coefficients,
            parcels,
            undelivered: Mutex::new(undelivered),
        })
    }
}
