//! Shortest paths over a [`Board`], weighted by edge length.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use haul_board::Board;
use haul_core::{EdgeId, NodeId};

/// An ordered list of edges from source to destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub edges:  Vec<EdgeId>,
    pub length: u64,
}

/// Single-source Dijkstra result: distance to, and the edge into, every node.
pub struct ShortestPaths {
    source:    NodeId,
    dist:      Vec<u64>,
    prev_edge: Vec<EdgeId>,
}

impl ShortestPaths {
    pub fn compute(board: &Board, source: NodeId) -> Self {
        let n = board.node_count();
        let mut dist = vec![u64::MAX; n];
        let mut prev_edge = vec![EdgeId::INVALID; n];
        if source.index() >= n {
            return Self { source, dist, prev_edge };
        }
        dist[source.index()] = 0;

        // NodeId as secondary key keeps tie-breaking deterministic.
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((0, source)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if cost > dist[node.index()] {
                continue;
            }
            for (edge, neighbour) in board.neighbours(node) {
                let length = board.edge(edge).map_or(u64::MAX, |e| u64::from(e.length));
                let next = cost.saturating_add(length);
                if next < dist[neighbour.index()] {
                    dist[neighbour.index()] = next;
                    prev_edge[neighbour.index()] = edge;
                    heap.push(Reverse((next, neighbour)));
                }
            }
        }
        Self { source, dist, prev_edge }
    }

    /// Distance to `to`, or `None` if it cannot be reached.
    pub fn distance(&self, to: NodeId) -> Option<u64> {
        self.dist.get(to.index()).copied().filter(|&d| d != u64::MAX)
    }

    pub fn route_to(&self, board: &Board, to: NodeId) -> Option<Route> {
        let length = self.distance(to)?;
        let mut edges = Vec::new();
        let mut cur = to;
        while cur != self.source {
            let e = self.prev_edge[cur.index()];
            edges.push(e);
            cur = board.edge(e)?.other(cur)?;
        }
        edges.reverse();
        Some(Route { edges, length })
    }
}

pub fn shortest_route(board: &Board, from: NodeId, to: NodeId) -> Option<Route> {
    ShortestPaths::compute(board, from).route_to(board, to)
}
