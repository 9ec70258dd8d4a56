//! Plain-data board description.
//!
//! A `BoardSpec` names everything by string so it can be written by hand in
//! a config file or produced by [`random_spec`](crate::random_spec).  The
//! kernel validates it; it does not parse any particular file format itself.

use haul_core::Color;
use haul_score::ScoreCoefficients;

use crate::{Board, BoardBuilder, BoardResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSpec {
    pub nodes:        Vec<String>,
    pub edges:        Vec<EdgeSpec>,
    /// Name of the node every truck starts at and must return to.
    pub depot:        String,
    pub trucks:       Vec<TruckSpec>,
    pub parcels:      Vec<ParcelSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coefficients: ScoreCoefficients,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSpec {
    pub a:      String,
    pub b:      String,
    pub length: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckSpec {
    pub name:  String,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParcelSpec {
    pub origin:      String,
    pub destination: String,
    pub color:       Color,
}

impl EdgeSpec {
    pub fn new(a: impl Into<String>, b: impl Into<String>, length: u32) -> Self {
        Self { a: a.into(), b: b.into(), length }
    }
}

impl TruckSpec {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color }
    }
}

impl ParcelSpec {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, color: Color) -> Self {
        Self { origin: origin.into(), destination: destination.into(), color }
    }
}

impl Board {
    /// Build a board from its description.  Trucks are not part of the
    /// board; the session creates them from `spec.trucks`.
    pub fn from_spec(spec: &BoardSpec) -> BoardResult<Board> {
        let mut b = BoardBuilder::new();
        for name in &spec.nodes {
            b.add_node(name.as_str())?;
        }
        for e in &spec.edges {
            let a = b.node_id(&e.a)?;
            let c = b.node_id(&e.b)?;
            b.add_edge(a, c, e.length)?;
        }
        let depot = b.node_id(&spec.depot)?;
        b.set_depot(depot);
        for p in &spec.parcels {
            let origin = b.node_id(&p.origin)?;
            let destination = b.node_id(&p.destination)?;
            b.add_parcel(origin, destination, p.color)?;
        }
        b.coefficients(spec.coefficients);
        b.build()
    }
}
