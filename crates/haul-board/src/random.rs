//! Seeded random board descriptions.
//!
//! Topology is a ring through every node (so the board is connected) plus
//! random chords until the target average degree is reached.  No geometry is
//! involved; the result is generally not planar.

use rustc_hash::FxHashSet;

use haul_core::{Color, SimRng};
use haul_score::ScoreCoefficients;

use crate::{BoardSpec, EdgeSpec, ParcelSpec, TruckSpec};

/// Name of the depot node on generated boards.
pub const DEPOT_NAME: &str = "Truck Depot";

const CITY_NAMES: &[&str] = &[
    "Ashford", "Bramble", "Carrow", "Dunmore", "Elmstead", "Fairhaven", "Glenrock",
    "Harlow", "Ivydale", "Juniper", "Kestrel", "Larchmont", "Millbrook", "Northgate",
    "Oakridge", "Pinecrest", "Queensway", "Rosewood", "Stonebridge", "Thornbury",
    "Upton", "Valemont", "Westfield", "Yarrow", "Ashcombe", "Brightwater", "Coldharbour",
    "Deepdale", "Eastleigh", "Foxholes",
];

/// Bounds the generator draws from.  All ranges are inclusive.
#[derive(Clone, Debug)]
pub struct RandomLimits {
    pub nodes:               (usize, usize),
    pub average_degree:      f64,
    pub edge_length:         (u32, u32),
    pub trucks:              (usize, usize),
    pub parcels:             (usize, usize),
    pub wait_cost:           (i64, i64),
    pub pickup_cost:         (i64, i64),
    pub dropoff_cost:        (i64, i64),
    pub payoff:              (i64, i64),
    pub on_color_multiplier: (i64, i64),
    /// Give up adding chords after this many rejected draws.
    pub max_edge_attempts:   usize,
}

impl Default for RandomLimits {
    fn default() -> Self {
        Self {
            nodes:               (5, 100),
            average_degree:      2.5,
            edge_length:         (5, 60),
            trucks:              (5, 50),
            parcels:             (35, 150),
            wait_cost:           (1, 3),
            pickup_cost:         (0, 150),
            dropoff_cost:        (0, 150),
            payoff:              (1_000, 4_000),
            on_color_multiplier: (2, 4),
            max_edge_attempts:   1_000,
        }
    }
}

/// Random board description using [`RandomLimits::default`].
pub fn random_spec(seed: u64) -> BoardSpec {
    random_spec_with(seed, &RandomLimits::default())
}

pub fn random_spec_with(seed: u64, limits: &RandomLimits) -> BoardSpec {
    let mut root = SimRng::new(seed);
    let mut topo = root.child(1);
    let mut fleet = root.child(2);
    let mut cargo = root.child(3);
    let mut costs = root.child(4);

    let n = topo.between(limits.nodes.0.max(2), limits.nodes.1);
    let nodes = node_names(&mut topo, n);

    // Ring, then chords.
    let mut pairs: FxHashSet<(usize, usize)> = FxHashSet::default();
    let mut edges = Vec::new();
    let mut connect = |i: usize, j: usize, rng: &mut SimRng, edges: &mut Vec<EdgeSpec>| {
        let key = (i.min(j), i.max(j));
        if i == j || !pairs.insert(key) {
            return false;
        }
        let length = rng.between(limits.edge_length.0.max(1), limits.edge_length.1);
        edges.push(EdgeSpec::new(nodes[i].clone(), nodes[j].clone(), length));
        true
    };
    for i in 0..n {
        connect(i, (i + 1) % n, &mut topo, &mut edges);
    }
    let target = ((n as f64 * limits.average_degree) / 2.0).ceil() as usize;
    let mut attempts = 0;
    while edges.len() < target && attempts < limits.max_edge_attempts {
        let i = topo.index(n);
        let j = topo.index(n);
        if !connect(i, j, &mut topo, &mut edges) {
            attempts += 1;
        }
    }

    let truck_count = fleet.between(limits.trucks.0, limits.trucks.1);
    let trucks = (1..=truck_count)
        .map(|i| TruckSpec::new(format!("TRUCK-{i}"), random_color(&mut fleet)))
        .collect();

    let parcel_count = cargo.between(limits.parcels.0, limits.parcels.1);
    let parcels = (0..parcel_count)
        .map(|_| {
            let origin = cargo.index(n);
            let destination = cargo.index_except(n, origin);
            ParcelSpec::new(nodes[origin].clone(), nodes[destination].clone(), random_color(&mut cargo))
        })
        .collect();

    let mut draw = |(lo, hi): (i64, i64)| costs.between(lo, hi);
    let coefficients = ScoreCoefficients {
        wait_cost:           -draw(limits.wait_cost).max(1),
        pickup_cost:         -draw(limits.pickup_cost).abs(),
        dropoff_cost:        -draw(limits.dropoff_cost).abs(),
        payoff:              draw(limits.payoff).abs(),
        on_color_multiplier: draw(limits.on_color_multiplier).max(1),
    };

    BoardSpec { depot: DEPOT_NAME.to_owned(), nodes, edges, trucks, parcels, coefficients }
}

fn node_names(rng: &mut SimRng, n: usize) -> Vec<String> {
    let mut pool: Vec<&str> = CITY_NAMES.to_vec();
    rng.shuffle(&mut pool);
    let mut names = Vec::with_capacity(n);
    names.push(DEPOT_NAME.to_owned());
    for i in 1..n {
        match pool.get(i - 1) {
            Some(city) => names.push((*city).to_owned()),
            None => names.push(format!("City {i}")),
        }
    }
    names
}

fn random_color(rng: &mut SimRng) -> Color {
    rng.choose(&Color::ALL[..]).copied().unwrap_or(Color::MidRed)
}
