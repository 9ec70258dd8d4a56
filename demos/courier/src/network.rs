//! Built-in board for the courier demo.
//!
//! ```text
//!              Harbor ──6── Mill
//!             /   |           \
//!           4     5            9
//!          /      |             \
//!   Truck Depot ──3── Market ──7── Quarry
//!          \      |
//!           8     2
//!            \    |
//!             Orchard ──5── Ferry
//! ```

use haul_board::{BoardSpec, DEPOT_NAME, EdgeSpec, ParcelSpec, TruckSpec};
use haul_core::Color;
use haul_score::ScoreCoefficients;

pub fn build_network() -> BoardSpec {
    let nodes = [DEPOT_NAME, "Market", "Harbor", "Mill", "Quarry", "Orchard", "Ferry"];
    let edges = [
        (DEPOT_NAME, "Market", 3),
        (DEPOT_NAME, "Harbor", 4),
        (DEPOT_NAME, "Orchard", 8),
        ("Market", "Harbor", 5),
        ("Market", "Quarry", 7),
        ("Market", "Orchard", 2),
        ("Harbor", "Mill", 6),
        ("Mill", "Quarry", 9),
        ("Orchard", "Ferry", 5),
    ];
    let trucks = [
        ("TRUCK-1", Color::SeaBlue),
        ("TRUCK-2", Color::MidRed),
        ("TRUCK-3", Color::BrightGreen),
    ];
    let parcels = [
        ("Market", "Mill", Color::SeaBlue),
        ("Harbor", "Ferry", Color::MidRed),
        ("Quarry", DEPOT_NAME, Color::BrightGreen),
        ("Ferry", "Harbor", Color::SeaBlue),
        (DEPOT_NAME, "Quarry", Color::MidYellow),
        ("Orchard", "Market", Color::MidRed),
    ];

    BoardSpec {
        nodes:        nodes.iter().map(|&n| n.to_owned()).collect(),
        edges:        edges.iter().map(|&(a, b, len)| EdgeSpec::new(a, b, len)).collect(),
        depot:        DEPOT_NAME.to_owned(),
        trucks:       trucks.iter().map(|&(n, c)| TruckSpec::new(n, c)).collect(),
        parcels:      parcels.iter().map(|&(o, d, c)| ParcelSpec::new(o, d, c)).collect(),
        coefficients: ScoreCoefficients::default(),
    }
}
