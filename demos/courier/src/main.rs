//! courier: a greedy fleet on a rust_haul board.
//!
//! ```text
//! courier                 built-in seven-node board
//! courier courier.toml    timing, timeout and board from a config file
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod config;
mod manager;
mod network;
mod routing;


use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use haul_sim::SessionBuilder;

use config::CourierConfig;
use manager::GreedyCourier;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CourierConfig::from_file(Path::new(&path))?,
        None => CourierConfig::default(),
    };
    let spec = config.board_spec();
    println!(
        "Board: {} nodes, {} edges  |  Trucks: {}  |  Parcels: {}",
        spec.nodes.len(),
        spec.edges.len(),
        spec.trucks.len(),
        spec.parcels.len()
    );

    let mut session = SessionBuilder::new(spec, GreedyCourier::default())
        .config(config.session.clone())
        .build()?;

    let t0 = Instant::now();
    session.start()?;
    let report = session.await_completion(config.timeout());
    let elapsed = t0.elapsed();

    println!();
    println!("{:<12} {:<14} {:<10} {:<6}", "Truck", "Color", "Status", "Node");
    println!("{}", "-".repeat(46));
    for truck in session.trucks() {
        let node = truck
            .location()
            .and_then(|n| session.board().node(n))
            .map_or("-", |n| n.name.as_str());
        println!("{:<12} {:<14} {:<10} {:<6}", truck.name, truck.color, truck.status(), node);
    }
    println!();
    println!("Status:    {}", report.status);
    println!("Delivered: {}/{}", report.delivered, report.total_parcels);
    println!("Score:     {}", report.score);
    println!("Elapsed:   {:.3} s", elapsed.as_secs_f64());

    if !report.is_success() {
        bail!("session did not finish: {}", report.status);
    }
    Ok(())
}
