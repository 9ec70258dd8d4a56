//! `haul-sim`: runs a session: one thread per truck plus one for the
//! manager.
//!
//! # Truck loop
//!
//! ```text
//! loop:
//!   no plan   → sleep one wait quantum
//!               home, empty-handed, nothing undelivered? → exit
//!               charge idle ticks, notify Waiting
//!   plan      → depart along the next edge
//!               every tick: sleep, advance at current speed, charge cost
//!               arrive, notify LocationChanged
//!               parcels here? → notify ParcelAtNode
//! ```
//!
//! Every sleep goes through the session [`Lifecycle`](haul_core::Lifecycle),
//! so a halt wakes all trucks at once.  When the last truck exits at home the
//! session is finished; a manager error or panic on any thread faults it.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use haul_sim::SessionBuilder;
//!
//! let mut session = SessionBuilder::new(spec, MyManager::default())
//!     .config(config)
//!     .build()?;
//! session.start()?;
//! let report = session.await_completion(Duration::from_secs(60));
//! println!("{} scored {}", report.status, report.score);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod session;
mod worker;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use error::{SimError, SimResult};
pub use report::SessionReport;
pub use session::Session;
