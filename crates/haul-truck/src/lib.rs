//! `haul-truck`: one delivery truck.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                          |
//! |-----------|-------------------------------------------------------------------|
//! | [`state`] | `Status`, `Motion`, `TruckSnapshot`, `VisualPosition`             |
//! | [`truck`] | `Truck`: accessors, manager commands, worker steps                |
//! | [`error`] | `TruckError`, `TruckResult<T>`                                    |
//!
//! # Movement model
//!
//! A truck is either **waiting** at a node or **traveling** along one edge.
//! Travel is driven by the session's worker thread, one tick at a time:
//!
//! 1. [`Truck::depart`] pops the next planned edge and starts crossing it.
//! 2. [`Truck::advance`] covers `min(speed, remaining)` units and charges the
//!    travel cost for them.
//! 3. [`Truck::arrive`] puts the truck down at the far endpoint.
//!
//! Everything mutable lives in one `RwLock<TruckState>` per truck, except the
//! speed, which is an atomic so a manager can change it while the worker is
//! mid-edge.  No truck ever locks another truck.

pub mod error;
pub mod state;
pub mod truck;


pub use error::{TruckError, TruckResult};
pub use state::{Advance, Motion, Status, TruckSnapshot, VisualPosition};
pub use truck::Truck;
