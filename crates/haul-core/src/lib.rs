//! `haul-core`: foundational types for the `rust_haul` delivery simulation.
//!
//! Every other `haul-*` crate depends on this one.  It has no `haul-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `TruckId`, `ParcelId`             |
//! | [`color`]       | `Color`, the fixed 13-entry palette                   |
//! | [`time`]        | `Pacing`, `TickChange`, `SessionConfig`               |
//! | [`lifecycle`]   | `Lifecycle`, `SessionStatus`                          |
//! | [`rng`]         | `SimRng`                                              |
//! | [`user_data`]   | `UserData`, an opaque per-object payload slot         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, colors and config.  |

pub mod color;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod rng;
pub mod time;
pub mod user_data;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::Color;
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId, ParcelId, TruckId};
pub use lifecycle::{Lifecycle, SessionStatus};
pub use rng::SimRng;
pub use time::{Pacing, SessionConfig, TickChange};
pub use user_data::UserData;
