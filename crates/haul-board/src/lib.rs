//! `haul-board`: the world trucks drive around in.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`board`]     | `Board` (CSR exits), `Node`, `Edge`, topology queries      |
//! | [`builder`]   | `BoardBuilder`                                              |
//! | [`occupancy`] | `Presence`, the per-node / per-edge truck registry         |
//! | [`parcel`]    | `Parcel`, `ParcelLocation`, pickup / drop-off transitions  |
//! | [`spec`]      | `BoardSpec`, the plain-data board description              |
//! | [`random`]    | seeded random `BoardSpec` generator                         |
//! | [`error`]     | `BoardError`, `BoardResult<T>`                              |
//!
//! # Locking
//!
//! Every node, edge and parcel carries its own mutex; the board has one more
//! for its undelivered set.  When several are needed they are taken in the
//! order parcel → node → undelivered set, and each critical section is a
//! single acquire-mutate-release.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `BoardSpec` and friends. |

pub mod board;
pub mod builder;
pub mod error;
pub mod occupancy;
pub mod parcel;
pub mod random;
pub mod spec;


pub use board::{Board, Edge, Node, PENDING_LENGTH};
pub use builder::BoardBuilder;
pub use error::{BoardError, BoardResult};
pub use occupancy::Presence;
pub use parcel::{DropOff, Parcel, ParcelCensus, ParcelLocation};
pub use random::{DEPOT_NAME, RandomLimits, random_spec, random_spec_with};
pub use spec::{BoardSpec, EdgeSpec, ParcelSpec, TruckSpec};
