//! `haul-manager`: the decision-making side of a session.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`notification`] | `Notification` (`Waiting`, `LocationChanged`, `ParcelAtNode`) |
//! | [`dispatch`]     | `Dispatch`, shared handles passed to every callback       |
//! | [`model`]        | `Manager` trait                                            |
//! | [`noop`]         | `NoopManager`, never issues a command                     |
//! | [`error`]        | `ManagerError`, `ManagerResult<T>`                         |
//!
//! # Calling convention
//!
//! Each truck runs on its own thread and calls
//! [`Manager::on_event`] directly, blocking until it returns.  Calls for one
//! truck never overlap; calls for different trucks do.  A manager therefore
//! has to be `Send + Sync`, and any state it shares across trucks needs its
//! own synchronization.

pub mod dispatch;
pub mod error;
pub mod model;
pub mod noop;
pub mod notification;


pub use dispatch::Dispatch;
pub use error::{ManagerError, ManagerResult};
pub use model::Manager;
pub use noop::NoopManager;
pub use notification::Notification;
