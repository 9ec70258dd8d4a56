//! The `Manager` trait, the extension point for user strategies.

use haul_truck::Truck;

use crate::{Dispatch, ManagerResult, Notification};

/// Pluggable fleet strategy.
///
/// # Required methods
///
/// Only [`on_event`][Self::on_event] is required.  [`run`][Self::run] has a
/// no-op default for managers that are purely reactive.
///
/// # Thread safety
///
/// `on_event` is called from every truck's thread, concurrently for
/// different trucks.  Implementations must be `Send + Sync` and must guard
/// shared bookkeeping (a claims table, say) with their own locks.
///
/// # Errors
///
/// Returning `Err` from either method, or panicking, is a fault: the session
/// records the cause and stops every truck.
///
/// # Example
///
/// ```rust,ignore
/// struct HomeBody;
///
/// impl Manager for HomeBody {
///     fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
///         if event == Notification::LocationChanged && truck.location() != Some(ctx.board.depot()) {
///             truck.set_travel_path(&shortest_path(&ctx.board, truck.location(), ctx.board.depot()))?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Manager: Send + Sync + 'static {
    /// Called once, on its own thread, when the session starts.  May return
    /// immediately or loop until `ctx.is_running()` turns false.
    fn run(&self, _ctx: &Dispatch) -> ManagerResult<()> {
        Ok(())
    }

    /// Called synchronously on `truck`'s thread for every notification.  The
    /// truck does not move on until this returns.
    fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()>;
}
