//! Fluent builder for constructing a [`Session`].

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use haul_board::{Board, BoardSpec};
use haul_core::{Lifecycle, SessionConfig, TruckId};
use haul_manager::{Dispatch, Manager};
use haul_score::Score;
use haul_truck::Truck;

use crate::worker::Shared;
use crate::{Session, SimError, SimResult};

/// Fluent builder for [`Session<M>`].
///
/// # Required inputs
///
/// - [`BoardSpec`]: nodes, edges, depot, trucks, parcels, coefficients
/// - `M: Manager`: the strategy
///
/// # Optional inputs
///
/// | Method       | Default                      |
/// |--------------|------------------------------|
/// | `.config(c)` | `SessionConfig::default()`   |
pub struct SessionBuilder<M: Manager> {
    spec:    BoardSpec,
    manager: M,
    config:  SessionConfig,
}

impl<M: Manager> SessionBuilder<M> {
    pub fn new(spec: BoardSpec, manager: M) -> Self {
        Self { spec, manager, config: SessionConfig::default() }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the config, build the board and trucks, and return a
    /// session ready to [`start`](Session::start).
    pub fn build(self) -> SimResult<Session<M>> {
        self.config.validate()?;
        let board = Arc::new(Board::from_spec(&self.spec)?);
        let score = Arc::new(Score::new());

        let trucks: Vec<Arc<Truck>> = self
            .spec
            .trucks
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Ok(Arc::new(Truck::new(
                    truck_id(i)?,
                    t.name.clone(),
                    t.color,
                    Arc::clone(&board),
                    Arc::clone(&score),
                )))
            })
            .collect::<SimResult<_>>()?;

        let lifecycle = Arc::new(Lifecycle::new());
        let pacing = Arc::new(self.config.make_pacing());
        let ctx = Arc::new(Dispatch::new(
            Arc::clone(&board),
            trucks,
            Arc::clone(&score),
            Arc::clone(&lifecycle),
            Arc::clone(&pacing),
        ));

        tracing::debug!(
            trucks = ctx.trucks.len(),
            parcels = board.parcel_count(),
            nodes = board.node_count(),
            "session built"
        );

        let shared = Arc::new(Shared {
            manager: Arc::new(self.manager),
            ctx,
            lifecycle,
            pacing,
            wait_quantum: self.config.wait_quantum(),
            home: AtomicUsize::new(0),
        });

        Ok(Session::new(shared, board, score, self.config))
    }
}

/// The id for the `i`-th truck of the fleet.
pub(crate) fn truck_id(i: usize) -> SimResult<TruckId> {
    TruckId::from_index(i).ok_or(SimError::FleetTooLarge(i))
}
