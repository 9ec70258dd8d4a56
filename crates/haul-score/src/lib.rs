//! `haul-score`: the cost model.
//!
//! Everything that moves the score goes through this crate:
//!
//! | Module             | Contents                                                 |
//! |--------------------|----------------------------------------------------------|
//! | [`cost`]           | speed bounds, per-tick travel cost, pro-ration, idle ticks |
//! | [`coefficients`]   | the five per-board coefficients, delivery payoff         |
//! | [`score`]          | `Score`, an atomic running total                         |
//! | [`error`]          | `ScoreError`, `ScoreResult`                              |
//!
//! All functions here are pure except `Score::add`.

pub mod coefficients;
pub mod cost;
pub mod error;
pub mod score;

#[cfg(test)]
mod tests;

pub use coefficients::ScoreCoefficients;
pub use cost::{EFFICIENT_SPEED, MAX_SPEED, MIN_SPEED, clamp_speed, prorated_travel_cost, travel_cost};
pub use error::{ScoreError, ScoreResult};
pub use score::Score;
