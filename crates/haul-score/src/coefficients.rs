//! The five per-board scoring coefficients.

use haul_core::Color;

use crate::{ScoreError, ScoreResult};

/// Costs are negative score deltas, payoff is positive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreCoefficients {
    /// Charged for each whole tick an idle truck waits.  Must be negative.
    pub wait_cost:           i64,
    /// Charged once per successful pickup.
    pub pickup_cost:         i64,
    /// Charged once per drop-off away from the parcel's destination.
    pub dropoff_cost:        i64,
    /// Earned per delivered parcel.
    pub payoff:              i64,
    /// Payoff multiplier when truck and parcel colors match.
    pub on_color_multiplier: i64,
}

impl Default for ScoreCoefficients {
    fn default() -> Self {
        Self {
            wait_cost:           -1,
            pickup_cost:         -50,
            dropoff_cost:        -50,
            payoff:              3_000,
            on_color_multiplier: 2,
        }
    }
}

impl ScoreCoefficients {
    pub fn validate(&self) -> ScoreResult<()> {
        if self.wait_cost >= 0 {
            return Err(ScoreError::Coefficient(format!("wait_cost must be negative, got {}", self.wait_cost)));
        }
        if self.pickup_cost > 0 || self.dropoff_cost > 0 {
            return Err(ScoreError::Coefficient("pickup/dropoff costs must not be positive".into()));
        }
        if self.payoff < 0 {
            return Err(ScoreError::Coefficient(format!("payoff must not be negative, got {}", self.payoff)));
        }
        if self.on_color_multiplier < 1 {
            return Err(ScoreError::Coefficient(format!(
                "on_color_multiplier must be at least 1, got {}",
                self.on_color_multiplier
            )));
        }
        Ok(())
    }

    /// Payoff for delivering a `parcel` colored parcel with a `truck` colored truck.
    #[inline]
    pub fn delivery_payoff(&self, truck: Color, parcel: Color) -> i64 {
        if truck == parcel {
            self.payoff * self.on_color_multiplier
        } else {
            self.payoff
        }
    }

    /// Idle cost for `ticks` whole ticks of waiting.
    #[inline]
    pub fn idle_cost(&self, ticks: u64) -> i64 {
        self.wait_cost.saturating_mul(i64::try_from(ticks).unwrap_or(i64::MAX))
    }
}
