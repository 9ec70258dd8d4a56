//! Per-tick travel cost as a function of speed.
//!
//! ```text
//! cost(s) = -(s + 1)                          s <  EFFICIENT_SPEED
//!         = -s                                s == EFFICIENT_SPEED
//!         = -(s + fib(s - EFFICIENT_SPEED))   s >  EFFICIENT_SPEED
//! ```
//!
//! `fib` is 0, 1, 1, 2, 3, 5, …  Per unit of distance covered the efficient
//! speed is strictly the cheapest; going faster gets super-linearly more
//! expensive.

use std::time::Duration;

use crate::{ScoreError, ScoreResult};

pub const MIN_SPEED: u32 = 1;
pub const EFFICIENT_SPEED: u32 = 4;
pub const MAX_SPEED: u32 = 10;

/// `n`-th Fibonacci number, 0-indexed.
pub fn fib(n: u32) -> i64 {
    let (mut a, mut b) = (0i64, 1i64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

/// Score delta for one full tick at `speed`.  Always negative.
pub fn travel_cost(speed: u32) -> ScoreResult<i64> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(ScoreError::SpeedOutOfRange(speed));
    }
    let s = i64::from(speed);
    Ok(match speed.cmp(&EFFICIENT_SPEED) {
        std::cmp::Ordering::Less    => -(s + 1),
        std::cmp::Ordering::Equal   => -s,
        std::cmp::Ordering::Greater => -(s + fib(speed - EFFICIENT_SPEED)),
    })
}

/// Score delta for a tick in which only `units` of a possible `speed` units
/// were covered: `cost(speed) * units / speed`, truncated toward zero.
pub fn prorated_travel_cost(speed: u32, units: u32) -> ScoreResult<i64> {
    if units > speed {
        return Err(ScoreError::ProgressExceedsSpeed { units, speed });
    }
    let full = travel_cost(speed)?;
    Ok(full * i64::from(units) / i64::from(speed))
}

/// Clamp an arbitrary requested speed into the legal range.
#[inline]
pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Whole ticks contained in `elapsed`, plus the leftover that did not make up
/// a full tick.
pub fn whole_ticks(elapsed: Duration, tick: Duration) -> (u64, Duration) {
    if tick.is_zero() {
        return (0, elapsed);
    }
    let n = elapsed.as_nanos() / tick.as_nanos();
    let used = tick.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX));
    (u64::try_from(n).unwrap_or(u64::MAX), elapsed.saturating_sub(used))
}
