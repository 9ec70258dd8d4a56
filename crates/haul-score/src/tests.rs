//! Unit tests for the cost model.

#[cfg(test)]
mod cost {
    use std::time::Duration;

    use crate::cost::{fib, whole_ticks};
    use crate::*;

    #[test]
    fn fib_sequence() {
        let got: Vec<i64> = (0..8).map(fib).collect();
        assert_eq!(got, vec![0, 1, 1, 2, 3, 5, 8, 13]);
    }

    #[test]
    fn cost_table() {
        let expected = [(1, -2), (2, -3), (3, -4), (4, -4), (5, -6), (6, -7), (7, -9), (8, -11), (9, -14), (10, -18)];
        for (speed, cost) in expected {
            assert_eq!(travel_cost(speed).unwrap(), cost, "speed {speed}");
        }
    }

    #[test]
    fn out_of_range_speed_is_an_error() {
        assert!(matches!(travel_cost(0), Err(ScoreError::SpeedOutOfRange(0))));
        assert!(matches!(travel_cost(11), Err(ScoreError::SpeedOutOfRange(11))));
    }

    #[test]
    fn efficient_speed_is_cheapest_per_unit() {
        // |cost(4)| / 4 < |cost(s)| / s, compared without division.
        let eff = travel_cost(EFFICIENT_SPEED).unwrap().abs();
        for s in MIN_SPEED..=MAX_SPEED {
            if s == EFFICIENT_SPEED {
                continue;
            }
            let c = travel_cost(s).unwrap().abs();
            assert!(eff * i64::from(s) < c * i64::from(EFFICIENT_SPEED), "speed {s}");
        }
    }

    #[test]
    fn prorated_last_tick() {
        // Length 10 at speed 4: 4 + 4 + 2.  Last tick charges cost(4) * 2 / 4.
        assert_eq!(prorated_travel_cost(4, 2).unwrap(), -2);
        assert_eq!(prorated_travel_cost(4, 4).unwrap(), travel_cost(4).unwrap());
        // Truncates toward zero: -6 * 1 / 5 = -1.
        assert_eq!(prorated_travel_cost(5, 1).unwrap(), -1);
        assert!(prorated_travel_cost(4, 5).is_err());
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_speed(0), MIN_SPEED);
        assert_eq!(clamp_speed(7), 7);
        assert_eq!(clamp_speed(99), MAX_SPEED);
    }

    #[test]
    fn whole_ticks_keeps_remainder() {
        let (n, rest) = whole_ticks(Duration::from_millis(23), Duration::from_millis(5));
        assert_eq!(n, 4);
        assert_eq!(rest, Duration::from_millis(3));
        assert_eq!(whole_ticks(Duration::from_millis(3), Duration::ZERO).0, 0);
    }
}

#[cfg(test)]
mod coefficients {
    use haul_core::Color;

    use crate::ScoreCoefficients;

    fn coeffs() -> ScoreCoefficients {
        ScoreCoefficients { payoff: 3_000, on_color_multiplier: 2, ..ScoreCoefficients::default() }
    }

    #[test]
    fn on_color_delivery_is_multiplied() {
        assert_eq!(coeffs().delivery_payoff(Color::SeaBlue, Color::SeaBlue), 6_000);
        assert_eq!(coeffs().delivery_payoff(Color::SeaBlue, Color::MidRed), 3_000);
    }

    #[test]
    fn idle_cost_scales_with_ticks() {
        let c = ScoreCoefficients { wait_cost: -2, ..coeffs() };
        assert_eq!(c.idle_cost(0), 0);
        assert_eq!(c.idle_cost(5), -10);
    }

    #[test]
    fn validation() {
        assert!(coeffs().validate().is_ok());
        assert!(ScoreCoefficients { wait_cost: 0, ..coeffs() }.validate().is_err());
        assert!(ScoreCoefficients { pickup_cost: 10, ..coeffs() }.validate().is_err());
        assert!(ScoreCoefficients { on_color_multiplier: 0, ..coeffs() }.validate().is_err());
    }
}

#[cfg(test)]
mod score {
    use std::sync::Arc;
    use std::thread;

    use crate::Score;

    #[test]
    fn concurrent_adds_sum() {
        let score = Arc::new(Score::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let score = Arc::clone(&score);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        score.add(-1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(score.value(), -8_000);
    }
}
