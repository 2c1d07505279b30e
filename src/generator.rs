// src/generator.rs
use crate::config::{AmountRange, DelayRange};
use crate::error::{BotError, BotResult};
use alloy::primitives::U256;
use rand::Rng;
use std::time::Duration;

/// Draws randomized transfer quantities within a fixed MON range, floored to
/// a fixed number of fractional digits and scaled to wei.
#[derive(Debug, Clone, Copy)]
pub struct AmountGenerator {
    range: AmountRange,
}

impl AmountGenerator {
    pub fn new(range: AmountRange) -> BotResult<Self> {
        if !(range.min_mon > 0.0) || range.max_mon < range.min_mon {
            return Err(BotError::Config(format!(
                "invalid amount range {}..{}",
                range.min_mon, range.max_mon
            )));
        }
        if range.precision > 18 {
            return Err(BotError::Config(format!(
                "amount precision {} exceeds 18 decimals",
                range.precision
            )));
        }
        Ok(Self { range })
    }

    /// Uniform draw in `[min, max)`, floored at the configured precision so
    /// the scaled amount can never reach the upper bound. `min == max`
    /// degenerates to the constant `min`.
    pub fn sample(&self) -> U256 {
        let AmountRange {
            min_mon,
            max_mon,
            precision,
        } = self.range;
        if min_mon == max_mon {
            return scale_to_wei(min_mon, precision);
        }
        let drawn = rand::thread_rng().gen_range(min_mon..max_mon);
        scale_to_wei(drawn, precision)
    }
}

fn scale_to_wei(mon: f64, precision: u32) -> U256 {
    let units = (mon * 10f64.powi(precision as i32)).floor() as u64;
    U256::from(units) * U256::from(10u64).pow(U256::from(18 - precision))
}

/// Draws randomized pacing delays, uniform over an inclusive millisecond
/// range.
#[derive(Debug, Clone, Copy)]
pub struct DelayGenerator {
    range: DelayRange,
}

impl DelayGenerator {
    pub fn new(range: DelayRange) -> BotResult<Self> {
        if range.min_ms > range.max_ms {
            return Err(BotError::Config(format!(
                "invalid delay range {}..{}",
                range.min_ms, range.max_ms
            )));
        }
        Ok(Self { range })
    }

    pub fn sample(&self) -> Duration {
        let DelayRange { min_ms, max_ms } = self.range;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_amounts() -> AmountGenerator {
        AmountGenerator::new(AmountRange {
            min_mon: 0.01,
            max_mon: 0.05,
            precision: 4,
        })
        .unwrap()
    }

    #[test]
    fn amounts_stay_within_bounds() {
        let generator = default_amounts();
        let min_wei = scale_to_wei(0.01, 4);
        let max_wei = scale_to_wei(0.05, 4);
        for _ in 0..10_000 {
            let amount = generator.sample();
            assert!(amount >= min_wei, "amount {amount} below lower bound");
            assert!(amount < max_wei, "amount {amount} reached upper bound");
        }
    }

    #[test]
    fn amounts_are_floored_at_precision() {
        // One precision step in wei; every sample must be a multiple of it.
        let step = U256::from(10u64).pow(U256::from(14));
        let generator = default_amounts();
        for _ in 0..1_000 {
            assert_eq!(generator.sample() % step, U256::ZERO);
        }
    }

    #[test]
    fn equal_bounds_degenerate_to_constant() {
        let generator = AmountGenerator::new(AmountRange {
            min_mon: 0.02,
            max_mon: 0.02,
            precision: 4,
        })
        .unwrap();
        let expected = scale_to_wei(0.02, 4);
        for _ in 0..100 {
            assert_eq!(generator.sample(), expected);
        }
    }

    #[test]
    fn scaling_floors_rather_than_rounds() {
        assert_eq!(scale_to_wei(0.012999, 4), scale_to_wei(0.0129, 4));
    }

    #[test]
    fn invalid_amount_ranges_are_rejected() {
        assert!(
            AmountGenerator::new(AmountRange {
                min_mon: 0.0,
                max_mon: 0.05,
                precision: 4
            })
            .is_err()
        );
        assert!(
            AmountGenerator::new(AmountRange {
                min_mon: 0.05,
                max_mon: 0.01,
                precision: 4
            })
            .is_err()
        );
        assert!(
            AmountGenerator::new(AmountRange {
                min_mon: 0.01,
                max_mon: 0.05,
                precision: 19
            })
            .is_err()
        );
    }

    #[test]
    fn delays_stay_within_inclusive_bounds() {
        let generator = DelayGenerator::new(DelayRange {
            min_ms: 60_000,
            max_ms: 180_000,
        })
        .unwrap();
        for _ in 0..10_000 {
            let delay = generator.sample();
            assert!(delay >= Duration::from_millis(60_000));
            assert!(delay <= Duration::from_millis(180_000));
        }
    }

    #[test]
    fn equal_delay_bounds_degenerate_to_constant() {
        let generator = DelayGenerator::new(DelayRange {
            min_ms: 1_000,
            max_ms: 1_000,
        })
        .unwrap();
        assert_eq!(generator.sample(), Duration::from_millis(1_000));
    }

    #[test]
    fn inverted_delay_range_is_rejected() {
        assert!(
            DelayGenerator::new(DelayRange {
                min_ms: 10,
                max_ms: 5
            })
            .is_err()
        );
    }
}
