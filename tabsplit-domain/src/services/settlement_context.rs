//! Rounding profile for member balances and settlement transfers.

use crate::model::Money;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding mode for balance and transfer amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.005 -> 0.01, -0.005 -> -0.01).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Context for a settlement computation.
///
/// # Example
/// ```
/// use tabsplit_domain::{Money, services::SettlementContext};
///
/// let ctx = SettlementContext::two_decimal_default();
/// assert_eq!(ctx.round(Money::new(12345, 3)), Money::new(1235, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    /// Number of decimal places balances and transfers are rounded to.
    pub scale: u32,
    pub rounding_mode: RoundingMode,
    /// Transfers must be strictly greater than this to be emitted.
    pub transfer_threshold: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettlementContextError {
    UnsupportedScale { scale: u32, max_supported: u32 },
    NegativeThreshold(Money),
}

pub const MAX_SETTLEMENT_SCALE: u32 = 22;

impl SettlementContext {
    /// Two decimal places, half-up, 0.01 threshold.
    pub fn two_decimal_default() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
            transfer_threshold: Money::from_decimal(Decimal::new(1, 2)),
        }
    }

    pub fn validate(self) -> Result<Self, SettlementContextError> {
        if self.scale > MAX_SETTLEMENT_SCALE {
            return Err(SettlementContextError::UnsupportedScale {
                scale: self.scale,
                max_supported: MAX_SETTLEMENT_SCALE,
            });
        }
        if self.transfer_threshold.is_negative() {
            return Err(SettlementContextError::NegativeThreshold(
                self.transfer_threshold,
            ));
        }
        Ok(self)
    }

    pub fn round(self, amount: Money) -> Money {
        amount.round_dp(self.scale, self.rounding_mode.strategy())
    }

    pub fn exceeds_threshold(self, amount: Money) -> bool {
        amount > self.transfer_threshold
    }
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::two_decimal_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half_up_positive(RoundingMode::HalfUp, Money::new(1005, 3), Money::new(101, 2))]
    #[case::half_up_negative(RoundingMode::HalfUp, Money::new(-1005, 3), Money::new(-101, 2))]
    #[case::half_even_down(RoundingMode::HalfEven, Money::new(1005, 3), Money::new(100, 2))]
    #[case::half_even_up(RoundingMode::HalfEven, Money::new(1015, 3), Money::new(102, 2))]
    #[case::already_rounded(RoundingMode::HalfUp, Money::new(42, 1), Money::new(420, 2))]
    fn rounds_to_scale(#[case] mode: RoundingMode, #[case] input: Money, #[case] expected: Money) {
        let ctx = SettlementContext {
            rounding_mode: mode,
            ..SettlementContext::two_decimal_default()
        };
        assert_eq!(ctx.round(input), expected);
    }

    #[rstest]
    #[case::exactly_threshold(Money::new(1, 2), false)]
    #[case::just_above(Money::new(11, 3), true)]
    #[case::below(Money::new(9, 3), false)]
    #[case::zero(Money::ZERO, false)]
    fn threshold_is_strict(#[case] amount: Money, #[case] expected: bool) {
        assert_eq!(
            SettlementContext::two_decimal_default().exceeds_threshold(amount),
            expected
        );
    }

    #[test]
    fn rejects_unsupported_scale() {
        let ctx = SettlementContext {
            scale: MAX_SETTLEMENT_SCALE + 1,
            ..SettlementContext::two_decimal_default()
        };

        assert_eq!(
            ctx.validate(),
            Err(SettlementContextError::UnsupportedScale {
                scale: MAX_SETTLEMENT_SCALE + 1,
                max_supported: MAX_SETTLEMENT_SCALE,
            })
        );
    }

    #[test]
    fn rejects_negative_threshold() {
        let ctx = SettlementContext {
            transfer_threshold: Money::new(-1, 2),
            ..SettlementContext::two_decimal_default()
        };

        assert_eq!(
            ctx.validate(),
            Err(SettlementContextError::NegativeThreshold(Money::new(-1, 2)))
        );
    }
}
