//! Exact rational percentages for slippage tolerance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::full_math;

/// A tolerance expressed as an exact fraction, reduced to lowest terms.
/// Stored as a rational rather than a float so reduction never loses
/// precision on large token amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage {
    numerator: u64,
    denominator: u64,
}

impl Percentage {
    /// Builds a tolerance from an arbitrary fraction.
    pub fn from_fraction(numerator: u64, denominator: u64) -> Result<Self, CoreError> {
        if denominator == 0 {
            return Err(CoreError::DivideByZero);
        }
        let g = gcd(numerator, denominator);
        Ok(Self { numerator: numerator / g, denominator: denominator / g })
    }

    /// Builds a tolerance from basis points (1 bps = 1/10_000).
    pub fn from_basis_points(bps: u64) -> Self {
        let g = gcd(bps, 10_000);
        Self { numerator: bps / g, denominator: 10_000 / g }
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// `ceil(amount * (1 + tolerance))` - the most the caller may pay.
    pub fn adjust_up(&self, amount: u64) -> Result<u64, CoreError> {
        let adjusted = full_math::mul_div(
            u128::from(amount),
            u128::from(self.denominator) + u128::from(self.numerator),
            u128::from(self.denominator),
            128,
            true,
        )?;
        adjusted.try_into().map_err(|_| CoreError::AmountExceedsMaxU64)
    }

    /// `floor(amount * (1 - tolerance))` - the least the caller accepts.
    /// A tolerance of 100% or more floors to zero.
    pub fn adjust_down(&self, amount: u64) -> Result<u64, CoreError> {
        let reduced = self.denominator.saturating_sub(self.numerator);
        let adjusted = full_math::mul_div(
            u128::from(amount),
            u128::from(reduced),
            u128::from(self.denominator),
            128,
            false,
        )?;
        // reduced <= denominator, so the result never exceeds `amount`
        Ok(adjusted as u64)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_reduce() {
        let p = Percentage::from_fraction(50, 100).unwrap();
        assert_eq!((p.numerator(), p.denominator()), (1, 2));
        let p = Percentage::from_basis_points(1000);
        assert_eq!((p.numerator(), p.denominator()), (1, 10));
    }

    #[test]
    fn zero_numerator_reduces_to_zero_over_one() {
        let p = Percentage::from_fraction(0, 777).unwrap();
        assert_eq!((p.numerator(), p.denominator()), (0, 1));
        assert_eq!(p.adjust_up(1234).unwrap(), 1234);
        assert_eq!(p.adjust_down(1234).unwrap(), 1234);
    }

    #[test]
    fn zero_denominator_rejected() {
        assert_eq!(Percentage::from_fraction(1, 0), Err(CoreError::DivideByZero));
    }

    #[test]
    fn adjusts_round_directionally() {
        let ten_pct = Percentage::from_basis_points(1000);
        assert_eq!(ten_pct.adjust_up(1005).unwrap(), 1106);
        assert_eq!(ten_pct.adjust_down(996).unwrap(), 896);
        let one_pct = Percentage::from_basis_points(100);
        assert_eq!(one_pct.adjust_up(1000).unwrap(), 1010);
        assert_eq!(one_pct.adjust_down(999).unwrap(), 989);
    }

    #[test]
    fn full_tolerance_floors_to_zero() {
        let all = Percentage::from_basis_points(10_000);
        assert_eq!(all.adjust_down(5000).unwrap(), 0);
    }
}
