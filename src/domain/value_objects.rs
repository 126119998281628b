//! Value objects for the discount engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage value object: a discount is a percentage in (0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percent(Decimal);

impl Percent {
    pub fn new(value: Decimal) -> Result<Self, PercentError> {
        if value <= Decimal::ZERO {
            return Err(PercentError::NotPositive);
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(PercentError::OverOneHundred);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The percentage as a ratio, e.g. 10% -> 0.1.
    pub fn ratio(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    NotPositive,
    OverOneHundred,
}

impl std::error::Error for PercentError {}
impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "must be greater than zero"),
            Self::OverOneHundred => write!(f, "must not exceed 100"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_bounds() {
        assert!(Percent::new(dec!(10)).is_ok());
        assert!(Percent::new(dec!(100)).is_ok());
        assert_eq!(Percent::new(dec!(0)), Err(PercentError::NotPositive));
        assert_eq!(Percent::new(dec!(-5)), Err(PercentError::NotPositive));
        assert_eq!(Percent::new(dec!(100.01)), Err(PercentError::OverOneHundred));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Percent::new(dec!(10)).unwrap().ratio(), dec!(0.1));
    }
}
