use rust_decimal::Decimal;

use crate::errors::OddError;

/// Lowest odd the strategy accepts (1.10).
pub const MIN_ODD: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Highest odd the strategy accepts (1.20).
pub const MAX_ODD: Decimal = Decimal::from_parts(120, 0, 0, false, 2);

/// Check that an odd lies within `[MIN_ODD, MAX_ODD]`.
///
/// Plan generation refuses to run while this reports an error.
pub fn validate_odd(odd: Decimal) -> Result<(), OddError> {
    if odd < MIN_ODD {
        Err(OddError::TooLow)
    } else if odd > MAX_ODD {
        Err(OddError::TooHigh)
    } else {
        Ok(())
    }
}
