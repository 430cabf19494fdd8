use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ApiError;

pub const PRICE_SCALE: u32 = 2;

/// Checks that a client-supplied price is a decimal number with at most
/// 28 significant digits.
pub fn validate_price(raw: &str) -> Result<(), ApiError> {
    Decimal::from_str(raw.trim())
        .map(|_| ())
        .map_err(|_| ApiError::Validation(format!("price must be a decimal number, got {raw:?}")))
}

/// Renders a stored price with exactly two fraction digits, rounding
/// half away from zero. Unparseable stored text is returned unchanged.
pub fn format_price(raw: &str) -> String {
    match Decimal::from_str(raw.trim()) {
        Ok(price) => {
            let rounded =
                price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded)
        }
        Err(_) => raw.to_string(),
    }
}
