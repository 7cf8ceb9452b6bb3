//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are fixed-point with 2 decimal places and at most 8 digits
//! (999 999.99). All arithmetic stays in `Decimal`; nothing is ever
//! converted through `f64`.

use rust_decimal::Decimal;

/// Number of decimal places for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Largest representable price (8 digits, 2 after the point)
pub const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be non-negative, got {0}")]
    Negative(Decimal),
    #[error("price has more than {DECIMAL_PLACES} decimal places: {0}")]
    TooPrecise(Decimal),
    #[error("price exceeds maximum allowed ({MAX_PRICE}), got {0}")]
    TooLarge(Decimal),
}

/// Validate a price and normalise it to exactly 2 decimal places
pub fn normalize_price(price: Decimal) -> Result<Decimal, PriceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PriceError::Negative(price));
    }
    if price.normalize().scale() > DECIMAL_PLACES {
        return Err(PriceError::TooPrecise(price));
    }
    if price > MAX_PRICE {
        return Err(PriceError::TooLarge(price));
    }
    let mut normalized = price.abs();
    normalized.rescale(DECIMAL_PLACES);
    Ok(normalized)
}

/// Price of one order line
pub fn line_price(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `unit_price × quantity` over all lines, at 2 decimal places
pub fn total_price<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    let mut total = lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, (price, qty)| acc + line_price(price, qty));
    total.rescale(DECIMAL_PLACES);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_is_exact() {
        let total = total_price([(d("1200.00"), 2), (d("350.50"), 1)]);
        assert_eq!(total, d("2750.50"));
        assert_eq!(total.to_string(), "2750.50");
    }

    #[test]
    fn test_total_without_float_drift() {
        // 0.1 + 0.2 style drift would show up here with f64
        let total = total_price([(d("0.10"), 1), (d("0.20"), 1)]);
        assert_eq!(total.to_string(), "0.30");
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(total_price(Vec::new()).to_string(), "0.00");
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price(d("12")).unwrap().to_string(), "12.00");
        assert_eq!(normalize_price(d("12.5")).unwrap().to_string(), "12.50");
        assert_eq!(normalize_price(d("0")).unwrap().to_string(), "0.00");
        assert_eq!(normalize_price(d("1.500")).unwrap().to_string(), "1.50");
    }

    #[test]
    fn test_reject_invalid_prices() {
        assert_eq!(
            normalize_price(d("-1.00")),
            Err(PriceError::Negative(d("-1.00")))
        );
        assert!(matches!(
            normalize_price(d("1.005")),
            Err(PriceError::TooPrecise(_))
        ));
        assert!(matches!(
            normalize_price(d("1000000.00")),
            Err(PriceError::TooLarge(_))
        ));
        assert!(normalize_price(d("999999.99")).is_ok());
    }
}
