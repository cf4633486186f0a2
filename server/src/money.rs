//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with max input ≤ 1_000_000 (validated at boundary)
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Validate a price coming from an API payload
pub fn validate_price(value: f64, field: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{field} must be a finite number, got {value}"));
    }
    if value < 0.0 {
        return Err(format!("{field} must be non-negative, got {value}"));
    }
    if value > MAX_PRICE {
        return Err(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        ));
    }
    Ok(())
}

/// Price after a percentage discount: price - price * discount / 100
pub fn discounted_price(price: f64, discount_percent: f64) -> f64 {
    let price = to_decimal(price);
    let discount = to_decimal(discount_percent);
    let hundred = Decimal::from(100);
    to_f64(price - price * discount / hundred)
}

/// Sum of price * quantity over cart/order lines
pub fn lines_total<'a, I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, u32)>,
{
    let total = lines
        .into_iter()
        .map(|(price, qty)| to_decimal(price) * Decimal::from(qty))
        .sum::<Decimal>();
    to_f64(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_avoids_float_drift() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum), 0.3);
    }

    #[test]
    fn discount_is_computed_not_stored() {
        assert_eq!(discounted_price(10.0, 25.0), 7.5);
        assert_eq!(discounted_price(9.99, 0.0), 9.99);
        assert_eq!(discounted_price(19.99, 10.0), 17.99);
    }

    #[test]
    fn lines_total_accumulates_precisely() {
        let lines = vec![(10.99, 3_u32), (0.01, 100)];
        assert_eq!(lines_total(lines), 33.97);
    }

    #[test]
    fn rejects_bad_prices() {
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "price").is_err());
        assert!(validate_price(12.5, "price").is_ok());
    }
}
