use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary or ratio value to two decimal places.
///
/// Rounding is half-to-even on the value actually stored in the `f64`, so an
/// exact tie such as `0.125` becomes `0.12`, while `2.675` (stored just below
/// the midpoint) becomes `2.67`. Values that do not fit a `Decimal`, including
/// NaN and infinities, are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    // mantissa / 10^scale is a single correctly rounded division
    let rounded = cents.mantissa() as f64 / 10f64.powi(cents.scale() as i32);
    // -0.0 would serialize as "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
