//! Numeric sanitation for rows coming off the hosted backend.
//!
//! Backend rows arrive with nullable numeric columns and the occasional
//! garbage value. Reports must degrade dirty input to a zero contribution,
//! never propagate NaN/infinity or abort the whole aggregation.

/// Clamp a raw numeric value into something safe to aggregate.
///
/// NaN and infinities become `0.0`; everything else passes through.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sanitize an optional numeric column: missing → 0.
pub fn sanitize_opt(value: Option<f64>) -> f64 {
    sanitize(value.unwrap_or(0.0))
}

/// Divide, yielding 0 when the denominator is zero (or dirty).
///
/// Used for average-cost math where a zero balance must give average 0,
/// not NaN.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    let d = sanitize(denominator);
    if d == 0.0 {
        0.0
    } else {
        sanitize(sanitize(numerator) / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_and_infinity_become_zero() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(2.5), 2.5);
    }

    #[test]
    fn missing_column_is_zero() {
        assert_eq!(sanitize_opt(None), 0.0);
        assert_eq!(sanitize_opt(Some(7.0)), 7.0);
        assert_eq!(sanitize_opt(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn zero_denominator_divides_to_zero() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
        assert_eq!(safe_div(10.0, f64::NAN), 0.0);
    }
}
