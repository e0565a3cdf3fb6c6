//! Coercion of raw numeric form input. Stores never receive invalid numbers: anything that
//! doesn't parse into a sensible value falls back to a safe default here.

/// Non-numeric, negative or non-finite prices become 0.
pub fn coerce_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0. => v,
        _ => 0.,
    }
}

/// Non-numeric or zero quantities become 1. A fractional input keeps its integer part.
pub fn coerce_quantity(raw: &str) -> u32 {
    let raw = raw.trim();
    let parsed = raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 1.)
            .map(|v| v.trunc().min(u32::MAX as f64) as u32)
    });
    match parsed {
        Some(v) if v > 0 => v,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{coerce_price, coerce_quantity};

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price("12.5"), 12.5);
        assert_eq!(coerce_price(" 40 "), 40.);
        assert_eq!(coerce_price("abc"), 0.);
        assert_eq!(coerce_price("-3"), 0.);
        assert_eq!(coerce_price("NaN"), 0.);
        assert_eq!(coerce_price(""), 0.);
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity("3"), 3);
        assert_eq!(coerce_quantity("2.7"), 2);
        assert_eq!(coerce_quantity("0"), 1);
        assert_eq!(coerce_quantity("many"), 1);
        assert_eq!(coerce_quantity("-4"), 1);
    }
}
