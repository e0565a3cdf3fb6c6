use std::{fmt::Display, ops::Deref};

/// Whole-number percentage, as shown next to completion statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percentage(u32);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    /// `round(100 * part / whole)`. An empty whole is 0% rather than a division by zero.
    pub fn of(part: usize, whole: usize) -> Percentage {
        if whole == 0 {
            return Percentage(0);
        }
        Percentage((part as f64 / whole as f64 * 100.).round() as u32)
    }

    /// Same as [Percentage::of] for fractional progress, e.g. a dhikr count against its target.
    pub fn of_f64(part: f64, whole: f64) -> Percentage {
        if whole <= 0. || !part.is_finite() || part <= 0. {
            return Percentage(0);
        }
        Percentage((part / whole * 100.).round() as u32)
    }
}

impl Deref for Percentage {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
