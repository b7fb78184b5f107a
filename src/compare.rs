use crate::error::{Result, VecError};
use crate::operand::Operand;
use crate::vector::Vec2;
use vec2_common::{approx_eq, round_to, PRECISION_DIGITS};

/// Rounds `value` to [`PRECISION_DIGITS`] decimals, dropping representation
/// noise such as `0.1 + 0.2 == 0.30000000000000004`.
pub fn clean(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(VecError::InvalidNumber(value));
    }
    Ok(round_to(value, PRECISION_DIGITS))
}

impl Vec2 {
    /// Componentwise equality within the policy epsilon.
    pub fn equal(&self, other: impl Into<Operand>) -> bool {
        let (ox, oy) = other.into().xy();
        let eps = self.policy().epsilon;
        approx_eq(self.x(), ox, eps) && approx_eq(self.y(), oy, eps)
    }

    /// False when either component is NaN or infinite.
    pub fn is_valid(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// The candidate closest to `self`. Ties go to the earliest candidate;
    /// `None` for an empty input.
    pub fn nearest<'a, I>(&self, candidates: I) -> Option<&'a Vec2>
    where
        I: IntoIterator<Item = &'a Vec2>,
    {
        let mut best: Option<(&'a Vec2, f64)> = None;
        for candidate in candidates {
            let d = self.distance_squared(candidate);
            // Strict `<` keeps the first of equal candidates and never picks a NaN distance.
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Whether `self` lies on the line through `start` and `end`.
    pub fn is_point_on_line(&self, start: impl Into<Operand>, end: impl Into<Operand>) -> bool {
        let (sx, sy) = start.into().xy();
        let (ex, ey) = end.into().xy();
        let cross = (ex - sx) * (self.y() - sy) - (ey - sy) * (self.x() - sx);
        cross.abs() < self.policy().epsilon
    }
}
