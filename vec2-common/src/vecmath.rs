use serde::{Deserialize, Serialize};

/// Decimal places kept by value cleaning.
pub const PRECISION_DIGITS: i32 = 8;

/// Default tolerance for componentwise equality.
pub const EPSILON: f64 = 1e-8;

/// Plain `(x, y)` pair used for interchange (JSON `{x, y}`) and as a
/// vector-like operand.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline(always)]
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    #[inline(always)]
    pub fn to_array(self) -> [f64; 2] { [self.x, self.y] }
}

impl From<[f64; 2]> for Point {
    fn from(a: [f64; 2]) -> Self { Point::new(a[0], a[1]) }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self { Point::new(x, y) }
}

/// Rounds `value` to `digits` decimal places.
/// Non-finite input comes back unchanged; callers that must reject it check first.
#[inline(always)]
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Magnitude too large for the scale factor, nothing left to round.
        return value;
    }
    scaled.round() / scale
}

/// Absolute-difference comparison used by every tolerance check.
#[inline(always)]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    // Same-signed infinities are equal; their difference is NaN.
    a == b || (a - b).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_removes_representation_noise() {
        assert_eq!(round_to(0.1 + 0.2, PRECISION_DIGITS), 0.3);
        assert_eq!(round_to(-1.000000004, PRECISION_DIGITS), -1.0);
        assert_eq!(round_to(1e300, PRECISION_DIGITS), 1e300);
        assert!(round_to(f64::NAN, PRECISION_DIGITS).is_nan());
    }

    #[test]
    fn approx_eq_uses_strict_bound() {
        assert!(approx_eq(1.0, 1.0 + 1e-14, EPSILON));
        assert!(!approx_eq(1.0, 1.1, EPSILON));
        assert!(!approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(approx_eq(f64::INFINITY, f64::INFINITY, EPSILON));
        assert!(!approx_eq(f64::INFINITY, f64::NEG_INFINITY, EPSILON));
    }

    #[test]
    fn point_json_form() {
        let p = Point::new(3.5421, 0.234);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"x":3.5421,"y":0.234}"#);
        let back: Point = serde_json::from_str(r#"{"x":1,"y":-2.5}"#).unwrap();
        assert_eq!(back, Point::new(1.0, -2.5));
    }
}
