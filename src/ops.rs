//! Arithmetic and geometry on [`Vec2`].
//!
//! Mutating forms write through `set` (cache invalidation + notification) and
//! return `&mut Self`. Pure forms return a new vector and never notify.

use crate::error::{Result, VecError};
use crate::operand::{Factor, Operand};
use crate::vector::Vec2;
use log::trace;
use std::ops::{Mul, Neg, Sub};

impl Vec2 {
    // ---- add / subtract ----

    pub fn add(&mut self, rhs: impl Into<Operand>) -> &mut Self {
        let (x, y) = self.sum(rhs.into());
        self.assign(x, y, true);
        self
    }

    pub fn added(&self, rhs: impl Into<Operand>) -> Vec2 {
        let (x, y) = self.sum(rhs.into());
        self.spawn(x, y)
    }

    pub fn subtract(&mut self, rhs: impl Into<Operand>) -> &mut Self {
        let (x, y) = self.difference(rhs.into());
        self.assign(x, y, true);
        self
    }

    pub fn subtracted(&self, rhs: impl Into<Operand>) -> Vec2 {
        let (x, y) = self.difference(rhs.into());
        self.spawn(x, y)
    }

    // ---- multiply / divide ----

    /// Componentwise product; a scalar factor scales both components.
    pub fn multiply(&mut self, factor: impl Into<Factor>) -> &mut Self {
        let (x, y) = self.product(factor.into());
        self.assign(x, y, true);
        self
    }

    pub fn multiplied(&self, factor: impl Into<Factor>) -> Vec2 {
        let (x, y) = self.product(factor.into());
        self.spawn(x, y)
    }

    /// Componentwise quotient. Fails without touching `self` when any divisor
    /// component is zero or NaN.
    pub fn divide(&mut self, divisor: impl Into<Factor>) -> Result<&mut Self> {
        let (x, y) = self.quotient(divisor.into())?;
        self.assign(x, y, true);
        Ok(self)
    }

    pub fn divided(&self, divisor: impl Into<Factor>) -> Result<Vec2> {
        let (x, y) = self.quotient(divisor.into())?;
        Ok(self.spawn(x, y))
    }

    // ---- unary ----

    pub fn negate(&mut self) -> &mut Self {
        self.assign(-self.x(), -self.y(), true);
        self
    }

    pub fn negated(&self) -> Vec2 {
        self.spawn(-self.x(), -self.y())
    }

    pub fn abs(&mut self) -> &mut Self {
        self.assign(self.x().abs(), self.y().abs(), true);
        self
    }

    pub fn absolute(&self) -> Vec2 {
        self.spawn(self.x().abs(), self.y().abs())
    }

    /// Replaces `self` with its perpendicular `(-y, x)`.
    pub fn skew(&mut self) -> &mut Self {
        self.assign(-self.y(), self.x(), true);
        self
    }

    /// The perpendicular `(-y, x)`: `skewed(v).dot(w) == v.perp_dot(w)`.
    pub fn skewed(&self) -> Vec2 {
        self.spawn(-self.y(), self.x())
    }

    // ---- rotation ----

    /// Rotates by `angle` radians; `inverse` rotates by `-angle`.
    pub fn rotate(&mut self, angle: f64, inverse: bool) -> &mut Self {
        let (x, y) = self.rotation(angle, inverse);
        self.assign(x, y, true);
        self
    }

    pub fn rotated(&self, angle: f64, inverse: bool) -> Vec2 {
        let (x, y) = self.rotation(angle, inverse);
        self.spawn(x, y)
    }

    // ---- normalization ----

    /// Scales to unit length. A vector too short to invert becomes zero.
    pub fn normalize(&mut self) -> &mut Self {
        let (x, y) = self.unit();
        self.assign(x, y, true);
        self
    }

    pub fn normalized(&self) -> Vec2 {
        let (x, y) = self.unit();
        self.spawn(x, y)
    }

    // ---- componentwise min / max / clamp ----

    pub fn min(&mut self, other: impl Into<Operand>) -> &mut Self {
        let (x, y) = self.lower(other.into());
        self.assign(x, y, true);
        self
    }

    pub fn minimum(&self, other: impl Into<Operand>) -> Vec2 {
        let (x, y) = self.lower(other.into());
        self.spawn(x, y)
    }

    pub fn max(&mut self, other: impl Into<Operand>) -> &mut Self {
        let (x, y) = self.upper(other.into());
        self.assign(x, y, true);
        self
    }

    pub fn maximum(&self, other: impl Into<Operand>) -> Vec2 {
        let (x, y) = self.upper(other.into());
        self.spawn(x, y)
    }

    /// `min(high)` followed by `max(low)`, so `low` wins where `low > high`.
    pub fn clamp(&mut self, low: impl Into<Operand>, high: impl Into<Operand>) -> &mut Self {
        let (x, y) = self.bounded(low.into(), high.into());
        self.assign(x, y, true);
        self
    }

    pub fn clamped(&self, low: impl Into<Operand>, high: impl Into<Operand>) -> Vec2 {
        let (x, y) = self.bounded(low.into(), high.into());
        self.spawn(x, y)
    }

    // ---- interpolation ----

    /// `self + (other - self) * amount`.
    pub fn lerp(&mut self, other: impl Into<Operand>, amount: f64) -> &mut Self {
        let (x, y) = self.interpolate(other.into(), amount);
        self.assign(x, y, true);
        self
    }

    pub fn lerped(&self, other: impl Into<Operand>, amount: f64) -> Vec2 {
        let (x, y) = self.interpolate(other.into(), amount);
        self.spawn(x, y)
    }

    // ---- scalar queries ----

    pub fn dot(&self, b: impl Into<Operand>) -> f64 {
        let (bx, by) = b.into().xy();
        self.x() * bx + self.y() * by
    }

    /// 2D cross product `x * b.y - y * b.x`.
    pub fn perp_dot(&self, b: impl Into<Operand>) -> f64 {
        let (bx, by) = b.into().xy();
        self.x() * by - self.y() * bx
    }

    /// Signed angle in radians from `self` to `v`.
    pub fn angle_to(&self, v: impl Into<Operand>) -> f64 {
        let v: Operand = v.into();
        self.perp_dot(v).atan2(self.dot(v))
    }

    pub fn distance_squared(&self, v: impl Into<Operand>) -> f64 {
        let (dx, dy) = self.difference(v.into());
        dx * dx + dy * dy
    }

    pub fn distance(&self, v: impl Into<Operand>) -> f64 {
        self.distance_squared(v).sqrt()
    }

    // ---- shared kernels ----

    #[inline]
    fn sum(&self, rhs: Operand) -> (f64, f64) {
        let (rx, ry) = rhs.xy();
        (self.x() + rx, self.y() + ry)
    }

    #[inline]
    fn difference(&self, rhs: Operand) -> (f64, f64) {
        let (rx, ry) = rhs.xy();
        (self.x() - rx, self.y() - ry)
    }

    #[inline]
    fn product(&self, factor: Factor) -> (f64, f64) {
        let (fx, fy) = factor.xy();
        (self.x() * fx, self.y() * fy)
    }

    fn quotient(&self, divisor: Factor) -> Result<(f64, f64)> {
        let (dx, dy) = divisor.xy();
        if dx == 0.0 || dy == 0.0 || dx.is_nan() || dy.is_nan() {
            trace!("refusing to divide {} by ({}, {})", self, dx, dy);
            return Err(VecError::Division { x: dx, y: dy });
        }
        Ok((self.x() / dx, self.y() / dy))
    }

    fn rotation(&self, angle: f64, inverse: bool) -> (f64, f64) {
        let (x, y) = self.xy();
        let (sin, cos) = angle.sin_cos();
        let sin = if inverse { -sin } else { sin };
        (cos * x - sin * y, sin * x + cos * y)
    }

    fn unit(&self) -> (f64, f64) {
        let length = self.length();
        // 1/length would overflow below the smallest normal; treat as zero length.
        let inverted = if length < f64::MIN_POSITIVE { 0.0 } else { 1.0 / length };
        (self.x() * inverted, self.y() * inverted)
    }

    #[inline]
    fn lower(&self, other: Operand) -> (f64, f64) {
        let (ox, oy) = other.xy();
        (
            if self.x() < ox { self.x() } else { ox },
            if self.y() < oy { self.y() } else { oy },
        )
    }

    #[inline]
    fn upper(&self, other: Operand) -> (f64, f64) {
        let (ox, oy) = other.xy();
        (
            if self.x() > ox { self.x() } else { ox },
            if self.y() > oy { self.y() } else { oy },
        )
    }

    fn bounded(&self, low: Operand, high: Operand) -> (f64, f64) {
        let (lx, ly) = low.xy();
        let (hx, hy) = high.xy();
        let x = if self.x() < hx { self.x() } else { hx };
        let y = if self.y() < hy { self.y() } else { hy };
        (if x > lx { x } else { lx }, if y > ly { y } else { ly })
    }

    fn interpolate(&self, other: Operand, amount: f64) -> (f64, f64) {
        let (ox, oy) = other.xy();
        (
            self.x() + (ox - self.x()) * amount,
            self.y() + (oy - self.y()) * amount,
        )
    }
}

// Operators are the pure forms. No `Add`: its `add` would shadow the
// mutating `Vec2::add` for owned receivers wherever the trait is in scope.
impl Sub for &Vec2 {
    type Output = Vec2;
    fn sub(self, other: Self) -> Vec2 {
        self.subtracted(other)
    }
}

impl Mul<f64> for &Vec2 {
    type Output = Vec2;
    fn mul(self, scalar: f64) -> Vec2 {
        self.multiplied(scalar)
    }
}

impl Neg for &Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::rc::Rc;

    fn counting(v: &mut Vec2) -> Rc<Cell<u32>> {
        let calls = Rc::new(Cell::new(0));
        let count = Rc::clone(&calls);
        v.change(move |_, _| count.set(count.get() + 1));
        calls
    }

    #[test]
    fn add_and_subtract_every_shape() {
        let mut v = Vec2::new(1.0, 2.0);
        v.add(&Vec2::new(1.0, 1.0)).add((1.0, 1.0)).add([1.0, 1.0]);
        assert_eq!(v.xy(), (4.0, 5.0));
        v.subtract([4.0, 5.0]);
        assert_eq!(v.xy(), (0.0, 0.0));

        let base = Vec2::new(10.0, 10.0);
        let r = base.subtracted((3.0, 4.0));
        assert_eq!(r.xy(), (7.0, 6.0));
        assert_eq!(base.xy(), (10.0, 10.0));
    }

    #[test]
    fn mutating_forms_notify_pure_forms_do_not() {
        let mut v = Vec2::new(1.0, 1.0);
        let calls = counting(&mut v);

        let _ = v.added((1.0, 1.0));
        let _ = v.rotated(PI, false);
        let _ = v.normalized();
        assert_eq!(calls.get(), 0);

        v.add((1.0, 1.0)).negate().abs();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn multiply_vector_or_scalar() {
        let mut v = Vec2::new(2.0, 3.0);
        v.multiply(&Vec2::new(2.0, 2.0));
        assert_eq!(v.xy(), (4.0, 6.0));
        v.multiply(0.5);
        assert_eq!(v.xy(), (2.0, 3.0));
        assert_eq!(v.multiplied([3.0, 4.0]).xy(), (6.0, 12.0));
        assert_eq!(v.multiplied((0.0, 1.0)).xy(), (0.0, 3.0));
    }

    #[test]
    fn divide_rejects_zero_and_nan() {
        let mut zero = Vec2::new(0.0, 0.0);
        assert_eq!(
            zero.divide(0.0).err(),
            Some(VecError::Division { x: 0.0, y: 0.0 })
        );
        let v = Vec2::new(4.0, 8.0);
        assert!(v.divided(f64::NAN).is_err());
        assert!(v.divided((2.0, 0.0)).is_err());
        assert!(v.divided([f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn failed_divide_leaves_vector_alone() {
        let mut v = Vec2::new(4.0, 8.0);
        let calls = counting(&mut v);
        assert!(v.divide(0.0).is_err());
        assert_eq!(v.xy(), (4.0, 8.0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn divide_vector_or_scalar() {
        let mut v = Vec2::new(4.0, 8.0);
        v.divide(2.0).unwrap();
        assert_eq!(v.xy(), (2.0, 4.0));
        v.divide(&Vec2::new(2.0, 4.0)).unwrap();
        assert_eq!(v.xy(), (1.0, 1.0));
        assert_eq!(v.divided((0.5, 0.25)).unwrap().xy(), (2.0, 4.0));
    }

    #[test]
    fn negate_flips_signs() {
        let mut v = Vec2::new(5.0, -6.0);
        v.negate();
        assert_eq!(v.xy(), (-5.0, 6.0));
        assert_eq!(v.negated().xy(), (5.0, -6.0));
        assert_eq!((-&v).xy(), (5.0, -6.0));
    }

    #[test]
    fn rotate_quarter_turns() {
        let mut v = Vec2::new(10.0, 0.0);
        v.rotate(FRAC_PI_2, false);
        assert!(v.equal((0.0, 10.0)));
        v.rotate(FRAC_PI_2, true);
        assert!(v.equal((10.0, 0.0)));
        assert!(v.rotated(PI, false).equal((-10.0, 0.0)));
        assert!(v.rotated(FRAC_PI_2, true).equal((0.0, -10.0)));
    }

    #[test]
    fn normalize_unit_and_zero() {
        let mut v = Vec2::new(3.0, 4.0);
        v.normalize();
        assert!(v.equal((0.6, 0.8)));
        assert!((v.length() - 1.0).abs() < 1e-12);

        let mut z = Vec2::default();
        z.normalize();
        assert_eq!(z.xy(), (0.0, 0.0));
        assert!(z.is_valid());

        let tiny = Vec2::new(f64::MIN_POSITIVE / 4.0, 0.0);
        assert_eq!(tiny.normalized().xy(), (0.0, 0.0));
    }

    #[test]
    fn abs_min_max() {
        let v = Vec2::new(-10.0, 5.0);
        assert_eq!(v.absolute().xy(), (10.0, 5.0));

        let a = Vec2::new(1.0, 10.0);
        assert_eq!(a.minimum((5.0, 5.0)).xy(), (1.0, 5.0));
        assert_eq!(a.maximum((5.0, 5.0)).xy(), (5.0, 10.0));

        let mut m = Vec2::new(1.0, 10.0);
        m.min([5.0, 5.0]);
        assert_eq!(m.xy(), (1.0, 5.0));
        m.max([3.0, 3.0]);
        assert_eq!(m.xy(), (3.0, 5.0));
    }

    #[test]
    fn clamp_into_range() {
        let low = Vec2::new(0.0, 0.0);
        let high = Vec2::new(2.0, 4.0);

        assert!(Vec2::new(4.0, 6.0).clamped(&low, &high).equal((2.0, 4.0)));
        assert!(Vec2::new(-2.0, -10.0).clamped(&low, &high).equal((0.0, 0.0)));

        let mut v = Vec2::new(4.0, 6.0);
        v.clamp(&low, &high);
        assert_eq!(v.xy(), (2.0, 4.0));
    }

    #[test]
    fn clamp_with_inverted_bounds_prefers_low() {
        // min(high) then max(low): low wins.
        let v = Vec2::new(5.0, 5.0);
        assert_eq!(v.clamped((3.0, 3.0), (1.0, 1.0)).xy(), (3.0, 3.0));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, -4.0);
        assert!(a.lerped(&b, 0.0).equal(&a));
        assert!(a.lerped(&b, 1.0).equal(&b));
        assert!(a.lerped(&b, 0.5).equal((5.0, -2.0)));

        let mut m = a.clone();
        m.lerp(&b, 0.5);
        assert_eq!(m.xy(), (5.0, -2.0));
    }

    #[test]
    fn skew_is_perpendicular() {
        let v = Vec2::new(10.0, 20.0);
        let s = v.skewed();
        assert_eq!(s.xy(), (-20.0, 10.0));
        let w = Vec2::new(3.0, -7.0);
        assert_eq!(s.dot(&w), v.perp_dot(&w));

        let mut m = v.clone();
        m.skew();
        assert_eq!(m.xy(), (-20.0, 10.0));
    }

    #[test]
    fn dot_perp_dot_angle() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(5.0, 15.0);
        assert_eq!(a.dot(&b), 200.0);
        assert_eq!(a.perp_dot(&b), 100.0);
        assert_eq!(Vec2::new(10.0, 0.0).angle_to((0.0, 10.0)), FRAC_PI_2);
        assert_eq!(Vec2::new(10.0, 0.0).angle_to((0.0, -10.0)), -FRAC_PI_2);
    }

    #[test]
    fn distance_does_not_mutate() {
        let mut a = Vec2::new(10.0, 10.0);
        let calls = counting(&mut a);
        assert_eq!(a.distance((13.0, 14.0)), 5.0);
        assert_eq!(a.distance_squared([13.0, 14.0]), 25.0);
        assert_eq!(a.xy(), (10.0, 10.0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn operators_are_pure() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 5.0);
        assert_eq!((&b - &a).xy(), (2.0, 3.0));
        assert_eq!((&a * 3.0).xy(), (3.0, 6.0));
        assert_eq!(a.xy(), (1.0, 2.0));
    }

    #[test]
    fn add_mutates_with_std_add_in_scope() {
        #[allow(unused_imports)]
        use std::ops::Add;
        let mut v = Vec2::new(1.0, 2.0);
        v.add(&Vec2::new(1.0, 1.0));
        assert_eq!(v.xy(), (2.0, 3.0));
        v.add((1.0, 1.0)).add([1.0, 1.0]);
        assert_eq!(v.xy(), (4.0, 5.0));
    }

    #[test]
    fn cleaned_policy_applies_to_pure_results() {
        let a = Vec2::with_policy(0.1, 0.1, vec2_common::VectorPolicy::cleaned());
        let r = a.added((0.2, 0.2));
        assert_eq!(r.xy(), (0.3, 0.3));
        assert!(r.policy().clean_values);
    }
}
