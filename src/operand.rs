//! Operand shapes accepted wherever an operation takes "a vector".
//!
//! The shape is resolved to a canonical `(x, y)` pair once, at the call
//! boundary, before any operation logic runs.

use crate::vector::Vec2;
use vec2_common::Point;

/// A vector-valued argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operand {
    /// Two loose scalars, `(x, y)`.
    ScalarPair(f64, f64),
    /// Anything exposing `x` and `y`, captured by value.
    VectorLike { x: f64, y: f64 },
    /// A two-element ordered sequence, `[x, y]`.
    Pair([f64; 2]),
}

impl Operand {
    #[inline]
    pub fn xy(self) -> (f64, f64) {
        match self {
            Operand::ScalarPair(x, y) => (x, y),
            Operand::VectorLike { x, y } => (x, y),
            Operand::Pair([x, y]) => (x, y),
        }
    }
}

impl From<(f64, f64)> for Operand {
    fn from((x, y): (f64, f64)) -> Self {
        Operand::ScalarPair(x, y)
    }
}

impl From<[f64; 2]> for Operand {
    fn from(pair: [f64; 2]) -> Self {
        Operand::Pair(pair)
    }
}

impl From<&[f64; 2]> for Operand {
    fn from(pair: &[f64; 2]) -> Self {
        Operand::Pair(*pair)
    }
}

impl From<&Vec2> for Operand {
    fn from(v: &Vec2) -> Self {
        Operand::VectorLike { x: v.x(), y: v.y() }
    }
}

impl From<&mut Vec2> for Operand {
    fn from(v: &mut Vec2) -> Self {
        Operand::VectorLike { x: v.x(), y: v.y() }
    }
}

impl From<Point> for Operand {
    fn from(p: Point) -> Self {
        Operand::VectorLike { x: p.x, y: p.y }
    }
}

impl From<&Point> for Operand {
    fn from(p: &Point) -> Self {
        Operand::VectorLike { x: p.x, y: p.y }
    }
}

/// Argument of `multiply`/`divide`: a vector, or one scalar broadcast to both
/// components.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Factor {
    Scalar(f64),
    Components(Operand),
}

impl Factor {
    #[inline]
    pub fn xy(self) -> (f64, f64) {
        match self {
            Factor::Scalar(s) => (s, s),
            Factor::Components(op) => op.xy(),
        }
    }
}

impl From<f64> for Factor {
    fn from(s: f64) -> Self {
        Factor::Scalar(s)
    }
}

impl From<Operand> for Factor {
    fn from(op: Operand) -> Self {
        Factor::Components(op)
    }
}

impl From<(f64, f64)> for Factor {
    fn from(xy: (f64, f64)) -> Self {
        Factor::Components(xy.into())
    }
}

impl From<[f64; 2]> for Factor {
    fn from(pair: [f64; 2]) -> Self {
        Factor::Components(pair.into())
    }
}

impl From<&Vec2> for Factor {
    fn from(v: &Vec2) -> Self {
        Factor::Components(v.into())
    }
}

impl From<Point> for Factor {
    fn from(p: Point) -> Self {
        Factor::Components(p.into())
    }
}
