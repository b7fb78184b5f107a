//! Mutable 2D vector with lazily cached length and change observers.
//!
//! Every arithmetic capability comes in two forms: a mutating one that goes
//! through [`Vec2::set`] (cache invalidation + observer notification) and a
//! pure one that returns a fresh vector and leaves the receiver untouched.

pub mod bench;
pub mod cache;
pub mod compare;
pub mod error;
pub mod observer;
pub mod operand;
pub mod ops;
pub mod vector;

pub use compare::clean;
pub use error::{Result, VecError};
pub use observer::{Observer, Subscription};
pub use operand::{Factor, Operand};
pub use vector::Vec2;

pub use vec2_common::{Point, VectorPolicy, EPSILON, PRECISION_DIGITS};
