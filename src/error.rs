use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum VecError {
    /// A divisor component was zero or NaN.
    #[error("division by zero: divisor ({x}, {y})")]
    Division { x: f64, y: f64 },

    /// `clean` only accepts finite numbers.
    #[error("invalid number: {0} is not finite")]
    InvalidNumber(f64),
}

pub type Result<T> = std::result::Result<T, VecError>;
