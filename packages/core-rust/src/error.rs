//! Error types for operand validation and operation tag parsing.
//!
//! The `Display` text of [`ValidationError`] is the exact message returned
//! to HTTP clients, so changing it is a wire-visible change.

use std::fmt;

use crate::operation::Operation;

/// Which request operand a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    /// The first operand (`num1` query parameter).
    First,
    /// The second operand (`num2` query parameter).
    Second,
}

impl OperandSlot {
    /// Query parameter name carrying this operand.
    #[must_use]
    pub fn param_name(self) -> &'static str {
        match self {
            Self::First => "num1",
            Self::Second => "num2",
        }
    }
}

impl fmt::Display for OperandSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required operand is absent or not a finite number.
    MissingOperand,
    /// The operand lies outside the operation's domain (negative square root).
    DomainError,
    /// Division or remainder by zero.
    MathError,
}

/// A terminal validation failure for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid input: {slot} must be a valid number.")]
    InvalidOperand { slot: OperandSlot },
    #[error("Invalid input: Cannot calculate square root of a negative number.")]
    NegativeSquareRoot,
    #[error("Math error: Cannot {operation} by zero.")]
    DivisionByZero { operation: Operation },
}

impl ValidationError {
    /// Returns the taxonomy bucket this failure belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOperand { .. } => ErrorKind::MissingOperand,
            Self::NegativeSquareRoot => ErrorKind::DomainError,
            Self::DivisionByZero { .. } => ErrorKind::MathError,
        }
    }
}

/// Returned by `Operation::from_str` for tags outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {tag}")]
pub struct UnknownOperation {
    pub tag: String,
}
