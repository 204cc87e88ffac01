//! Operand validation.
//!
//! Turns raw, untyped query values into numeric operands for a given
//! operation, or into the first [`ValidationError`] that applies. Checks run
//! in a fixed order and the first failure is terminal:
//!
//! 1. `num1` present and a finite number
//! 2. `num2` present and a finite number (binary operations only)
//! 3. coercion to `f64`
//! 4. `sqrt` of a negative number
//! 5. `divide`/`mod` by a (coerced) zero
//!
//! Every failure emits exactly one error-level `tracing` event.

use tracing::error;

use crate::error::{OperandSlot, ValidationError};
use crate::operation::Operation;

/// Validated operands. `num2` is `Some` exactly when the operation is binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operands {
    pub num1: f64,
    pub num2: Option<f64>,
}

/// Parses a raw operand into a finite `f64`.
///
/// Surrounding whitespace is ignored. Absent, empty, and non-numeric input
/// is rejected, and so is anything the float parser maps to a non-finite
/// value (`NaN`, `inf`, `1e400`).
#[must_use]
pub fn parse_operand(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Validates the raw operands of a request for `operation`.
///
/// `raw2` is never inspected for `sqrt`.
///
/// # Errors
///
/// - `InvalidOperand { First }` if `raw1` is absent or not a finite number
/// - `InvalidOperand { Second }` if the operation is binary and `raw2` is
///   absent or not a finite number
/// - `NegativeSquareRoot` for `sqrt` with `num1 < 0`
/// - `DivisionByZero` for `divide`/`mod` with `num2 == 0` (including `-0`)
pub fn validate(
    raw1: Option<&str>,
    raw2: Option<&str>,
    operation: Operation,
) -> Result<Operands, ValidationError> {
    let Some(num1) = parse_operand(raw1) else {
        error!(%operation, "Invalid input: num1 is missing or not a number");
        return Err(ValidationError::InvalidOperand {
            slot: OperandSlot::First,
        });
    };

    let num2 = if operation.is_binary() {
        let Some(num2) = parse_operand(raw2) else {
            error!(%operation, "Invalid input: num2 is missing or not a number");
            return Err(ValidationError::InvalidOperand {
                slot: OperandSlot::Second,
            });
        };
        Some(num2)
    } else {
        None
    };

    if operation == Operation::Sqrt && num1 < 0.0 {
        error!(%operation, num1, "Invalid input: Square root of a negative number is not allowed");
        return Err(ValidationError::NegativeSquareRoot);
    }

    if operation.rejects_zero_divisor() && num2 == Some(0.0) {
        error!(%operation, "Math error: Cannot {operation} by zero");
        return Err(ValidationError::DivisionByZero { operation });
    }

    Ok(Operands { num1, num2 })
}
