//! Operation execution over validated operands.

use crate::error::ValidationError;
use crate::operation::Operation;
use crate::validate::{validate, Operands};

/// A finished computation: what was asked, with which operands, and the answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computation {
    pub operation: Operation,
    pub operands: Operands,
    pub result: f64,
}

impl Computation {
    /// Symbolic one-line description, e.g. `"Division: 1 / 4 = 0.25"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.operation.describe(&self.operands, self.result)
    }
}

/// Applies `operation` to already validated operands.
///
/// Overflow and non-finite results are not checked: `power` may return
/// `inf` or `NaN` and the value is passed through as is. `mod` is the IEEE
/// truncated remainder, so the result carries the sign of the dividend.
#[must_use]
pub fn evaluate(operation: Operation, operands: Operands) -> f64 {
    let Operands { num1, num2 } = operands;
    // `num2` is only `None` for sqrt, which ignores it.
    let rhs = num2.unwrap_or(f64::NAN);
    match operation {
        Operation::Add => num1 + rhs,
        Operation::Subtract => num1 - rhs,
        Operation::Multiply => num1 * rhs,
        Operation::Divide => num1 / rhs,
        Operation::Power => num1.powf(rhs),
        Operation::Sqrt => num1.sqrt(),
        Operation::Mod => num1 % rhs,
    }
}

/// Validates the raw operands and evaluates `operation` on them.
///
/// # Errors
///
/// Returns the first [`ValidationError`] reported by [`validate`]; no
/// arithmetic is attempted in that case.
pub fn compute(
    operation: Operation,
    raw1: Option<&str>,
    raw2: Option<&str>,
) -> Result<Computation, ValidationError> {
    let operands = validate(raw1, raw2, operation)?;
    Ok(Computation {
        operation,
        operands,
        result: evaluate(operation, operands),
    })
}
