//! The closed set of arithmetic operations served over HTTP.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownOperation;
use crate::validate::Operands;

/// Number of operands an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

/// Operation tag selecting which computation a request performs.
///
/// The lowercase tag doubles as the endpoint path segment and is
/// interpolated verbatim into by-zero error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Mod,
}

impl Operation {
    /// Every supported operation, in endpoint order.
    pub const ALL: [Operation; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Sqrt,
        Self::Mod,
    ];

    /// Wire tag of the operation (`"add"`, `"sqrt"`, ...).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Mod => "mod",
        }
    }

    /// HTTP path serving the operation.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Add => "/add",
            Self::Subtract => "/subtract",
            Self::Multiply => "/multiply",
            Self::Divide => "/divide",
            Self::Power => "/power",
            Self::Sqrt => "/sqrt",
            Self::Mod => "/mod",
        }
    }

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Sqrt => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    #[must_use]
    pub fn is_binary(self) -> bool {
        self.arity() == Arity::Binary
    }

    /// Whether a zero second operand must be refused.
    #[must_use]
    pub fn rejects_zero_divisor(self) -> bool {
        matches!(self, Self::Divide | Self::Mod)
    }

    /// Human label used as the prefix of success log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Addition",
            Self::Subtract => "Subtraction",
            Self::Multiply => "Multiplication",
            Self::Divide => "Division",
            Self::Power => "Exponentiation",
            Self::Sqrt => "Square Root",
            Self::Mod => "Modulo",
        }
    }

    /// Infix symbol for binary operations; `None` for `sqrt`.
    #[must_use]
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Subtract => Some("-"),
            Self::Multiply => Some("*"),
            Self::Divide => Some("/"),
            Self::Power => Some("^"),
            Self::Mod => Some("%"),
            Self::Sqrt => None,
        }
    }

    /// Renders the symbolic description of a finished computation, e.g.
    /// `"Addition: 3 + 4 = 7"` or `"Square Root: sqrt(9) = 3"`.
    #[must_use]
    pub fn describe(self, operands: &Operands, result: f64) -> String {
        let lhs = format_number(operands.num1);
        let result = format_number(result);
        match (self.symbol(), operands.num2) {
            (Some(symbol), Some(num2)) => format!(
                "{}: {lhs} {symbol} {} = {result}",
                self.label(),
                format_number(num2)
            ),
            _ => format!("{}: sqrt({lhs}) = {result}", self.label()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.tag() == s)
            .ok_or_else(|| UnknownOperation { tag: s.to_string() })
    }
}

/// Formats a number for log output the way JavaScript prints numbers.
///
/// Integral values print without a fractional part, negative zero prints
/// as `0`, and non-finite values print as `Infinity`, `-Infinity`, `NaN`.
/// Magnitudes of at least `1e21` or below `1e-6` use exponent notation
/// with an explicit sign (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exp,
        }
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for op in Operation::ALL {
            assert_eq!(op.tag().parse::<Operation>().unwrap(), op);
            assert_eq!(op.to_string(), op.tag());
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!("ADD".parse::<Operation>().is_err());
        assert!("log".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn only_sqrt_is_unary() {
        for op in Operation::ALL {
            assert_eq!(op.arity() == Arity::Unary, op == Operation::Sqrt, "{op}");
        }
    }

    #[test]
    fn paths_are_tag_prefixed_with_slash() {
        for op in Operation::ALL {
            assert_eq!(op.path(), format!("/{}", op.tag()));
        }
    }

    #[test]
    fn zero_divisor_rule_covers_divide_and_mod() {
        let rejecting: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.rejects_zero_divisor())
            .collect();
        assert_eq!(rejecting, vec![Operation::Divide, Operation::Mod]);
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Operation::Sqrt).unwrap();
        assert_eq!(json, "\"sqrt\"");
        let op: Operation = serde_json::from_str("\"mod\"").unwrap();
        assert_eq!(op, Operation::Mod);
    }

    #[test]
    fn describe_binary_operations() {
        let operands = Operands {
            num1: 3.0,
            num2: Some(4.0),
        };
        assert_eq!(Operation::Add.describe(&operands, 7.0), "Addition: 3 + 4 = 7");
        assert_eq!(
            Operation::Power.describe(&operands, 81.0),
            "Exponentiation: 3 ^ 4 = 81"
        );
        assert_eq!(Operation::Mod.describe(&operands, 3.0), "Modulo: 3 % 4 = 3");
        assert_eq!(
            Operation::Divide.describe(&operands, 0.75),
            "Division: 3 / 4 = 0.75"
        );
    }

    #[test]
    fn describe_sqrt() {
        let operands = Operands {
            num1: 9.0,
            num2: None,
        };
        assert_eq!(
            Operation::Sqrt.describe(&operands, 3.0),
            "Square Root: sqrt(9) = 3"
        );
    }

    #[test]
    fn format_number_special_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn format_number_switches_to_exponent_at_the_extremes() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e300), "-1.5e+300");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-10), "-2.5e-10");
    }

    #[test]
    fn format_number_keeps_plain_notation_in_between() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }
}
