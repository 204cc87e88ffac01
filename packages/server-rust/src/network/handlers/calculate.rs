//! Operation endpoints: `/add`, `/subtract`, `/multiply`, `/divide`,
//! `/power`, `/sqrt`, `/mod`.
//!
//! Each handler reads `num1`/`num2` from the query string, validates and
//! evaluates them with `arith_core::compute`, and answers with a JSON body
//! holding exactly one key: `result` on success (200) or `error` on a
//! validation failure (400).

use std::collections::HashMap;

use arith_core::{compute, Operation, ValidationError};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Largest integer an IEEE double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Query parameters as received. Repeated keys keep the last value.
type RawParams = HashMap<String, String>;

/// Success body: `{"result": <number>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBody {
    pub result: Value,
}

/// Failure body: `{"error": <message>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Validation failure rendered as a 400 JSON response.
#[derive(Debug)]
pub struct CalcError(pub ValidationError);

impl From<ValidationError> for CalcError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Converts a computed value into its JSON form.
///
/// Integral values within the exactly-representable range become JSON
/// integers (`5`, not `5.0`), other finite values stay floats, and
/// non-finite values become `null`.
#[must_use]
pub fn json_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn respond(operation: Operation, params: &RawParams) -> Result<Json<ResultBody>, CalcError> {
    let computation = compute(
        operation,
        params.get("num1").map(String::as_str),
        params.get("num2").map(String::as_str),
    )?;

    info!(
        %operation,
        result = computation.result,
        "{}",
        computation.describe()
    );

    Ok(Json(ResultBody {
        result: json_number(computation.result),
    }))
}

/// GET /add?num1&num2
pub async fn add_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Add, &params)
}

/// GET /subtract?num1&num2
pub async fn subtract_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Subtract, &params)
}

/// GET /multiply?num1&num2
pub async fn multiply_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Multiply, &params)
}

/// GET /divide?num1&num2 -- 400 when `num2` is zero.
pub async fn divide_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Divide, &params)
}

/// GET /power?num1&num2 -- may answer `null` when the result overflows.
pub async fn power_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Power, &params)
}

/// GET /sqrt?num1 -- `num2` is ignored; 400 for negative input.
pub async fn sqrt_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Sqrt, &params)
}

/// GET /mod?num1&num2 -- remainder takes the sign of `num1`.
pub async fn mod_handler(
    Query(params): Query<RawParams>,
) -> Result<Json<ResultBody>, CalcError> {
    respond(Operation::Mod, &params)
}
