//! HTTP handler definitions for the arithmetic server.
//!
//! Handlers are stateless: each request carries everything it needs in its
//! query string.

pub mod calculate;

pub use calculate::{
    add_handler, divide_handler, mod_handler, multiply_handler, power_handler, sqrt_handler,
    subtract_handler, ErrorBody, ResultBody,
};

use arith_core::Operation;
use axum::routing::get;
use axum::Router;

/// Route table for the seven operation endpoints (GET only).
pub fn routes() -> Router {
    Router::new()
        .route(Operation::Add.path(), get(add_handler))
        .route(Operation::Subtract.path(), get(subtract_handler))
        .route(Operation::Multiply.path(), get(multiply_handler))
        .route(Operation::Divide.path(), get(divide_handler))
        .route(Operation::Power.path(), get(power_handler))
        .route(Operation::Sqrt.path(), get(sqrt_handler))
        .route(Operation::Mod.path(), get(mod_handler))
}
