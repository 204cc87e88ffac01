//! Networking: configuration, middleware, handlers, server lifecycle and
//! shutdown control.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod module;
pub mod shutdown;

pub use config::*;
pub use module::NetworkModule;
pub use shutdown::*;
