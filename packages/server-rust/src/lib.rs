//! Arithmetic Server — HTTP endpoints over the `arith-core` operations.

pub mod cli;
pub mod config;
pub mod logging;
pub mod network;

pub use config::ServerConfig;
pub use logging::{init_logging, LoggingConfig, SERVICE_NAME};
pub use network::{NetworkConfig, NetworkModule};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
