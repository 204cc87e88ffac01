//! Process-level configuration assembled from the command line.

use crate::logging::LoggingConfig;
use crate::network::NetworkConfig;

/// Everything the binary needs to start: listener settings and log sinks.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}
