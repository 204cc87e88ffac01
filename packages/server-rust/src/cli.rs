//! Command-line interface for the `arith-server` binary.
//!
//! Every flag can also be set through an `ARITH_*` environment variable.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::ServerConfig;
use crate::logging::LoggingConfig;
use crate::network::{NetworkConfig, DEFAULT_PORT};

/// HTTP arithmetic service
#[derive(Parser, Debug, Clone)]
#[command(name = "arith-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind to
    #[arg(long, env = "ARITH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 picks a free port)
    #[arg(short, long, env = "ARITH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory receiving combined.log and error.log
    #[arg(long, env = "ARITH_LOG_DIR", value_name = "DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable the file log sinks (console only)
    #[arg(long, env = "ARITH_NO_FILE_LOGS")]
    pub no_file_logs: bool,

    /// Log filter directive (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, env = "ARITH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "ARITH_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Allowed CORS origin; repeat the flag or pass a comma-separated list
    #[arg(
        long = "cors-origin",
        env = "ARITH_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,
}

impl Cli {
    /// Converts parsed arguments into the server configuration.
    #[must_use]
    pub fn into_config(self) -> ServerConfig {
        let network = NetworkConfig {
            host: self.host,
            port: self.port,
            cors_origins: self.cors_origins,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        };
        let logging = LoggingConfig {
            level: self.log_level,
            directory: (!self.no_file_logs).then_some(self.log_dir),
        };
        ServerConfig { network, logging }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("arith-server").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--log-level",
            "debug",
            "--log-dir",
            "/var/log/arith",
            "--request-timeout-secs",
            "5",
            "--cors-origin",
            "http://a.example",
            "--cors-origin",
            "http://b.example",
        ])
        .into_config();

        assert_eq!(config.network.host, "127.0.0.1");
        assert_eq!(config.network.port, 8080);
        assert_eq!(config.network.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.network.cors_origins,
            vec!["http://a.example", "http://b.example"]
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/var/log/arith"))
        );
    }

    #[test]
    fn comma_separated_origins_are_split() {
        let config = parse(&["--cors-origin", "http://a.example,http://b.example"]).into_config();
        assert_eq!(config.network.cors_origins.len(), 2);
    }

    #[test]
    fn no_file_logs_disables_directory() {
        let config = parse(&["--no-file-logs"]).into_config();
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["arith-server", "--port", "70000"]).is_err());
    }
}
