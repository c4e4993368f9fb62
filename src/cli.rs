//! Command-line interface definitions for the headlines server.
//!
//! All arguments can be provided via command-line flags or environment
//! variables. Flags given here override the values in the optional YAML
//! config file (see [`crate::config`]).

use clap::Parser;

/// Command-line arguments for the headlines server.
///
/// # Examples
///
/// ```sh
/// # Serve the built-in sources on port 8080
/// headlines
///
/// # Custom port and source list
/// headlines -p 3000 -c ./headlines.yaml
///
/// # Slower upstreams
/// headlines --timeout-secs 15 --user-agent "headlines/1.0 (+https://example.com)"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Optional path to a YAML config file listing sources
    #[arg(short, long)]
    pub config: Option<String>,

    /// User-Agent sent to news sites
    #[arg(long, env = "HEADLINES_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout for news sites, in seconds (0 disables it)
    #[arg(long, env = "HEADLINES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["headlines"]).unwrap();

        assert!(cli.config.is_none());
        assert!(cli.user_agent.is_none());
        assert!(cli.timeout_secs.is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "headlines",
            "--port",
            "3000",
            "--host",
            "127.0.0.1",
            "--config",
            "./headlines.yaml",
            "--user-agent",
            "test-agent",
            "--timeout-secs",
            "10",
        ]);

        assert_eq!(cli.port, 3000);
        assert_eq!(cli.bind_addr(), "127.0.0.1:3000");
        assert_eq!(cli.config.as_deref(), Some("./headlines.yaml"));
        assert_eq!(cli.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(cli.timeout_secs, Some(10));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["headlines", "-p", "9090", "-c", "/etc/headlines.yaml"]);

        assert_eq!(cli.port, 9090);
        assert_eq!(cli.config.as_deref(), Some("/etc/headlines.yaml"));
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["headlines", "--port", "not-a-port"]).is_err());
    }
}
