//! Runtime configuration: built-in defaults, an optional YAML file, and CLI overrides.
//!
//! Precedence is CLI flag, then YAML value, then default. Every YAML field
//! is optional:
//!
//! ```yaml
//! user_agent: "headlines/1.0"
//! timeout_secs: 5
//! sources:
//!   - site: prothomalo
//!     url: "https://www.prothomalo.com/"
//!   - site: mzamin
//!     url: "https://mzamin.com/"
//! ```
//!
//! The result-cache TTL is fixed (see [`crate::cache::RESULT_TTL`]) and is
//! not configurable.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::scrapers::Site;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "headlines/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// One configured news site and the URL its front page is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    pub site: Site,
    pub url: String,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user_agent: String,
    pub timeout: Duration,
    pub sources: Vec<SourceConfig>,
}

/// The YAML file as written, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    sources: Option<Vec<SourceConfig>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sources: default_sources(),
        }
    }
}

/// The three Bangladeshi front pages served when no config file is given.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            site: Site::Prothomalo,
            url: "https://www.prothomalo.com/".to_string(),
        },
        SourceConfig {
            site: Site::Mzamin,
            url: "https://mzamin.com/".to_string(),
        },
        SourceConfig {
            site: Site::DailystarBangla,
            url: "https://bangla.thedailystar.net/".to_string(),
        },
    ]
}

impl Config {
    /// Resolve configuration from the CLI and, if given, its config file.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => read_file(Path::new(path))?,
            None => FileConfig::default(),
        };

        let config = Self::merge(file, cli);
        config.validate()?;
        info!(
            user_agent = %config.user_agent,
            timeout_secs = config.timeout.as_secs(),
            sources = config.sources.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    fn merge(file: FileConfig, cli: &Cli) -> Self {
        let defaults = Self::default();
        let timeout_secs = cli.timeout_secs.or(file.timeout_secs);

        Self {
            user_agent: cli
                .user_agent
                .clone()
                .or(file.user_agent)
                .unwrap_or(defaults.user_agent),
            timeout: timeout_secs.map_or(defaults.timeout, Duration::from_secs),
            sources: file.sources.unwrap_or(defaults.sources),
        }
    }

    /// Reject an empty source list and source URLs that are not absolute.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("at least one source is required".to_string()));
        }
        for source in &self.sources {
            Url::parse(&source.url).map_err(|e| Error::InvalidSourceUrl {
                url: source.url.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}
