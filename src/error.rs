//! Error types for fetching, extraction, and startup configuration.
//!
//! Only [`Error::FetchFailed`] and [`Error::ParseFailed`] can occur while
//! serving requests, and both are contained at the source boundary by the
//! [`aggregator`](crate::aggregator). The remaining variants are startup
//! errors surfaced from `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: connection refused, timeout, or a broken body read.
    ///
    /// HTTP status codes are never inspected, so a 404 or 500 is not a
    /// `FetchFailed`.
    #[error("failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched body could not be treated as markup text at all.
    #[error("failed to parse {source_name} markup: {reason}")]
    ParseFailed { source_name: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid source URL {url:?}: {source}")]
    InvalidSourceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}
