use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::rank::DEFAULT_TOP_N;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("top-N must be a whole number, got {0:?}")]
    InvalidTopN(String),
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("worker count must be at least 1")]
    InvalidWorkers,
    #[error("bar width must be at least 1 column")]
    InvalidWidth,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// How word counts are aggregated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Map and reduce on a worker pool
    #[default]
    Parallel,
    /// One counting pass on the current thread
    Sequential,
}

/// Rendering of the ranked words
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Horizontal bar chart
    #[default]
    Chart,
    /// JSON document
    Json,
}

/// Everything one run needs; built once and handed to `run`.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Url,
    pub top_n: usize,
    pub workers: Option<NonZeroUsize>,
    pub strategy: Strategy,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub bar_width: usize,
    pub color: bool,
}

pub const DEFAULT_BAR_WIDTH: usize = 50;

impl Config {
    /// Config from the two raw answers the user gives: a URL and a top-N count.
    pub fn from_inputs(source: &str, top_n: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            source: parse_source(source)?,
            top_n: parse_top_n(top_n)?,
            workers: None,
            strategy: Strategy::default(),
            format: OutputFormat::default(),
            output: None,
            bar_width: DEFAULT_BAR_WIDTH,
            color: false,
        })
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Result<Self, ConfigError> {
        self.workers = match workers {
            Some(n) => Some(NonZeroUsize::new(n).ok_or(ConfigError::InvalidWorkers)?),
            None => None,
        };
        Ok(self)
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Result<Self, ConfigError> {
        if bar_width == 0 {
            return Err(ConfigError::InvalidWidth);
        }
        self.bar_width = bar_width;
        Ok(self)
    }
}

/// Empty input falls back to the default of 10; negative counts mean an empty ranking.
pub fn parse_top_n(input: &str) -> Result<usize, ConfigError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_TOP_N);
    }
    let n: i64 = input
        .parse()
        .map_err(|_| ConfigError::InvalidTopN(input.to_string()))?;
    Ok(usize::try_from(n.max(0)).unwrap_or(usize::MAX))
}

pub fn parse_source(input: &str) -> Result<Url, ConfigError> {
    let input = input.trim();
    let url = Url::parse(input).map_err(|source| ConfigError::InvalidUrl {
        url: input.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
