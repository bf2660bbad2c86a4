use std::time::Duration;

use tracing::trace;
use url::Url;

/// Tuning knobs shared by all monitors of one checker
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CheckerConfig {
    /// Capacity of the shared result channel. A full channel stalls the
    /// emitting monitor until the consumer drains (backpressure, no loss).
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Redirect hops followed before a poll is considered failed
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            channel_capacity: default_channel_capacity(),
            timeout: default_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_channel_capacity() -> usize {
    32
}

fn default_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub sites: Option<Vec<SiteConfig>>,

    /// Checker tuning (optional - defaults to modest burst absorption)
    pub checker: Option<CheckerConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SiteConfig {
    pub url: String,
    #[serde(default = "default_interval")]
    pub interval: u64,
}

fn default_interval() -> u64 {
    15
}

/// Fully resolved per-site state handed to a monitor actor
#[derive(Debug, Clone)]
pub struct ResolvedSiteConfig {
    pub url: Url,
    pub interval: Duration,
    pub timeout: Duration,
    pub max_redirects: usize,
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
