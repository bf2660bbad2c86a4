//! Checker - Registry of watched sites and owner of the shared result stream
//!
//! The checker maps canonical URL strings to running monitor actors and
//! holds both halves of the single result channel all monitors write into.
//! Registry mutation goes through `&mut self`, so a checker has exactly one
//! caller at a time; embeddings that need shared mutation wrap the checker
//! themselves.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;
use url::Url;

use crate::CheckResult;
use crate::actors::site_monitor::SiteHandle;
use crate::config::{CheckerConfig, ResolvedSiteConfig};
use crate::error::{CheckerError, CheckerResult};

/// Registry of watched sites
///
/// Every key corresponds to exactly one live monitor actor. Removing a key
/// guarantees the monitor has been signaled to stop, not that its loop has
/// already exited.
pub struct Checker {
    /// Canonical URL -> handle of the running monitor
    sites: HashMap<String, SiteHandle>,

    /// Sender half cloned into every spawned monitor
    result_tx: mpsc::Sender<CheckResult>,

    /// Receiver half drained by the consumer
    result_rx: mpsc::Receiver<CheckResult>,

    config: CheckerConfig,
}

impl Checker {
    /// Create a checker with default tuning
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    /// Create a checker with explicit channel capacity and client tuning
    pub fn with_config(config: CheckerConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel(config.channel_capacity);

        Self {
            sites: HashMap::new(),
            result_tx,
            result_rx,
            config,
        }
    }

    /// Start watching a site
    ///
    /// Parses and canonicalizes `raw_url`, spawns a monitor actor for it and
    /// registers the handle. The first poll fires after one `interval`
    /// elapses; there is no immediate poll on registration.
    ///
    /// Fails with [`CheckerError::InvalidUrl`] for anything that is not an
    /// absolute URL with a host, [`CheckerError::InvalidInterval`] for a
    /// zero interval, and [`CheckerError::AlreadyWatched`] if the canonical
    /// URL is already registered.
    pub fn add_url(&mut self, raw_url: &str, interval: Duration) -> CheckerResult<()> {
        if interval.is_zero() {
            return Err(CheckerError::InvalidInterval);
        }

        let url = parse_site_url(raw_url)?;
        let key = url.as_str().to_owned();

        if self.sites.contains_key(&key) {
            return Err(CheckerError::AlreadyWatched(key));
        }

        debug!("checking {key} every {interval:?}");

        let resolved = ResolvedSiteConfig {
            url,
            interval,
            timeout: Duration::from_secs(self.config.timeout),
            max_redirects: self.config.max_redirects,
        };

        let handle = SiteHandle::spawn(resolved, self.result_tx.clone());
        self.sites.insert(key, handle);

        Ok(())
    }

    /// Stop watching a site
    ///
    /// Signals the monitor's shutdown without blocking and removes the
    /// entry synchronously. The monitor's loop may still be winding down
    /// when this returns; no further polls will be scheduled.
    pub fn stop_checking_url(&mut self, raw_url: &str) -> CheckerResult<()> {
        let key = canonical_key(raw_url)?;

        match self.sites.remove(&key) {
            Some(handle) => {
                debug!("stopped checking {key}");
                handle.shutdown();
                Ok(())
            }
            None => Err(CheckerError::NotFound(key)),
        }
    }

    /// Trigger an immediate out-of-schedule poll for a watched site
    ///
    /// The result arrives on the shared stream like any scheduled poll.
    pub async fn check_now(&self, raw_url: &str) -> CheckerResult<()> {
        let key = canonical_key(raw_url)?;
        let handle = self
            .sites
            .get(&key)
            .ok_or_else(|| CheckerError::NotFound(key.clone()))?;

        handle
            .check_now()
            .await
            .map_err(|_| CheckerError::SiteGone(key))
    }

    /// Change the polling interval of a watched site without recreating it
    pub async fn update_interval(&self, raw_url: &str, interval: Duration) -> CheckerResult<()> {
        if interval.is_zero() {
            return Err(CheckerError::InvalidInterval);
        }

        let key = canonical_key(raw_url)?;
        let handle = self
            .sites
            .get(&key)
            .ok_or_else(|| CheckerError::NotFound(key.clone()))?;

        handle
            .update_interval(interval)
            .await
            .map_err(|_| CheckerError::SiteGone(key))
    }

    /// Receive the next result from the shared stream
    ///
    /// Results are FIFO per site; interleaving across sites is unspecified.
    /// Pends forever while no site is watched (the stream is never closed
    /// while the checker exists).
    pub async fn recv(&mut self) -> Option<CheckResult> {
        self.result_rx.recv().await
    }

    /// Direct access to the receiver half of the shared result stream
    pub fn results(&mut self) -> &mut mpsc::Receiver<CheckResult> {
        &mut self.result_rx
    }

    /// Whether a monitor is registered under the canonical form of `raw_url`
    pub fn is_watching(&self, raw_url: &str) -> bool {
        canonical_key(raw_url)
            .map(|key| self.sites.contains_key(&key))
            .unwrap_or(false)
    }

    /// Number of watched sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Canonical URLs of all watched sites, in no particular order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a site URL
///
/// Accepts only absolute URLs with a non-empty scheme and host; relative
/// paths and authority-less schemes (`mailto:`, `file:`) are rejected. The
/// returned [`Url`] is the canonical form used as the registry key.
pub fn parse_site_url(raw_url: &str) -> CheckerResult<Url> {
    let url =
        Url::parse(raw_url).map_err(|e| CheckerError::InvalidUrl(format!("{raw_url}: {e}")))?;

    if !url.has_host() {
        return Err(CheckerError::InvalidUrl(format!(
            "{raw_url}: missing host"
        )));
    }

    Ok(url)
}

/// Canonical registry key for lookups
///
/// Unparseable input cannot be registered, so lookups map it to `NotFound`.
fn canonical_key(raw_url: &str) -> CheckerResult<String> {
    parse_site_url(raw_url)
        .map(|url| url.as_str().to_owned())
        .map_err(|_| CheckerError::NotFound(raw_url.to_owned()))
}
