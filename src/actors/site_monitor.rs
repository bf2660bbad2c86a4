//! SiteMonitorActor - Polls one HTTP(S) endpoint on its own interval
//!
//! Each watched site gets its own monitor actor. The actor runs an infinite
//! loop, polling at the configured interval and sending one [`CheckResult`]
//! per cycle into the checker's shared result channel.
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → HTTP GET → read body → send CheckResult → shared channel
//!     ↑
//!     └─── Commands (CheckNow, UpdateInterval, Shutdown)
//! ```
//!
//! Every cycle emits exactly one result: transport failures are captured in
//! the result rather than dropped, and an HTTP error status is still a
//! response. A failed poll never terminates the actor.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::redirect;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, trace, warn};

use crate::config::ResolvedSiteConfig;
use crate::{CheckOutcome, CheckResponse, CheckResult};

use super::messages::SiteCommand;

/// Redirect policy following up to `limit` hops
///
/// An explicit callback rather than the client default, so the bound is
/// configurable and the exceeded case surfaces as a request error.
fn redirect_policy(limit: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    })
}

/// Actor that polls a single site
pub struct SiteMonitorActor {
    /// Resolved site configuration
    config: ResolvedSiteConfig,

    /// HTTP client (reused across requests for efficiency)
    client: reqwest::Client,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<SiteCommand>,

    /// Sender half of the checker's shared result channel
    result_tx: mpsc::Sender<CheckResult>,

    /// Current polling interval
    interval_duration: Duration,
}

impl SiteMonitorActor {
    /// Create a new site monitor actor
    pub fn new(
        config: ResolvedSiteConfig,
        command_rx: mpsc::Receiver<SiteCommand>,
        result_tx: mpsc::Sender<CheckResult>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(redirect_policy(config.max_redirects))
            .build()
            .expect("Failed to build HTTP client");

        let interval_duration = config.interval;

        Self {
            config,
            client,
            command_rx,
            result_tx,
            interval_duration,
        }
    }

    /// Run the actor's main loop
    ///
    /// This is the entry point for the actor. It runs until:
    /// - A Shutdown command is received
    /// - The command channel is closed
    /// - The shared result channel is closed (the checker is gone)
    #[instrument(skip(self), fields(site = %self.config.url))]
    pub async fn run(mut self) {
        debug!("checking site every {:?}", self.interval_duration);

        let mut ticker = new_ticker(self.interval_duration);

        loop {
            tokio::select! {
                // Timer tick - perform one poll
                _ = ticker.tick() => {
                    if self.check().await.is_err() {
                        warn!("result channel closed, shutting down");
                        break;
                    }
                }

                // Handle commands
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SiteCommand::CheckNow { respond_to }) => {
                            debug!("received CheckNow command");
                            let result = self.check().await.context("result channel closed");
                            let _ = respond_to.send(result);
                        }

                        Some(SiteCommand::UpdateInterval { interval }) => {
                            debug!("updating interval to {interval:?}");
                            self.interval_duration = interval;
                            ticker = new_ticker(interval);
                        }

                        Some(SiteCommand::Shutdown) => {
                            debug!("received shutdown command");
                            break;
                        }

                        // Dropping the handle closes the channel; treat it
                        // as the same stop signal.
                        None => {
                            debug!("command channel closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        debug!("site monitor actor stopped");
    }

    /// Perform one poll and emit the outcome on the shared result channel
    ///
    /// Records the start timestamp, the time until response headers arrive
    /// and the time until the body is fully read. The send suspends while
    /// the result channel is full; the next tick is delayed accordingly.
    ///
    /// The only error returned is a closed result channel.
    #[instrument(skip(self), fields(site = %self.config.url))]
    async fn check(&self) -> Result<(), mpsc::error::SendError<CheckResult>> {
        trace!("requesting site");

        let timestamp = Utc::now();
        let start = Instant::now();

        let request = self.client.get(self.config.url.clone()).send().await;

        let (outcome, connecting, receiving) = match request {
            Ok(response) => {
                let connecting = start.elapsed();

                // Retain the transport-level view before the body read
                // consumes the response.
                let head = CheckResponse {
                    status: response.status(),
                    headers: response.headers().clone(),
                    final_url: response.url().clone(),
                };

                let body_start = Instant::now();
                match response.bytes().await {
                    Ok(body) => {
                        trace!("received {} bytes with status {}", body.len(), head.status);
                        (
                            CheckOutcome::Success {
                                response: head,
                                body,
                            },
                            connecting,
                            body_start.elapsed(),
                        )
                    }
                    Err(e) => {
                        warn!("failed to read response body: {e}");
                        (
                            CheckOutcome::Failure {
                                error: e.to_string(),
                            },
                            connecting,
                            body_start.elapsed(),
                        )
                    }
                }
            }
            Err(e) => {
                warn!("request failed: {e}");
                (
                    CheckOutcome::Failure {
                        error: e.to_string(),
                    },
                    start.elapsed(),
                    Duration::ZERO,
                )
            }
        };

        self.result_tx
            .send(CheckResult {
                url: self.config.url.as_str().to_owned(),
                outcome,
                timestamp,
                connecting,
                receiving,
            })
            .await
    }
}

/// Interval timer for the poll loop
///
/// The first tick fires one full period after creation (no immediate poll on
/// registration), and a slow poll delays the next tick instead of bursting.
fn new_ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Handle for controlling a SiteMonitorActor
///
/// This handle provides a typed API for sending commands to the actor.
/// It can be cloned and shared across tasks.
#[derive(Clone)]
pub struct SiteHandle {
    /// Command sender
    sender: mpsc::Sender<SiteCommand>,

    /// Canonical URL for identification
    url: String,
}

impl SiteHandle {
    /// Spawn a new site monitor actor
    ///
    /// This creates the actor, spawns it as a tokio task, and returns a
    /// handle. The first poll fires after one interval.
    pub fn spawn(config: ResolvedSiteConfig, result_tx: mpsc::Sender<CheckResult>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let url = config.url.as_str().to_owned();

        let actor = SiteMonitorActor::new(config, cmd_rx, result_tx);

        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            url,
        }
    }

    /// Trigger an immediate poll
    ///
    /// This bypasses the interval timer and polls right away. The result
    /// still arrives on the shared result stream.
    pub async fn check_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SiteCommand::CheckNow { respond_to: tx })
            .await
            .context("failed to send CheckNow command")?;

        rx.await.context("failed to receive response")??;
        Ok(())
    }

    /// Update the polling interval
    pub async fn update_interval(&self, interval: Duration) -> Result<()> {
        self.sender
            .send(SiteCommand::UpdateInterval { interval })
            .await
            .context("failed to send UpdateInterval command")?;
        Ok(())
    }

    /// Signal the actor to stop, without waiting for the loop to exit
    ///
    /// Best effort: if the command buffer is full, dropping the sender
    /// closes the command channel, which the loop treats as the same stop
    /// signal.
    pub fn shutdown(self) {
        let _ = self.sender.try_send(SiteCommand::Shutdown);
    }

    /// Get the canonical site URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ============================================================================
// Tests
// ============================================================================
