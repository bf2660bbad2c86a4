//! Message types for actor communication

use std::time::Duration;

use tokio::sync::oneshot;

/// Commands that can be sent to a SiteMonitorActor
#[derive(Debug)]
pub enum SiteCommand {
    /// Trigger an immediate poll (bypassing the interval timer)
    ///
    /// The result still travels through the shared result stream; the
    /// oneshot only acknowledges that the poll ran.
    CheckNow {
        respond_to: oneshot::Sender<anyhow::Result<()>>,
    },

    /// Update the polling interval
    ///
    /// The timer restarts: the next poll fires one new interval from now.
    UpdateInterval { interval: Duration },

    /// Stop the monitor
    ///
    /// An in-flight poll is not aborted; the loop simply does not schedule
    /// another one.
    Shutdown,
}
