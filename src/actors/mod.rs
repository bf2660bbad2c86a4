//! Actor-based site polling
//!
//! Each watched site runs as an independent async task communicating via
//! Tokio channels.
//!
//! ## Architecture Overview
//!
//! ```text
//!                  ┌─────────────────┐
//!                  │     Checker     │
//!                  └────────┬────────┘
//!                           │ spawns
//!             ┌─────────────┼─────────────┐
//!             │             │             │
//!     ┌───────▼───────┐     │     ┌───────▼───────┐
//!     │  Monitor-1    │     │     │  Monitor-N    │
//!     │  (Site A)     │     │     │  (Site N)     │
//!     └───────┬───────┘     │     └───────┬───────┘
//!             │             │             │
//!             └─────────────┼─────────────┘
//!                           │
//!                 ┌─────────▼──────────┐
//!                 │  Result Channel    │ (bounded mpsc)
//!                 └─────────┬──────────┘
//!                           │ recv
//!                  ┌────────▼────────┐
//!                  │    Consumer     │
//!                  └─────────────────┘
//! ```
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: Each monitor has an mpsc command channel for control
//!    messages (CheckNow, UpdateInterval, Shutdown)
//! 2. **Results**: All monitors send into one bounded mpsc channel owned by
//!    the checker; a full channel stalls the sender (backpressure, no loss)
//! 3. **Request/Response**: oneshot channels for synchronous queries

pub mod messages;
pub mod site_monitor;
