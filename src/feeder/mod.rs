//! Command Feeder Component
//!
//! An in-process buffer for outbound commands (instructions destined for a
//! controlled device). The feeder queues commands, lets the caller pause and
//! resume delivery, optionally rewrites each command on its way out, and keeps a
//! one-shot flag so polling consumers can tell whether anything changed.
//!
//! # Overview
//!
//! - **FIFO with prepend**: commands drain in insertion order; a prepended batch
//!   goes to the front with its own order preserved
//! - **Hold/unhold**: a held feeder releases nothing until it is unheld
//! - **Filtering**: an optional [`DataFilter`](api::DataFilter) rewrites or skips commands
//! - **Notifications**: `Data`, `Change`, `Hold` and `Unhold` events are delivered
//!   synchronously to listeners registered with the feeder
//!
//! # Architecture
//!
//! ```text
//!  producer ──feed/append/prepend──▶ ┌──────────────────────┐
//!                                    │ Feeder               │
//!                                    │  queue ┌──┬──┬──┐    │
//!  host ───────hold/unhold─────────▶ │        │c1│c2│c3│    │
//!                                    │        └──┴──┴──┘    │
//!  consumer ───────next────────────▶ │  pop ─▶ filter ─▶ emit ──▶ Data(cmd, ctx) ─▶ transport
//!                                    └──────────────────────┘
//! ```
//!
//! The feeder is single-threaded: every call runs to completion and there is no
//! internal locking. Callers that share a feeder between threads must serialise
//! access themselves.

mod core;
mod error;
mod filter;
mod item;
mod options;
mod snapshot;

pub mod api;

#[cfg(test)]
mod tests;
