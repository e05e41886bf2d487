//! Public API for the notification system
//!
//! Feeder notifications are delivered synchronously to registered listeners.
//! External modules should import from here rather than directly from internal modules.

pub use crate::notifications::event::{EventFilter, FeederEvent, FeederEventType};
pub use crate::notifications::traits::{FeederListener, ListenerStatistics};
