//! Public API for the feeder
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::feeder::core::{Feeder, FeederState, ListenerId};
pub use crate::feeder::error::{FeederError, FeederResult};
pub use crate::feeder::filter::{DataFilter, InfallibleFilter, LineFilter, LineFilterConfig};
pub use crate::feeder::item::{Context, FeedCommand, IntoCommands, QueueItem};
pub use crate::feeder::options::{FeedDirection, FeedOptions};
pub use crate::feeder::snapshot::FeederSnapshot;
