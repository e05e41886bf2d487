//! Feed options

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Where newly fed commands are placed relative to those already queued
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeedDirection {
    /// Insert before the existing queue, keeping the batch's own order
    Prepend,
    #[default]
    Append,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOptions {
    #[serde(default)]
    pub direction: FeedDirection,
}

impl FeedOptions {
    pub fn new(direction: FeedDirection) -> Self {
        Self { direction }
    }

    /// Same options with the direction replaced
    pub fn with_direction(self, direction: FeedDirection) -> Self {
        Self { direction }
    }
}
