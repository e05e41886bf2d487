//! Traits for the notification system

use crate::notifications::event::{FeederEvent, FeederEventType};
use std::collections::HashMap;

/// Per-listener delivery counters kept by the feeder
#[derive(Debug, Default, Clone)]
pub struct ListenerStatistics {
    delivered: HashMap<FeederEventType, usize>,
}

impl ListenerStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event_type: FeederEventType) {
        *self.delivered.entry(event_type).or_insert(0) += 1;
    }

    pub fn delivered(&self, event_type: FeederEventType) -> usize {
        self.delivered.get(&event_type).copied().unwrap_or(0)
    }

    pub fn total_delivered(&self) -> usize {
        self.delivered.values().sum()
    }
}

/// Receiver of feeder notifications
///
/// Events are delivered synchronously, in the order they are raised, before the
/// triggering feeder call returns.
pub trait FeederListener<C> {
    fn on_event(&mut self, event: &FeederEvent<C>);

    /// Identifier used in log output
    fn listener_id(&self) -> &str {
        "anonymous"
    }
}

impl<C, F> FeederListener<C> for F
where
    F: FnMut(&FeederEvent<C>),
{
    fn on_event(&mut self, event: &FeederEvent<C>) {
        self(event)
    }
}
