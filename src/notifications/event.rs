//! Event types for the notification system

use crate::feeder::api::Context;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FeederEventType {
    Data,
    Change,
    Hold,
    Unhold,
}

/// Notification raised by a feeder, in-line with the call that caused it
#[derive(Clone, Debug, PartialEq)]
pub enum FeederEvent<C> {
    /// A command was released for delivery
    Data { command: C, context: Context },
    /// Feeder state changed
    Change,
    Hold,
    Unhold,
}

impl<C> FeederEvent<C> {
    pub fn event_type(&self) -> FeederEventType {
        match self {
            FeederEvent::Data { .. } => FeederEventType::Data,
            FeederEvent::Change => FeederEventType::Change,
            FeederEvent::Hold => FeederEventType::Hold,
            FeederEvent::Unhold => FeederEventType::Unhold,
        }
    }
}

/// Selects which events a listener is subscribed to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFilter {
    DataOnly,
    /// Change notifications only (polling consumers, status displays)
    StateOnly,
    /// Hold and unhold
    HoldOnly,
    #[default]
    All,
}

impl EventFilter {
    /// Check if an event should be accepted by this filter
    pub fn accepts<C>(&self, event: &FeederEvent<C>) -> bool {
        matches!(
            (self, event),
            (EventFilter::DataOnly, FeederEvent::Data { .. })
                | (EventFilter::StateOnly, FeederEvent::Change)
                | (EventFilter::HoldOnly, FeederEvent::Hold)
                | (EventFilter::HoldOnly, FeederEvent::Unhold)
                | (EventFilter::All, _)
        )
    }
}
