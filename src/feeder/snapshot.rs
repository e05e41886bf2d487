//! Read-only projection of feeder state for diagnostics and status reporting

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederSnapshot {
    pub hold: bool,
    pub hold_reason: Option<Value>,
    /// Number of queued commands, not their contents
    pub queue: usize,
    pub pending: bool,
    pub changed: bool,
}

impl FeederSnapshot {
    pub fn to_json(&self) -> Value {
        // A snapshot only holds plain values, so this cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
