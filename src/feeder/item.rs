//! Queue item types and input coercion
//!
//! A [`QueueItem`] pairs one command with the context supplied when it was fed.
//! The [`IntoCommands`] trait normalises whatever the producer hands to `feed`
//! into a batch of commands: scalars become one-element batches, sequences pass
//! through, and "nothing" becomes the empty batch.

use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// Caller-supplied metadata attached to each queued command
pub type Context = serde_json::Map<String, Value>;

/// Payload carried through the feeder
///
/// Commands are opaque to the feeder. The only question it asks of them is
/// whether a filtered result is blank, in which case the command is skipped.
pub trait FeedCommand: Clone + Debug {
    fn is_blank(&self) -> bool {
        false
    }
}

impl FeedCommand for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FeedCommand for &'static str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FeedCommand for Value {
    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        }
    }
}

/// One buffered command together with the context copied at enqueue time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueItem<C> {
    pub command: C,
    pub context: Context,
}

impl<C> QueueItem<C> {
    pub fn new(command: C, context: Context) -> Self {
        Self { command, context }
    }
}

/// Conversion of feed input into a batch of commands
pub trait IntoCommands<C> {
    fn into_commands(self) -> Vec<C>;
}

impl<C> IntoCommands<C> for Vec<C> {
    fn into_commands(self) -> Vec<C> {
        self
    }
}

impl<C> IntoCommands<C> for Option<C> {
    fn into_commands(self) -> Vec<C> {
        self.into_iter().collect()
    }
}

impl<C, const N: usize> IntoCommands<C> for [C; N] {
    fn into_commands(self) -> Vec<C> {
        self.into()
    }
}

impl<C: Clone> IntoCommands<C> for &[C] {
    fn into_commands(self) -> Vec<C> {
        self.to_vec()
    }
}

impl IntoCommands<String> for String {
    fn into_commands(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoCommands<String> for &str {
    fn into_commands(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoCommands<String> for Vec<&str> {
    fn into_commands(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl<const N: usize> IntoCommands<String> for [&str; N] {
    fn into_commands(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl IntoCommands<String> for Option<&str> {
    fn into_commands(self) -> Vec<String> {
        self.map(str::to_string).into_iter().collect()
    }
}

/// JSON input: arrays are spread, `null` is empty, anything else is a single command
impl IntoCommands<Value> for Value {
    fn into_commands(self) -> Vec<Value> {
        match self {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            other => vec![other],
        }
    }
}
