//! Feeder implementation
//!
//! Holds the command buffer, hold flag, pending flag and one-shot changed flag,
//! and delivers notifications to registered listeners in-line with each call.

use crate::feeder::error::FeederResult;
use crate::feeder::filter::{DataFilter, InfallibleFilter};
use crate::feeder::item::{Context, FeedCommand, IntoCommands, QueueItem};
use crate::feeder::options::{FeedDirection, FeedOptions};
use crate::feeder::snapshot::FeederSnapshot;
use crate::notifications::api::{EventFilter, FeederEvent, FeederListener, ListenerStatistics};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

/// Mutable state owned by a [`Feeder`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeederState<C> {
    hold: bool,
    hold_reason: Option<Value>,
    queue: VecDeque<QueueItem<C>>,
    pending: bool,
    changed: bool,
}

impl<C> Default for FeederState<C> {
    fn default() -> Self {
        Self {
            hold: false,
            hold_reason: None,
            queue: VecDeque::new(),
            pending: false,
            changed: false,
        }
    }
}

/// Handle returned by [`Feeder::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Subscription<C> {
    id: ListenerId,
    filter: EventFilter,
    listener: Box<dyn FeederListener<C>>,
    statistics: ListenerStatistics,
}

/// Buffered command feeder
///
/// Producers add commands with [`feed`](Feeder::feed), [`append`](Feeder::append)
/// or [`prepend`](Feeder::prepend). The consumer calls [`next`](Feeder::next) to
/// release at most one command per call; released commands are announced to
/// listeners as [`FeederEvent::Data`]. The feeder itself never sends anything.
///
/// # Example
///
/// ```rust
/// use cmdfeed::feeder::api::{Feeder, FeedOptions};
/// use cmdfeed::notifications::api::FeederEvent;
///
/// let mut feeder: Feeder = Feeder::with_filter_fn(|cmd: String, _ctx| {
///     let cmd = cmd.trim().to_string();
///     (!cmd.is_empty()).then_some(cmd)
/// });
/// feeder.subscribe(|event: &FeederEvent<String>| {
///     if let FeederEvent::Data { command, .. } = event {
///         println!("send: {command}");
///     }
/// });
///
/// feeder.feed(["G0 X0", "", "G1 Y1"], None, FeedOptions::default());
/// assert!(feeder.next().unwrap());
/// assert!(!feeder.next().unwrap());
/// ```
pub struct Feeder<C = String> {
    state: FeederState<C>,
    filter: Option<Box<dyn DataFilter<C>>>,
    listeners: Vec<Subscription<C>>,
    next_listener_id: u64,
}

impl<C: FeedCommand> Default for Feeder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FeedCommand> fmt::Debug for Feeder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feeder")
            .field("state", &self.state)
            .field("filter", &self.filter.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<C: FeedCommand> Feeder<C> {
    /// Pass-through feeder: commands are released exactly as fed
    pub fn new() -> Self {
        Self {
            state: FeederState::default(),
            filter: None,
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    pub fn with_filter(filter: impl DataFilter<C> + 'static) -> Self {
        let mut feeder = Self::new();
        feeder.filter = Some(Box::new(filter));
        feeder
    }

    /// Feeder whose filter cannot fail; `None` or a blank result skips the command
    pub fn with_filter_fn<F>(func: F) -> Self
    where
        F: FnMut(C, &Context) -> Option<C> + 'static,
        C: 'static,
    {
        Self::with_filter(InfallibleFilter::new(func))
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Register a listener for all events
    pub fn subscribe(&mut self, listener: impl FeederListener<C> + 'static) -> ListenerId {
        self.subscribe_filtered(EventFilter::All, listener)
    }

    pub fn subscribe_filtered(
        &mut self,
        filter: EventFilter,
        listener: impl FeederListener<C> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        log::trace!(
            "Subscribing listener '{}' ({:?}) with filter {:?}",
            listener.listener_id(),
            id,
            filter
        );
        self.listeners.push(Subscription {
            id,
            filter,
            listener: Box::new(listener),
            statistics: ListenerStatistics::new(),
        });
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|s| s.id != id);
        before != self.listeners.len()
    }

    pub fn listener_statistics(&self, id: ListenerId) -> Option<&ListenerStatistics> {
        self.listeners
            .iter()
            .find(|s| s.id == id)
            .map(|s| &s.statistics)
    }

    /// Add commands to the queue
    ///
    /// `data` is normalised to a batch; an empty batch is a no-op. Each command
    /// gets its own copy of `context` (empty when omitted).
    pub fn feed(
        &mut self,
        data: impl IntoCommands<C>,
        context: Option<&Context>,
        options: FeedOptions,
    ) {
        let commands = data.into_commands();
        if commands.is_empty() {
            return;
        }

        if self.state.queue.is_empty() {
            self.state.pending = false;
        }

        let context = context.cloned().unwrap_or_default();
        let count = commands.len();
        let items = commands
            .into_iter()
            .map(|command| QueueItem::new(command, context.clone()));

        match options.direction {
            FeedDirection::Prepend => {
                let mut batch: VecDeque<QueueItem<C>> = items.collect();
                batch.append(&mut self.state.queue);
                self.state.queue = batch;
            }
            FeedDirection::Append => self.state.queue.extend(items),
        }

        log::debug!(
            "Fed {} command(s) ({}), queue size {}",
            count,
            options.direction,
            self.state.queue.len()
        );
        self.emit(FeederEvent::Change);
    }

    pub fn prepend(
        &mut self,
        data: impl IntoCommands<C>,
        context: Option<&Context>,
        options: FeedOptions,
    ) {
        self.feed(data, context, options.with_direction(FeedDirection::Prepend));
    }

    pub fn append(
        &mut self,
        data: impl IntoCommands<C>,
        context: Option<&Context>,
        options: FeedOptions,
    ) {
        self.feed(data, context, options.with_direction(FeedDirection::Append));
    }

    /// Pause draining; no-op if already held
    ///
    /// A `Value::Null` reason holds without recording a reason.
    pub fn hold(&mut self, reason: impl Into<Value>) {
        if self.state.hold {
            return;
        }
        let reason = reason.into();
        log::debug!("Feeder hold: {}", reason);

        self.state.hold = true;
        self.state.hold_reason = (!reason.is_null()).then_some(reason);
        self.emit(FeederEvent::Hold);
        self.emit(FeederEvent::Change);
    }

    /// Resume draining; no-op if not held
    pub fn unhold(&mut self) {
        if !self.state.hold {
            return;
        }
        log::debug!("Feeder unhold");

        self.state.hold = false;
        self.state.hold_reason = None;
        self.emit(FeederEvent::Unhold);
        self.emit(FeederEvent::Change);
    }

    /// Drop all queued commands
    pub fn clear(&mut self) {
        log::debug!("Clearing feeder ({} queued)", self.state.queue.len());
        self.state.queue.clear();
        self.state.pending = false;
        self.emit(FeederEvent::Change);
    }

    /// Drop all queued commands and release any hold
    pub fn reset(&mut self) {
        log::debug!("Resetting feeder");
        self.state.hold = false;
        self.state.hold_reason = None;
        self.state.queue.clear();
        self.state.pending = false;
        self.emit(FeederEvent::Change);
    }

    pub fn size(&self) -> usize {
        self.state.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.queue.is_empty()
    }

    /// Release at most one command
    ///
    /// Commands the filter rejects are consumed silently and the next one is
    /// tried within the same call. Returns the pending flag. A filter error is
    /// returned as-is; the command being filtered is lost and nothing else changes.
    pub fn next(&mut self) -> FeederResult<bool> {
        while !self.state.hold {
            let Some(QueueItem { command, context }) = self.state.queue.pop_front() else {
                break;
            };

            let command = match self.filter.as_mut() {
                Some(filter) => match filter.filter(command, &context)? {
                    Some(filtered) if !filtered.is_blank() => filtered,
                    _ => {
                        log::trace!("Skipping blank command");
                        continue;
                    }
                },
                None => command,
            };

            log::trace!("Releasing command {:?}", command);
            self.state.pending = true;
            self.emit(FeederEvent::Data { command, context });
            self.emit(FeederEvent::Change);
            break;
        }

        if self.state.queue.is_empty() {
            self.state.pending = false;
        }

        Ok(self.state.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending
    }

    pub fn is_held(&self) -> bool {
        self.state.hold
    }

    pub fn hold_reason(&self) -> Option<&Value> {
        self.state.hold_reason.as_ref()
    }

    /// Return whether anything changed since the last call, and reset the flag
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.state.changed)
    }

    /// Alias of [`take_changed`](Feeder::take_changed)
    pub fn peek(&mut self) -> bool {
        self.take_changed()
    }

    /// Status projection; does not reset the changed flag
    pub fn snapshot(&self) -> FeederSnapshot {
        FeederSnapshot {
            hold: self.state.hold,
            hold_reason: self.state.hold_reason.clone(),
            queue: self.state.queue.len(),
            pending: self.state.pending,
            changed: self.state.changed,
        }
    }

    /// Queued items in drain order
    pub fn queued(&self) -> impl Iterator<Item = &QueueItem<C>> {
        self.state.queue.iter()
    }

    fn emit(&mut self, event: FeederEvent<C>) {
        if matches!(event, FeederEvent::Change) {
            self.state.changed = true;
        }

        let event_type = event.event_type();
        for subscription in self.listeners.iter_mut() {
            if subscription.filter.accepts(&event) {
                subscription.listener.on_event(&event);
                subscription.statistics.record(event_type);
            }
        }
    }
}
