//! Test modules for the feeder
//!
//! Tests are organized by functional area.


use crate::feeder::api::{Context, Feeder};
use crate::notifications::api::{FeederEvent, FeederEventType};
use std::cell::RefCell;
use std::rc::Rc;

/// Event log shared between a test and the listener it subscribes
pub(super) type EventLog = Rc<RefCell<Vec<FeederEvent<String>>>>;

pub(super) fn recording(feeder: &mut Feeder) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    feeder.subscribe(move |event: &FeederEvent<String>| sink.borrow_mut().push(event.clone()));
    log
}

pub(super) fn event_types(log: &EventLog) -> Vec<FeederEventType> {
    log.borrow().iter().map(|e| e.event_type()).collect()
}

pub(super) fn data_commands(log: &EventLog) -> Vec<String> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            FeederEvent::Data { command, .. } => Some(command.clone()),
            _ => None,
        })
        .collect()
}

pub(super) fn queued_commands(feeder: &Feeder) -> Vec<String> {
    feeder.queued().map(|item| item.command.clone()).collect()
}

pub(super) fn reject_blank(cmd: String, _ctx: &Context) -> Option<String> {
    (!cmd.is_empty()).then_some(cmd)
}
