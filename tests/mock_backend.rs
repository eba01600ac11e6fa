#![allow(dead_code)]

use key_mon::event_source::{DeviceBackend, DeviceError, EventKind, RawEvent};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, UNIX_EPOCH};

/// Backend that feeds a fixed script of events into the channel and records
/// how often it was stopped. An optional hook runs inside `stop`, letting a
/// test observe the state of the world at the moment the source is released.
pub struct ScriptedBackend {
    events: Vec<RawEvent>,
    pub stops: Arc<Mutex<u32>>,
    on_stop: Option<Box<dyn FnMut() + Send>>,
    // Kept alive so the channel stays connected after the script is sent.
    tx: Option<Sender<RawEvent>>,
}

impl ScriptedBackend {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self {
            events,
            stops: Arc::new(Mutex::new(0)),
            on_stop: None,
            tx: None,
        }
    }

    pub fn with_stop_hook(events: Vec<RawEvent>, on_stop: impl FnMut() + Send + 'static) -> Self {
        let mut backend = Self::new(events);
        backend.on_stop = Some(Box::new(on_stop));
        backend
    }
}

impl DeviceBackend for ScriptedBackend {
    fn start(&mut self, tx: Sender<RawEvent>) -> Result<(), DeviceError> {
        for event in &self.events {
            tx.send(*event).unwrap();
        }
        self.tx = Some(tx);
        Ok(())
    }

    fn stop(&mut self) {
        *self.stops.lock().unwrap() += 1;
        if let Some(hook) = self.on_stop.as_mut() {
            hook();
        }
        self.tx = None;
    }
}

/// Backend whose capture thread dies immediately: start succeeds but the
/// channel disconnects right away.
pub struct DisconnectedBackend;

impl DeviceBackend for DisconnectedBackend {
    fn start(&mut self, _tx: Sender<RawEvent>) -> Result<(), DeviceError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Backend with no devices to open.
pub struct FailingBackend;

impl DeviceBackend for FailingBackend {
    fn start(&mut self, _tx: Sender<RawEvent>) -> Result<(), DeviceError> {
        Err(DeviceError::Unavailable("no devices".into()))
    }

    fn stop(&mut self) {}
}

pub fn event_at(kind: EventKind, code: u32, value: i32, millis: u64) -> RawEvent {
    RawEvent {
        kind,
        code,
        value,
        time: UNIX_EPOCH + Duration::from_millis(millis),
    }
}
