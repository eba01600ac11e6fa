use rdev::{listen, Button, Event, EventType, Key};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    /// No keyboard/mouse device (or OS hook) could be opened.
    #[error("no input devices available: {0}")]
    Unavailable(String),
    #[error("device source already started")]
    AlreadyStarted,
}

/// Event class, mirroring the evdev split between keys, buttons and motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Key,
    Button,
    Motion,
    Sync,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Key => write!(f, "KEY"),
            EventKind::Button => write!(f, "BTN"),
            EventKind::Motion => write!(f, "MOV"),
            EventKind::Sync => write!(f, "SYN"),
        }
    }
}

/// One raw input event, produced by the capture thread and consumed exactly
/// once by the idle dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub code: u32,
    pub value: i32,
    pub time: SystemTime,
}

/// Capture backend seam. The production backend wraps `rdev::listen`; tests
/// inject scripted event streams.
pub trait DeviceBackend: Send {
    fn start(&mut self, tx: Sender<RawEvent>) -> Result<(), DeviceError>;
    fn stop(&mut self);
}

/// Pull-based adapter over a capture backend.
///
/// Events cross from the capture thread into the GUI thread only through the
/// channel drained by [`DeviceSource::poll`]; no callback ever touches window
/// state directly.
pub struct DeviceSource {
    backend: Box<dyn DeviceBackend>,
    rx: Option<Receiver<RawEvent>>,
    started: bool,
    stopped: bool,
    failed: bool,
}

impl DeviceSource {
    pub fn new(backend: Box<dyn DeviceBackend>) -> Self {
        Self {
            backend,
            rx: None,
            started: false,
            stopped: false,
            failed: false,
        }
    }

    /// Begin capturing. Fails with [`DeviceError::Unavailable`] when no
    /// device can be opened; that failure must be surfaced to the user.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        if self.started {
            return Err(DeviceError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        self.backend.start(tx)?;
        self.rx = Some(rx);
        self.started = true;
        Ok(())
    }

    /// Return the next buffered event, or `None` when there is none.
    ///
    /// Never blocks. After [`DeviceSource::stop`] this permanently returns
    /// `None`.
    pub fn poll(&mut self) -> Option<RawEvent> {
        if self.stopped {
            return None;
        }
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // The capture thread died underneath us.
                if !self.failed {
                    tracing::error!("input capture thread disconnected");
                    self.failed = true;
                }
                None
            }
        }
    }

    /// Release the capture backend. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.backend.stop();
        self.rx = None;
        tracing::debug!("device source stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True when the backend reported an unrecoverable read failure.
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

/// Production backend: a capture thread running `rdev::listen`.
///
/// `rdev` offers no way to unblock `listen`, so `stop` flips a flag that
/// makes the callback drop everything; the thread itself lives until process
/// exit, like the hotkey listener threads elsewhere in the codebase family.
#[derive(Default)]
pub struct RdevBackend {
    stop_flag: Option<Arc<AtomicBool>>,
}

impl DeviceBackend for RdevBackend {
    fn start(&mut self, tx: Sender<RawEvent>) -> Result<(), DeviceError> {
        let stop = Arc::new(AtomicBool::new(false));
        self.stop_flag = Some(stop.clone());
        let (err_tx, err_rx) = mpsc::channel();
        thread::spawn(move || {
            let result = listen(move |event: Event| {
                if stop.load(Ordering::SeqCst) {
                    return;
                }
                if let Some(raw) = raw_from_rdev(&event) {
                    let _ = tx.send(raw);
                }
            });
            if let Err(error) = result {
                tracing::error!(?error, "input capture failed");
                let _ = err_tx.send(format!("{error:?}"));
            }
        });
        // listen() blocks the thread for as long as capture works, so an
        // error arriving promptly means no device/hook could be opened.
        match err_rx.recv_timeout(Duration::from_millis(250)) {
            Ok(msg) => Err(DeviceError::Unavailable(msg)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Ok(()),
        }
    }

    fn stop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

// evdev-style button codes, kept stable across platforms for the event log.
pub const BTN_LEFT: u32 = 272;
pub const BTN_RIGHT: u32 = 273;
pub const BTN_MIDDLE: u32 = 274;
const REL_WHEEL: u32 = 8;

/// Translate an `rdev` event into the adapter's event model. Motion carries
/// the pointer position as `(code, value)`; both axes clamp to 0 off the
/// top-left of the virtual screen so the log never mixes a clamped x with an
/// unclamped y.
pub fn raw_from_rdev(event: &Event) -> Option<RawEvent> {
    let (kind, code, value) = match event.event_type {
        EventType::KeyPress(key) => (EventKind::Key, key_code(key), 1),
        EventType::KeyRelease(key) => (EventKind::Key, key_code(key), 0),
        EventType::ButtonPress(button) => (EventKind::Button, button_code(button), 1),
        EventType::ButtonRelease(button) => (EventKind::Button, button_code(button), 0),
        EventType::MouseMove { x, y } => (EventKind::Motion, x.max(0.0) as u32, y.max(0.0) as i32),
        EventType::Wheel { delta_y, .. } => (EventKind::Motion, REL_WHEEL, delta_y as i32),
    };
    Some(RawEvent {
        kind,
        code,
        value,
        time: event.time,
    })
}

fn button_code(button: Button) -> u32 {
    match button {
        Button::Left => BTN_LEFT,
        Button::Right => BTN_RIGHT,
        Button::Middle => BTN_MIDDLE,
        Button::Unknown(code) => u32::from(code),
    }
}

/// Map an `rdev` key to its Linux evdev `KEY_*` code so the diagnostic log
/// and the modifier map speak the same numbering on every platform.
pub fn key_code(key: Key) -> u32 {
    match key {
        Key::Escape => 1,
        Key::Num1 => 2,
        Key::Num2 => 3,
        Key::Num3 => 4,
        Key::Num4 => 5,
        Key::Num5 => 6,
        Key::Num6 => 7,
        Key::Num7 => 8,
        Key::Num8 => 9,
        Key::Num9 => 10,
        Key::Num0 => 11,
        Key::Minus => 12,
        Key::Equal => 13,
        Key::Backspace => 14,
        Key::Tab => 15,
        Key::KeyQ => 16,
        Key::KeyW => 17,
        Key::KeyE => 18,
        Key::KeyR => 19,
        Key::KeyT => 20,
        Key::KeyY => 21,
        Key::KeyU => 22,
        Key::KeyI => 23,
        Key::KeyO => 24,
        Key::KeyP => 25,
        Key::LeftBracket => 26,
        Key::RightBracket => 27,
        Key::Return => 28,
        Key::ControlLeft => 29,
        Key::KeyA => 30,
        Key::KeyS => 31,
        Key::KeyD => 32,
        Key::KeyF => 33,
        Key::KeyG => 34,
        Key::KeyH => 35,
        Key::KeyJ => 36,
        Key::KeyK => 37,
        Key::KeyL => 38,
        Key::SemiColon => 39,
        Key::Quote => 40,
        Key::BackQuote => 41,
        Key::ShiftLeft => 42,
        Key::BackSlash => 43,
        Key::KeyZ => 44,
        Key::KeyX => 45,
        Key::KeyC => 46,
        Key::KeyV => 47,
        Key::KeyB => 48,
        Key::KeyN => 49,
        Key::KeyM => 50,
        Key::Comma => 51,
        Key::Dot => 52,
        Key::Slash => 53,
        Key::ShiftRight => 54,
        Key::KpMultiply => 55,
        Key::Alt => 56,
        Key::Space => 57,
        Key::CapsLock => 58,
        Key::F1 => 59,
        Key::F2 => 60,
        Key::F3 => 61,
        Key::F4 => 62,
        Key::F5 => 63,
        Key::F6 => 64,
        Key::F7 => 65,
        Key::F8 => 66,
        Key::F9 => 67,
        Key::F10 => 68,
        Key::NumLock => 69,
        Key::ScrollLock => 70,
        Key::Kp7 => 71,
        Key::Kp8 => 72,
        Key::Kp9 => 73,
        Key::KpMinus => 74,
        Key::Kp4 => 75,
        Key::Kp5 => 76,
        Key::Kp6 => 77,
        Key::KpPlus => 78,
        Key::Kp1 => 79,
        Key::Kp2 => 80,
        Key::Kp3 => 81,
        Key::Kp0 => 82,
        Key::KpDelete => 83,
        Key::IntlBackslash => 86,
        Key::F11 => 87,
        Key::F12 => 88,
        Key::KpReturn => 96,
        Key::ControlRight => 97,
        Key::KpDivide => 98,
        Key::PrintScreen => 99,
        Key::AltGr => 100,
        Key::Home => 102,
        Key::UpArrow => 103,
        Key::PageUp => 104,
        Key::LeftArrow => 105,
        Key::RightArrow => 106,
        Key::End => 107,
        Key::DownArrow => 108,
        Key::PageDown => 109,
        Key::Insert => 110,
        Key::Delete => 111,
        Key::Pause => 119,
        Key::MetaLeft => 125,
        Key::MetaRight => 126,
        Key::Unknown(code) => code,
        _ => 0,
    }
}
