pub mod dispatch;
pub mod drag;
pub mod event_log;
pub mod event_source;
pub mod focus;
pub mod indicator;
pub mod logging;
pub mod modmap;
pub mod settings;
pub mod theme;
pub mod window_util;

pub mod gui;
