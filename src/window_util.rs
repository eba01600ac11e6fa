//! Native window glue the egui viewport API does not cover: the
//! window-manager focus-acceptance hint and global cursor queries.

#[cfg(all(unix, not(target_os = "macos")))]
use raw_window_handle::{HasWindowHandle, RawWindowHandle};

/// Return the current mouse position in screen coordinates.
pub fn current_mouse_position() -> Option<(f32, f32)> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use std::ptr;
        use x11::xlib;
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                return None;
            }
            let root = xlib::XDefaultRootWindow(display);
            let mut root_ret = 0;
            let mut child_ret = 0;
            let mut root_x = 0;
            let mut root_y = 0;
            let mut win_x = 0;
            let mut win_y = 0;
            let mut mask = 0;
            let status = xlib::XQueryPointer(
                display,
                root,
                &mut root_ret,
                &mut child_ret,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            );
            xlib::XCloseDisplay(display);
            if status == 0 {
                None
            } else {
                Some((root_x as f32, root_y as f32))
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        None
    }
}

/// Extract the X11 window id from an eframe [`Frame`](eframe::Frame).
#[cfg(all(unix, not(target_os = "macos")))]
pub fn native_window_id(frame: &eframe::Frame) -> Option<u64> {
    if let Ok(handle) = frame.window_handle() {
        match handle.as_raw() {
            RawWindowHandle::Xlib(h) => Some(h.window as u64),
            _ => None,
        }
    } else {
        None
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
pub fn native_window_id(_frame: &eframe::Frame) -> Option<u64> {
    None
}

/// Apply the window-manager focus-acceptance attribute (the `input` field of
/// the WM hints). Setting the same value twice is harmless.
#[cfg(all(unix, not(target_os = "macos")))]
pub fn set_accept_focus(window: Option<u64>, accept: bool) {
    use std::ptr;
    use x11::xlib;
    let Some(window) = window else {
        return;
    };
    unsafe {
        let display = xlib::XOpenDisplay(ptr::null());
        if display.is_null() {
            tracing::warn!("cannot open display to update focus acceptance");
            return;
        }
        let mut hints: xlib::XWMHints = std::mem::zeroed();
        hints.flags = xlib::InputHint;
        hints.input = accept as i32;
        xlib::XSetWMHints(display, window as xlib::Window, &mut hints);
        xlib::XFlush(display);
        xlib::XCloseDisplay(display);
    }
    tracing::debug!(accept, "window focus acceptance applied");
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
pub fn set_accept_focus(_window: Option<u64>, accept: bool) {
    tracing::debug!(accept, "focus acceptance not supported on this platform");
}
