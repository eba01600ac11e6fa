use eframe::egui;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::dispatch::{IdleDispatcher, IdleSignal};
use crate::drag::DragTracker;
use crate::event_source::{EventKind, RawEvent};
use crate::focus::FocusAcceptance;
use crate::indicator::ClickIndicator;
use crate::settings::Settings;
use crate::window_util;

/// Mirror a successful move into the configuration snapshot. The disk write
/// happens once at shutdown, not per move.
pub fn record_window_position(settings: &mut Settings, pos: egui::Pos2) {
    settings.x_pos = pos.x.round() as i32;
    settings.y_pos = pos.y.round() as i32;
}

/// Main overlay window: wires the drag tracker, focus controller, click
/// indicator and idle dispatch loop into the egui update callback, which
/// serves as the cooperative idle tick.
pub struct KeyMonApp {
    settings: Settings,
    settings_path: PathBuf,
    dispatcher: IdleDispatcher,
    drag: DragTracker,
    focus: FocusAcceptance,
    indicator: ClickIndicator,
    modmap: BTreeMap<u32, String>,
    last_label: Option<String>,
    window_id: Option<u64>,
    window_probed: bool,
    shut_down: bool,
}

impl KeyMonApp {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        dispatcher: IdleDispatcher,
        modmap: BTreeMap<u32, String>,
    ) -> Self {
        let timeout = if settings.visible_click {
            settings.visible_click_timeout
        } else {
            0.0
        };
        Self {
            indicator: ClickIndicator::new(timeout),
            settings,
            settings_path,
            dispatcher,
            drag: DragTracker::new(),
            focus: FocusAcceptance::new(),
            modmap,
            last_label: None,
            window_id: None,
            window_probed: false,
            shut_down: false,
        }
    }

    /// Shutdown order matters: stop the device source and close the event
    /// log (dispatcher), then persist the final window position.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.dispatcher.shutdown();
        if let Err(err) = self.settings.save(&self.settings_path) {
            tracing::error!(%err, "failed to save settings");
        } else {
            tracing::info!(
                x = self.settings.x_pos,
                y = self.settings.y_pos,
                "settings saved"
            );
        }
    }

    fn apply_focus(&self, accept: Option<bool>) {
        if let Some(accept) = accept {
            window_util::set_accept_focus(self.window_id, accept);
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (pressed, released, pointer, inside) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.pointer.has_pointer(),
            )
        });

        let accept = self.focus.set_pointer_inside(inside);
        self.apply_focus(accept);

        if pressed {
            if let Some(pos) = pointer {
                if self.drag.press(pos) {
                    let accept = self.focus.set_drag_active(true);
                    self.apply_focus(accept);
                }
            }
        }

        if self.drag.is_dragging() {
            if let (Some(pos), Some(rect)) = (pointer, ctx.input(|i| i.viewport().outer_rect)) {
                if let Some(new_pos) = self.drag.motion(pos, rect.min) {
                    if new_pos != rect.min {
                        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(new_pos));
                        record_window_position(&mut self.settings, new_pos);
                        tracing::debug!(
                            x = self.settings.x_pos,
                            y = self.settings.y_pos,
                            "window moved"
                        );
                    }
                }
            }
        }

        if released && self.drag.release() {
            // Acceptance is recomputed from pointer_inside once the drag
            // ends; leaving mid-drag does not revoke it earlier.
            let accept = self.focus.set_drag_active(false);
            self.apply_focus(accept);
        }
    }

    fn event_label(&self, event: &RawEvent) -> String {
        match event.kind {
            EventKind::Key => self
                .modmap
                .get(&event.code)
                .cloned()
                .unwrap_or_else(|| format!("KEY_{}", event.code)),
            EventKind::Button => format!("BTN_{}", event.code),
            EventKind::Motion | EventKind::Sync => String::new(),
        }
    }

    fn show_indicator(&self, ctx: &egui::Context) {
        let mut builder = egui::ViewportBuilder::default()
            .with_title("key-mon click")
            .with_inner_size([28.0, 28.0])
            .with_decorations(false)
            .with_resizable(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_transparent(true);
        if let Some((x, y)) = window_util::current_mouse_position() {
            builder = builder.with_position(egui::pos2(x - 14.0, y - 14.0));
        }
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("visible-click"),
            builder,
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| {
                        let center = ui.max_rect().center();
                        ui.painter().circle_filled(
                            center,
                            12.0,
                            egui::Color32::from_rgba_unmultiplied(0xff, 0x33, 0x00, 0xa0),
                        );
                    });
            },
        );
    }
}

impl eframe::App for KeyMonApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if !self.window_probed {
            self.window_id = window_util::native_window_id(frame);
            self.window_probed = true;
            // The overlay must not accept focus until dragged or hovered.
            window_util::set_accept_focus(self.window_id, false);
        }

        self.handle_pointer(ctx);

        // Ctrl+Q quits, like the original accelerator.
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Q)) {
            self.dispatcher.request_quit();
        }

        let now = Instant::now();
        if let IdleSignal::Stop = self.dispatcher.tick(&mut self.indicator, now) {
            self.shutdown();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if let Some(event) = self.dispatcher.last_event().copied() {
            let label = self.event_label(&event);
            if !label.is_empty() {
                self.last_label = Some(label);
            }
        }

        if self.indicator.is_visible() {
            self.show_indicator(ctx);
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
        }

        let alpha = (self.settings.opacity.clamp(0.0, 1.0) * 255.0) as u8;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_black_alpha(alpha)))
            .show(ctx, |ui| {
                // Glyph rendering lives elsewhere; the overlay shows the
                // symbolic name of the last key as plain text.
                if let Some(label) = &self.last_label {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new(label).strong());
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(1));
    }
}
