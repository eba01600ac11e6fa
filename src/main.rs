use anyhow::Context;
use eframe::egui;

use key_mon::dispatch::IdleDispatcher;
use key_mon::event_log::EventLog;
use key_mon::event_source::{DeviceSource, RdevBackend};
use key_mon::gui::KeyMonApp;
use key_mon::settings::{self, Settings};
use key_mon::{logging, modmap, theme};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings_path = settings::config_path();
    let mut settings = Settings::load(&settings_path)?;
    let reset = settings.apply_args(&args)?;
    logging::init(settings.debug_logging);
    if reset {
        tracing::info!("resetting to defaults");
        settings.save(&settings_path)?;
    }

    let theme_dirs = theme::theme_dirs();
    let themes = theme::available_themes(&theme_dirs);
    if themes.is_empty() {
        tracing::warn!("no themes found, running without status images");
    } else if !themes.contains_key(&settings.theme) {
        theme::resolve(&settings.theme, &theme_dirs)?;
    }

    let modmap = modmap::load_or_default(settings.kbd_file.as_deref());

    // No window without an input source: a monitor that cannot monitor is
    // useless, so startup fails loudly here.
    let mut source = DeviceSource::new(Box::new(RdevBackend::default()));
    source
        .start()
        .context("cannot monitor keyboard/mouse devices")?;

    let log = EventLog::create(&std::env::temp_dir())?;
    tracing::info!(path = %log.path().display(), "event log opened");
    let dispatcher = IdleDispatcher::new(source, log);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Keyboard Status Monitor")
        .with_inner_size([180.0, 48.0])
        .with_resizable(false)
        .with_decorations(false)
        .with_always_on_top()
        .with_taskbar(false)
        .with_transparent(true);
    if settings.x_pos >= 0 && settings.y_pos >= 0 {
        viewport =
            viewport.with_position(egui::pos2(settings.x_pos as f32, settings.y_pos as f32));
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app = KeyMonApp::new(settings, settings_path, dispatcher, modmap);
    eframe::run_native(
        "key-mon",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to run overlay window: {err}"))?;
    Ok(())
}
