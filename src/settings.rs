use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted configuration snapshot.
///
/// The core only reads and writes this typed snapshot; it never touches the
/// file format outside `load`/`save`. Window position is mirrored in on every
/// successful move and written to disk once at shutdown.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Last window position; `-1` means "no saved position".
    #[serde(default = "default_pos")]
    pub x_pos: i32,
    #[serde(default = "default_pos")]
    pub y_pos: i32,
    /// Show a highly visible indicator where you clicked.
    #[serde(default)]
    pub visible_click: bool,
    /// Seconds before the click indicator disappears. Non-positive disables
    /// the indicator entirely.
    #[serde(default = "default_visible_click_timeout")]
    pub visible_click_timeout: f32,
    /// Opacity of the overlay window.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Theme used when drawing status images.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Show only key combos (e.g. Control-A). Consumed by rendering.
    #[serde(default)]
    pub only_combo: bool,
    /// Sticky mode. Consumed by rendering.
    #[serde(default)]
    pub sticky_mode: bool,
    /// Optional keymap file overriding the modifier map.
    pub kbd_file: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_pos() -> i32 {
    -1
}

fn default_visible_click_timeout() -> f32 {
    0.2
}

fn default_opacity() -> f32 {
    1.0
}

fn default_theme() -> String {
    "classic".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            x_pos: default_pos(),
            y_pos: default_pos(),
            visible_click: false,
            visible_click_timeout: default_visible_click_timeout(),
            opacity: default_opacity(),
            theme: default_theme(),
            only_combo: false,
            sticky_mode: false,
            kbd_file: None,
            debug_logging: false,
        }
    }
}

/// Default path of the settings file, `<config_dir>/key-mon/config.json`.
pub fn config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("key-mon")
        .join("config.json")
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded snapshot.
    ///
    /// Returns `true` when `--reset` asked for the defaults to be written
    /// back immediately.
    pub fn apply_args<I, S>(&mut self, args: I) -> anyhow::Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reset = false;
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_ref() {
                "--theme" | "-t" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow!("--theme requires a value"))?;
                    self.theme = value.as_ref().to_string();
                }
                "--visible-click" => self.visible_click = true,
                "--debug" | "-d" => self.debug_logging = true,
                "--reset" => {
                    *self = Self::default();
                    reset = true;
                }
                other => return Err(anyhow!("unknown option: {other}")),
            }
        }
        Ok(reset)
    }
}
