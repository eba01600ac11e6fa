use anyhow::anyhow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories searched for themes: the per-user config dir plus a `themes`
/// directory next to the working directory.
pub fn theme_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(config) = dirs_next::config_dir() {
        dirs.push(config.join("key-mon").join("themes"));
    }
    dirs.push(PathBuf::from("themes"));
    dirs
}

/// Scan `dirs` for themes: any subdirectory containing at least one SVG.
/// Earlier directories win on name collisions.
pub fn available_themes(dirs: &[PathBuf]) -> BTreeMap<String, PathBuf> {
    let mut themes = BTreeMap::new();
    for dir in dirs {
        for entry in WalkDir::new(dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .flatten()
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }
            if let Some(theme_dir) = path.parent() {
                if let Some(name) = theme_dir.file_name().and_then(|n| n.to_str()) {
                    themes
                        .entry(name.to_string())
                        .or_insert_with(|| theme_dir.to_path_buf());
                }
            }
        }
    }
    themes
}

/// Resolve the configured theme to its directory, or explain where themes
/// were looked for.
pub fn resolve(theme: &str, dirs: &[PathBuf]) -> anyhow::Result<PathBuf> {
    let themes = available_themes(dirs);
    themes.get(theme).cloned().ok_or_else(|| {
        let searched: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
        anyhow!(
            "theme {theme:?} does not exist; searched: {}",
            searched.join(", ")
        )
    })
}

/// Path of a theme image for `name`, e.g. `mouse-indicator` ->
/// `<theme_dir>/mouse-indicator.svg`.
pub fn svg_path(theme_dir: &Path, name: &str) -> PathBuf {
    theme_dir.join(format!("{name}.svg"))
}
