use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Modifier-map loader: turns a keymap file into a code -> symbolic-name
/// table. Consumed by rendering, not by the event core.
///
/// Format: one `code name` pair per line; blank lines and `#` comments are
/// ignored; malformed lines are skipped with a warning.
pub fn load(path: &Path) -> anyhow::Result<BTreeMap<u32, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read keymap file {}", path.display()))?;
    Ok(parse(&content))
}

pub fn parse(content: &str) -> BTreeMap<u32, String> {
    let mut map = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let code = parts.next().and_then(|c| c.parse::<u32>().ok());
        let name = parts.next();
        match (code, name) {
            (Some(code), Some(name)) => {
                map.insert(code, name.to_string());
            }
            _ => {
                tracing::warn!(line = idx + 1, "ignoring malformed keymap line");
            }
        }
    }
    map
}

/// Load the keymap if one is configured; any failure degrades to an empty
/// table with a warning, the overlay still runs.
pub fn load_or_default(kbd_file: Option<&str>) -> BTreeMap<u32, String> {
    let Some(path) = kbd_file else {
        return BTreeMap::new();
    };
    match load(Path::new(path)) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!(%err, "failed to read keymap file, using empty map");
            BTreeMap::new()
        }
    }
}
