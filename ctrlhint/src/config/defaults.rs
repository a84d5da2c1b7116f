//! Shortcut cards shown when the config file does not list any.

use ctrlhint_core::config::ShortcutItem;

fn items(pairs: &[(&str, &str)]) -> Vec<ShortcutItem> {
    pairs
        .iter()
        .map(|(key, action)| ShortcutItem::new(*key, *action))
        .collect()
}

pub fn ctrl() -> Vec<ShortcutItem> {
    items(&[
        ("C", "Copy"),
        ("V", "Paste"),
        ("X", "Cut"),
        ("Z", "Undo"),
        ("Y", "Redo"),
        ("A", "Select all"),
        ("S", "Save"),
        ("F", "Find"),
        ("N", "New"),
        ("O", "Open"),
    ])
}

pub fn alt() -> Vec<ShortcutItem> {
    items(&[
        ("Tab", "Switch window"),
        ("F4", "Close window"),
        ("Enter", "Properties"),
        ("Space", "Window menu"),
        ("←", "Back"),
        ("→", "Forward"),
    ])
}

pub fn ctrl_alt() -> Vec<ShortcutItem> {
    items(&[
        ("Del", "Task manager"),
        ("T", "New tab"),
        ("L", "Lock screen"),
    ])
}

pub fn win() -> Vec<ShortcutItem> {
    items(&[
        ("D", "Show desktop"),
        ("L", "Lock screen"),
        ("R", "Run dialog"),
        ("E", "File manager"),
        ("I", "Settings"),
        ("X", "Quick link menu"),
        ("Tab", "Task view"),
        ("↑", "Maximize window"),
        ("↓", "Minimize window"),
        ("←", "Snap left"),
        ("→", "Snap right"),
    ])
}
