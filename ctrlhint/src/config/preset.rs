use crate::errors::{HintError, Result};
use ctrlhint_core::config::Appearance;

pub const PRESET_NAMES: [&str; 8] = [
    "default", "dark", "blue", "green", "purple", "orange", "minimal", "large",
];

/// Looks up a named appearance preset.
///
/// # Errors
///
/// Errors when no preset has that name.
pub fn preset(name: &str) -> Result<Appearance> {
    let appearance = match name {
        "default" => Appearance::default(),
        "dark" => colored(80, "#ffffff", "#e0e0e0", "#2d2d2d", "#1a1a1a"),
        "blue" => colored(70, "#ffffff", "#e3f2fd", "#1976d2", "#0d47a1"),
        "green" => colored(70, "#ffffff", "#e8f5e8", "#4caf50", "#2e7d32"),
        "purple" => colored(70, "#ffffff", "#f3e5f5", "#9c27b0", "#4a148c"),
        "orange" => colored(70, "#ffffff", "#fff3e0", "#ff9800", "#e65100"),
        "minimal" => Appearance {
            card_size: 80,
            key_font_size: 20,
            action_font_size: 9,
            ..colored(30, "#333333", "#666666", "#f8f9fa", "#e9ecef")
        },
        "large" => Appearance {
            card_size: 120,
            key_font_size: 32,
            action_font_size: 14,
            background_opacity: 60,
            ..Appearance::default()
        },
        _ => return Err(HintError::UnknownPreset(name.to_owned())),
    };
    Ok(appearance)
}

fn colored(
    background_opacity: u8,
    key_color: &str,
    action_color: &str,
    card_bg_color_start: &str,
    card_bg_color_end: &str,
) -> Appearance {
    Appearance {
        background_opacity,
        key_color: key_color.to_owned(),
        action_color: action_color.to_owned(),
        card_bg_color_start: card_bg_color_start.to_owned(),
        card_bg_color_end: card_bg_color_end.to_owned(),
        ..Appearance::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{PRESET_NAMES, preset};
    use crate::errors::HintError;

    #[test]
    fn every_named_preset_resolves() {
        for name in PRESET_NAMES {
            assert!(preset(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn minimal_shrinks_cards() {
        let appearance = preset("minimal").unwrap();
        assert_eq!(appearance.card_size, 80);
        assert_eq!(appearance.background_opacity, 30);
        assert_eq!(appearance.key_color, "#333333");
    }

    #[test]
    fn unknown_name() {
        assert!(matches!(
            preset("neon"),
            Err(HintError::UnknownPreset(name)) if name == "neon"
        ));
    }
}
