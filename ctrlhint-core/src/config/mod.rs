pub mod command;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use command::Command;

use crate::chord::Chord;

/// One card on a hint panel.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ShortcutItem {
    pub key: String,
    pub action: String,
}

impl ShortcutItem {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Visual parameters handed to the presenter. Sizes are pixels, colors are
/// `#rrggbb`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub card_size: u32,
    pub key_font_size: u32,
    pub action_font_size: u32,
    /// Percent, 0 to 100.
    pub background_opacity: u8,
    pub key_color: String,
    pub action_color: String,
    pub card_bg_color_start: String,
    pub card_bg_color_end: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            card_size: 90,
            key_font_size: 24,
            action_font_size: 10,
            background_opacity: 50,
            key_color: "#1a1a1e".to_owned(),
            action_color: "#1e1e28".to_owned(),
            card_bg_color_start: "#ffffff".to_owned(),
            card_bg_color_end: "#f0f0fa".to_owned(),
        }
    }
}

pub trait Config {
    fn shortcuts(&self, chord: Chord) -> Vec<ShortcutItem>;

    fn appearance(&self) -> Appearance;

    fn hint_board(&self) -> HintBoard {
        HintBoard {
            panels: Chord::ALL
                .into_iter()
                .map(|chord| (chord, self.shortcuts(chord)))
                .collect(),
            appearance: self.appearance(),
        }
    }
}

/// Everything the presenter needs to draw a panel, detached from the config
/// it was read from.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct HintBoard {
    panels: BTreeMap<Chord, Vec<ShortcutItem>>,
    pub appearance: Appearance,
}

impl HintBoard {
    #[must_use]
    pub fn panel(&self, chord: Chord) -> &[ShortcutItem] {
        self.panels
            .get(&chord)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Appearance, Config, ShortcutItem};
    use crate::chord::Chord;

    struct OnlyCtrl;

    impl Config for OnlyCtrl {
        fn shortcuts(&self, chord: Chord) -> Vec<ShortcutItem> {
            match chord {
                Chord::Ctrl => vec![ShortcutItem::new("C", "Copy")],
                _ => vec![],
            }
        }

        fn appearance(&self) -> Appearance {
            Appearance::default()
        }
    }

    #[test]
    fn hint_board_collects_every_chord() {
        let board = OnlyCtrl.hint_board();
        assert_eq!(board.panel(Chord::Ctrl), [ShortcutItem::new("C", "Copy")]);
        assert!(board.panel(Chord::Win).is_empty());
        assert_eq!(board.appearance.card_size, 90);
    }

    #[test]
    fn appearance_fills_missing_fields() {
        let appearance: Appearance = ron::from_str("(card_size: 120)").unwrap();
        assert_eq!(appearance.card_size, 120);
        assert_eq!(appearance.key_font_size, 24);
    }
}
