use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::key::PhysicalKey;

/// A logical modifier, abstracting over its left/right physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalModifier {
    Ctrl,
    Alt,
    Win,
}

impl LogicalModifier {
    /// Returns the modifier group a physical key belongs to, `None` for any
    /// other key.
    #[must_use]
    pub fn classify(key: &PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::ControlLeft | PhysicalKey::ControlRight | PhysicalKey::Control => {
                Some(LogicalModifier::Ctrl)
            }
            PhysicalKey::AltLeft | PhysicalKey::AltRight | PhysicalKey::Alt => {
                Some(LogicalModifier::Alt)
            }
            PhysicalKey::SuperLeft | PhysicalKey::SuperRight => Some(LogicalModifier::Win),
            PhysicalKey::Char(_) | PhysicalKey::Named(_) | PhysicalKey::Other(_) => None,
        }
    }
}

/// The modifier combination a hint panel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chord {
    Ctrl,
    Alt,
    CtrlAlt,
    Win,
}

impl Chord {
    pub const ALL: [Chord; 4] = [Chord::Ctrl, Chord::Alt, Chord::CtrlAlt, Chord::Win];

    /// Derives the active chord from the held modifiers. Win wins over the
    /// others.
    #[must_use]
    pub fn derive(ctrl: bool, alt: bool, win: bool) -> Option<Self> {
        match (ctrl, alt, win) {
            (_, _, true) => Some(Chord::Win),
            (true, true, false) => Some(Chord::CtrlAlt),
            (true, false, false) => Some(Chord::Ctrl),
            (false, true, false) => Some(Chord::Alt),
            (false, false, false) => None,
        }
    }

    /// Whether releasing `self` should hide a panel shown for `shown`.
    #[must_use]
    pub fn releases(self, shown: Chord) -> bool {
        match self {
            Chord::Ctrl => matches!(shown, Chord::Ctrl | Chord::CtrlAlt),
            Chord::Alt => matches!(shown, Chord::Alt | Chord::CtrlAlt),
            Chord::CtrlAlt => matches!(shown, Chord::Ctrl | Chord::Alt | Chord::CtrlAlt),
            Chord::Win => shown == Chord::Win,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Chord::Ctrl => "ctrl",
            Chord::Alt => "alt",
            Chord::CtrlAlt => "ctrl_alt",
            Chord::Win => "win",
        }
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Chord, LogicalModifier};
    use crate::key::{NamedKey, PhysicalKey};

    #[test]
    fn classify_groups_left_and_right() {
        assert_eq!(
            LogicalModifier::classify(&PhysicalKey::ControlLeft),
            LogicalModifier::classify(&PhysicalKey::ControlRight)
        );
        assert_eq!(
            LogicalModifier::classify(&PhysicalKey::Alt),
            Some(LogicalModifier::Alt)
        );
        assert_eq!(
            LogicalModifier::classify(&PhysicalKey::SuperRight),
            Some(LogicalModifier::Win)
        );
        assert_eq!(
            LogicalModifier::classify(&PhysicalKey::Named(NamedKey::Tab)),
            None
        );
        assert_eq!(LogicalModifier::classify(&PhysicalKey::Char('c')), None);
    }

    #[test]
    fn derive_gives_win_priority() {
        assert_eq!(Chord::derive(true, true, true), Some(Chord::Win));
        assert_eq!(Chord::derive(true, true, false), Some(Chord::CtrlAlt));
        assert_eq!(Chord::derive(true, false, false), Some(Chord::Ctrl));
        assert_eq!(Chord::derive(false, true, false), Some(Chord::Alt));
        assert_eq!(Chord::derive(false, false, false), None);
    }

    #[test]
    fn release_relations() {
        assert!(Chord::Ctrl.releases(Chord::CtrlAlt));
        assert!(Chord::CtrlAlt.releases(Chord::Alt));
        assert!(!Chord::Alt.releases(Chord::Ctrl));
        assert!(!Chord::Win.releases(Chord::Ctrl));
        assert!(!Chord::Ctrl.releases(Chord::Win));
    }

    #[test]
    fn chord_names() {
        let names: Vec<String> = Chord::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["ctrl", "alt", "ctrl_alt", "win"]);
    }
}
