use std::collections::HashSet;

use crate::chord::{Chord, LogicalModifier};
use crate::key::PhysicalKey;
use crate::sink::ChordEvent;

/// Snapshot of which logical modifiers are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub win: bool,
}

/// Physical keys currently down, grouped by the modifier they map to.
///
/// The `*_held` flags cache "set is non-empty" and are only changed on a
/// transition of their set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    ctrl_keys: HashSet<PhysicalKey>,
    alt_keys: HashSet<PhysicalKey>,
    win_keys: HashSet<PhysicalKey>,
    ctrl_held: bool,
    alt_held: bool,
    win_held: bool,
}

impl TrackerState {
    #[must_use]
    pub fn held(&self) -> HeldModifiers {
        HeldModifiers {
            ctrl: self.ctrl_held,
            alt: self.alt_held,
            win: self.win_held,
        }
    }

    /// The chord derived from the held modifiers.
    #[must_use]
    pub fn chord(&self) -> Option<Chord> {
        Chord::derive(self.ctrl_held, self.alt_held, self.win_held)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Applies a key-down and returns the notification it triggers.
    pub fn press(&mut self, key: &PhysicalKey) -> Option<ChordEvent> {
        match LogicalModifier::classify(key) {
            Some(LogicalModifier::Ctrl) => {
                if !first_insert(&mut self.ctrl_keys, key) {
                    return None;
                }
                self.ctrl_held = true;
                Some(ChordEvent::Pressed(if self.alt_held {
                    Chord::CtrlAlt
                } else {
                    Chord::Ctrl
                }))
            }
            Some(LogicalModifier::Alt) => {
                if !first_insert(&mut self.alt_keys, key) {
                    return None;
                }
                self.alt_held = true;
                Some(ChordEvent::Pressed(if self.ctrl_held {
                    Chord::CtrlAlt
                } else {
                    Chord::Alt
                }))
            }
            Some(LogicalModifier::Win) => {
                // Auto-repeat of super only fires on the first press, same
                // as the other groups.
                if !first_insert(&mut self.win_keys, key) {
                    return None;
                }
                self.win_held = true;
                Some(ChordEvent::Pressed(Chord::Win))
            }
            None => {
                let chord = self.highlight_chord()?;
                let label = key.label()?;
                Some(ChordEvent::SpecificKeyPressed { chord, label })
            }
        }
    }

    /// Applies a key-up and returns the notification it triggers.
    pub fn release(&mut self, key: &PhysicalKey) -> Option<ChordEvent> {
        match LogicalModifier::classify(key)? {
            LogicalModifier::Ctrl => {
                if !last_remove(&mut self.ctrl_keys, key) {
                    return None;
                }
                self.ctrl_held = false;
                Some(ChordEvent::Released(if self.alt_held {
                    Chord::CtrlAlt
                } else {
                    Chord::Ctrl
                }))
            }
            LogicalModifier::Alt => {
                if !last_remove(&mut self.alt_keys, key) {
                    return None;
                }
                self.alt_held = false;
                Some(ChordEvent::Released(if self.ctrl_held {
                    Chord::CtrlAlt
                } else {
                    Chord::Alt
                }))
            }
            LogicalModifier::Win => {
                if !last_remove(&mut self.win_keys, key) {
                    return None;
                }
                self.win_held = false;
                Some(ChordEvent::Released(Chord::Win))
            }
        }
    }

    // Unlike `chord`, Win only counts when nothing else is held.
    fn highlight_chord(&self) -> Option<Chord> {
        match (self.ctrl_held, self.alt_held, self.win_held) {
            (true, true, _) => Some(Chord::CtrlAlt),
            (true, false, _) => Some(Chord::Ctrl),
            (false, true, _) => Some(Chord::Alt),
            (false, false, true) => Some(Chord::Win),
            (false, false, false) => None,
        }
    }
}

/// Inserts `key`, returning true when the set went from empty to non-empty.
fn first_insert(keys: &mut HashSet<PhysicalKey>, key: &PhysicalKey) -> bool {
    let was_empty = keys.is_empty();
    keys.insert(*key);
    was_empty
}

/// Removes `key`, returning true when that removal emptied the set.
fn last_remove(keys: &mut HashSet<PhysicalKey>, key: &PhysicalKey) -> bool {
    keys.remove(key) && keys.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{HeldModifiers, TrackerState};
    use crate::chord::Chord;
    use crate::key::{NamedKey, PhysicalKey};
    use crate::sink::ChordEvent;

    #[test]
    fn second_ctrl_key_is_silent() {
        let mut state = TrackerState::default();
        assert_eq!(
            state.press(&PhysicalKey::ControlLeft),
            Some(ChordEvent::Pressed(Chord::Ctrl))
        );
        assert_eq!(state.press(&PhysicalKey::ControlRight), None);
        assert_eq!(state.release(&PhysicalKey::ControlLeft), None);
        assert_eq!(
            state.release(&PhysicalKey::ControlRight),
            Some(ChordEvent::Released(Chord::Ctrl))
        );
        assert!(state.is_empty());
    }

    #[test]
    fn repeated_downs_are_idempotent() {
        let mut state = TrackerState::default();
        state.press(&PhysicalKey::AltLeft);
        let after_first = state.clone();
        for _ in 0..5 {
            assert_eq!(state.press(&PhysicalKey::AltLeft), None);
        }
        assert_eq!(state, after_first);
    }

    #[test]
    fn win_repeat_emits_once() {
        let mut state = TrackerState::default();
        assert_eq!(
            state.press(&PhysicalKey::SuperLeft),
            Some(ChordEvent::Pressed(Chord::Win))
        );
        assert_eq!(state.press(&PhysicalKey::SuperLeft), None);
        assert_eq!(
            state.release(&PhysicalKey::SuperLeft),
            Some(ChordEvent::Released(Chord::Win))
        );
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut state = TrackerState::default();
        assert_eq!(state.release(&PhysicalKey::ControlLeft), None);
        state.press(&PhysicalKey::ControlLeft);
        assert_eq!(state.release(&PhysicalKey::ControlRight), None);
        assert!(state.held().ctrl);
    }

    #[test]
    fn single_key_round_trip() {
        let keys = [
            PhysicalKey::ControlLeft,
            PhysicalKey::ControlRight,
            PhysicalKey::Control,
            PhysicalKey::AltLeft,
            PhysicalKey::AltRight,
            PhysicalKey::Alt,
            PhysicalKey::SuperLeft,
            PhysicalKey::SuperRight,
            PhysicalKey::Char('x'),
            PhysicalKey::Named(NamedKey::Tab),
            PhysicalKey::Other(183),
        ];
        let mut base = TrackerState::default();
        base.press(&PhysicalKey::AltRight);
        for key in keys.iter().filter(|k| **k != PhysicalKey::AltRight) {
            let mut state = base.clone();
            state.press(key);
            state.release(key);
            assert_eq!(state, base, "{key}");
        }
    }

    #[test]
    fn other_key_needs_active_chord_and_label() {
        let mut state = TrackerState::default();
        assert_eq!(state.press(&PhysicalKey::Char('c')), None);
        state.press(&PhysicalKey::ControlLeft);
        assert_eq!(state.press(&PhysicalKey::Other(99)), None);
        assert_eq!(
            state.press(&PhysicalKey::Char('c')),
            Some(ChordEvent::SpecificKeyPressed {
                chord: Chord::Ctrl,
                label: "C".to_owned()
            })
        );
    }

    #[test]
    fn highlight_prefers_ctrl_over_win() {
        let mut state = TrackerState::default();
        state.press(&PhysicalKey::SuperLeft);
        assert_eq!(
            state.press(&PhysicalKey::Named(NamedKey::Tab)),
            Some(ChordEvent::SpecificKeyPressed {
                chord: Chord::Win,
                label: "Tab".to_owned()
            })
        );
        state.press(&PhysicalKey::ControlLeft);
        assert_eq!(state.chord(), Some(Chord::Win));
        assert_eq!(
            state.press(&PhysicalKey::Char('d')),
            Some(ChordEvent::SpecificKeyPressed {
                chord: Chord::Ctrl,
                label: "D".to_owned()
            })
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = TrackerState::default();
        state.press(&PhysicalKey::ControlLeft);
        state.press(&PhysicalKey::AltLeft);
        state.press(&PhysicalKey::SuperRight);
        assert_eq!(
            state.held(),
            HeldModifiers {
                ctrl: true,
                alt: true,
                win: true
            }
        );
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.held(), HeldModifiers::default());
    }
}
