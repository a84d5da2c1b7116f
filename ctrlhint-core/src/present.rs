use crate::chord::Chord;
use crate::config::{Appearance, ShortcutItem};
use crate::errors::Error;

/// Draws hint panels. Calls come from the worker task, one at a time.
pub trait Presenter: Send {
    /// Shows the panel for `chord`. Only one panel is visible at a time; the
    /// worker hides the previous one first.
    fn show(&mut self, chord: Chord, items: &[ShortcutItem], appearance: &Appearance) -> Error;

    fn hide(&mut self, chord: Chord) -> Error;

    /// Marks the card whose key equals `label` on the visible panel.
    fn highlight(&mut self, chord: Chord, label: &str) -> Error;
}
