use crate::chord::Chord;
use crate::config::HintBoard;
use crate::errors::{self, HintError};
use crate::present::Presenter;
use crate::sink::ChordEvent;

/// Which panel is on screen, and how chord events change that.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HintDisplay {
    visible: Option<Chord>,
}

impl HintDisplay {
    #[must_use]
    pub fn visible(&self) -> Option<Chord> {
        self.visible
    }

    pub fn apply(&mut self, event: &ChordEvent, board: &HintBoard, presenter: &mut dyn Presenter) {
        match event {
            ChordEvent::Pressed(chord) => {
                self.hide(presenter);
                let items = board.panel(*chord);
                if items.is_empty() {
                    tracing::debug!("No shortcuts configured for {}", chord);
                    return;
                }
                errors::r#return!(presenter.show(*chord, items, &board.appearance));
                self.visible = Some(*chord);
            }
            ChordEvent::Released(chord) => {
                if self.visible.is_some_and(|shown| chord.releases(shown)) {
                    self.hide(presenter);
                }
            }
            ChordEvent::SpecificKeyPressed { chord, label } => {
                if self.visible == Some(*chord) {
                    errors::log!(presenter.highlight(*chord, label));
                }
            }
        }
    }

    pub fn hide(&mut self, presenter: &mut dyn Presenter) {
        if let Some(chord) = self.visible.take() {
            errors::log!(presenter.hide(chord));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HintDisplay;
    use crate::chord::Chord;
    use crate::config::{Appearance, Config, HintBoard, ShortcutItem};
    use crate::sink::ChordEvent;
    use crate::tests::test::RecordingPresenter;

    struct Board;

    impl Config for Board {
        fn shortcuts(&self, chord: Chord) -> Vec<ShortcutItem> {
            match chord {
                Chord::Ctrl => vec![ShortcutItem::new("C", "Copy")],
                Chord::Alt => vec![ShortcutItem::new("Tab", "Switch window")],
                Chord::CtrlAlt => vec![ShortcutItem::new("Del", "Task manager")],
                Chord::Win => vec![],
            }
        }

        fn appearance(&self) -> Appearance {
            Appearance::default()
        }
    }

    fn board() -> HintBoard {
        Board.hint_board()
    }

    #[test]
    fn releasing_one_half_of_ctrl_alt_hides_it() {
        let board = board();
        let mut presenter = RecordingPresenter::default();
        let mut display = HintDisplay::default();

        display.apply(&ChordEvent::Pressed(Chord::Ctrl), &board, &mut presenter);
        display.apply(&ChordEvent::Pressed(Chord::CtrlAlt), &board, &mut presenter);
        display.apply(&ChordEvent::Released(Chord::CtrlAlt), &board, &mut presenter);
        assert_eq!(display.visible(), None);

        // Alt is still down, but the panel only comes back on a new press.
        display.apply(&ChordEvent::Released(Chord::Alt), &board, &mut presenter);
        assert_eq!(
            presenter.calls(),
            ["show ctrl C", "hide ctrl", "show ctrl_alt Del", "hide ctrl_alt"]
        );
    }

    #[test]
    fn unrelated_release_keeps_panel() {
        let board = board();
        let mut presenter = RecordingPresenter::default();
        let mut display = HintDisplay::default();

        display.apply(&ChordEvent::Pressed(Chord::Alt), &board, &mut presenter);
        display.apply(&ChordEvent::Released(Chord::Ctrl), &board, &mut presenter);
        assert_eq!(display.visible(), Some(Chord::Alt));
    }

    #[test]
    fn empty_panel_is_not_shown() {
        let board = board();
        let mut presenter = RecordingPresenter::default();
        let mut display = HintDisplay::default();

        display.apply(&ChordEvent::Pressed(Chord::Win), &board, &mut presenter);
        assert_eq!(display.visible(), None);
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn highlight_only_on_visible_panel() {
        let board = board();
        let mut presenter = RecordingPresenter::default();
        let mut display = HintDisplay::default();
        let highlight = |chord| ChordEvent::SpecificKeyPressed {
            chord,
            label: "C".to_owned(),
        };

        display.apply(&highlight(Chord::Ctrl), &board, &mut presenter);
        display.apply(&ChordEvent::Pressed(Chord::Ctrl), &board, &mut presenter);
        display.apply(&highlight(Chord::Alt), &board, &mut presenter);
        display.apply(&highlight(Chord::Ctrl), &board, &mut presenter);
        assert_eq!(presenter.calls(), ["show ctrl C", "highlight ctrl C"]);
    }
}
