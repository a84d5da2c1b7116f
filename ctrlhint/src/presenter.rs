use std::io::Write;

use ctrlhint_core::chord::Chord;
use ctrlhint_core::config::{Appearance, ShortcutItem};
use ctrlhint_core::errors::Error;
use ctrlhint_core::present::Presenter;

/// Width in pixels the cards of one row have to share.
const PANEL_WIDTH: u32 = 720;
/// Rough pixel width of one terminal cell.
const CELL_WIDTH: u32 = 8;
const RESET: &str = "\x1b[0m";

/// Prints hint panels as rows of colored cards.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    shown: Vec<ShortcutItem>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show(&mut self, chord: Chord, items: &[ShortcutItem], appearance: &Appearance) -> Error {
        let per_row = (PANEL_WIDTH / appearance.card_size.max(1)).clamp(1, 12) as usize;
        let min_width = (appearance.card_size / CELL_WIDTH) as usize;
        let width = items
            .iter()
            .map(|item| card_text(item).chars().count())
            .max()
            .unwrap_or_default()
            .max(min_width);
        let color = card_color(appearance);

        writeln!(self.out, "── {chord} ──")?;
        for row in items.chunks(per_row) {
            let cards: Vec<String> = row
                .iter()
                .map(|item| format!("{color}{:<width$}{RESET}", card_text(item)))
                .collect();
            writeln!(self.out, "{}", cards.join(" "))?;
        }
        self.out.flush()?;
        self.shown = items.to_vec();
        Ok(())
    }

    fn hide(&mut self, chord: Chord) -> Error {
        self.shown.clear();
        writeln!(self.out, "── {chord} released ──")?;
        self.out.flush()?;
        Ok(())
    }

    fn highlight(&mut self, chord: Chord, label: &str) -> Error {
        if let Some(item) = self.shown.iter().find(|item| item.key == label) {
            writeln!(self.out, "» {chord}+{}", card_text(item))?;
            self.out.flush()?;
        }
        Ok(())
    }
}

fn card_text(item: &ShortcutItem) -> String {
    format!(" {}  {} ", item.key, item.action)
}

fn card_color(appearance: &Appearance) -> String {
    let mut color = String::new();
    if let Some((r, g, b)) = rgb(&appearance.key_color) {
        color.push_str(&format!("\x1b[1;38;2;{r};{g};{b}m"));
    }
    if let Some((r, g, b)) = rgb(&appearance.card_bg_color_start) {
        color.push_str(&format!("\x1b[48;2;{r};{g};{b}m"));
    }
    color
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').filter(|hex| hex.len() == 6)?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::{TerminalPresenter, rgb};
    use ctrlhint_core::chord::Chord;
    use ctrlhint_core::config::{Appearance, ShortcutItem};
    use ctrlhint_core::present::Presenter;

    fn printed(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn large_cards_wrap_sooner() {
        let items: Vec<ShortcutItem> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|key| ShortcutItem::new(*key, "x"))
            .collect();
        let appearance = Appearance {
            card_size: 240,
            ..Appearance::default()
        };
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.show(Chord::Ctrl, &items, &appearance).unwrap();

        let out = printed(presenter);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "── ctrl ──");
        // 720 / 240 cards per row
        assert_eq!(lines.len(), 1 + 3);
    }

    #[test]
    fn highlight_only_known_keys() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter
            .show(
                Chord::Ctrl,
                &[ShortcutItem::new("C", "Copy")],
                &Appearance::default(),
            )
            .unwrap();
        presenter.highlight(Chord::Ctrl, "Q").unwrap();
        presenter.highlight(Chord::Ctrl, "C").unwrap();
        presenter.hide(Chord::Ctrl).unwrap();
        presenter.highlight(Chord::Ctrl, "C").unwrap();

        let out = printed(presenter);
        assert_eq!(out.matches('»').count(), 1);
        assert!(out.contains("» ctrl+ C  Copy "));
        assert!(out.ends_with("── ctrl released ──\n"));
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(rgb("#1a1a1e"), Some((0x1a, 0x1a, 0x1e)));
        assert_eq!(rgb("#fff"), None);
        assert_eq!(rgb("1a1a1e"), None);
    }
}
