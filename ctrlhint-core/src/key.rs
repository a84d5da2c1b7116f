use std::fmt::{self, Display};

/// One physical key as reported by a global key hook.
///
/// Hooks that cannot tell left from right report `Control` or `Alt`.
/// Printable keys arrive as the character the hook produced, which may be a
/// control code when Ctrl is held at the OS level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalKey {
    ControlLeft,
    ControlRight,
    Control,
    AltLeft,
    AltRight,
    Alt,
    SuperLeft,
    SuperRight,
    Char(char),
    Named(NamedKey),
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Tab,
    Enter,
    Space,
    Backspace,
    Delete,
    Escape,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
}

impl NamedKey {
    /// The label shown on a hint card for this key.
    pub fn label(self) -> Option<String> {
        let label = match self {
            NamedKey::Tab => "Tab",
            NamedKey::Enter => "Enter",
            NamedKey::Space => "Space",
            NamedKey::Backspace => "Backspace",
            NamedKey::Delete => "Del",
            NamedKey::Escape => "Esc",
            NamedKey::F(n @ 1..=12) => return Some(format!("F{n}")),
            NamedKey::F(_) => return None,
            NamedKey::Up => "↑",
            NamedKey::Down => "↓",
            NamedKey::Left => "←",
            NamedKey::Right => "→",
            NamedKey::Home => "Home",
            NamedKey::End => "End",
            NamedKey::PageUp => "PgUp",
            NamedKey::PageDown => "PgDn",
            NamedKey::Insert => "Ins",
        };
        Some(label.to_owned())
    }
}

impl PhysicalKey {
    /// Resolves the label used for key highlighting, if the key has one.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match *self {
            PhysicalKey::Char(c) => char_label(c),
            PhysicalKey::Named(named) => named.label(),
            _ => None,
        }
    }
}

fn char_label(c: char) -> Option<String> {
    match c as u32 {
        // Ctrl+A..Ctrl+Z as delivered by the terminal layer.
        code @ 1..=26 => char::from_u32('A' as u32 + code - 1).map(String::from),
        _ if c == ' ' => Some("Space".to_owned()),
        _ if c.is_control() || c.is_whitespace() => None,
        _ => Some(c.to_uppercase().collect()),
    }
}

impl Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalKey::ControlLeft => write!(f, "left-ctrl"),
            PhysicalKey::ControlRight => write!(f, "right-ctrl"),
            PhysicalKey::Control => write!(f, "ctrl"),
            PhysicalKey::AltLeft => write!(f, "left-alt"),
            PhysicalKey::AltRight => write!(f, "right-alt"),
            PhysicalKey::Alt => write!(f, "alt"),
            PhysicalKey::SuperLeft => write!(f, "super"),
            PhysicalKey::SuperRight => write!(f, "right-super"),
            PhysicalKey::Char(c) => write!(f, "char({c:?})"),
            PhysicalKey::Named(named) => write!(f, "{named:?}"),
            PhysicalKey::Other(code) => write!(f, "code({code})"),
        }
    }
}
