use std::fmt::Display;

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

type Content = String;

/// A command in its wire form: one line of RON carrying the struct name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedCommand(pub Content);

impl NormalizedCommand {
    pub fn from_command<T: Serialize>(command: &T) -> Self {
        let config = PrettyConfig::new().struct_names(true);
        match ron::ser::to_string_pretty(command, config) {
            Ok(serialized) => Self(serialized),
            Err(err) => {
                tracing::error!("Unable to serialize command: {}", err);
                Self(Content::new())
            }
        }
    }

    pub fn to_command<'a, T: Deserialize<'a>>(&'a self) -> Option<T> {
        let content = self.0.trim();
        if !is_named(content) {
            return None;
        }
        ron::from_str(content).ok()
    }
}

// A bare `()` would match any unit command.
fn is_named(content: &str) -> bool {
    content.starts_with(|c: char| c.is_ascii_alphabetic())
}

impl TryFrom<String> for NormalizedCommand {
    type Error = ();

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if !is_named(trimmed) {
            return Err(());
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl Display for NormalizedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
