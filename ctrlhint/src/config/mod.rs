pub mod defaults;
pub mod preset;

use crate::errors::{Error, HintError, Result};

use ctrlhint_core::chord::Chord;
use ctrlhint_core::config::{Appearance, ShortcutItem};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use xdg::BaseDirectories;

const CONFIG_FILE_NAME: &str = "config.ron";

/// Shortcut cards per chord. Lists missing from the file keep their
/// defaults.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Shortcuts {
    pub ctrl: Vec<ShortcutItem>,
    pub alt: Vec<ShortcutItem>,
    pub ctrl_alt: Vec<ShortcutItem>,
    pub win: Vec<ShortcutItem>,
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            ctrl: defaults::ctrl(),
            alt: defaults::alt(),
            ctrl_alt: defaults::ctrl_alt(),
            win: defaults::win(),
        }
    }
}

impl Shortcuts {
    #[must_use]
    pub fn get(&self, chord: Chord) -> &[ShortcutItem] {
        match chord {
            Chord::Ctrl => &self.ctrl,
            Chord::Alt => &self.alt,
            Chord::CtrlAlt => &self.ctrl_alt,
            Chord::Win => &self.win,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub shortcuts: Shortcuts,
    pub appearance: Appearance,
}

impl ctrlhint_core::config::Config for Config {
    fn shortcuts(&self, chord: Chord) -> Vec<ShortcutItem> {
        self.shortcuts.get(chord).to_vec()
    }

    fn appearance(&self) -> Appearance {
        self.appearance.clone()
    }
}

impl TryFrom<String> for Config {
    type Error = HintError;
    /// # Errors
    ///
    /// Errors when the contents are not valid RON for a config, or when the
    /// parsed config fails validation.
    fn try_from(contents: String) -> Result<Self> {
        let config: Config = ron::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// # Errors
    ///
    /// Names the first offending field.
    pub fn validate(&self) -> Error {
        for chord in Chord::ALL {
            for (index, item) in self.shortcuts.get(chord).iter().enumerate() {
                if item.key.trim().is_empty() || item.action.trim().is_empty() {
                    return Err(HintError::InvalidConfig(format!(
                        "shortcut {} of `{}` needs both a key and an action",
                        index + 1,
                        chord
                    )));
                }
            }
        }
        validate_appearance(&self.appearance)
    }

    /// # Errors
    ///
    /// Errors if RON serialization fails.
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::new())?)
    }
}

fn validate_appearance(appearance: &Appearance) -> Error {
    let sizes = [
        ("card_size", appearance.card_size),
        ("key_font_size", appearance.key_font_size),
        ("action_font_size", appearance.action_font_size),
    ];
    if let Some((name, _)) = sizes.iter().find(|(_, size)| *size == 0) {
        return Err(HintError::InvalidConfig(format!("`{name}` must be positive")));
    }
    if appearance.background_opacity > 100 {
        return Err(HintError::InvalidConfig(
            "`background_opacity` must be between 0 and 100".to_owned(),
        ));
    }
    let colors = [
        ("key_color", &appearance.key_color),
        ("action_color", &appearance.action_color),
        ("card_bg_color_start", &appearance.card_bg_color_start),
        ("card_bg_color_end", &appearance.card_bg_color_end),
    ];
    if let Some((name, value)) = colors.iter().find(|(_, value)| !is_hex_color(value)) {
        return Err(HintError::InvalidConfig(format!(
            "`{name}` must look like #rrggbb, got `{value}`"
        )));
    }
    Ok(())
}

pub(crate) fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Location of the config file, creating the config directory if needed.
///
/// # Errors
///
/// Errors when the XDG directories cannot be resolved or created.
pub fn config_file() -> Result<PathBuf> {
    let path = BaseDirectories::with_prefix(ctrlhint_core::CTRLHINT_DIR_NAME)?;
    Ok(path.place_config_file(CONFIG_FILE_NAME)?)
}

/// # Errors
///
/// Errors when the config file exists but cannot be read, parsed or
/// validated. A missing file yields the defaults.
pub fn load() -> Result<Config> {
    load_from(&config_file()?)
}

/// # Errors
///
/// See [`load`].
pub fn load_from(file_name: &Path) -> Result<Config> {
    if !file_name.exists() {
        tracing::info!(
            "No config at {}, using defaults",
            file_name.display()
        );
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(file_name)?;
    let config = Config::try_from(contents)?;
    tracing::info!("Loaded config from {}", file_name.display());
    Ok(config)
}

/// # Errors
///
/// Errors when the config is invalid or cannot be written.
pub fn save(config: &Config) -> Error {
    save_to(&config_file()?, config)
}

/// # Errors
///
/// See [`save`].
pub fn save_to(file_name: &Path, config: &Config) -> Error {
    config.validate()?;
    fs::write(file_name, config.to_ron()?)?;
    tracing::info!("Saved config to {}", file_name.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Config, is_hex_color};
    use crate::errors::HintError;
    use ctrlhint_core::chord::Chord;
    use ctrlhint_core::config::ShortcutItem;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let contents = r##"(
            shortcuts: (
                win: [(key: "E", action: "Files")],
            ),
            appearance: (key_color: "#ffffff"),
        )"##;
        let config = Config::try_from(contents.to_owned()).unwrap();

        assert_eq!(
            config.shortcuts.get(Chord::Win),
            [ShortcutItem::new("E", "Files")]
        );
        assert_eq!(config.shortcuts.ctrl, Config::default().shortcuts.ctrl);
        assert_eq!(config.appearance.key_color, "#ffffff");
        assert_eq!(config.appearance.card_size, 90);
    }

    #[test]
    fn empty_action_is_rejected() {
        let contents = r#"(shortcuts: (alt: [(key: "Tab", action: " ")]))"#;
        let err = Config::try_from(contents.to_owned()).unwrap_err();
        assert!(
            matches!(&err, HintError::InvalidConfig(msg) if msg.contains("`alt`")),
            "{err}"
        );
    }

    #[test]
    fn bad_appearance_is_rejected() {
        let mut config = Config::default();
        config.appearance.background_opacity = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.appearance.card_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.appearance.action_color = "red".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn broken_ron_is_a_parse_error() {
        let err = Config::try_from("(shortcuts: [".to_owned()).unwrap_err();
        assert!(matches!(err, HintError::RonError(_)));
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#1a1A1e"));
        assert!(!is_hex_color("1a1a1e"));
        assert!(!is_hex_color("#1a1a1"));
        assert!(!is_hex_color("#1a1a1g"));
    }
}
