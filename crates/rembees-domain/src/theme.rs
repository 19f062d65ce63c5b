//! Visual theme selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Matrix,
    Purple,
    Neon,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown theme `{0}` (expected one of dark, light, matrix, purple, neon)")]
pub struct ParseThemeError(pub String);

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Dark,
        Theme::Light,
        Theme::Matrix,
        Theme::Purple,
        Theme::Neon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Matrix => "matrix",
            Theme::Purple => "purple",
            Theme::Neon => "neon",
        }
    }

    /// Classes applied to the document root while this theme is active.
    pub fn root_classes(self) -> &'static [&'static str] {
        match self {
            Theme::Dark => &["dark"],
            Theme::Light => &["light"],
            Theme::Matrix => &["dark", "theme-matrix"],
            Theme::Purple => &["dark", "theme-purple"],
            Theme::Neon => &["dark", "theme-neon"],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == normalized)
            .ok_or_else(|| ParseThemeError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_theme_name() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
        }
        assert_eq!(" Neon ".parse::<Theme>(), Ok(Theme::Neon));
    }

    #[test]
    fn rejects_names_outside_the_set() {
        let err = "solarized".parse::<Theme>().unwrap_err();
        assert_eq!(err, ParseThemeError("solarized".into()));
    }

    #[test]
    fn default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn dark_variants_keep_the_dark_class() {
        assert_eq!(Theme::Light.root_classes(), &["light"]);
        for theme in [Theme::Matrix, Theme::Purple, Theme::Neon] {
            assert_eq!(theme.root_classes()[0], "dark");
        }
    }
}
