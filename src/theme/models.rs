//! Theme data models

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key under which the active theme is persisted in durable storage.
pub const STORAGE_KEY: &str = "portfolio-theme";

/// Name of the `<meta>` element that controls the mobile browser chrome colour.
pub const THEME_COLOR_META: &str = "theme-color";

/// Visual mode of the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Error type for theme parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: {0:?} (expected \"dark\" or \"light\")")]
pub struct ParseThemeError(pub String);

impl Theme {
    /// Wire form used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Presentation class placed on the document root.
    pub fn class_name(&self) -> &'static str {
        self.as_str()
    }

    /// Fixed `theme-color` value for this theme.
    pub fn theme_color(&self) -> &'static str {
        match self {
            Theme::Dark => "#0f172a",
            Theme::Light => "#ffffff",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    /// Maps the answer of a "prefers dark colour scheme" query to a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Theme {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
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

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}
