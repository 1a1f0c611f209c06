//! OS-level colour scheme preference

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

/// Answers "does the user prefer a dark colour scheme?".
pub trait ColorSchemeQuery {
    /// `None` when the host cannot answer the query.
    fn prefers_dark(&self) -> Option<bool>;
}

impl<Q: ColorSchemeQuery + ?Sized> ColorSchemeQuery for Box<Q> {
    fn prefers_dark(&self) -> Option<bool> {
        (**self).prefers_dark()
    }
}

/// Queries the operating system's appearance setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColorScheme;

impl ColorSchemeQuery for SystemColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        from_os_mode(detect_os_theme())
    }
}

/// `Mode::Default` is what the OS reports when it has no appearance setting
/// (headless hosts, desktops without a colour scheme portal).
pub(crate) fn from_os_mode(mode: OsThemeMode) -> Option<bool> {
    match mode {
        OsThemeMode::Dark => Some(true),
        OsThemeMode::Light => Some(false),
        OsThemeMode::Default => None,
    }
}

/// A preference decided up front, or no preference at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColorScheme(Option<bool>);

impl FixedColorScheme {
    pub fn dark() -> Self {
        Self(Some(true))
    }

    pub fn light() -> Self {
        Self(Some(false))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl ColorSchemeQuery for FixedColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_color_scheme() {
        assert_eq!(FixedColorScheme::dark().prefers_dark(), Some(true));
        assert_eq!(FixedColorScheme::light().prefers_dark(), Some(false));
        assert_eq!(FixedColorScheme::unavailable().prefers_dark(), None);
    }

    #[test]
    fn test_os_mode_mapping() {
        assert_eq!(from_os_mode(OsThemeMode::Dark), Some(true));
        assert_eq!(from_os_mode(OsThemeMode::Light), Some(false));
        assert_eq!(from_os_mode(OsThemeMode::Default), None);
    }
}
