//! Theme persistence and hydration-safe rendering for a portfolio site.
//!
//! The [`theme`] module is the core. [`nav`] and [`layout`] are its consumers
//! on the page; [`config`] and [`logger`] back the command line tool.

pub mod config;
pub mod layout;
pub mod logger;
pub mod nav;
pub mod theme;

use color_eyre::eyre::{eyre, Result};

use crate::config::SiteConfig;
use crate::layout::RootLayout;
use crate::nav::{NavBar, NavView};
use crate::theme::{
    ColorSchemeQuery, Context, FileStorage, FixedColorScheme, Host, HtmlDocument, SystemColorScheme,
    Theme, ThemeProvider,
};

/// The mounted page: root layout, theme provider, document root and navigation bar.
pub struct Site {
    pub layout: RootLayout,
    pub provider: ThemeProvider,
    pub document: HtmlDocument,
    pub nav: NavBar,
}

impl Site {
    /// Mounts the provider with the layout's default theme. Nothing is
    /// resolved yet.
    pub fn mount(
        config: &SiteConfig,
        storage: FileStorage,
        color_scheme: Box<dyn ColorSchemeQuery>,
    ) -> Self {
        let layout = RootLayout::from_config(config);
        let document = HtmlDocument::new();
        let provider = ThemeProvider::mount(
            layout.default_theme,
            Host::new(storage, color_scheme, document.clone()),
        );
        Self {
            layout,
            provider,
            document,
            nav: NavBar::portfolio(),
        }
    }

    /// Runs `f` inside the provider's subtree, failing if it is not ready.
    pub fn with_theme<T>(&self, f: impl FnOnce(&Context) -> T) -> Result<T> {
        self.provider
            .render(&Context::root(), f)
            .into_themed()
            .ok_or_else(|| eyre!("Theme has not been resolved yet"))
    }

    pub fn nav_view(&self) -> Result<NavView> {
        Ok(self.with_theme(|ctx| self.nav.render(ctx))??)
    }

    pub fn theme(&self) -> Theme {
        self.provider.store().theme()
    }
}

/// Picks the colour scheme source from the command line override and config.
pub fn color_scheme_for(config: &SiteConfig, system: Option<&str>) -> Box<dyn ColorSchemeQuery> {
    match system {
        Some("dark") => Box::new(FixedColorScheme::dark()),
        Some("light") => Box::new(FixedColorScheme::light()),
        Some(_) => Box::new(FixedColorScheme::unavailable()),
        None if config.follow_system => Box::new(SystemColorScheme),
        None => Box::new(FixedColorScheme::unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::ThemeIcon;
    use crate::theme::{ThemeStorage, STORAGE_KEY};
    use tempfile::tempdir;

    #[test]
    fn test_site_is_placeholder_until_resolved() {
        let dir = tempdir().unwrap();
        let site = Site::mount(
            &SiteConfig::default(),
            FileStorage::new(dir.path().join("storage.json")),
            Box::new(FixedColorScheme::light()),
        );
        assert!(site.nav_view().is_err());

        site.provider.store().resolve();
        let view = site.nav_view().unwrap();
        assert_eq!(view.icon, ThemeIcon::Moon);
        assert_eq!(site.theme(), Theme::Light);
    }

    #[test]
    fn test_site_persists_to_file_storage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let site = Site::mount(
            &SiteConfig::default(),
            FileStorage::new(&path),
            Box::new(FixedColorScheme::unavailable()),
        );
        site.provider.store().resolve();
        site.with_theme(|ctx| ctx.use_theme().map(|h| h.toggle_theme()))
            .unwrap()
            .unwrap();

        assert_eq!(
            FileStorage::new(&path).get_item(STORAGE_KEY),
            Some("light".to_string())
        );
        assert!(site.document.has_class("light"));
    }

    #[test]
    fn test_color_scheme_for() {
        let config = SiteConfig::default();
        assert_eq!(color_scheme_for(&config, Some("dark")).prefers_dark(), Some(true));
        assert_eq!(color_scheme_for(&config, Some("light")).prefers_dark(), Some(false));
        assert_eq!(color_scheme_for(&config, Some("none")).prefers_dark(), None);

        let config = SiteConfig {
            follow_system: false,
            ..SiteConfig::default()
        };
        assert_eq!(color_scheme_for(&config, None).prefers_dark(), None);
    }
}
