//! Navigation bar state
//!
//! The bar tracks the page scroll offset, the mobile menu and the active
//! section. It is the main consumer of the theme: it picks its toggle icon
//! from the current theme and flips the theme when the button is pressed.

use log::trace;

use crate::theme::{Context, Theme, ThemeError};

/// Page offset in pixels past which the bar switches to its compact style.
pub const SCROLL_THRESHOLD: u32 = 20;

/// Icon shown on the theme toggle button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeIcon {
    /// Offered while dark, switches to light.
    Sun,
    /// Offered while light, switches to dark.
    Moon,
}

impl ThemeIcon {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            ThemeIcon::Sun
        } else {
            ThemeIcon::Moon
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ThemeIcon::Sun => "\u{2600}",
            ThemeIcon::Moon => "\u{263E}",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Snapshot of the bar for a single render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavView {
    pub links: Vec<NavLink>,
    pub active: Option<String>,
    pub scrolled: bool,
    pub menu_open: bool,
    pub icon: ThemeIcon,
    pub toggle_label: String,
}

#[derive(Clone, Debug, Default)]
pub struct NavBar {
    links: Vec<NavLink>,
    active: Option<String>,
    scrolled: bool,
    menu_open: bool,
}

impl NavBar {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self {
            links,
            ..Default::default()
        }
    }

    /// Sections of a typical single-page portfolio.
    pub fn portfolio() -> Self {
        Self::new(vec![
            NavLink::new("About", "#about"),
            NavLink::new("Experience", "#experience"),
            NavLink::new("Projects", "#projects"),
            NavLink::new("Contact", "#contact"),
        ])
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Records the page offset. Returns `true` when the compact style flips.
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        let scrolled = offset > SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        if changed {
            trace!("Navigation scrolled: {scrolled}");
        }
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Marks a link active and closes the mobile menu. Unknown targets are ignored.
    pub fn select(&mut self, href: &str) -> bool {
        if !self.links.iter().any(|link| link.href == href) {
            return false;
        }
        self.active = Some(href.to_string());
        self.close_menu();
        true
    }

    pub fn render(&self, ctx: &Context) -> Result<NavView, ThemeError> {
        let theme = ctx.use_theme()?.theme();
        Ok(NavView {
            links: self.links.clone(),
            active: self.active.clone(),
            scrolled: self.scrolled,
            menu_open: self.menu_open,
            icon: ThemeIcon::for_theme(theme),
            toggle_label: format!("Switch to {} theme", theme.toggled()),
        })
    }

    /// Handler for the theme button. Returns the new theme.
    pub fn on_theme_toggle(&self, ctx: &Context) -> Result<Theme, ThemeError> {
        let handle = ctx.use_theme()?;
        handle.toggle_theme();
        Ok(handle.theme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FixedColorScheme, Host, HtmlDocument, MemoryStorage, ThemeProvider};
    use rstest::rstest;

    fn resolved_provider(scheme: FixedColorScheme) -> ThemeProvider {
        let provider = ThemeProvider::mount(
            Theme::Dark,
            Host::new(MemoryStorage::new(), scheme, HtmlDocument::new()),
        );
        provider.store().resolve();
        provider
    }

    #[rstest]
    #[case(0, false)]
    #[case(20, false)]
    #[case(21, true)]
    #[case(800, true)]
    fn test_scroll_threshold(#[case] offset: u32, #[case] scrolled: bool) {
        let mut nav = NavBar::portfolio();
        nav.on_scroll(offset);
        assert_eq!(nav.is_scrolled(), scrolled);
    }

    #[rstest]
    #[case(Theme::Dark, ThemeIcon::Sun)]
    #[case(Theme::Light, ThemeIcon::Moon)]
    fn test_icon_for_theme(#[case] theme: Theme, #[case] icon: ThemeIcon) {
        assert_eq!(ThemeIcon::for_theme(theme), icon);
    }

    #[test]
    fn test_on_scroll_reports_changes_only() {
        let mut nav = NavBar::portfolio();
        assert!(nav.on_scroll(100));
        assert!(!nav.on_scroll(200));
        assert!(nav.on_scroll(0));
    }

    #[test]
    fn test_select_closes_menu() {
        let mut nav = NavBar::portfolio();
        nav.toggle_menu();
        assert!(nav.is_menu_open());

        assert!(!nav.select("#missing"));
        assert!(nav.is_menu_open());

        assert!(nav.select("#projects"));
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_render_outside_provider_fails() {
        let nav = NavBar::portfolio();
        assert_eq!(
            nav.render(&Context::root()),
            Err(ThemeError::MissingProvider)
        );
        assert_eq!(
            nav.on_theme_toggle(&Context::root()),
            Err(ThemeError::MissingProvider)
        );
    }

    #[test]
    fn test_icon_follows_theme() {
        let provider = resolved_provider(FixedColorScheme::dark());
        let nav = NavBar::portfolio();

        let view = provider
            .render(&Context::root(), |ctx| nav.render(ctx))
            .into_themed()
            .unwrap()
            .unwrap();
        assert_eq!(view.icon, ThemeIcon::Sun);
        assert_eq!(view.toggle_label, "Switch to light theme");

        let toggled = provider
            .render(&Context::root(), |ctx| nav.on_theme_toggle(ctx))
            .into_themed()
            .unwrap();
        assert_eq!(toggled, Ok(Theme::Light));

        let view = provider
            .render(&Context::root(), |ctx| nav.render(ctx))
            .into_themed()
            .unwrap()
            .unwrap();
        assert_eq!(view.icon, ThemeIcon::Moon);
    }
}
