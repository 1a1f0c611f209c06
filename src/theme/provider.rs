//! Hands the theme to a subtree of the UI
//!
//! Components receive a [`Context`] from their parent and pass it on to their
//! children. Only contexts created by a resolved [`ThemeProvider`] carry a
//! theme; everywhere else [`Context::use_theme`] fails.

use super::models::Theme;
use super::store::{Host, Subscription, ThemeError, ThemeStore};

/// Output of a provider render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Shown until the preference is resolved, so the default theme never flashes.
    Placeholder,
    Themed(T),
}

impl<T> Rendered<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Rendered::Placeholder)
    }

    pub fn into_themed(self) -> Option<T> {
        match self {
            Rendered::Placeholder => None,
            Rendered::Themed(content) => Some(content),
        }
    }
}

/// What a consumer gets back from [`Context::use_theme`].
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    store: ThemeStore,
}

impl ThemeHandle {
    pub fn theme(&self) -> Theme {
        self.store.theme()
    }

    pub fn toggle_theme(&self) {
        self.store.apply(self.store.theme().toggled());
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.apply(theme);
    }

    pub fn subscribe(&self, listener: impl Fn(Theme) + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.store.unsubscribe(subscription)
    }
}

/// Render context passed explicitly from parent to children.
#[derive(Debug, Clone, Default)]
pub struct Context {
    theme: Option<ThemeHandle>,
}

impl Context {
    /// Context at the top of the tree, outside any provider.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the theme capability of the enclosing provider.
    pub fn use_theme(&self) -> Result<ThemeHandle, ThemeError> {
        self.theme.clone().ok_or(ThemeError::MissingProvider)
    }
}

/// Owns the store for a subtree and gates rendering on readiness.
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    store: ThemeStore,
}

impl ThemeProvider {
    pub fn new(store: ThemeStore) -> Self {
        Self { store }
    }

    /// Builds the store with the caller's default; resolution happens later.
    pub fn mount(default_theme: Theme, host: Host) -> Self {
        Self::new(ThemeStore::new(default_theme, host))
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// Runs `children` with a theme-carrying context once the store is ready.
    pub fn render<T>(&self, parent: &Context, children: impl FnOnce(&Context) -> T) -> Rendered<T> {
        if !self.store.is_ready() {
            return Rendered::Placeholder;
        }
        let mut context = parent.clone();
        context.theme = Some(ThemeHandle {
            store: self.store.clone(),
        });
        Rendered::Themed(children(&context))
    }
}
