//! The theme store: single source of truth for the active theme
//!
//! The store is built in two phases. [`ThemeStore::new`] only records the
//! caller's default. [`ThemeStore::resolve`] runs once the host can answer
//! storage and colour-scheme queries, adopts the effective theme and marks
//! the store ready. From then on every change is mirrored to the document
//! root, the `theme-color` meta and durable storage.

use enum_iterator::all;
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::document::Document;
use super::models::{Theme, STORAGE_KEY, THEME_COLOR_META};
use super::preference::ColorSchemeQuery;
use super::storage::ThemeStorage;

/// Error type for contract violations by theme consumers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("Theme consumed outside of a ThemeProvider")]
    MissingProvider,
    #[error("Theme changed before the stored preference was resolved")]
    NotResolved,
}

/// Lifecycle of a mounted store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Holding the default; consumers see a placeholder.
    Unresolved,
    /// Preference resolved; terminal until the store is dropped.
    Resolved,
}

/// The host capabilities a store needs once it resolves.
pub struct Host {
    storage: Box<dyn ThemeStorage>,
    color_scheme: Box<dyn ColorSchemeQuery>,
    document: Box<dyn Document>,
}

impl Host {
    pub fn new(
        storage: impl ThemeStorage + 'static,
        color_scheme: impl ColorSchemeQuery + 'static,
        document: impl Document + 'static,
    ) -> Self {
        Self {
            storage: Box::new(storage),
            color_scheme: Box::new(color_scheme),
            document: Box::new(document),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

type Listener = Rc<dyn Fn(Theme)>;

/// Token returned by [`ThemeStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

struct StoreState {
    theme: Theme,
    phase: Phase,
    host: Host,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl StoreState {
    /// Stored preference first, then the OS preference, then whatever the
    /// store was initialized with.
    fn preferred_theme(&self) -> Theme {
        match self.host.storage.get_item(STORAGE_KEY) {
            Some(stored) => match stored.parse::<Theme>() {
                Ok(theme) => {
                    debug!("Using stored theme preference: {theme}");
                    return theme;
                }
                Err(e) => warn!("Ignoring stored theme preference: {e}"),
            },
            None => debug!("No stored theme preference"),
        }

        match self.host.color_scheme.prefers_dark() {
            Some(prefers_dark) => {
                let theme = Theme::from_prefers_dark(prefers_dark);
                debug!("Using OS colour scheme preference: {theme}");
                theme
            }
            None => {
                debug!(
                    "OS colour scheme unavailable, keeping default theme: {}",
                    self.theme
                );
                self.theme
            }
        }
    }

    fn sync_host(&mut self) {
        let theme = self.theme;
        let document = &mut self.host.document;
        for class in all::<Theme>() {
            document.remove_class(class.class_name());
        }
        document.add_class(theme.class_name());
        document.set_meta(THEME_COLOR_META, theme.theme_color());

        if let Err(e) = self.host.storage.set_item(STORAGE_KEY, theme.as_str()) {
            warn!("Failed to persist theme preference: {e}");
        }
    }

    fn listeners(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

/// Shared handle to the theme state. Clones refer to the same store.
#[derive(Clone)]
pub struct ThemeStore {
    state: Rc<RefCell<StoreState>>,
}

impl ThemeStore {
    /// Creates an unresolved store holding `default_theme`.
    ///
    /// Neither storage nor the document is touched until [`resolve`](Self::resolve).
    pub fn new(default_theme: Theme, host: Host) -> Self {
        debug!("Theme store initialized with default theme: {default_theme}");
        Self {
            state: Rc::new(RefCell::new(StoreState {
                theme: default_theme,
                phase: Phase::Unresolved,
                host,
                listeners: Vec::new(),
                next_subscription: 0,
            })),
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Resolved
    }

    /// Adopts the effective theme and marks the store ready.
    ///
    /// Only the first call does any work; later calls return the current theme.
    pub fn resolve(&self) -> Theme {
        let (theme, listeners) = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Resolved {
                debug!("Theme already resolved: {}", state.theme);
                return state.theme;
            }
            let preferred = state.preferred_theme();
            state.theme = preferred;
            state.phase = Phase::Resolved;
            state.sync_host();
            (state.theme, state.listeners())
        };
        debug!("Theme resolved: {theme}");
        notify(&listeners, theme);
        theme
    }

    /// Flips dark and light, returning the new theme.
    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        self.ensure_ready()?;
        let theme = self.theme().toggled();
        self.apply(theme);
        Ok(theme)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), ThemeError> {
        self.ensure_ready()?;
        self.apply(theme);
        Ok(())
    }

    /// Registers a callback run after resolution and after every change.
    pub fn subscribe(&self, listener: impl Fn(Theme) + 'static) -> Subscription {
        let listener: Listener = Rc::new(listener);
        let mut state = self.state.borrow_mut();
        let subscription = Subscription(state.next_subscription);
        state.next_subscription += 1;
        state.listeners.push((subscription, listener));
        subscription
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(s, _)| *s != subscription);
        state.listeners.len() != before
    }

    fn ensure_ready(&self) -> Result<(), ThemeError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ThemeError::NotResolved)
        }
    }

    /// Changes the theme of a resolved store.
    pub(crate) fn apply(&self, theme: Theme) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            debug_assert_eq!(state.phase, Phase::Resolved);
            if state.theme == theme {
                trace!("Theme unchanged: {theme}");
                return;
            }
            state.theme = theme;
            state.sync_host();
            state.listeners()
        };
        debug!("Theme changed to {theme}");
        notify(&listeners, theme);
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeStore")
            .field("theme", &state.theme)
            .field("phase", &state.phase)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

fn notify(listeners: &[Listener], theme: Theme) {
    trace!("Notifying {} theme subscriber(s)", listeners.len());
    for listener in listeners {
        listener(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::document::HtmlDocument;
    use crate::theme::preference::FixedColorScheme;
    use crate::theme::storage::MemoryStorage;
    use std::cell::Cell;

    fn store_with(storage: MemoryStorage, scheme: FixedColorScheme) -> (ThemeStore, HtmlDocument) {
        let document = HtmlDocument::new();
        let store = ThemeStore::new(Theme::Dark, Host::new(storage, scheme, document.clone()));
        (store, document)
    }

    #[test]
    fn test_new_store_touches_nothing() {
        let storage = MemoryStorage::new();
        let (store, document) = store_with(storage.clone(), FixedColorScheme::light());

        assert_eq!(store.phase(), Phase::Unresolved);
        assert_eq!(store.theme(), Theme::Dark);
        assert!(document.classes().is_empty());
        assert_eq!(document.meta(THEME_COLOR_META), None);
        assert_eq!(storage.get(STORAGE_KEY), None);
    }

    #[test]
    fn test_changes_before_resolution_are_rejected() {
        let (store, document) = store_with(MemoryStorage::new(), FixedColorScheme::light());

        assert_eq!(store.toggle(), Err(ThemeError::NotResolved));
        assert_eq!(store.set_theme(Theme::Light), Err(ThemeError::NotResolved));
        assert_eq!(store.theme(), Theme::Dark);
        assert!(document.classes().is_empty());
    }

    #[test]
    fn test_resolve_runs_once() {
        let storage = MemoryStorage::new();
        let (store, _) = store_with(storage.clone(), FixedColorScheme::light());
        assert_eq!(store.resolve(), Theme::Light);

        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.resolve(), Theme::Dark);
        assert_eq!(storage.get(STORAGE_KEY), Some("dark".to_string()));
    }

    #[test]
    fn test_invalid_stored_value_falls_back_to_os() {
        let storage = MemoryStorage::with_item(STORAGE_KEY, "purple");
        let (store, _) = store_with(storage.clone(), FixedColorScheme::light());

        assert_eq!(store.resolve(), Theme::Light);
        assert_eq!(storage.get(STORAGE_KEY), Some("light".to_string()));
    }

    #[test]
    fn test_failed_writes_are_not_fatal() {
        let (store, document) = store_with(MemoryStorage::read_only(), FixedColorScheme::dark());

        assert_eq!(store.resolve(), Theme::Dark);
        assert_eq!(store.toggle(), Ok(Theme::Light));
        assert!(document.has_class("light"));
    }

    #[test]
    fn test_subscribers_see_resolution_and_changes() {
        let (store, _) = store_with(MemoryStorage::new(), FixedColorScheme::dark());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |theme| sink.borrow_mut().push(theme));

        store.resolve();
        store.toggle().unwrap();
        store.set_theme(Theme::Light).unwrap();
        store.set_theme(Theme::Dark).unwrap();

        assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light, Theme::Dark]);
    }

    #[test]
    fn test_subscriber_can_read_the_store() {
        let (store, _) = store_with(MemoryStorage::new(), FixedColorScheme::dark());
        let observed = Rc::new(Cell::new(None));
        let reader = store.clone();
        let sink = Rc::clone(&observed);
        store.subscribe(move |_| sink.set(Some(reader.theme())));

        store.resolve();
        store.toggle().unwrap();
        assert_eq!(observed.get(), Some(Theme::Light));
    }

    #[test]
    fn test_unsubscribe() {
        let (store, _) = store_with(MemoryStorage::new(), FixedColorScheme::dark());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.resolve();
        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.toggle().unwrap();
        assert_eq!(calls.get(), 1);
    }
}
