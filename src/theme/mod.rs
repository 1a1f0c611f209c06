//! Theme system for the portfolio site
//!
//! This module holds the active dark/light theme, persists it to durable
//! storage and keeps the document root in sync. Host capabilities (storage,
//! OS colour scheme, document) are traits so a browser binding, the CLI and
//! tests can each supply their own.

pub mod document;
pub mod models;
pub mod preference;
pub mod provider;
pub mod storage;
pub mod store;


pub use document::{Document, HtmlDocument};
pub use models::{ParseThemeError, Theme, STORAGE_KEY, THEME_COLOR_META};
pub use preference::{ColorSchemeQuery, FixedColorScheme, SystemColorScheme};
pub use provider::{Context, Rendered, ThemeHandle, ThemeProvider};
pub use storage::{FileStorage, MemoryStorage, StorageError, ThemeStorage};
pub use store::{Host, Phase, Subscription, ThemeError, ThemeStore};
