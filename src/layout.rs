//! Root layout: the `<html>` element and its `<head>`
//!
//! The layout supplies the default theme to the theme provider and renders
//! the document head from the current document state. Fonts and analytics are
//! injected here too; neither interacts with the theme.

use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::config::SiteConfig;
use crate::theme::{HtmlDocument, Theme, THEME_COLOR_META};

/// Page metadata rendered into the head.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            keywords: Vec::new(),
            author: None,
        }
    }
}

/// A web font stylesheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub family: String,
    pub href: String,
    /// Origin to preconnect to before fetching the stylesheet.
    #[serde(default)]
    pub preconnect: Option<String>,
}

/// Google tag injection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analytics {
    pub measurement_id: String,
}

impl Analytics {
    /// Measurement ids end up inside a script, so only `[A-Za-z0-9-]` is accepted.
    pub fn new(measurement_id: &str) -> Option<Self> {
        let id = measurement_id.trim();
        if id.is_empty() {
            return None;
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            warn!("Ignoring invalid analytics measurement id: {id:?}");
            return None;
        }
        Some(Self {
            measurement_id: id.to_string(),
        })
    }

    fn render(&self, out: &mut String) {
        let id = &self.measurement_id;
        let _ = writeln!(
            out,
            r#"<script async src="https://www.googletagmanager.com/gtag/js?id={id}"></script>"#
        );
        let _ = writeln!(
            out,
            "<script>window.dataLayer = window.dataLayer || [];\
             function gtag(){{dataLayer.push(arguments);}}\
             gtag('js', new Date());gtag('config', '{id}');</script>"
        );
    }
}

#[derive(Clone, Debug)]
pub struct RootLayout {
    pub metadata: Metadata,
    pub default_theme: Theme,
    pub lang: String,
    pub fonts: Vec<FontSource>,
    pub analytics: Option<Analytics>,
}

impl RootLayout {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            metadata: config.metadata.clone(),
            default_theme: config.default_theme,
            lang: config.lang.clone(),
            fonts: config.fonts.clone(),
            analytics: config.analytics_id.as_deref().and_then(Analytics::new),
        }
    }

    /// `<html>` open tag carrying the document's presentation classes.
    pub fn html_open_tag(&self, document: &HtmlDocument) -> String {
        let classes = document.class_attribute();
        if classes.is_empty() {
            format!(r#"<html lang="{}">"#, attr(&self.lang))
        } else {
            format!(
                r#"<html lang="{}" class="{}">"#,
                attr(&self.lang),
                attr(&classes)
            )
        }
    }

    pub fn render_head(&self, document: &HtmlDocument) -> String {
        let mut out = String::from("<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(out, "<title>{}</title>", encode_text(&self.metadata.title));
        if !self.metadata.description.is_empty() {
            meta_tag(&mut out, "description", &self.metadata.description);
        }
        if !self.metadata.keywords.is_empty() {
            meta_tag(&mut out, "keywords", &self.metadata.keywords.join(", "));
        }
        if let Some(author) = &self.metadata.author {
            meta_tag(&mut out, "author", author);
        }

        // Before resolution the document has no theme-color yet.
        let theme_color = document
            .meta(THEME_COLOR_META)
            .unwrap_or_else(|| self.default_theme.theme_color().to_string());
        meta_tag(&mut out, THEME_COLOR_META, &theme_color);
        for (name, content) in document.meta_tags() {
            if name != THEME_COLOR_META {
                meta_tag(&mut out, &name, &content);
            }
        }

        for font in &self.fonts {
            if let Some(origin) = &font.preconnect {
                let _ = writeln!(
                    out,
                    r#"<link rel="preconnect" href="{}" crossorigin>"#,
                    attr(origin)
                );
            }
            let _ = writeln!(
                out,
                r#"<link rel="stylesheet" href="{}" data-font="{}">"#,
                attr(&font.href),
                attr(&font.family)
            );
        }

        if let Some(analytics) = &self.analytics {
            analytics.render(&mut out);
        }

        out.push_str("</head>");
        out
    }
}

fn meta_tag(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta name="{}" content="{}">"#,
        attr(name),
        attr(content)
    );
}
