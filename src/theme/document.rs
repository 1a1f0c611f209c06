//! Document-level presentation attributes

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// The parts of the document root the theme writes to.
pub trait Document {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_meta(&mut self, name: &str, content: &str);
}

#[derive(Debug, Default)]
struct RootElement {
    classes: Vec<String>,
    meta: BTreeMap<String, String>,
}

/// In-memory document root. Clones share the same element, so a host can
/// hand one clone to the theme store and keep another to render from.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    root: Rc<RefCell<RootElement>>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Vec<String> {
        self.root.borrow().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.root.borrow().classes.iter().any(|c| c == class)
    }

    pub fn meta(&self, name: &str) -> Option<String> {
        self.root.borrow().meta.get(name).cloned()
    }

    /// Space-separated class list, as it would appear in the `class` attribute.
    pub fn class_attribute(&self) -> String {
        self.root.borrow().classes.join(" ")
    }

    /// Returns every `<meta>` element, sorted by name.
    pub fn meta_tags(&self) -> Vec<(String, String)> {
        self.root
            .borrow()
            .meta
            .iter()
            .map(|(name, content)| (name.clone(), content.clone()))
            .collect()
    }
}

impl Document for HtmlDocument {
    fn add_class(&mut self, class: &str) {
        let mut root = self.root.borrow_mut();
        if !root.classes.iter().any(|c| c == class) {
            root.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.root.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_meta(&mut self, name: &str, content: &str) {
        self.root
            .borrow_mut()
            .meta
            .insert(name.to_string(), content.to_string());
    }
}
