//! The document seam the binder works through.
//!
//! Implemented by [`crate::dom::HtmlDocument`] for parsed HTML and, with the
//! `wasm` feature, by `crate::wasm::WebDocument` for the live browser DOM.

use crate::metadata::PageDefaults;

/// `rel` written on bound hyperlinks.
pub const LINK_REL: &str = "noopener noreferrer";

/// Browsing context every share URL opens in.
pub const LINK_TARGET: &str = "_blank";

/// `window.open` features used by click handlers.
pub const WINDOW_FEATURES: &str = "noopener,noreferrer";

/// Read and write access to an element tree.
///
/// Read methods must be total: a missing attribute is `None`, an element
/// without classes yields an empty list.
pub trait ShareDocument {
    /// Handle to an element of this document.
    type Element;

    /// All elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<Self::Element>;

    /// Direct element children of `parent`, in document order.
    fn children(&self, parent: &Self::Element) -> Vec<Self::Element>;

    /// Classes of `element` in declaration order.
    fn classes(&self, element: &Self::Element) -> Vec<String>;

    /// Value of an attribute, if present.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Whether the element is a hyperlink (`<a>`).
    fn is_link(&self, element: &Self::Element) -> bool;

    /// Current page location and document title.
    fn page_defaults(&self) -> PageDefaults;

    /// Point a hyperlink at `url`, opening in a new context without
    /// referrer or opener.
    fn set_link(&mut self, element: &Self::Element, url: &str);

    /// Replace the element's click handler with one that opens `url` in a new
    /// context without referrer or opener.
    fn set_click_handler(&mut self, element: &Self::Element, url: &str);
}

/// Click handlers owned on behalf of elements, at most one per element.
///
/// Binding an element again drops the handler it held before, so repeated
/// passes over the same page keep one handler per button.
#[derive(Debug)]
pub struct HandlerSlots<K, H> {
    slots: Vec<(K, H)>,
}

impl<K, H> Default for HandlerSlots<K, H> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: PartialEq, H> HandlerSlots<K, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` for `key`, returning the handler it replaces.
    pub fn replace(&mut self, key: K, handler: H) -> Option<H> {
        match self.slots.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, handler)),
            None => {
                self.slots.push((key, handler));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&H> {
        self.slots.iter().find(|(k, _)| k == key).map(|(_, h)| h)
    }

    /// Number of elements holding a handler.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
