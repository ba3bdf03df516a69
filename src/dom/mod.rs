//! Static HTML host for the binder.
//!
//! [`HtmlDocument`] parses a page with html5ever into an arena tree,
//! implements [`ShareDocument`] over it, and serializes the result back to
//! HTML. Hyperlink bindings are written into the tree; click handlers are kept
//! beside it and rendered as `onclick` attributes.
//!
//! ```
//! use shareon::bind_document;
//! use shareon::dom::HtmlDocument;
//!
//! let html = r#"<div class="shareon" data-title="Hi"><a class="pocket">Save</a></div>"#;
//! let mut doc = HtmlDocument::parse(html, "https://example.com/");
//! bind_document(&mut doc);
//!
//! assert!(doc.to_html().contains(
//!     r#"href="https://getpocket.com/edit.php?url=https%3A%2F%2Fexample.com%2F""#
//! ));
//! ```

mod serialize;
mod sink;
mod tree;

pub use tree::{Attribute, Node, NodeData, NodeId, Tree};

use std::collections::HashMap;

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns, parse_document};

use crate::document::{LINK_REL, LINK_TARGET, ShareDocument, WINDOW_FEATURES};
use crate::metadata::PageDefaults;
use sink::TreeBuilder;

/// Parse an HTML string into a [`Tree`].
pub fn parse_tree(html: &str) -> Tree {
    parse_document(TreeBuilder::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_tree()
}

/// Script body that opens `url` the way bound buttons do.
pub fn open_script(url: &str) -> String {
    format!(
        "window.open('{}','{LINK_TARGET}','{WINDOW_FEATURES}')",
        escape_js_single_quoted(url)
    )
}

fn escape_js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// A parsed page with share bindings applied in memory.
pub struct HtmlDocument {
    tree: Tree,
    page_url: String,
    handlers: HashMap<NodeId, String>,
}

impl HtmlDocument {
    /// Parse `html`, treating `page_url` as the current location.
    pub fn parse(html: &str, page_url: impl Into<String>) -> Self {
        Self {
            tree: parse_tree(html),
            page_url: page_url.into(),
            handlers: HashMap::new(),
        }
    }

    /// Parse raw page bytes, honouring a `<meta charset>` declaration.
    pub fn from_bytes(bytes: &[u8], page_url: impl Into<String>) -> Self {
        let hint = crate::util::extract_meta_charset(bytes);
        let html = crate::util::decode_text(bytes, hint);
        Self::parse(&html, page_url)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Text of the `<title>` element with ASCII whitespace stripped and
    /// collapsed, as `document.title` reports it.
    pub fn title(&self) -> String {
        self.tree
            .find_by_tag("title")
            .map(|t| {
                self.tree
                    .text_content(t)
                    .split(|c: char| c.is_ascii_whitespace())
                    .filter(|word| !word.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.get_attr(id, name)
    }

    /// URL bound as a click handler, if any.
    pub fn click_handler(&self, id: NodeId) -> Option<&str> {
        self.handlers.get(&id).map(String::as_str)
    }

    /// Serialize the page, rendering click handlers as `onclick`.
    pub fn to_html(&self) -> String {
        serialize::serialize(&self.tree, |id| match self.handlers.get(&id) {
            Some(url) => vec![(
                QualName::new(None, ns!(), LocalName::from("onclick")),
                open_script(url),
            )],
            None => Vec::new(),
        })
    }
}

impl ShareDocument for HtmlDocument {
    type Element = NodeId;

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.tree.elements_with_class(class)
    }

    fn children(&self, parent: &NodeId) -> Vec<NodeId> {
        self.tree.element_children(*parent).collect()
    }

    fn classes(&self, element: &NodeId) -> Vec<String> {
        self.tree.classes(*element).to_vec()
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.tree.get_attr(*element, name).map(str::to_string)
    }

    fn is_link(&self, element: &NodeId) -> bool {
        self.tree
            .tag(*element)
            .is_some_and(|t| t.as_ref().eq_ignore_ascii_case("a"))
    }

    fn page_defaults(&self) -> PageDefaults {
        PageDefaults::new(self.page_url.clone(), self.title())
    }

    fn set_link(&mut self, element: &NodeId, url: &str) {
        self.tree.set_attr(*element, "href", url);
        self.tree.set_attr(*element, "rel", LINK_REL);
        self.tree.set_attr(*element, "target", LINK_TARGET);
    }

    fn set_click_handler(&mut self, element: &NodeId, url: &str) {
        self.handlers.insert(*element, url.to_string());
    }
}
