//! The scan-and-bind pass.
//!
//! For every container carrying the marker class, each direct child whose
//! class list names a known network gets a share URL: hyperlinks receive it
//! as `href`, everything else as a click handler. The pass never fails;
//! missing containers, unknown classes and absent attributes all degrade to
//! no-ops or page defaults.

use tracing::{debug, trace};

use crate::document::ShareDocument;
use crate::metadata::{PageDefaults, ShareMetadata};
use crate::network::Network;

/// Marker class identifying share containers.
pub const DEFAULT_MARKER: &str = "shareon";

/// Options for a bind pass.
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Class that marks container elements.
    pub marker: String,
    /// Overrides the document's own page defaults when set.
    pub defaults: Option<PageDefaults>,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            defaults: None,
        }
    }
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_defaults(mut self, defaults: PageDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }
}

/// How a URL was attached to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum BindTarget {
    /// `href`/`rel`/`target` written on a hyperlink.
    Link,
    /// Click handler on a non-link element.
    Click,
}

/// One bound button.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Binding {
    /// Index of the container among all containers.
    pub container: usize,
    /// Index of the button among the container's element children.
    pub child: usize,
    pub network: Network,
    pub url: String,
    pub target: BindTarget,
}

/// What a bind pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BindReport {
    /// Number of containers found.
    pub containers: usize,
    /// Children left untouched because no class named a network.
    pub skipped: usize,
    pub bindings: Vec<Binding>,
}

impl BindReport {
    /// Bindings for a given network.
    pub fn for_network(&self, network: Network) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.network == network)
    }
}

/// First class in declaration order that names a network.
pub fn match_network<S: AsRef<str>>(classes: &[S]) -> Option<Network> {
    classes.iter().find_map(|c| Network::from_id(c.as_ref()))
}

/// Bind every share button in `doc`.
///
/// Re-running on an unchanged document overwrites each binding with an
/// identical one.
pub fn bind<D: ShareDocument>(doc: &mut D, options: &BindOptions) -> BindReport {
    let page = options
        .defaults
        .clone()
        .unwrap_or_else(|| doc.page_defaults());
    let containers = doc.elements_with_class(&options.marker);

    let mut report = BindReport {
        containers: containers.len(),
        ..Default::default()
    };

    for (ci, container) in containers.iter().enumerate() {
        for (child_index, child) in doc.children(container).iter().enumerate() {
            let Some(network) = match_network(&doc.classes(child)) else {
                trace!(container = ci, child = child_index, "no network class");
                report.skipped += 1;
                continue;
            };

            let meta = ShareMetadata::resolve(
                |name| doc.attribute(child, name),
                |name| doc.attribute(container, name),
                &page,
            );
            let url = network.build(&meta);

            let target = if doc.is_link(child) {
                doc.set_link(child, &url);
                BindTarget::Link
            } else {
                doc.set_click_handler(child, &url);
                BindTarget::Click
            };
            debug!(%network, ?target, %url, "bound share button");

            report.bindings.push(Binding {
                container: ci,
                child: child_index,
                network,
                url,
                target,
            });
        }
    }

    report
}

/// [`bind`] with the default `shareon` marker and the document's own defaults.
pub fn bind_document<D: ShareDocument>(doc: &mut D) -> BindReport {
    bind(doc, &BindOptions::default())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Flat in-memory document; elements link to their parent by index.
    #[derive(Default)]
    struct FakeDoc {
        tags: Vec<&'static str>,
        classes: Vec<Vec<String>>,
        attrs: Vec<HashMap<String, String>>,
        parents: Vec<Option<usize>>,
        clicks: HashMap<usize, String>,
    }

    impl FakeDoc {
        fn add(&mut self, parent: Option<usize>, tag: &'static str, class: &str) -> usize {
            self.tags.push(tag);
            self.classes
                .push(class.split_whitespace().map(String::from).collect());
            self.attrs.push(HashMap::new());
            self.parents.push(parent);
            self.tags.len() - 1
        }

        fn set(&mut self, el: usize, name: &str, value: &str) {
            self.attrs[el].insert(name.to_string(), value.to_string());
        }
    }

    impl ShareDocument for FakeDoc {
        type Element = usize;

        fn elements_with_class(&self, class: &str) -> Vec<usize> {
            (0..self.tags.len())
                .filter(|&i| self.classes[i].iter().any(|c| c == class))
                .collect()
        }

        fn children(&self, parent: &usize) -> Vec<usize> {
            (0..self.tags.len())
                .filter(|&i| self.parents[i] == Some(*parent))
                .collect()
        }

        fn classes(&self, element: &usize) -> Vec<String> {
            self.classes[*element].clone()
        }

        fn attribute(&self, element: &usize, name: &str) -> Option<String> {
            self.attrs[*element].get(name).cloned()
        }

        fn is_link(&self, element: &usize) -> bool {
            self.tags[*element] == "a"
        }

        fn page_defaults(&self) -> PageDefaults {
            PageDefaults::new("https://site.test/page", "Doc Title")
        }

        fn set_link(&mut self, element: &usize, url: &str) {
            self.set(*element, "href", url);
            self.set(*element, "rel", crate::document::LINK_REL);
            self.set(*element, "target", crate::document::LINK_TARGET);
        }

        fn set_click_handler(&mut self, element: &usize, url: &str) {
            self.clicks.insert(*element, url.to_string());
        }
    }

    #[test]
    fn test_first_matching_class_wins() {
        let mut doc = FakeDoc::default();
        let c = doc.add(None, "div", "shareon");
        let a = doc.add(Some(c), "a", "foo twitter telegram");

        let report = bind_document(&mut doc);
        assert_eq!(report.bindings.len(), 1);
        assert_eq!(report.bindings[0].network, Network::Twitter);
        assert!(doc.attrs[a]["href"].starts_with(Network::Twitter.endpoint()));
    }

    #[test]
    fn test_non_link_gets_click_handler() {
        let mut doc = FakeDoc::default();
        let c = doc.add(None, "div", "shareon");
        let b = doc.add(Some(c), "button", "reddit");

        let report = bind_document(&mut doc);
        assert_eq!(report.bindings[0].target, BindTarget::Click);
        assert!(!doc.attrs[b].contains_key("href"));
        assert_eq!(
            doc.clicks[&b],
            "https://www.reddit.com/submit?title=Doc%20Title&url=https%3A%2F%2Fsite.test%2Fpage"
        );
    }

    #[test]
    fn test_unknown_children_and_grandchildren_untouched() {
        let mut doc = FakeDoc::default();
        let c = doc.add(None, "div", "shareon");
        let span = doc.add(Some(c), "span", "label");
        let nested = doc.add(Some(span), "a", "facebook");

        let report = bind_document(&mut doc);
        assert_eq!(report.containers, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.bindings.is_empty());
        assert!(doc.attrs[nested].is_empty());
    }

    #[test]
    fn test_no_containers_is_noop() {
        let mut doc = FakeDoc::default();
        doc.add(None, "a", "twitter");
        let report = bind_document(&mut doc);
        assert_eq!(report, BindReport::default());
    }

    #[test]
    fn test_custom_marker_and_defaults() {
        let mut doc = FakeDoc::default();
        let c = doc.add(None, "div", "share-bar");
        doc.add(Some(c), "a", "pocket");

        let report = bind(&mut doc, &BindOptions::default());
        assert!(report.bindings.is_empty());

        let options = BindOptions::new()
            .with_marker("share-bar")
            .with_defaults(PageDefaults::new("https://other.test", ""));
        let report = bind(&mut doc, &options);
        assert_eq!(
            report.bindings[0].url,
            "https://getpocket.com/edit.php?url=https%3A%2F%2Fother.test"
        );
    }

    #[test]
    fn test_rebinding_is_idempotent() {
        let mut doc = FakeDoc::default();
        let c = doc.add(None, "div", "shareon");
        doc.set(c, "data-via", "someone");
        doc.add(Some(c), "a", "twitter");
        doc.add(Some(c), "button", "whatsapp");

        let first = bind_document(&mut doc);
        let attrs = doc.attrs.clone();
        let clicks = doc.clicks.clone();
        let second = bind_document(&mut doc);

        assert_eq!(first, second);
        assert_eq!(doc.attrs, attrs);
        assert_eq!(doc.clicks, clicks);
    }

    #[test]
    fn test_match_network() {
        assert_eq!(match_network(&["x", "vkontakte", "viber"]), Some(Network::Vkontakte));
        assert_eq!(match_network::<&str>(&[]), None);
        assert_eq!(match_network(&["shareon"]), None);
    }
}
