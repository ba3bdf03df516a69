//! Arena-backed element tree.
//!
//! Nodes live in one vector and link to each other by index, so handles are
//! plain `Copy` ids that stay valid while attributes are rewritten.

use html5ever::{LocalName, QualName, ns};

/// Index of a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Class list in declaration order, kept in sync with `class`.
        classes: Vec<String>,
    },
    Text(String),
    Comment(String),
    Doctype(String),
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

fn split_classes(value: &str) -> Vec<String> {
    value
        .split(|c: char| c.is_ascii_whitespace())
        .filter(|class| !class.is_empty())
        .map(str::to_string)
        .collect()
}

/// A parsed HTML document.
pub struct Tree {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Tree {
    /// Empty tree holding only the document node.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        tree.document = tree.alloc(Node::new(NodeData::Document));
        tree
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let classes = attrs
            .iter()
            .find(|a| a.name.ns == ns!() && a.name.local.as_ref() == "class")
            .map(|a| split_classes(&a.value))
            .unwrap_or_default();
        self.alloc(Node::new(NodeData::Element {
            name,
            attrs,
            classes,
        }))
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    pub fn create_doctype(&mut self, name: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype(name)))
    }

    /// Link `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if let Some(prev) = self.get_mut(last) {
            prev.next_sibling = child;
        }
        if let Some(p) = self.get_mut(parent) {
            if p.first_child.is_none() {
                p.first_child = child;
            }
            p.last_child = child;
        }
    }

    /// Link `node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(s) => (s.parent, s.prev_sibling),
            None => return,
        };

        if let Some(n) = self.get_mut(node) {
            n.parent = parent;
            n.prev_sibling = prev;
            n.next_sibling = sibling;
        }
        if let Some(s) = self.get_mut(sibling) {
            s.prev_sibling = node;
        }
        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = node;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = node;
        }
    }

    /// Unlink `id` from its parent and siblings.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }
        if let Some(n) = self.get_mut(id) {
            n.parent = NodeId::NONE;
            n.prev_sibling = NodeId::NONE;
            n.next_sibling = NodeId::NONE;
        }
    }

    /// Append text, merging into a trailing text node when there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);
        if let Some(Node {
            data: NodeData::Text(existing),
            ..
        }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            current: self.get(parent).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Element children only.
    pub fn element_children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent).filter(|&id| self.is_element(id))
    }

    /// Every node below the document, depth first, in document order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.document).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.classes(id).iter().any(|c| c == class))
            .collect()
    }

    /// First element with the given tag name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|&id| self.tag(id).is_some_and(|t| t.as_ref() == tag))
    }

    pub fn tag(&self, id: NodeId) -> Option<&LocalName> {
        match &self.get(id)?.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        }
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { classes, .. }) => classes.as_slice(),
            _ => &[],
        }
    }

    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs.as_slice(),
            _ => &[],
        }
    }

    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.ns == ns!() && a.name.local.as_ref() == name)
            .map(|a| a.value.as_str())
    }

    /// Set or replace an attribute. No-op on non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(Node {
            data: NodeData::Element { attrs, classes, .. },
            ..
        }) = self.get_mut(id)
        else {
            return;
        };

        match attrs
            .iter_mut()
            .find(|a| a.name.ns == ns!() && a.name.local.as_ref() == name)
        {
            Some(attr) => attr.value = value.to_string(),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.to_string(),
            }),
        }
        if name == "class" {
            *classes = split_classes(value);
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            match self.get(child).map(|n| &n.data) {
                Some(NodeData::Text(t)) => out.push_str(t),
                Some(NodeData::Element { .. }) => out.push_str(&self.text_content(child)),
                _ => {}
            }
        }
        out
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Children<'a> {
    tree: &'a Tree,
    current: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.tree.get(id).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_classes_keep_declaration_order() {
        let mut tree = Tree::new();
        let a = tree.create_element(qname("a"), vec![attr("class", " b  a\tc ")]);
        tree.append(tree.document(), a);
        assert_eq!(tree.classes(a), ["b", "a", "c"]);
    }

    #[test]
    fn test_set_attr_replaces_and_resyncs_classes() {
        let mut tree = Tree::new();
        let a = tree.create_element(qname("a"), vec![attr("href", "#")]);
        tree.set_attr(a, "href", "https://x.test");
        tree.set_attr(a, "rel", "noopener");
        tree.set_attr(a, "class", "twitter");

        assert_eq!(tree.get_attr(a, "href"), Some("https://x.test"));
        assert_eq!(tree.get_attr(a, "rel"), Some("noopener"));
        assert_eq!(tree.attrs(a).len(), 3);
        assert_eq!(tree.classes(a), ["twitter"]);
    }

    #[test]
    fn test_namespaced_attr_is_not_plain_attr() {
        let mut tree = Tree::new();
        let xlink_href = Attribute {
            name: QualName::new(None, ns!(xlink), LocalName::from("href")),
            value: "#icon".to_string(),
        };
        let a = tree.create_element(qname("a"), vec![xlink_href]);

        assert_eq!(tree.get_attr(a, "href"), None);
        tree.set_attr(a, "href", "https://x.test");
        assert_eq!(tree.get_attr(a, "href"), Some("https://x.test"));
        assert_eq!(tree.attrs(a).len(), 2);
        assert_eq!(tree.attrs(a)[0].value, "#icon");
    }

    #[test]
    fn test_document_order_and_element_children() {
        let mut tree = Tree::new();
        let root = tree.document();
        let outer = tree.create_element(qname("div"), vec![attr("class", "x")]);
        let inner = tree.create_element(qname("div"), vec![attr("class", "x")]);
        let after = tree.create_element(qname("p"), vec![attr("class", "x")]);
        tree.append(root, outer);
        tree.append_text(outer, "text");
        tree.append(outer, inner);
        tree.append(root, after);

        assert_eq!(tree.elements_with_class("x"), vec![outer, inner, after]);
        assert_eq!(tree.element_children(outer).collect::<Vec<_>>(), vec![inner]);
    }

    #[test]
    fn test_detach_and_insert_before() {
        let mut tree = Tree::new();
        let root = tree.document();
        let a = tree.create_element(qname("a"), vec![]);
        let b = tree.create_element(qname("b"), vec![]);
        let c = tree.create_element(qname("i"), vec![]);
        tree.append(root, a);
        tree.append(root, b);
        tree.insert_before(b, c);
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, c, b]);

        tree.detach(a);
        tree.detach(b);
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn test_text_merging() {
        let mut tree = Tree::new();
        let p = tree.create_element(qname("p"), vec![]);
        tree.append(tree.document(), p);
        tree.append_text(p, "Hello, ");
        tree.append_text(p, "World!");
        assert_eq!(tree.children(p).count(), 1);
        assert_eq!(tree.text_content(p), "Hello, World!");
    }
}
