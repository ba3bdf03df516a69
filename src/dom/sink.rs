//! html5ever `TreeSink` that builds a [`Tree`].

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as ParsedAttribute, QualName};

use super::tree::{Attribute, NodeData, NodeId, Tree};

/// Parser-side handle to a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(pub NodeId);

/// Collects parser output into a [`Tree`].
///
/// `TreeSink` methods take `&self`, hence the `RefCell`.
#[derive(Default)]
pub struct TreeBuilder {
    tree: RefCell<Tree>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_tree(self) -> Tree {
        self.tree.into_inner()
    }

    fn insert(&self, parent: NodeId, child: NodeOrText<Handle>) {
        let mut tree = self.tree.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => tree.append(parent, node.0),
            NodeOrText::AppendText(text) => tree.append_text(parent, &text),
        }
    }
}

impl TreeSink for TreeBuilder {
    type Handle = Handle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    // Browsers recover from malformed markup; so do we.
    fn parse_error(&self, _msg: Cow<'static, str>) {}

    fn get_document(&self) -> Handle {
        Handle(self.tree.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Handle) -> Self::ElemName<'a> {
        static NONE: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let tree = self.tree.borrow();
        match tree.get(target.0).map(|n| &n.data) {
            // SAFETY: the tree builder reads the name immediately and does not
            // hold it across another sink call, so no reallocation of the
            // arena can happen while the reference is alive.
            Some(NodeData::Element { name, .. }) => unsafe {
                std::mem::transmute::<&QualName, &'a QualName>(name)
            },
            _ => &NONE,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<ParsedAttribute>,
        _flags: ElementFlags,
    ) -> Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        Handle(self.tree.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        Handle(self.tree.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Handle {
        Handle(self.tree.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Handle,
        prev_element: &Handle,
        child: NodeOrText<Handle>,
    ) {
        let parent = self
            .tree
            .borrow()
            .get(element.0)
            .map_or(NodeId::NONE, |n| n.parent);
        if parent.is_some() {
            self.insert(parent, child);
        } else {
            self.insert(prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut tree = self.tree.borrow_mut();
        let doctype = tree.create_doctype(name.to_string());
        let document = tree.document();
        tree.append(document, doctype);
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        *target
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Handle, new_node: NodeOrText<Handle>) {
        let mut tree = self.tree.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => tree.create_text(text.to_string()),
        };
        tree.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<ParsedAttribute>) {
        let mut tree = self.tree.borrow_mut();
        for attr in attrs {
            let name = attr.name.local.to_string();
            if tree.get_attr(target.0, &name).is_none() {
                tree.set_attr(target.0, &name, &attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Handle) {
        self.tree.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut tree = self.tree.borrow_mut();
        let children: Vec<_> = tree.children(node.0).collect();
        for child in children {
            tree.detach(child);
            tree.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_tree;

    #[test]
    fn test_parse_builds_body_children() {
        let tree = parse_tree("<p>Hello</p><p class='x y'>World</p>");
        let body = tree.find_by_tag("body").expect("body");
        let paragraphs: Vec<_> = tree.element_children(body).collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(tree.text_content(paragraphs[0]), "Hello");
        assert_eq!(tree.classes(paragraphs[1]), ["x", "y"]);
    }

    #[test]
    fn test_parse_recovers_from_misnested_markup() {
        let tree = parse_tree("<div class='shareon'><a class='twitter'>t</div></a>");
        let container = tree.elements_with_class("shareon")[0];
        let links: Vec<_> = tree.element_children(container).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(tree.tag(links[0]).map(|t| t.as_ref()), Some("a"));
    }

    #[test]
    fn test_doctype_is_kept() {
        let tree = parse_tree("<!DOCTYPE html><title>T</title>");
        let first = tree.children(tree.document()).next().expect("doctype");
        assert!(matches!(
            tree.get(first).map(|n| &n.data),
            Some(super::NodeData::Doctype(name)) if name == "html"
        ));
    }
}
