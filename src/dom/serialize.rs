//! Write a [`Tree`] back out as HTML through html5ever's serializer.

use std::io;

use html5ever::QualName;
use html5ever::serialize::{SerializeOpts, Serializer, TraversalScope};

use super::tree::{NodeData, NodeId, Tree};

/// A tree plus attributes layered over it at serialization time.
struct Rendered<'a, F> {
    tree: &'a Tree,
    extra_attrs: F,
}

impl<F> Rendered<'_, F>
where
    F: Fn(NodeId) -> Vec<(QualName, String)>,
{
    fn write_node<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        let Some(node) = self.tree.get(id) else {
            return Ok(());
        };
        match &node.data {
            NodeData::Document => self.write_children(serializer, id),
            NodeData::Doctype(name) => serializer.write_doctype(name),
            NodeData::Comment(text) => serializer.write_comment(text),
            NodeData::Text(text) => serializer.write_text(text),
            NodeData::Element { name, attrs, .. } => {
                let added = (self.extra_attrs)(id);
                let kept = attrs
                    .iter()
                    .filter(|a| !added.iter().any(|(n, _)| *n == a.name))
                    .map(|a| (&a.name, a.value.as_str()));
                let layered = added.iter().map(|(n, v)| (n, v.as_str()));

                serializer.start_elem(name.clone(), kept.chain(layered))?;
                self.write_children(serializer, id)?;
                serializer.end_elem(name.clone())
            }
        }
    }

    fn write_children<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        for child in self.tree.children(id) {
            self.write_node(serializer, child)?;
        }
        Ok(())
    }
}

impl<F> html5ever::serialize::Serialize for Rendered<'_, F>
where
    F: Fn(NodeId) -> Vec<(QualName, String)>,
{
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let root = self.tree.document();
        match traversal_scope {
            TraversalScope::IncludeNode => self.write_node(serializer, root),
            TraversalScope::ChildrenOnly(_) => self.write_children(serializer, root),
        }
    }
}

/// Serialize the whole tree.
///
/// `extra_attrs` is consulted for every element and may add attributes (or
/// override existing ones with the same qualified name) without touching the
/// tree.
pub fn serialize<F>(tree: &Tree, extra_attrs: F) -> String
where
    F: Fn(NodeId) -> Vec<(QualName, String)>,
{
    let mut bytes = Vec::new();
    let rendered = Rendered { tree, extra_attrs };

    if let Err(err) = html5ever::serialize::serialize(&mut bytes, &rendered, SerializeOpts::default())
    {
        tracing::warn!(%err, "html serialization failed");
    }

    String::from_utf8(bytes).unwrap_or_default()
}
