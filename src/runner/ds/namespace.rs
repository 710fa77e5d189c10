use indexmap::IndexMap;

use crate::parser::QualifiedName;
use crate::runner::ds::value::Value;

/// One node of the namespace tree. A node can hold a published value (a
/// class or a singleton instance) and child nodes at the same time.
#[derive(Debug, Default)]
pub struct NamespaceNode {
    value: Option<Value>,
    children: IndexMap<String, NamespaceNode>,
}

impl NamespaceNode {
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn child(&self, segment: &str) -> Option<&NamespaceNode> {
        self.children.get(segment)
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }
}

/// The tree of dotted paths classes are published under. Nodes are created
/// on demand and never replaced, so publishing `A.B` keeps everything already
/// living under `A.B.*`.
#[derive(Debug, Default)]
pub struct Namespace {
    root: NamespaceNode,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    /// Walks `segments`, creating missing nodes.
    pub fn ensure(&mut self, segments: &[String]) -> &mut NamespaceNode {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node
    }

    pub fn node(&self, segments: &[String]) -> Option<&NamespaceNode> {
        let mut node = &self.root;
        for segment in segments {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    pub fn lookup(&self, name: &QualifiedName) -> Option<Value> {
        self.node(name.segments()).and_then(|n| n.value.clone())
    }

    /// Stores `value` at `name`, returning what was there before.
    pub fn publish(&mut self, name: &QualifiedName, value: Value) -> Option<Value> {
        self.ensure(name.segments()).value.replace(value)
    }
}
