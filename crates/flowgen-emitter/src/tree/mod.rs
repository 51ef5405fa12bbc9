//! Declaration tree: the statements of one file grouped the way they print.
//!
//! TypeScript spreads one logical declaration over several statements
//! (function overloads, re-opened interfaces and namespaces, a class and the
//! namespace that adds statics to it). The tree collects each group under a
//! single node keyed by its flattened name, so the printer emits it once.
//!
//! Keys are stable strings (`fn:Outer$f`, `ns:Outer`, `var#12`) and children
//! keep insertion order, which is source order.

mod builder;

use flowgen_parser::NodeIndex;
use indexmap::IndexMap;

/// Name printed for a function declaration without one.
pub const UNNAMED_DECLARATION: &str = "$Flowgen$Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeNodeId(pub u32);

#[derive(Debug, Clone)]
pub enum TreeNodeKind {
    Root,
    /// `declare module 'name'`, including the `global` pseudo-module.
    Module { name: String },
    /// Every re-opening of one namespace. `qualified` is the flattened
    /// `Outer$Inner` name its members print under.
    Namespace {
        name: String,
        qualified: String,
        declarations: Vec<NodeIndex>,
    },
    /// Interface, alias, class, enum or variable statement. Re-opened
    /// interfaces collect in `merged`.
    Declaration { node: NodeIndex, merged: Vec<NodeIndex> },
    /// Overloads of one function, in source order.
    FunctionGroup {
        name: String,
        qualified: String,
        overloads: Vec<NodeIndex>,
    },
    Import { node: NodeIndex },
    Export { node: NodeIndex },
    ExportAssignment { node: NodeIndex },
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub kind: TreeNodeKind,
    pub children: IndexMap<String, TreeNodeId>,
    /// Folded into a sibling: an absorbed function group prints nothing, an
    /// absorbed namespace prints its members but no value object.
    pub suppressed: bool,
    /// The sibling this node folds in (namespace for a class or enum,
    /// function group for a namespace).
    pub absorbed: Option<TreeNodeId>,
}

impl TreeNode {
    fn new(kind: TreeNodeKind) -> TreeNode {
        TreeNode {
            kind,
            children: IndexMap::new(),
            suppressed: false,
            absorbed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeArena {
    nodes: Vec<TreeNode>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub const ROOT: TreeNodeId = TreeNodeId(0);

    pub fn new() -> TreeArena {
        TreeArena {
            nodes: vec![TreeNode::new(TreeNodeKind::Root)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root is always present.
        false
    }

    pub fn get(&self, id: TreeNodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: TreeNodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn add(&mut self, kind: TreeNodeKind) -> TreeNodeId {
        let id = TreeNodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode::new(kind));
        id
    }

    /// Add `kind` as the child `key` of `parent`.
    pub fn add_child(&mut self, parent: TreeNodeId, key: String, kind: TreeNodeKind) -> TreeNodeId {
        let id = self.add(kind);
        if let Some(node) = self.get_mut(parent) {
            node.children.insert(key, id);
        }
        id
    }

    pub fn child(&self, parent: TreeNodeId, key: &str) -> Option<TreeNodeId> {
        self.get(parent)?.children.get(key).copied()
    }

    /// Children of `parent` in insertion order.
    pub fn children(&self, parent: TreeNodeId) -> Vec<TreeNodeId> {
        self.get(parent)
            .map(|node| node.children.values().copied().collect())
            .unwrap_or_default()
    }

    /// Pair each namespace with the class, enum or function group of the
    /// same flattened name under the same parent. A class wins over an enum,
    /// an enum over a function group.
    pub fn absorb_namespaces(&mut self) {
        for index in 0..self.nodes.len() {
            let parent = TreeNodeId(index as u32);
            let namespaces: Vec<(String, TreeNodeId)> = self.nodes[index]
                .children
                .iter()
                .filter_map(|(key, id)| {
                    key.strip_prefix("ns:")
                        .map(|qualified| (qualified.to_string(), *id))
                })
                .collect();
            for (qualified, namespace) in namespaces {
                let owner = self
                    .child(parent, &format!("class:{qualified}"))
                    .or_else(|| self.child(parent, &format!("enum:{qualified}")));
                if let Some(owner) = owner {
                    self.link(owner, namespace);
                } else if let Some(group) = self.child(parent, &format!("fn:{qualified}")) {
                    self.link(namespace, group);
                }
            }
        }
    }

    fn link(&mut self, owner: TreeNodeId, absorbed: TreeNodeId) {
        if let Some(node) = self.get_mut(owner) {
            node.absorbed = Some(absorbed);
        }
        if let Some(node) = self.get_mut(absorbed) {
            node.suppressed = true;
        }
    }
}

#[cfg(test)]
#[path = "../tests/tree_tests.rs"]
mod tree_tests;
