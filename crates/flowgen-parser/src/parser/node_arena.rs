//! NodeArena creation methods.

use super::base::NodeIndex;
use super::node::{ModifierFlags, Node, NodeArena, NodeData, NodeFlags};

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node covering `pos..end`.
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        self.add_node(Node {
            pos,
            end,
            flags: NodeFlags::empty(),
            modifiers: ModifierFlags::empty(),
            data,
        })
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    /// Append a synthesized node. Synthesized nodes borrow the source range of
    /// the node they replace so diagnostics still point somewhere useful.
    pub fn add_synthesized(&mut self, like: NodeIndex, data: NodeData) -> NodeIndex {
        let (pos, end) = self.get(like).map(|n| (n.pos, n.end)).unwrap_or((0, 0));
        self.add_node(Node {
            pos,
            end,
            flags: NodeFlags::SYNTHESIZED,
            modifiers: ModifierFlags::empty(),
            data,
        })
    }

    pub fn add_identifier(&mut self, like: NodeIndex, text: impl Into<String>) -> NodeIndex {
        self.add_synthesized(like, NodeData::Identifier { text: text.into() })
    }

    /// Copy of `original` with its payload, flags and modifiers replaced.
    pub fn add_rewritten(
        &mut self,
        original: NodeIndex,
        flags: NodeFlags,
        modifiers: ModifierFlags,
        data: NodeData,
    ) -> NodeIndex {
        let (pos, end) = self
            .get(original)
            .map(|n| (n.pos, n.end))
            .unwrap_or((0, 0));
        self.add_node(Node {
            pos,
            end,
            flags,
            modifiers,
            data,
        })
    }

    pub(crate) fn set_flags(&mut self, index: NodeIndex, flags: NodeFlags) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    pub(crate) fn set_modifiers(&mut self, index: NodeIndex, modifiers: ModifierFlags) {
        if let Some(node) = self.get_mut(index) {
            node.modifiers |= modifiers;
        }
    }
}
