use smallvec::SmallVec;

/// Index of a node in a [`NodeArena`](super::NodeArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// `None` for [`NodeIndex::NONE`].
    #[inline]
    pub fn some(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

/// Ordered child list. Most lists in declaration files are short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    pub nodes: SmallVec<[NodeIndex; 4]>,
}

impl NodeList {
    pub fn new() -> Self {
        NodeList::default()
    }

    pub fn from_vec(nodes: Vec<NodeIndex>) -> Self {
        NodeList {
            nodes: SmallVec::from_vec(nodes),
        }
    }

    pub fn push(&mut self, node: NodeIndex) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeIndex> + ExactSizeIterator + '_ {
        self.nodes.iter().copied()
    }

    pub fn first(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }
}

impl FromIterator<NodeIndex> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> Self {
        NodeList {
            nodes: iter.into_iter().collect(),
        }
    }
}
