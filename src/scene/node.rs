use crate::scene::NodeHandle;

/// A minimal scene node.
///
/// Only hierarchy lives here. The pose and the animation driver are
/// stored in the [`Scene`](crate::scene::Scene)'s component maps, keyed by
/// the node's handle, and are dropped with the node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles, in draw order
    pub(crate) children: Vec<NodeHandle>,
    /// Hidden nodes (and their subtrees) are not arranged
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
