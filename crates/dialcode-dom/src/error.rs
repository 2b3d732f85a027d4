use crate::node::NodeId;

/// Errors returned by [`Document`](crate::Document) mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The id does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// Appending would make a node its own ancestor.
    #[error("cannot insert {child:?} under its descendant {parent:?}")]
    Cycle { parent: NodeId, child: NodeId },
}
