use crate::handle::{Edge, Handle, NodeId, OccurrenceHandle, PathHandle};
use crate::handlegraph::HandleGraph;
use crate::pathhandlegraph::PathHandleGraph;

/// Encapsulates adding handles and edges to a handlegraph.
pub trait AdditiveHandleGraph {
    /// Add a node with the provided sequence to the graph, letting
    /// the graph pick the node ID.
    fn append_handle(&mut self, sequence: &[u8]) -> Handle;

    /// Add a node with the provided sequence and ID to the graph.
    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle;

    /// Insert an edge into the graph. Implementations may panic if
    /// both handles of the edge do not already exist.
    fn create_edge(&mut self, edge: Edge);
}

/// Encapsulates removing handles and edges to a handlegraph, and
/// clearing the entire graph.
pub trait SubtractiveHandleGraph {
    /// Remove a handle from the graph, returning `true` if the handle
    /// was removed. Removing a node that is still on a path is not
    /// supported by the interface; implementations may refuse.
    fn remove_handle(&mut self, handle: Handle) -> bool;

    /// Remove an edge from the graph, returning `true` if the edge
    /// existed.
    fn remove_edge(&mut self, edge: Edge) -> bool;

    fn clear_graph(&mut self);
}

/// Encapsulates creating, destroying, and extending embedded paths.
pub trait MutablePaths {
    fn create_path_handle(&mut self, name: &[u8], circular: bool)
        -> PathHandle;

    /// Remove the path, returning `true` if it existed.
    fn destroy_path(&mut self, path: PathHandle) -> bool;

    /// Add a step on `handle` to the end of the path.
    fn append_occurrence(
        &mut self,
        path: PathHandle,
        handle: Handle,
    ) -> OccurrenceHandle;

    /// Add a step on `handle` to the start of the path.
    fn prepend_occurrence(
        &mut self,
        path: PathHandle,
        handle: Handle,
    ) -> OccurrenceHandle;
}

/// A graph whose nodes and edges can be added to.
///
/// Automatically implemented for any graph with the required
/// capabilities.
pub trait MutableHandleGraph: HandleGraph + AdditiveHandleGraph {}

impl<T> MutableHandleGraph for T where T: HandleGraph + AdditiveHandleGraph {}

/// A graph whose nodes and edges can be both added and removed.
pub trait DeletableHandleGraph:
    MutableHandleGraph + SubtractiveHandleGraph
{
}

impl<T> DeletableHandleGraph for T where
    T: MutableHandleGraph + SubtractiveHandleGraph
{
}

/// A graph with mutable paths and mutable nodes and edges.
pub trait MutablePathMutableHandleGraph:
    MutableHandleGraph + PathHandleGraph + MutablePaths
{
}

impl<T> MutablePathMutableHandleGraph for T where
    T: MutableHandleGraph + PathHandleGraph + MutablePaths
{
}

/// A graph with mutable paths whose nodes and edges can also be
/// removed. Removing material that a path still covers is undefined
/// behavior for the interface.
pub trait MutablePathDeletableHandleGraph:
    MutablePathMutableHandleGraph + DeletableHandleGraph
{
}

impl<T> MutablePathDeletableHandleGraph for T where
    T: MutablePathMutableHandleGraph + DeletableHandleGraph
{
}
