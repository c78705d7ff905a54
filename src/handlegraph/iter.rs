//! Iterator-based access to handles, neighbors, and edges.
//!
//! [`EdgesIter`] is the lazy counterpart to
//! [`HandleGraph::for_each_edge`](super::HandleGraph::for_each_edge):
//! it produces the same edges, in the same order, for any graph
//! reference that can iterate over its handles and their neighbors.
//! The caller stops early by simply dropping the iterator.
//!
//! These iterators work on the packed [`Handle`] encoding directly.

use crate::handle::{Direction, Edge, Handle, NodeId};

/// A graph reference that can produce an iterator over all of its
/// nodes, as forward handles.
pub trait IntoHandles: Sized {
    type Handles: Iterator<Item = Handle>;

    fn handles(self) -> Self::Handles;
}

/// A graph reference that can produce an iterator over the neighbors
/// of a handle, oriented the same way as in
/// [`HandleGraph::follow_edges`](super::HandleGraph::follow_edges).
pub trait IntoNeighbors: Sized {
    type Neighbors: Iterator<Item = Handle>;

    fn neighbors(self, handle: Handle, dir: Direction) -> Self::Neighbors;
}

/// Lazy iteration over all edges; implemented for every graph
/// reference that supports both handle and neighbor iteration.
pub trait IntoEdges: IntoHandles + IntoNeighbors + Copy {
    #[inline]
    fn edges(self) -> EdgesIter<Self> {
        EdgesIter::new(self)
    }
}

impl<G> IntoEdges for G where G: IntoHandles + IntoNeighbors + Copy {}

/// Iterator adapter to create an Iterator over `Handle`s from an
/// iterator over &NodeId, in a way that can be used as the `Handles`
/// type in implementations of [`IntoHandles`].
pub struct NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    iter: I,
}

impl<'a, I> NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    #[inline]
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<'a, I> Iterator for NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        let id = *self.iter.next()?;
        Some(Handle::pack(id, false))
    }
}

/// Iterator adapter over an iterator of (borrowed) `Handle`s,
/// producing owned `Handle`s with their orientation flipped depending
/// on the setting of the iterator.
///
/// Useful for ensuring that handles produced by an [`IntoNeighbors`]
/// implementation are oriented correctly.
pub struct NeighborIter<'a, I>
where
    I: Iterator<Item = &'a Handle>,
{
    flip: bool,
    iter: I,
}

impl<'a, I> NeighborIter<'a, I>
where
    I: Iterator<Item = &'a Handle>,
{
    #[inline]
    pub fn new(iter: I, flip: bool) -> Self {
        Self { flip, iter }
    }
}

impl<'a, I> Iterator for NeighborIter<'a, I>
where
    I: Iterator<Item = &'a Handle>,
{
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        let next = self.iter.next().copied();
        if self.flip {
            next.map(Handle::flip)
        } else {
            next
        }
    }
}

/// The edges of a single handle; right side first, then left side,
/// using the same filter as `for_each_edge`.
struct HandleEdgesIter<I>
where
    I: Iterator<Item = Handle>,
{
    left_neighbors: Option<I>,
    right_neighbors: Option<I>,
    handle: Handle,
}

impl<I> HandleEdgesIter<I>
where
    I: Iterator<Item = Handle>,
{
    #[inline]
    fn new(handle: Handle, left: I, right: I) -> Self {
        Self {
            handle,
            left_neighbors: Some(left),
            right_neighbors: Some(right),
        }
    }

    #[inline]
    fn next_left_edge(&mut self) -> Option<Edge> {
        let left_neighbors = self.left_neighbors.as_mut()?;
        let id = self.handle.id();
        for prev in left_neighbors {
            if id < prev.id() || (id == prev.id() && prev.is_reverse()) {
                return Some(Edge::edge_handle(prev, self.handle));
            }
        }
        self.left_neighbors = None;
        None
    }

    #[inline]
    fn next_right_edge(&mut self) -> Option<Edge> {
        let right_neighbors = self.right_neighbors.as_mut()?;
        let id = self.handle.id();
        for next in right_neighbors {
            if id <= next.id() {
                return Some(Edge::edge_handle(self.handle, next));
            }
        }
        self.right_neighbors = None;
        None
    }
}

impl<I> Iterator for HandleEdgesIter<I>
where
    I: Iterator<Item = Handle>,
{
    type Item = Edge;

    #[inline]
    fn next(&mut self) -> Option<Edge> {
        if self.right_neighbors.is_some() {
            let next = self.next_right_edge();
            if next.is_some() {
                return next;
            }
        }
        self.next_left_edge()
    }
}

impl<I> std::iter::FusedIterator for HandleEdgesIter<I> where
    I: Iterator<Item = Handle>
{
}

/// Iterator over all edges of a graph that supports iteration over
/// all handles, and the neighbors of each handle.
pub struct EdgesIter<G>
where
    G: IntoNeighbors + IntoHandles + Copy,
{
    neighbors: Option<HandleEdgesIter<G::Neighbors>>,
    handles: G::Handles,
    graph: G,
}

impl<G> EdgesIter<G>
where
    G: IntoNeighbors + IntoHandles + Copy,
{
    #[inline]
    pub fn new(graph: G) -> Self {
        let handles = graph.handles();
        Self {
            graph,
            handles,
            neighbors: None,
        }
    }
}

impl<G> Iterator for EdgesIter<G>
where
    G: IntoNeighbors + IntoHandles + Copy,
{
    type Item = Edge;

    #[inline]
    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some(neighbors) = self.neighbors.as_mut() {
                if let Some(edge) = neighbors.next() {
                    return Some(edge);
                }
                self.neighbors = None;
            }

            let handle = self.handles.next()?;
            let left = self.graph.neighbors(handle, Direction::Left);
            let right = self.graph.neighbors(handle, Direction::Right);
            self.neighbors = Some(HandleEdgesIter::new(handle, left, right));
        }
    }
}
