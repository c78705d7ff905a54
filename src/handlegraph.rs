use std::sync::atomic::{self, AtomicBool};

use crate::error::{HandleGraphError, Result};
use crate::handle::{canonical_edge, Direction, Edge, Handle, NodeId};

pub mod iter;

pub use self::iter::*;

/// Trait encapsulating the immutable aspects of a handlegraph.
///
/// Implementations supply the primitives (`follow_edges`,
/// `for_each_handle`, and the node accessors); everything that can be
/// derived from those, such as degree, edge canonicalization, and
/// whole-graph edge enumeration, is provided.
///
/// The handle accessors `get_id`, `get_is_reverse`, and `flip` default
/// to the packed encoding of [`Handle`]. A backend that lays out its
/// handles differently overrides all three, and the derived methods
/// follow.
pub trait HandleGraph {
    fn has_node(&self, node_id: NodeId) -> bool;

    /// The length of the sequence of a given node
    fn length(&self, handle: Handle) -> usize;

    /// Returns the sequence of a node in the handle's local forward
    /// orientation. Copies the sequence, as the sequence in the graph
    /// may be reversed depending on orientation.
    fn sequence(&self, handle: Handle) -> Vec<u8>;

    fn subsequence(
        &self,
        handle: Handle,
        index: usize,
        size: usize,
    ) -> Vec<u8> {
        self.sequence(handle)[index..index + size].into()
    }

    fn base(&self, handle: Handle, index: usize) -> u8 {
        self.sequence(handle)[index]
    }

    /// The smallest node ID in the graph, or 0 if the graph is empty.
    fn min_node_id(&self) -> NodeId;

    /// The largest node ID in the graph, or 0 if the graph is empty.
    fn max_node_id(&self) -> NodeId;

    /// Return the total number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Visit every handle directly connected to the given side of
    /// `handle`. Handles found going left are oriented so that they
    /// lead into `handle`, those found going right so that `handle`
    /// leads into them.
    ///
    /// `f` returns `false` to stop; the method returns `false` if it
    /// was stopped early.
    fn follow_edges<F>(&self, handle: Handle, dir: Direction, f: F) -> bool
    where
        F: FnMut(Handle) -> bool;

    /// Visit every node exactly once, as its forward handle. Returns
    /// `false` if `f` stopped the iteration.
    fn for_each_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(Handle) -> bool;

    /// Like `for_each_handle`, but the implementation may invoke `f`
    /// from several threads at once. Stopping is best effort.
    ///
    /// The default implementation is sequential.
    fn for_each_handle_par<F>(&self, f: F) -> bool
    where
        F: Fn(Handle) -> bool + Sync + Send,
    {
        self.for_each_handle(f)
    }

    #[inline]
    fn get_id(&self, handle: Handle) -> NodeId {
        handle.id()
    }

    #[inline]
    fn get_is_reverse(&self, handle: Handle) -> bool {
        handle.is_reverse()
    }

    #[inline]
    fn flip(&self, handle: Handle) -> Handle {
        handle.flip()
    }

    #[inline]
    fn forward(&self, handle: Handle) -> Handle {
        if self.get_is_reverse(handle) {
            self.flip(handle)
        } else {
            handle
        }
    }

    /// The number of handles attached to the given side of `handle`.
    fn degree(&self, handle: Handle, dir: Direction) -> usize {
        let mut count = 0;
        self.follow_edges(handle, dir, |_| {
            count += 1;
            true
        });
        count
    }

    fn has_edge(&self, left: Handle, right: Handle) -> bool {
        let mut found = false;
        self.follow_edges(left, Direction::Right, |next| {
            found = next == right;
            !found
        });
        found
    }

    /// Return the total number of edges in the graph
    fn edge_count(&self) -> usize {
        let mut count = 0;
        self.for_each_edge(|_| {
            count += 1;
            true
        });
        count
    }

    /// Sum up all the sequences in the graph
    fn total_length(&self) -> usize {
        let mut total = 0;
        self.for_each_handle(|handle| {
            total += self.length(handle);
            true
        });
        total
    }

    /// Construct the canonical edge for the traversal `left -> right`.
    /// Both directed views of the same connection, `(left, right)`
    /// and `(flip(right), flip(left))`, produce the same edge.
    #[inline]
    fn edge_handle(&self, left: Handle, right: Handle) -> Edge {
        canonical_edge(left, right, |h| self.flip(h))
    }

    /// Given an edge and one of the handles it can be entered from,
    /// return the handle on the other side, oriented so that `left`
    /// leads into it.
    fn traverse_edge_handle(&self, edge: Edge, left: Handle) -> Result<Handle> {
        let Edge(first, second) = edge;
        if left == first {
            Ok(second)
        } else if left == self.flip(second) {
            Ok(self.flip(first))
        } else {
            Err(HandleGraphError::InvalidParticipant {
                left_id: self.get_id(first),
                left_rev: self.get_is_reverse(first),
                right_id: self.get_id(second),
                right_rev: self.get_is_reverse(second),
                handle_id: self.get_id(left),
                handle_rev: self.get_is_reverse(left),
            })
        }
    }

    /// Visit every edge in the graph exactly once, in canonical form.
    /// For each node, the edges on its right side are visited before
    /// those on its left side.
    ///
    /// `f` returns `false` to stop; the method returns `false` if it
    /// was stopped early.
    fn for_each_edge<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Edge) -> bool,
    {
        self.for_each_handle(|handle| visit_handle_edges(self, handle, &mut f))
    }

    /// Parallel version of `for_each_edge`. Edges are not ordered
    /// across nodes. After `f` returns `false` no further nodes are
    /// started, but edges from nodes already in progress may still
    /// be visited.
    fn for_each_edge_par<F>(&self, f: F) -> bool
    where
        Self: Sync,
        F: Fn(Edge) -> bool + Sync + Send,
    {
        let stop = AtomicBool::new(false);

        log::debug!("enumerating edges in parallel");

        self.for_each_handle_par(|handle| {
            if stop.load(atomic::Ordering::Relaxed) {
                return false;
            }
            let keep_going = visit_handle_edges(self, handle, &mut &f);
            if !keep_going {
                stop.store(true, atomic::Ordering::Relaxed);
            }
            keep_going
        }) && !stop.load(atomic::Ordering::Relaxed)
    }

    /// Visit every edge, in parallel if `parallel` is set.
    fn for_each_edge_with<F>(&self, f: F, parallel: bool) -> bool
    where
        Self: Sync,
        F: Fn(Edge) -> bool + Sync + Send,
    {
        if parallel {
            self.for_each_edge_par(f)
        } else {
            self.for_each_edge(f)
        }
    }
}

/// Visits the edges discovered from a single forward handle, keeping
/// only those this node is responsible for. An edge between two
/// distinct nodes is reported by the node with the lower ID. For
/// self-loops, every rightward loop is taken from the right side, and
/// only the loop joining the node's left side to itself is taken from
/// the left side, so each loop is seen once.
fn visit_handle_edges<G, F>(graph: &G, handle: Handle, f: &mut F) -> bool
where
    G: HandleGraph + ?Sized,
    F: FnMut(Edge) -> bool,
{
    let id = graph.get_id(handle);
    let mut keep_going = true;

    graph.follow_edges(handle, Direction::Right, |next| {
        if id <= graph.get_id(next) {
            keep_going = f(graph.edge_handle(handle, next));
        }
        keep_going
    });

    if keep_going {
        graph.follow_edges(handle, Direction::Left, |prev| {
            let prev_id = graph.get_id(prev);
            if id < prev_id || (id == prev_id && graph.get_is_reverse(prev)) {
                keep_going = f(graph.edge_handle(prev, handle));
            }
            keep_going
        });
    }

    keep_going
}
