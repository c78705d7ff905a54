use bstr::ByteSlice;
use fnv::FnvHashMap;
use rayon::prelude::*;

use log::{debug, trace, warn};

use crate::{
    handle::{Direction, Edge, Handle, NodeId, OccurrenceHandle, PathHandle},
    handlegraph::*,
    mutablehandlegraph::*,
    pathhandlegraph::PathHandleGraph,
    util::dna,
};

use super::{Node, Path};

/// A handlegraph implementation using `HashMap` to represent the
/// graph topology and nodes, and each path as a `Vec` of nodes.
///
/// Occurrence handles are encoded as `[path, step index]`, so
/// prepending to a path shifts the occurrences already handed out for
/// it.
#[derive(Debug, Clone)]
pub struct HashGraph {
    pub max_id: NodeId,
    pub min_id: NodeId,
    pub graph: FnvHashMap<NodeId, Node>,
    pub path_id: FnvHashMap<Vec<u8>, PathHandle>,
    pub paths: FnvHashMap<PathHandle, Path>,
    next_path_id: u64,
}

impl Default for HashGraph {
    fn default() -> HashGraph {
        HashGraph {
            max_id: NodeId::from(0u64),
            min_id: NodeId::from(std::u64::MAX),
            graph: Default::default(),
            path_id: Default::default(),
            paths: Default::default(),
            next_path_id: 0,
        }
    }
}

impl HashGraph {
    pub fn new() -> HashGraph {
        Default::default()
    }

    pub fn get_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.graph.get(node_id)
    }

    pub fn get_node_unchecked(&self, node_id: &NodeId) -> &Node {
        self.graph.get(node_id).unwrap_or_else(|| {
            panic!("Tried getting a node that doesn't exist, ID: {:?}", node_id)
        })
    }

    fn get_node_mut_unchecked(&mut self, node_id: &NodeId) -> &mut Node {
        self.graph.get_mut(node_id).unwrap_or_else(|| {
            panic!("Tried getting a node that doesn't exist, ID: {:?}", node_id)
        })
    }

    pub fn get_path(&self, path: &PathHandle) -> Option<&Path> {
        self.paths.get(path)
    }

    pub fn get_path_unchecked(&self, path: &PathHandle) -> &Path {
        self.paths.get(path).unwrap_or_else(|| {
            panic!("Tried to look up nonexistent path: {}", path)
        })
    }

    fn get_path_mut_unchecked(&mut self, path: &PathHandle) -> &mut Path {
        self.paths.get_mut(path).unwrap_or_else(|| {
            panic!("Tried to look up nonexistent path: {}", path)
        })
    }

    pub fn is_circular(&self, path: PathHandle) -> bool {
        self.get_path_unchecked(&path).is_circular
    }

    /// The handles that `handle` leads into, stored on its node.
    #[inline]
    fn outgoing(&self, handle: Handle) -> &[Handle] {
        self.get_node_unchecked(&handle.id()).outgoing(handle)
    }

    /// The neighbor list to walk for the given side of `handle`, and
    /// whether its entries must be flipped. Going left is the same as
    /// going right from the flipped handle.
    #[inline]
    fn side_edges(&self, handle: Handle, dir: Direction) -> (&[Handle], bool) {
        match dir {
            Direction::Right => (self.outgoing(handle), false),
            Direction::Left => (self.outgoing(handle.flip()), true),
        }
    }

    /// Removes a single stored traversal `from -> to`.
    fn remove_outgoing(&mut self, from: Handle, to: Handle) -> bool {
        let edges = self.get_node_mut_unchecked(&from.id()).outgoing_mut(from);
        if let Some(ix) = edges.iter().position(|&h| h == to) {
            edges.remove(ix);
            true
        } else {
            false
        }
    }

    fn occurrence_step(&self, occurrence: OccurrenceHandle) -> (&Path, usize) {
        let [path, ix] = occurrence.as_integers();
        let path = self.get_path_unchecked(&PathHandle::from_integer(path));
        (path, ix as usize)
    }

    fn refresh_id_range(&mut self) {
        self.min_id = NodeId::from(std::u64::MAX);
        self.max_id = NodeId::from(0u64);
        for &id in self.graph.keys() {
            self.min_id = self.min_id.min(id);
            self.max_id = self.max_id.max(id);
        }
    }
}

impl HandleGraph for HashGraph {
    #[inline]
    fn has_node(&self, node_id: NodeId) -> bool {
        self.graph.contains_key(&node_id)
    }

    #[inline]
    fn length(&self, handle: Handle) -> usize {
        self.get_node_unchecked(&handle.id()).sequence.len()
    }

    fn sequence(&self, handle: Handle) -> Vec<u8> {
        let seq = &self.get_node_unchecked(&handle.id()).sequence;
        if handle.is_reverse() {
            dna::rev_comp(seq)
        } else {
            seq.clone()
        }
    }

    #[inline]
    fn min_node_id(&self) -> NodeId {
        if self.graph.is_empty() {
            NodeId::from(0u64)
        } else {
            self.min_id
        }
    }

    #[inline]
    fn max_node_id(&self) -> NodeId {
        self.max_id
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.graph.len()
    }

    fn follow_edges<F>(&self, handle: Handle, dir: Direction, f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        let (edges, flip) = self.side_edges(handle, dir);
        NeighborIter::new(edges.iter(), flip).all(f)
    }

    fn for_each_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        NodeIdRefHandles::new(self.graph.keys()).all(f)
    }

    fn for_each_handle_par<F>(&self, f: F) -> bool
    where
        F: Fn(Handle) -> bool + Sync + Send,
    {
        self.graph
            .par_iter()
            .all(|(id, _)| f(Handle::pack(*id, false)))
    }
}

impl<'a> IntoHandles for &'a HashGraph {
    type Handles = NodeIdRefHandles<
        'a,
        std::collections::hash_map::Keys<'a, NodeId, Node>,
    >;

    #[inline]
    fn handles(self) -> Self::Handles {
        NodeIdRefHandles::new(self.graph.keys())
    }
}

impl<'a> IntoNeighbors for &'a HashGraph {
    type Neighbors = NeighborIter<'a, std::slice::Iter<'a, Handle>>;

    #[inline]
    fn neighbors(self, handle: Handle, dir: Direction) -> Self::Neighbors {
        let (edges, flip) = self.side_edges(handle, dir);
        NeighborIter::new(edges.iter(), flip)
    }
}

impl AdditiveHandleGraph for HashGraph {
    fn append_handle(&mut self, sequence: &[u8]) -> Handle {
        self.create_handle(sequence, self.max_id.0 + 1)
    }

    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle {
        let id: NodeId = node_id.into();

        if id.is_zero() {
            panic!("Node ID 0 is not allowed in the HashGraph");
        }
        if self.graph.contains_key(&id) {
            panic!("Tried to create a node that already exists, ID: {}", id);
        }

        self.graph.insert(id, Node::new(sequence));
        self.max_id = std::cmp::max(self.max_id, id);
        self.min_id = std::cmp::min(self.min_id, id);
        trace!("created node {} of length {}", id, sequence.len());
        Handle::pack(id, false)
    }

    fn create_edge(&mut self, edge: Edge) {
        let Edge(left, right) = edge;

        if self.has_edge(left, right) {
            return;
        }

        self.get_node_mut_unchecked(&left.id())
            .outgoing_mut(left)
            .push(right);

        // A reversing self-loop is its own reverse traversal, and is
        // stored only once
        if left != right.flip() {
            self.get_node_mut_unchecked(&right.id())
                .outgoing_mut(right.flip())
                .push(left.flip());
        }

        trace!("created edge {} -> {}", left, right);
    }
}

impl SubtractiveHandleGraph for HashGraph {
    fn remove_handle(&mut self, handle: Handle) -> bool {
        let id = handle.id();
        if !self.has_node(id) {
            return false;
        }

        if self.paths.values().any(|path| path.contains_node(id)) {
            warn!("not removing node {}, it is still on a path", id);
            return false;
        }

        let handle = handle.forward();
        let mut edges: Vec<Edge> = Vec::new();
        self.follow_edges(handle, Direction::Right, |next| {
            edges.push(Edge(handle, next));
            true
        });
        self.follow_edges(handle, Direction::Left, |prev| {
            edges.push(Edge(prev, handle));
            true
        });

        for edge in edges {
            self.remove_edge(edge);
        }

        self.graph.remove(&id);
        if id == self.min_id || id == self.max_id {
            self.refresh_id_range();
        }
        debug!("removed node {}", id);
        true
    }

    /// Unlike `remove_handle`, edges are removed even if a path
    /// still walks across them.
    fn remove_edge(&mut self, edge: Edge) -> bool {
        let Edge(left, right) = edge;
        if !self.has_node(left.id()) || !self.has_node(right.id()) {
            return false;
        }

        let removed = self.remove_outgoing(left, right);
        if removed && left != right.flip() {
            self.remove_outgoing(right.flip(), left.flip());
        }
        removed
    }

    fn clear_graph(&mut self) {
        debug!(
            "clearing graph with {} nodes and {} paths",
            self.graph.len(),
            self.paths.len()
        );
        *self = Self::default();
    }
}

impl PathHandleGraph for HashGraph {
    #[inline]
    fn path_count(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    fn has_path(&self, name: &[u8]) -> bool {
        self.path_id.contains_key(name)
    }

    #[inline]
    fn get_path_handle(&self, name: &[u8]) -> Option<PathHandle> {
        self.path_id.get(name).copied()
    }

    fn get_path_name(&self, path: PathHandle) -> Vec<u8> {
        self.get_path_unchecked(&path).name.to_vec()
    }

    #[inline]
    fn occurrence_count(&self, path: PathHandle) -> usize {
        self.get_path_unchecked(&path).len()
    }

    #[inline]
    fn is_empty(&self, path: PathHandle) -> bool {
        self.get_path_unchecked(&path).is_empty()
    }

    #[inline]
    fn first_occurrence(&self, path: PathHandle) -> OccurrenceHandle {
        OccurrenceHandle::from_integers([path.as_integer(), 0])
    }

    #[inline]
    fn last_occurrence(&self, path: PathHandle) -> OccurrenceHandle {
        let last = self.occurrence_count(path).saturating_sub(1);
        OccurrenceHandle::from_integers([path.as_integer(), last as u64])
    }

    #[inline]
    fn has_next_occurrence(&self, occurrence: OccurrenceHandle) -> bool {
        let (path, ix) = self.occurrence_step(occurrence);
        ix + 1 < path.len()
    }

    #[inline]
    fn has_previous_occurrence(&self, occurrence: OccurrenceHandle) -> bool {
        let (_, ix) = self.occurrence_step(occurrence);
        ix > 0
    }

    #[inline]
    fn next_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> OccurrenceHandle {
        let [path, ix] = occurrence.as_integers();
        OccurrenceHandle::from_integers([path, ix + 1])
    }

    #[inline]
    fn previous_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> OccurrenceHandle {
        let [path, ix] = occurrence.as_integers();
        OccurrenceHandle::from_integers([path, ix - 1])
    }

    #[inline]
    fn get_handle_of_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> Handle {
        let (path, ix) = self.occurrence_step(occurrence);
        path.nodes[ix]
    }

    #[inline]
    fn get_path_handle_of_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> PathHandle {
        PathHandle::from_integer(occurrence.as_integers()[0])
    }

    fn for_each_path_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(PathHandle) -> bool,
    {
        self.paths.keys().copied().all(f)
    }
}

impl MutablePaths for HashGraph {
    fn create_path_handle(
        &mut self,
        name: &[u8],
        circular: bool,
    ) -> PathHandle {
        if let Some(&existing) = self.path_id.get(name) {
            warn!("path {} already exists", name.as_bstr());
            return existing;
        }

        let path_id = PathHandle::from_integer(self.next_path_id);
        self.next_path_id += 1;

        self.path_id.insert(name.to_vec(), path_id);
        self.paths.insert(path_id, Path::new(name, path_id, circular));
        debug!("created path {} with handle {}", name.as_bstr(), path_id);
        path_id
    }

    fn destroy_path(&mut self, path: PathHandle) -> bool {
        if let Some(removed) = self.paths.remove(&path) {
            self.path_id.remove(removed.name.as_slice());
            debug!("destroyed path {}", removed.name);
            true
        } else {
            false
        }
    }

    fn append_occurrence(
        &mut self,
        path: PathHandle,
        handle: Handle,
    ) -> OccurrenceHandle {
        let path_ref = self.get_path_mut_unchecked(&path);
        path_ref.nodes.push(handle);
        let ix = path_ref.nodes.len() - 1;
        OccurrenceHandle::from_integers([path.as_integer(), ix as u64])
    }

    fn prepend_occurrence(
        &mut self,
        path: PathHandle,
        handle: Handle,
    ) -> OccurrenceHandle {
        self.get_path_mut_unchecked(&path).nodes.insert(0, handle);
        OccurrenceHandle::from_integers([path.as_integer(), 0])
    }
}
