//! Exercises the provided trait methods against a minimal backend
//! that only implements the required primitives, and packs its
//! handles with the orientation in the top bit instead of the bottom.

use handlegraph::{
    handle::{Direction, Edge, Handle, NodeId, OccurrenceHandle, PathHandle},
    handlegraph::HandleGraph,
    pathhandlegraph::PathHandleGraph,
};

use quickcheck::{quickcheck, Arbitrary, Gen};

use std::sync::atomic::{AtomicUsize, Ordering};

const REV: u64 = 1 << 63;

fn h(id: u64, rev: bool) -> Handle {
    Handle::from_integer(if rev { id | REV } else { id })
}

#[derive(Default)]
struct ListGraph {
    nodes: Vec<u64>,
    edges: Vec<Edge>,
    paths: Vec<(Vec<u8>, Vec<Handle>)>,
    first_calls: AtomicUsize,
}

impl ListGraph {
    fn new(nodes: &[u64], edges: &[Edge]) -> Self {
        ListGraph {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            ..Default::default()
        }
    }

    fn add_path(&mut self, name: &[u8], steps: &[Handle]) -> PathHandle {
        self.paths.push((name.to_vec(), steps.to_vec()));
        PathHandle::from_integer(self.paths.len() as u64 - 1)
    }

    fn successors(&self, handle: Handle) -> Vec<Handle> {
        let mut out = Vec::new();
        for &Edge(l, r) in self.edges.iter() {
            if l == handle {
                out.push(r);
            }
            if self.flip(r) == handle && l != self.flip(r) {
                out.push(self.flip(l));
            }
        }
        out
    }

    fn steps(&self, occ: OccurrenceHandle) -> (&[Handle], usize) {
        let [path, ix] = occ.as_integers();
        (self.paths[path as usize].1.as_slice(), ix as usize)
    }
}

impl HandleGraph for ListGraph {
    fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id.0)
    }

    fn length(&self, _handle: Handle) -> usize {
        1
    }

    fn sequence(&self, _handle: Handle) -> Vec<u8> {
        vec![b'N']
    }

    fn min_node_id(&self) -> NodeId {
        NodeId(self.nodes.iter().copied().min().unwrap_or(0))
    }

    fn max_node_id(&self) -> NodeId {
        NodeId(self.nodes.iter().copied().max().unwrap_or(0))
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn follow_edges<F>(&self, handle: Handle, dir: Direction, f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        match dir {
            Direction::Right => self.successors(handle).into_iter().all(f),
            Direction::Left => self
                .successors(self.flip(handle))
                .into_iter()
                .map(|x| self.flip(x))
                .all(f),
        }
    }

    fn for_each_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        self.nodes.iter().map(|&id| h(id, false)).all(f)
    }

    fn get_id(&self, handle: Handle) -> NodeId {
        NodeId(handle.as_integer() & !REV)
    }

    fn get_is_reverse(&self, handle: Handle) -> bool {
        handle.as_integer() & REV != 0
    }

    fn flip(&self, handle: Handle) -> Handle {
        Handle::from_integer(handle.as_integer() ^ REV)
    }
}

impl PathHandleGraph for ListGraph {
    fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn has_path(&self, name: &[u8]) -> bool {
        self.get_path_handle(name).is_some()
    }

    fn get_path_handle(&self, name: &[u8]) -> Option<PathHandle> {
        let ix = self.paths.iter().position(|(n, _)| n.as_slice() == name)?;
        Some(PathHandle::from_integer(ix as u64))
    }

    fn get_path_name(&self, path: PathHandle) -> Vec<u8> {
        self.paths[path.as_integer() as usize].0.clone()
    }

    fn occurrence_count(&self, path: PathHandle) -> usize {
        self.paths[path.as_integer() as usize].1.len()
    }

    fn first_occurrence(&self, path: PathHandle) -> OccurrenceHandle {
        self.first_calls.fetch_add(1, Ordering::SeqCst);
        assert!(self.occurrence_count(path) > 0);
        OccurrenceHandle::from_integers([path.as_integer(), 0])
    }

    fn last_occurrence(&self, path: PathHandle) -> OccurrenceHandle {
        let last = self.occurrence_count(path) - 1;
        OccurrenceHandle::from_integers([path.as_integer(), last as u64])
    }

    fn has_next_occurrence(&self, occ: OccurrenceHandle) -> bool {
        let (steps, ix) = self.steps(occ);
        ix + 1 < steps.len()
    }

    fn has_previous_occurrence(&self, occ: OccurrenceHandle) -> bool {
        self.steps(occ).1 > 0
    }

    fn next_occurrence(&self, occ: OccurrenceHandle) -> OccurrenceHandle {
        let [path, ix] = occ.as_integers();
        OccurrenceHandle::from_integers([path, ix + 1])
    }

    fn previous_occurrence(&self, occ: OccurrenceHandle) -> OccurrenceHandle {
        let [path, ix] = occ.as_integers();
        OccurrenceHandle::from_integers([path, ix - 1])
    }

    fn get_handle_of_occurrence(&self, occ: OccurrenceHandle) -> Handle {
        let (steps, ix) = self.steps(occ);
        steps[ix]
    }

    fn get_path_handle_of_occurrence(
        &self,
        occ: OccurrenceHandle,
    ) -> PathHandle {
        PathHandle::from_integer(occ.as_integers()[0])
    }

    fn for_each_path_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(PathHandle) -> bool,
    {
        (0..self.paths.len() as u64)
            .map(PathHandle::from_integer)
            .all(f)
    }
}

fn edges_of(graph: &ListGraph) -> Vec<Edge> {
    let mut edges = Vec::new();
    graph.for_each_edge(|e| {
        edges.push(e);
        true
    });
    edges
}

#[test]
fn one_edge_between_two_nodes() {
    let graph = ListGraph::new(&[1, 2, 3], &[Edge(h(1, false), h(2, false))]);

    let edges = edges_of(&graph);
    assert_eq!(edges, vec![graph.edge_handle(h(1, false), h(2, false))]);
    assert_eq!(graph.edge_count(), 1);

    assert_eq!(graph.degree(h(1, false), Direction::Right), 1);
    assert_eq!(graph.degree(h(2, false), Direction::Left), 1);
    assert_eq!(graph.degree(h(2, true), Direction::Right), 1);
    assert_eq!(graph.degree(h(3, false), Direction::Left), 0);
}

#[test]
fn right_side_edges_come_first() {
    let graph = ListGraph::new(
        &[1, 2, 3],
        &[Edge(h(3, false), h(1, false)), Edge(h(1, false), h(2, false))],
    );

    assert_eq!(
        edges_of(&graph),
        vec![
            graph.edge_handle(h(1, false), h(2, false)),
            graph.edge_handle(h(3, false), h(1, false)),
        ]
    );
}

#[test]
fn canonical_form_follows_backend_encoding() {
    let graph = ListGraph::default();
    let a = h(1, true);
    let b = h(2, false);

    assert_eq!(graph.flip(a), h(1, false));
    assert_eq!(graph.forward(a), h(1, false));
    assert_eq!(graph.flip(graph.flip(b)), b);

    let edge = graph.edge_handle(a, b);
    assert_eq!(edge, Edge(a, b));
    assert_eq!(graph.edge_handle(graph.flip(b), graph.flip(a)), edge);

    // The default encoding flips a different bit
    assert_ne!(Edge::edge_handle(a, b), edge);
}

#[test]
fn self_loops_counted_once() {
    let inserted = vec![
        Edge(h(1, false), h(1, false)),
        Edge(h(2, false), h(2, true)),
        Edge(h(3, true), h(3, false)),
        Edge(h(1, false), h(2, false)),
    ];
    let graph = ListGraph::new(&[1, 2, 3], &inserted);

    let mut found = edges_of(&graph);
    found.sort();

    let mut expected: Vec<_> = inserted
        .iter()
        .map(|&Edge(l, r)| graph.edge_handle(l, r))
        .collect();
    expected.sort();

    assert_eq!(found, expected);

    let mut degree_sum = 0;
    graph.for_each_handle(|handle| {
        degree_sum += graph.degree(handle, Direction::Left)
            + graph.degree(handle, Direction::Right);
        true
    });
    // two reversing loops, each on a single side
    assert_eq!(degree_sum, 2 * found.len() - 2);
}

#[test]
fn stop_propagates_from_left_pass() {
    // Node 1 only has edges on its left side
    let graph = ListGraph::new(
        &[1, 2, 3],
        &[Edge(h(2, true), h(1, false)), Edge(h(3, true), h(1, false))],
    );

    let mut visited = Vec::new();
    let finished = graph.for_each_edge(|e| {
        visited.push(e);
        false
    });

    assert!(!finished);
    assert_eq!(visited.len(), 1);
}

#[test]
fn parallel_default_is_sequential() {
    let graph = ListGraph::new(
        &[1, 2, 3],
        &[
            Edge(h(1, false), h(2, false)),
            Edge(h(2, false), h(3, true)),
            Edge(h(3, true), h(3, false)),
        ],
    );

    let order = std::sync::Mutex::new(Vec::new());
    assert!(graph.for_each_edge_par(|e| {
        order.lock().unwrap().push(e);
        true
    }));

    assert_eq!(order.into_inner().unwrap(), edges_of(&graph));
}

#[test]
fn traverse_reports_backend_ids() {
    let graph = ListGraph::default();
    let edge = graph.edge_handle(h(5, false), h(7, true));
    assert_eq!(edge, Edge(h(5, false), h(7, true)));

    let err = graph.traverse_edge_handle(edge, h(9, true)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot view edge 5 0 -> 7 1 from non-participant 9 1"
    );
}

#[test]
fn empty_path_never_asks_for_first() {
    let mut graph = ListGraph::default();
    let path = graph.add_path(b"empty", &[]);

    let mut visited = 0;
    graph.for_each_occurrence(path, |_| visited += 1);

    assert!(graph.is_empty(path));
    assert_eq!(visited, 0);
    assert_eq!(graph.occurrences(path).count(), 0);
    assert_eq!(graph.first_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn three_occurrences_in_order() {
    let mut graph = ListGraph::new(&[1, 2, 3], &[]);
    let steps = [h(1, false), h(2, true), h(3, false)];
    let path = graph.add_path(b"walk", &steps);

    let mut visited = Vec::new();
    graph.for_each_occurrence(path, |occ| visited.push(occ));

    let expected: Vec<_> = (0..3u64)
        .map(|ix| OccurrenceHandle::from_integers([path.as_integer(), ix]))
        .collect();
    assert_eq!(visited, expected);
    assert_eq!(graph.first_calls.load(Ordering::SeqCst), 1);

    let handles: Vec<_> = graph
        .occurrences(path)
        .map(|occ| graph.get_handle_of_occurrence(occ))
        .collect();
    assert_eq!(handles, steps.to_vec());

    // Iterator can be abandoned part way
    let first_two: Vec<_> = graph.occurrences(path).take(2).collect();
    assert_eq!(first_two, expected[..2].to_vec());

    assert!(graph.has_path(b"walk"));
    assert_eq!(graph.get_path_name(path), b"walk".to_vec());
}

#[derive(Debug, Clone)]
struct SmallGraph(Vec<Edge>);

impl Arbitrary for SmallGraph {
    fn arbitrary<G: Gen>(g: &mut G) -> SmallGraph {
        let count = usize::arbitrary(g) % 12;
        let edges = (0..count)
            .map(|_| {
                let l = h(1 + u64::arbitrary(g) % 5, bool::arbitrary(g));
                let r = h(1 + u64::arbitrary(g) % 5, bool::arbitrary(g));
                Edge(l, r)
            })
            .collect();
        SmallGraph(edges)
    }
}

quickcheck! {
    fn every_edge_enumerated_once(input: SmallGraph) -> bool {
        let probe = ListGraph::default();

        let mut unique: Vec<Edge> = input
            .0
            .iter()
            .map(|&Edge(l, r)| probe.edge_handle(l, r))
            .collect();
        unique.sort();
        unique.dedup();

        let graph = ListGraph::new(&[1, 2, 3, 4, 5], &unique);
        let mut found = edges_of(&graph);
        found.sort();

        found == unique
    }

    fn traverse_round_trips(a: u64, b: u64, ra: bool, rb: bool) -> bool {
        let graph = ListGraph::default();
        let edge = graph.edge_handle(h(a % 16, ra), h(b % 16, rb));
        let Edge(left, right) = edge;

        graph.traverse_edge_handle(edge, left) == Ok(right)
            && graph.traverse_edge_handle(edge, graph.flip(right))
                == Ok(graph.flip(left))
    }
}
