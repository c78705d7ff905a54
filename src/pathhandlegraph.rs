use crate::handle::{Handle, OccurrenceHandle, PathHandle};
use crate::handlegraph::HandleGraph;

/// Immutable access to the paths embedded in a graph.
///
/// Implementations supply single-step navigation over occurrences;
/// emptiness checks and whole-path traversal are derived from those.
/// An [`OccurrenceHandle`] is only valid for the path it came from.
pub trait PathHandleGraph: HandleGraph {
    /// The number of embedded paths
    fn path_count(&self) -> usize;

    fn has_path(&self, name: &[u8]) -> bool;

    /// Get the path handle for the given name, if it exists
    fn get_path_handle(&self, name: &[u8]) -> Option<PathHandle>;

    fn get_path_name(&self, path: PathHandle) -> Vec<u8>;

    /// The number of occurrences (steps) on the path
    fn occurrence_count(&self, path: PathHandle) -> usize;

    /// Only valid if the path is not empty.
    fn first_occurrence(&self, path: PathHandle) -> OccurrenceHandle;

    /// Only valid if the path is not empty.
    fn last_occurrence(&self, path: PathHandle) -> OccurrenceHandle;

    fn has_next_occurrence(&self, occurrence: OccurrenceHandle) -> bool;

    fn has_previous_occurrence(&self, occurrence: OccurrenceHandle) -> bool;

    /// Only valid if `has_next_occurrence` is true.
    fn next_occurrence(&self, occurrence: OccurrenceHandle)
        -> OccurrenceHandle;

    /// Only valid if `has_previous_occurrence` is true.
    fn previous_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> OccurrenceHandle;

    /// The oriented node visited at the given occurrence
    fn get_handle_of_occurrence(&self, occurrence: OccurrenceHandle)
        -> Handle;

    fn get_path_handle_of_occurrence(
        &self,
        occurrence: OccurrenceHandle,
    ) -> PathHandle;

    /// Visit every path in the graph. Returns `false` if `f` stopped
    /// the iteration.
    fn for_each_path_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(PathHandle) -> bool;

    /// Whether the path has no occurrences. Defaults to checking the
    /// occurrence count; implementations with an expensive count and
    /// a cheap emptiness check should override this.
    fn is_empty(&self, path: PathHandle) -> bool {
        self.occurrence_count(path) == 0
    }

    /// Visit each occurrence on the path, in order from the first.
    fn for_each_occurrence<F>(&self, path: PathHandle, mut f: F)
    where
        F: FnMut(OccurrenceHandle),
    {
        if self.is_empty(path) {
            return;
        }

        let mut here = self.first_occurrence(path);
        f(here);
        while self.has_next_occurrence(here) {
            here = self.next_occurrence(here);
            f(here);
        }
    }

    /// Iterator over the occurrences on the path, in the same order
    /// as `for_each_occurrence`.
    fn occurrences(&self, path: PathHandle) -> OccurrencesIter<'_, Self> {
        OccurrencesIter::new(self, path)
    }

    /// Visit every occurrence, on every path, of the node `handle`
    /// belongs to. Returns `false` if `f` stopped the iteration.
    fn for_each_occurrence_on_handle<F>(
        &self,
        handle: Handle,
        mut f: F,
    ) -> bool
    where
        F: FnMut(OccurrenceHandle) -> bool,
    {
        let id = self.get_id(handle);
        self.for_each_path_handle(|path| {
            self.occurrences(path)
                .filter(|&occ| {
                    self.get_id(self.get_handle_of_occurrence(occ)) == id
                })
                .all(|occ| f(occ))
        })
    }
}

/// Forward iterator over the occurrences of one path. Not
/// restartable; each call to
/// [`PathHandleGraph::occurrences`] starts a new traversal.
pub struct OccurrencesIter<'a, G: ?Sized> {
    graph: &'a G,
    state: OccurState,
}

#[derive(Debug, Clone, Copy)]
enum OccurState {
    Start(PathHandle),
    At(OccurrenceHandle),
    Done,
}

impl<'a, G> OccurrencesIter<'a, G>
where
    G: PathHandleGraph + ?Sized,
{
    #[inline]
    pub fn new(graph: &'a G, path: PathHandle) -> Self {
        Self {
            graph,
            state: OccurState::Start(path),
        }
    }
}

impl<'a, G> Iterator for OccurrencesIter<'a, G>
where
    G: PathHandleGraph + ?Sized,
{
    type Item = OccurrenceHandle;

    #[inline]
    fn next(&mut self) -> Option<OccurrenceHandle> {
        let next = match self.state {
            OccurState::Start(path) if !self.graph.is_empty(path) => {
                self.graph.first_occurrence(path)
            }
            OccurState::At(here) if self.graph.has_next_occurrence(here) => {
                self.graph.next_occurrence(here)
            }
            _ => {
                self.state = OccurState::Done;
                return None;
            }
        };
        self.state = OccurState::At(next);
        Some(next)
    }
}

impl<'a, G> std::iter::FusedIterator for OccurrencesIter<'a, G> where
    G: PathHandleGraph + ?Sized
{
}
