/*!

`HashGraph` node definition

*/

use crate::handle::Handle;

/// A node and its edges. `right_edges` holds the handles that the
/// forward orientation of this node leads into, `left_edges` those
/// that the reverse orientation leads into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub sequence: Vec<u8>,
    pub left_edges: Vec<Handle>,
    pub right_edges: Vec<Handle>,
}

impl Node {
    pub fn new(sequence: &[u8]) -> Node {
        Node {
            sequence: sequence.into(),
            left_edges: vec![],
            right_edges: vec![],
        }
    }

    /// The edge list to follow when leaving this node through
    /// `handle`'s right side.
    #[inline]
    pub(super) fn outgoing(&self, handle: Handle) -> &[Handle] {
        if handle.is_reverse() {
            &self.left_edges
        } else {
            &self.right_edges
        }
    }

    #[inline]
    pub(super) fn outgoing_mut(&mut self, handle: Handle) -> &mut Vec<Handle> {
        if handle.is_reverse() {
            &mut self.left_edges
        } else {
            &mut self.right_edges
        }
    }
}
