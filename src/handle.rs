use std::cmp::Ordering;

/// Newtype that represents a node in the graph, no matter the
/// graph implementation
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    #[inline]
    fn from(num: u64) -> Self {
        NodeId(num)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(num: usize) -> Self {
        NodeId(num as u64)
    }
}

impl From<i32> for NodeId {
    #[inline]
    fn from(num: i32) -> Self {
        NodeId(num as u64)
    }
}

impl From<NodeId> for u64 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A Handle is a node ID with an orientation, packed as a single
/// u64. The encoding is opaque: handles can be compared, hashed, and
/// converted to and from their integer representation, but there is
/// no arithmetic on them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Hash, Eq, Ord)]
#[repr(transparent)]
pub struct Handle(u64);

/// Returns the forward-oriented `Handle` for a `NodeId`
impl From<NodeId> for Handle {
    #[inline]
    fn from(id: NodeId) -> Handle {
        Handle::pack(id, false)
    }
}

/// Unpacks the `NodeId` from a `Handle`
impl From<Handle> for NodeId {
    #[inline]
    fn from(h: Handle) -> NodeId {
        h.id()
    }
}

impl Handle {
    #[inline]
    pub const fn as_integer(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_integer(i: u64) -> Self {
        Handle(i)
    }

    #[inline]
    pub fn unpack_number(self) -> u64 {
        self.as_integer() >> 1
    }

    #[inline]
    pub fn unpack_bit(self) -> bool {
        self.as_integer() & 1 != 0
    }

    /// Pack a node ID and an orientation into a handle. Panics if the
    /// node ID uses the 64th bit.
    #[inline]
    pub fn pack<T: Into<NodeId>>(id: T, is_reverse: bool) -> Handle {
        let id: NodeId = id.into();
        let uint: u64 = id.into();
        if uint < (0x1 << 63) {
            Handle::from_integer((uint << 1) | is_reverse as u64)
        } else {
            panic!(
                "Tried to create a handle with a node ID that filled 64 bits"
            )
        }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        NodeId(self.unpack_number())
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.unpack_bit()
    }

    #[inline]
    pub fn flip(self) -> Self {
        Handle(self.as_integer() ^ 1)
    }

    #[inline]
    pub fn forward(self) -> Self {
        if self.is_reverse() {
            self.flip()
        } else {
            self
        }
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let orient = if self.is_reverse() { '-' } else { '+' };
        write!(f, "{}{}", self.id(), orient)
    }
}

/// A directed traversal step; the right side of `.0` connects to the
/// left side of `.1`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Hash, Eq, Ord)]
pub struct Edge(pub Handle, pub Handle);

impl Edge {
    /// Construct an edge, taking the orientation of the handles into
    /// account, using the default handle encoding.
    #[inline]
    pub fn edge_handle(left: Handle, right: Handle) -> Edge {
        canonical_edge(left, right, Handle::flip)
    }

    #[inline]
    pub fn left(&self) -> Handle {
        self.0
    }

    #[inline]
    pub fn right(&self) -> Handle {
        self.1
    }
}

/// Picks the smaller of the two directed representations of the
/// undirected edge `left -> right`, i.e. of `(left, right)` and
/// `(flip(right), flip(left))`, comparing by integer encoding.
#[inline]
pub(crate) fn canonical_edge<F>(left: Handle, right: Handle, flip: F) -> Edge
where
    F: Fn(Handle) -> Handle,
{
    let flipped_right = flip(right);

    match left.cmp(&flipped_right) {
        Ordering::Greater => Edge(flipped_right, flip(left)),
        Ordering::Equal => {
            let flipped_left = flip(left);
            if right > flipped_left {
                Edge(flipped_right, flipped_left)
            } else {
                Edge(left, right)
            }
        }
        Ordering::Less => Edge(left, right),
    }
}

/// Enum for handle orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Opaque identifier of a single path embedded in a graph.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PathHandle(u64);

impl PathHandle {
    #[inline]
    pub const fn as_integer(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_integer(i: u64) -> Self {
        PathHandle(i)
    }
}

impl std::fmt::Display for PathHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of one step along a path. Consists of exactly
/// two backend-defined integers, and is only meaningful relative to
/// the path it was obtained from.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccurrenceHandle([u64; 2]);

impl OccurrenceHandle {
    #[inline]
    pub const fn as_integers(self) -> [u64; 2] {
        self.0
    }

    #[inline]
    pub const fn from_integers(ints: [u64; 2]) -> Self {
        OccurrenceHandle(ints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::{quickcheck, Arbitrary, Gen};

    // Small node IDs so that self-loops and shared nodes show up
    // often in the generated edges
    impl Arbitrary for Handle {
        fn arbitrary<G: Gen>(g: &mut G) -> Handle {
            let id = u64::arbitrary(g) % 8;
            Handle::pack(id, bool::arbitrary(g))
        }
    }

    // Handle::pack is an isomorphism; Handle <=> (u63, bool)
    #[test]
    fn handle_is_isomorphism() {
        let u: u64 = 597283742;
        let h = Handle::pack(NodeId(u), true);
        assert_eq!(h.unpack_number(), u);
        assert_eq!(h.unpack_bit(), true);
    }

    // Handle::pack should panic when the provided NodeId is invalid
    // (i.e. uses the 64th bit
    #[test]
    #[should_panic]
    fn handle_pack_panic() {
        Handle::pack(NodeId(std::u64::MAX), true);
    }

    #[test]
    fn handle_flip() {
        let u: u64 = 597283742;
        let h1 = Handle::pack(NodeId(u), true);
        let h2 = h1.flip();

        assert_eq!(h1.unpack_number(), h2.unpack_number());
        assert_eq!(h1.unpack_bit(), true);
        assert_eq!(h2.unpack_bit(), false);
        assert_eq!(h2, Handle::from(NodeId(u)));
    }

    #[test]
    fn occurrence_equality_uses_both_components() {
        let a = OccurrenceHandle::from_integers([1, 2]);
        let b = OccurrenceHandle::from_integers([1, 2]);
        let c = OccurrenceHandle::from_integers([1, 3]);
        let d = OccurrenceHandle::from_integers([2, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn edge_handle_loops() {
        let fwd = Handle::pack(4, false);
        let rev = Handle::pack(4, true);

        // Reversing loop on the right side is already canonical
        assert_eq!(Edge::edge_handle(fwd, rev), Edge(fwd, rev));
        // Reversing loop on the left side is its own reverse
        assert_eq!(Edge::edge_handle(rev, fwd), Edge(rev, fwd));
        // Plain loop in both orientations
        assert_eq!(Edge::edge_handle(rev, rev), Edge(fwd, fwd));
        assert_eq!(Edge::edge_handle(fwd, fwd), Edge(fwd, fwd));
    }

    quickcheck! {
        fn flip_is_involution(h: Handle) -> bool {
            h.flip().flip() == h && h.flip() != h
        }

        fn forward_is_idempotent(h: Handle) -> bool {
            let fwd = h.forward();
            fwd.forward() == fwd && !fwd.is_reverse() && fwd.id() == h.id()
        }

        fn edge_handle_is_symmetric(a: Handle, b: Handle) -> bool {
            Edge::edge_handle(a, b) == Edge::edge_handle(b.flip(), a.flip())
        }

        fn edge_handle_is_idempotent(a: Handle, b: Handle) -> bool {
            let Edge(l, r) = Edge::edge_handle(a, b);
            Edge::edge_handle(l, r) == Edge(l, r)
        }

        fn edge_handle_is_one_of_two_views(a: Handle, b: Handle) -> bool {
            let e = Edge::edge_handle(a, b);
            e == Edge(a, b) || e == Edge(b.flip(), a.flip())
        }
    }
}
