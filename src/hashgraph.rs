/*!

A simple handlegraph implementation using hashmaps.

[`HashGraph`] stores every node, with its sequence and edge lists, in
a single map keyed on node ID, and each path as a vector of handles.
It does nothing to reduce its memory footprint, but is simple to
inspect, and serves as the reference implementation of every trait in
this crate.

*/

mod graph;
mod node;
mod path;

pub use self::graph::HashGraph;
pub use self::node::Node;
pub use self::path::Path;
