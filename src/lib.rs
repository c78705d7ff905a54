/*!
A Rusty take on the core of the
[`libhandlegraph`](https://github.com/vgteam/libhandlegraph)
interface for variation graph access.

# Overview

A handlegraph is a graph of oriented sequence nodes. Each node can be
traversed forward or in reverse, edges connect node *sides*, and
paths are ordered walks over oriented nodes. This crate defines the
interface as a set of traits, so that algorithms can be written once
and run on any storage backend.

Backends implement a small set of primitives, such as following the
edges on one side of a handle and visiting every node. The traits
then provide everything that can be derived from them:

* [`HandleGraph::degree`](handlegraph::HandleGraph::degree)
* [`HandleGraph::edge_handle`](handlegraph::HandleGraph::edge_handle),
  which picks a single canonical form for an edge
* [`HandleGraph::traverse_edge_handle`](handlegraph::HandleGraph::traverse_edge_handle)
* [`HandleGraph::for_each_edge`](handlegraph::HandleGraph::for_each_edge),
  which visits every edge exactly once, optionally in parallel
* [`PathHandleGraph::for_each_occurrence`](pathhandlegraph::PathHandleGraph::for_each_occurrence)

# The interface

* [`handlegraph`] is for immutable access to the nodes and edges of a graph
* [`pathhandlegraph`] is for immutable access to the paths embedded in a graph
* [`mutablehandlegraph`] holds the mutation capabilities, and the
  traits that combine them

# `Handle`s and `NodeId`s

The core types, used all over the various traits, are defined in [`handle`]:

* [`NodeId`](handle::NodeId) is a newtype used as a node identifier
* [`Handle`](handle::Handle) represents a specific orientation of a node
* [`Edge`](handle::Edge) is a newtype for edges in a specific order
* [`PathHandle`](handle::PathHandle) and
  [`OccurrenceHandle`](handle::OccurrenceHandle) identify paths, and
  steps on paths

# Implementations

* [`HashGraph`](hashgraph::HashGraph) is a `HashMap`-based graph that
  implements every trait in the crate.

*/

pub mod error;
pub mod handle;

pub mod handlegraph;
pub mod mutablehandlegraph;
pub mod pathhandlegraph;

pub mod hashgraph;

pub mod util;

pub use error::{HandleGraphError, Result};
