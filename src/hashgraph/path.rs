use bstr::BString;

use crate::handle::{Handle, NodeId, PathHandle};

#[derive(Debug, Clone)]
pub struct Path {
    pub path_id: PathHandle,
    pub name: BString,
    pub is_circular: bool,
    pub nodes: Vec<Handle>,
}

impl Path {
    pub fn new<T: Into<BString>>(
        name: T,
        path_id: PathHandle,
        is_circular: bool,
    ) -> Self {
        Path {
            name: name.into(),
            path_id,
            is_circular,
            nodes: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|h| h.id() == id)
    }
}
