use thiserror::Error;

use crate::handle::NodeId;

pub type Result<T> = std::result::Result<T, HandleGraphError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleGraphError {
    /// An edge was viewed from a handle that is neither its left
    /// handle nor the flip of its right handle. Orientations are
    /// printed as `1` for reverse, `0` for forward.
    #[error(
        "Cannot view edge {left_id} {} -> {right_id} {} from non-participant {handle_id} {}",
        u8::from(*.left_rev),
        u8::from(*.right_rev),
        u8::from(*.handle_rev)
    )]
    InvalidParticipant {
        left_id: NodeId,
        left_rev: bool,
        right_id: NodeId,
        right_rev: bool,
        handle_id: NodeId,
        handle_rev: bool,
    },
}
