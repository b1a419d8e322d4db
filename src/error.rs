use thiserror::Error;

use crate::model::NodeId;

/// Errors raised while wiring a controller into a scene.
///
/// Per-frame updates cannot fail; everything that can go wrong is caught
/// at construction.
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    #[error("{0} does not exist in the scene")]
    UnknownNode(NodeId),

    #[error("invalid controller config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
