//! Physics engine error types.

use thiserror::Error;

/// Errors raised while building a [`crate::PhysicsEngine`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("no liquid gravity scheme applies to version {version}")]
    NoLiquidGravity { version: String },
    #[error("registry has no block named {0}")]
    MissingBlock(String),
}

/// Result type alias for physics construction.
pub type Result<T> = std::result::Result<T, PhysicsError>;
