//! Error types for cave mesh generation.
//!
//! Every failure is either a rejected input or a broken internal invariant.
//! Nothing here is transient, so nothing is retried.

use thiserror::Error;

/// Errors that can occur while turning an occupancy map into meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshGenError {
    /// Malformed input, reported before any mesh buffer is allocated.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Welding or case-table invariants were broken upstream. Fatal.
    #[error("Internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

impl MeshGenError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an internal invariant error.
    pub fn internal_invariant(message: impl Into<String>) -> Self {
        Self::InternalInvariant {
            message: message.into(),
        }
    }
}
