//! Error handling for BinRoute
//!
//! Provides error types for the layers of the editing engine:
//! - Geometry errors (malformed rings, empty inputs)
//! - Binding errors (map surface readiness and lifecycle)
//!
//! All of them are local, recoverable conditions. None of them should take
//! down an editing surface; callers reject the command and keep going.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the pure geometry layer and by controller commands that
/// validate geometry before mutating session state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Malformed or under-specified ring or point data
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong with the input.
        reason: String,
    },

    /// Bounds were requested over no points at all
    #[error("Geometry is empty")]
    EmptyGeometry,
}

impl GeometryError {
    /// Shorthand for an [`GeometryError::InvalidGeometry`] with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Binding error type
///
/// Represents conditions at the seam between the session controller and a
/// concrete map surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The map surface has not finished initialising
    #[error("Map surface is not ready")]
    NotReady,

    /// Too many commands were queued while waiting for the map surface
    #[error("Map surface is not ready and the pending queue is full ({capacity} commands)")]
    QueueFull {
        /// The configured queue capacity.
        capacity: usize,
    },

    /// The binding was already torn down
    #[error("Map binding has been torn down")]
    TornDown,

    /// The underlying surface refused a drawing call
    #[error("Map surface error: {reason}")]
    Surface {
        /// The reason reported by the surface.
        reason: String,
    },
}

/// Main error type for BinRoute
///
/// A unified error type that can represent any error from the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Binding error
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if the command was rejected because the map was not ready
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            Error::Binding(BindingError::NotReady | BindingError::QueueFull { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
