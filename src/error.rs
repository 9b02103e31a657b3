//! Error types for Ember2D.
//!
//! All errors in this crate are load-time errors: they can only occur while
//! mapping an emitter definition onto an [`EmitterConfig`](crate::EmitterConfig).
//! A failed load is all-or-nothing: the emitter keeps whatever configuration
//! it had before the call. Per-frame operations (`advance`, `build_vertices`)
//! have no error conditions; degenerate inputs are handled by skip logic.

use std::fmt;

/// Errors that can occur while loading an emitter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A required parameter key is absent from the table.
    ///
    /// An incomplete emitter definition is a configuration bug, not a
    /// runtime condition, so a missing key rejects the whole load instead
    /// of silently defaulting.
    MissingParameter(String),
    /// The sprite named by `textureFileName` could not be resolved.
    ResourceNotFound(String),
    /// The source document does not have the expected structure.
    MalformedFile(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingParameter(key) => {
                write!(f, "Missing required emitter parameter: {}", key)
            }
            LoadError::ResourceNotFound(name) => {
                write!(f, "Could not resolve sprite: {}", name)
            }
            LoadError::MalformedFile(msg) => {
                write!(f, "Malformed emitter definition: {}", msg)
            }
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_key() {
        let err = LoadError::MissingParameter("maxParticles".to_string());
        assert!(err.to_string().contains("maxParticles"));
    }
}
