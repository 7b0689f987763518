//! Error types for the Galaxy3D shading layer
//!
//! Lookups (parameter by name, by role, typed access) never fail: they return
//! `Option`. Errors are reserved for operations that reject their input
//! (typed setters, range setters, descriptor validation) and for backend failures.

use std::fmt;
use crate::material::ParameterKind;

/// Result type for Galaxy3D shading operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D shading errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (OpenGL, etc.)
    BackendError(String),

    /// Invalid resource or descriptor (material, shader, texture)
    InvalidResource(String),

    /// No parameter registered under the given name
    ParameterNotFound(String),

    /// The parameter exists but holds a different kind of value
    TypeMismatch {
        name: String,
        expected: ParameterKind,
        found: ParameterKind,
    },

    /// A parameter setting was rejected (bad range, bad step, ...)
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ParameterNotFound(name) => write!(f, "Parameter not found: '{}'", name),
            Error::TypeMismatch { name, expected, found } => write!(
                f,
                "Type mismatch on parameter '{}': expected {:?}, found {:?}",
                name, expected, found
            ),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error::InvalidResource`, logging it at ERROR severity first
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::Material", "Duplicate parameter name '{}'", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::InvalidResource(message)
    }};
}

/// Log and return an `Error::InvalidResource` from the current function
///
/// # Example
///
/// ```ignore
/// if name.is_empty() {
///     engine_bail!("galaxy3d::Material", "Parameter name must not be empty");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
