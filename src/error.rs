//! Global error handling for promptfs
//!
//! This module provides a centralized error type shared by the rule,
//! traversal and rendering stages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for promptfs operations
#[derive(Error, Debug)]
pub enum PromptFsError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Gitignore loading errors
    #[error("Gitignore error: {0}")]
    Gitignore(#[from] ignore::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The snapshot file could not be created
    #[error("Failed to create {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for promptfs operations
pub type Result<T> = std::result::Result<T, PromptFsError>;

/// Creates a PromptFsError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PromptFsError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
