//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur while running passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] qrew_ir::IrError),

    /// Pass execution failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed { name: String, reason: String },

    /// Invalid pass configuration.
    #[error("Invalid pass configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
