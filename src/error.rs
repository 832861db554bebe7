//! Error types for the hello-world demo.
//!
//! Every failure in the native greeting pipeline is fatal: it is surfaced to
//! the invoking test or build harness and never retried.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the greeting provider and the native greeting check
#[derive(Error, Debug)]
pub enum Error {
    /// No usable C compiler on the search path
    #[error("C compiler `{0}` not found in PATH")]
    CompilerNotFound(String),

    /// External compiler exited with a non-zero status
    #[error("compile failed with {status}: {stderr}")]
    BuildFailure {
        /// Exit status reported by the compiler process
        status: ExitStatus,
        /// Captured compiler diagnostics
        stderr: String,
    },

    /// Compile exceeded its deadline and the compiler process was killed
    #[error("compile timed out after {limit:?}")]
    BuildTimeout {
        /// Deadline the compile was given
        limit: Duration,
    },

    /// Dynamic loader rejected the shared library
    #[error("failed to load shared library {path:?}: {source}")]
    LoadFailure {
        /// Artifact the loader was pointed at
        path: PathBuf,
        /// Loader-reported detail
        source: libloading::Error,
    },

    /// Shared library does not export the greeting function
    #[error("symbol `{symbol}` not found: {source}")]
    SymbolNotFound {
        /// Name of the missing export
        symbol: String,
        /// Loader-reported detail
        source: libloading::Error,
    },

    /// Exported greeting function returned a null pointer
    #[error("native greeting function returned a null pointer")]
    NullGreeting,

    /// Returned greeting bytes are not valid UTF-8
    #[error("greeting bytes are not valid UTF-8: {0}")]
    DecodeError(#[from] std::str::Utf8Error),

    /// Decoded greeting differs from the expected text
    #[error("greeting mismatch: expected {expected:?}, actual {actual:?}")]
    GreetingMismatch {
        /// Text the check was configured to expect
        expected: String,
        /// Text the native library actually returned
        actual: String,
    },

    /// Greetings file could not be parsed
    #[error("invalid greetings file: {0}")]
    InvalidGreetings(#[from] serde_json::Error),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
