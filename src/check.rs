//! The native greeting check.
//!
//! Compiles a C greeting source into a scoped staging directory, loads the
//! produced shared library, calls its exported greeting function, decodes the
//! returned bytes as UTF-8, and compares them against the expected text. The
//! staging directory is removed on every exit path, so no artifact outlives
//! the check.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::time::Duration;

use libloading::{Library, Symbol};
use tracing::debug;

use crate::compile::{CompileCmd, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::greeting::C_GREETING;

/// Exported name of the native greeting function.
pub const GREETING_SYMBOL: &str = "hello_world_c";

/// C source the check compiles by default: the crate's own `hello.c`.
pub const NATIVE_SOURCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/hello.c");

type GreetingFn = unsafe extern "C" fn() -> *const c_char;

/// Builder for the native greeting check.
pub struct NativeCheck {
    source: PathBuf,
    expected: String,
    timeout: Duration,
}

impl NativeCheck {
    pub fn new() -> Self {
        Self {
            source: PathBuf::from(NATIVE_SOURCE),
            expected: C_GREETING.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn set_source<T>(mut self, source: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.source = source.into();
        self
    }

    pub fn set_expected<T>(mut self, expected: T) -> Self
    where
        T: Into<String>,
    {
        self.expected = expected.into();
        self
    }

    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the whole check: compile, load, invoke, decode, compare.
    pub fn verify(&self) -> Result<()> {
        let staging = tempfile::tempdir()?;

        let library = CompileCmd::new()
            .set_source(&self.source)
            .set_out_dir(staging.path())
            .add_arg("-Wall")
            .set_timeout(self.timeout)
            .build()?;

        let actual = load_greeting(&library)?;
        if actual != self.expected {
            return Err(Error::GreetingMismatch {
                expected: self.expected.clone(),
                actual,
            });
        }

        debug!("native greeting verified: {:?}", self.expected);
        Ok(())
    }
}

impl Default for NativeCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads a shared library and returns the decoded text of its exported
/// greeting function.
pub fn load_greeting(library: &Path) -> Result<String> {
    debug!("loading {}", library.display());

    // SAFETY: the artifact is a freshly compiled C library whose only
    // initializers are the C runtime's.
    let lib = unsafe { Library::new(library) }.map_err(|source| Error::LoadFailure {
        path: library.to_path_buf(),
        source,
    })?;

    // SAFETY: the exported symbol must have the declared no-argument,
    // C-string-returning signature.
    let greeting: Symbol<GreetingFn> =
        unsafe { lib.get(GREETING_SYMBOL.as_bytes()) }.map_err(|source| Error::SymbolNotFound {
            symbol: GREETING_SYMBOL.to_string(),
            source,
        })?;

    let ptr = unsafe { greeting() };
    if ptr.is_null() {
        return Err(Error::NullGreeting);
    }

    // Copy the text out before the library handle drops.
    let text = unsafe { CStr::from_ptr(ptr) }.to_str()?.to_owned();

    Ok(text)
}

/// Runs the native greeting check with the crate defaults.
pub fn verify_native_greeting() -> Result<()> {
    NativeCheck::new().verify()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("libmissing.so");

        let err = load_greeting(&missing).unwrap_err();
        assert!(matches!(err, Error::LoadFailure { .. }));
    }

    #[test]
    fn non_library_file_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("libbogus.so");
        std::fs::write(&bogus, b"not a shared library").unwrap();

        let err = load_greeting(&bogus).unwrap_err();
        assert!(matches!(err, Error::LoadFailure { .. }));
    }
}
