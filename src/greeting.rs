//! Greeting values and the greeting provider.
//!
//! Both greetings are configuration constants. The provider and the native
//! greeting check read them from here, and a `greetings.json` file can
//! override them, so localized or parameterized variants are a configuration
//! change rather than a code change.

use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Greeting returned by the Rust half of the demo
pub const RUST_GREETING: &str = "Hello, World from Rust!";

/// Greeting the C half is expected to return
pub const C_GREETING: &str = "Hello, World from C!";

/// Conventional name of the greetings override file
pub const GREETINGS_FILE: &str = "greetings.json";

/// Returns the hello-world greeting.
pub fn hello_world() -> &'static str {
    RUST_GREETING
}

/// Prints the hello-world greeting to standard output.
pub fn run() {
    let stdout = std::io::stdout();
    write_greeting(&mut stdout.lock()).expect("failed to write the greeting to stdout");
}

/// Writes the greeting and a trailing line break to `out`.
fn write_greeting(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", hello_world())
}

/// Greeting overrides read from a JSON file; absent fields keep the fixed
/// literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greetings {
    /// Rust-side greeting
    #[serde(default = "default_rust_greeting")]
    pub rust: String,
    /// C-side greeting
    #[serde(default = "default_c_greeting")]
    pub c: String,
}

impl Greetings {
    /// Reads greetings from `path`, which may name either the file itself or
    /// a directory containing a `greetings.json`.
    pub fn from_file<T>(path: T) -> Result<Self>
    where
        T: Into<PathBuf>,
    {
        let path = path.into();

        let path = if path.ends_with(GREETINGS_FILE) {
            path
        } else {
            path.join(GREETINGS_FILE)
        };

        let content = std::fs::read_to_string(path)?;
        let greetings: Greetings = serde_json::from_str(&content)?;

        Ok(greetings)
    }
}

impl Default for Greetings {
    fn default() -> Self {
        Self {
            rust: default_rust_greeting(),
            c: default_c_greeting(),
        }
    }
}

fn default_rust_greeting() -> String {
    RUST_GREETING.to_string()
}

fn default_c_greeting() -> String {
    C_GREETING.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn hello_world_returns_fixed_literal() {
        assert_eq!(hello_world(), "Hello, World from Rust!");
    }

    #[test]
    fn write_greeting_emits_exactly_one_line() {
        let mut out = Vec::new();
        write_greeting(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hello, World from Rust!\n");
    }

    #[test]
    fn defaults_match_fixed_literals() {
        let greetings = Greetings::default();
        assert_eq!(greetings.rust, RUST_GREETING);
        assert_eq!(greetings.c, C_GREETING);
    }

    #[test]
    fn missing_fields_fall_back_to_literals() {
        let greetings: Greetings = serde_json::from_str("{}").unwrap();
        assert_eq!(greetings, Greetings::default());
    }

    #[test]
    fn file_overrides_apply_per_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GREETINGS_FILE), r#"{"c": "Hallo aus C!"}"#).unwrap();

        let greetings = Greetings::from_file(dir.path()).unwrap();
        assert_eq!(greetings.c, "Hallo aus C!");
        assert_eq!(greetings.rust, RUST_GREETING);
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GREETINGS_FILE), "not json").unwrap();

        let err = Greetings::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidGreetings(_)));
    }
}
