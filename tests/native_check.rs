use std::path::PathBuf;
use std::time::Duration;

use hello_world::{C_GREETING, Error, NativeCheck, verify_native_greeting};
use tempfile::TempDir;

/// Test utilities
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        Self { temp_dir }
    }

    /// Writes a C source variant and returns its path.
    fn write_source(&self, name: &str, body: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, body).expect("Failed to write C source");
        path
    }
}

#[test]
fn conforming_source_passes() {
    verify_native_greeting().expect("native greeting check should pass");
}

#[test]
fn rerunning_the_check_passes_again() {
    verify_native_greeting().expect("first run should pass");
    verify_native_greeting().expect("second run should pass");
}

#[test]
fn renamed_export_is_a_missing_symbol() {
    let ctx = TestContext::new();
    let source = ctx.write_source(
        "renamed.c",
        "const char *goodbye_world_c(void) { return \"Hello, World from C!\"; }\n",
    );

    let err = NativeCheck::new().set_source(source).verify().unwrap_err();
    assert!(matches!(err, Error::SymbolNotFound { .. }));
}

#[test]
fn changed_literal_is_reported_with_both_values() {
    let ctx = TestContext::new();
    let source = ctx.write_source(
        "goodbye.c",
        "const char *hello_world_c(void) { return \"Goodbye\"; }\n",
    );

    let err = NativeCheck::new().set_source(source).verify().unwrap_err();
    match err {
        Error::GreetingMismatch { expected, actual } => {
            assert_eq!(expected, C_GREETING);
            assert_eq!(actual, "Goodbye");
        }
        other => panic!("expected a greeting mismatch, got: {other}"),
    }
}

#[test]
fn broken_source_is_a_build_failure() {
    let ctx = TestContext::new();
    let source = ctx.write_source("broken.c", "this is not C\n");

    let err = NativeCheck::new().set_source(source).verify().unwrap_err();
    assert!(matches!(err, Error::BuildFailure { .. }));
}

#[test]
fn expired_deadline_kills_the_compile() {
    let err = NativeCheck::new()
        .set_timeout(Duration::ZERO)
        .verify()
        .unwrap_err();

    assert!(matches!(err, Error::BuildTimeout { .. }));
}

#[test]
fn expectation_override_is_honored() {
    let ctx = TestContext::new();
    let source = ctx.write_source(
        "localized.c",
        "const char *hello_world_c(void) { return \"Hallo aus C!\"; }\n",
    );

    NativeCheck::new()
        .set_source(source)
        .set_expected("Hallo aus C!")
        .verify()
        .expect("overridden expectation should pass");
}
