//! Build script that compiles the C greeting source and links it into the
//! crate, so the native greeting function is callable without any loader
//! setup.
//!
//! The object is archived into a static library inside `OUT_DIR`, and the
//! Rust linker is instructed to search there.

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Honor the conventional CC override, default to the system driver.
    let compiler = env::var("CC").unwrap_or_else(|_| "cc".to_string());
    if let Err(e) = which::which(&compiler) {
        panic!("C compiler `{}` not found: {}", compiler, e);
    }

    let object = out_dir.join("hello_world_c.o");
    let status = Command::new(&compiler)
        .args(["-Wall", "-O2", "-fPIC", "-c", "hello.c", "-o"])
        .arg(&object)
        .status()
        .expect("failed to spawn the C compiler");
    if !status.success() {
        panic!("compiling hello.c failed with status: {}", status);
    }

    let archive = out_dir.join("libhello_world_c.a");
    let status = Command::new("ar")
        .arg("rcs")
        .arg(&archive)
        .arg(&object)
        .status()
        .expect("failed to spawn ar");
    if !status.success() {
        panic!("archiving the hello.c object failed with status: {}", status);
    }

    // Tell cargo to link the archived C object into every target.
    println!("cargo::rustc-link-search=native={}", out_dir.display());
    println!("cargo::rustc-link-lib=static=hello_world_c");

    // Re-run this build script if the C source changes.
    println!("cargo::rerun-if-changed=hello.c");
    println!("cargo::rerun-if-env-changed=CC");
}
