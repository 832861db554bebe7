//! # hello-world
//!
//! A small demonstration crate pairing a Rust greeting with a C one.
//!
//! The Rust half prints a fixed greeting. The C half lives in `hello.c`: the
//! build script links it into the crate, and the native greeting check
//! additionally compiles it at test time into a standalone shared library,
//! loads that library dynamically, and compares the exported greeting
//! against the expected text.
//!
//! ## Quick Start
//!
//! ```
//! assert_eq!(hello_world::hello_world(), "Hello, World from Rust!");
//! ```
//!
//! ```no_run
//! use hello_world::NativeCheck;
//!
//! // Compile hello.c with the system C compiler, load the produced shared
//! // library, and verify its greeting.
//! let result = NativeCheck::new().verify();
//! assert!(result.is_ok());
//! ```

pub mod check;
pub mod compile;
pub mod error;
pub mod greeting;
pub mod linked;

pub use check::{NativeCheck, verify_native_greeting};
pub use compile::CompileCmd;
pub use error::{Error, Result};
pub use greeting::{C_GREETING, Greetings, RUST_GREETING, hello_world, run};
pub use linked::linked_greeting;
