//! The statically linked native greeting.
//!
//! build.rs compiles `hello.c` and links the object into the crate, so the
//! C function is callable here without going through the dynamic loader.

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{Error, Result};

unsafe extern "C" {
    // Returns the C greeting as a null-terminated string.
    fn hello_world_c() -> *const c_char;
}

/// Returns the greeting of the C half linked into this binary.
pub fn linked_greeting() -> Result<&'static str> {
    // SAFETY: `hello_world_c` takes no arguments and returns a pointer to a
    // static null-terminated string inside this binary.
    let ptr = unsafe { hello_world_c() };
    if ptr.is_null() {
        return Err(Error::NullGreeting);
    }

    Ok(unsafe { CStr::from_ptr(ptr) }.to_str()?)
}
