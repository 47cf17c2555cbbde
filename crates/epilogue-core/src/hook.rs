//! Installation of the single process-termination hook.
//!
//! The C runtime's `atexit` list is append-only: once a hook is registered
//! it can be neither inspected nor removed. The registry therefore hands the
//! runtime exactly one hook for the whole process lifetime and keeps every
//! mutable concern on its own side. The hook fires on `exit(3)` and on
//! normal `main` return, including `std::process::exit`, which skips
//! `Drop`.

#![allow(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use crate::registry::Registry;

static INSTALLED: AtomicBool = AtomicBool::new(false);

extern "C" fn run_global_handlers() {
    Registry::global().run_all();
}

/// Install the termination hook, at most once per process.
///
/// Safe to call from any number of threads; the compare-exchange admits
/// exactly one winner. Returns `true` on the call that actually installed.
pub(crate) fn install() -> bool {
    if INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return false;
    }
    // SAFETY: `run_global_handlers` is a plain `extern "C"` function that
    // cannot unwind (`run_all` isolates handler panics).
    let rc = unsafe { libc::atexit(run_global_handlers) };
    if rc == 0 {
        tracing::debug!("process-termination hook installed");
    } else {
        tracing::error!(rc, "atexit rejected the hook; handlers will only run eagerly");
    }
    true
}

#[cfg(test)]
pub(crate) fn is_installed() -> bool {
    INSTALLED.load(Ordering::SeqCst)
}
