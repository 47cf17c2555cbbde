//! # epilogue-core
//!
//! A registry for deferred callbacks that run at process termination, with
//! the ability to cancel, re-key, or eagerly invoke a registered callback
//! before termination occurs.
//!
//! `std::process::exit` and the C runtime's `exit(3)` skip `Drop`, so
//! destructor-based cleanup is not guaranteed to run. A hook registered with
//! the runtime's `atexit` facility *does* run in those cases, but that hook
//! list is append-only and cannot be inspected or cancelled afterwards. This
//! crate registers exactly one such hook and keeps all mutable bookkeeping
//! (ordering, cancellation, dedup grouping) on its own side.
//!
//! Handlers registered under the same dedup key suppress each other: among
//! all currently-registered handlers sharing a key, only the last one to be
//! removed actually fires its callback.
//!
//! ```
//! let handle = epilogue_core::register(|| println!("goodbye")).unwrap();
//! assert!(epilogue_core::is_registered(handle));
//! // Changed our mind: cancel it before the process ends.
//! assert!(epilogue_core::unregister(handle));
//! ```

#![deny(unsafe_code)]

pub mod callback;
pub mod handle;
#[allow(unsafe_code)]
mod hook;
pub mod registry;

pub use callback::{Callback, IntoCallback, InvalidCallbackError};
pub use handle::Handle;
pub use registry::Registry;

/// Register a callback on the process-wide registry.
///
/// The first successful registration installs the single termination hook.
pub fn register<C: IntoCallback>(callback: C) -> Result<Handle, InvalidCallbackError> {
    Registry::global().register(callback)
}

/// Register a callback on the process-wide registry under a dedup key.
pub fn register_keyed<C: IntoCallback>(
    key: &str,
    callback: C,
) -> Result<Handle, InvalidCallbackError> {
    Registry::global().register_keyed(key, callback)
}

/// Invoke a handler now (subject to dedup suppression) and remove it.
pub fn run(handle: Handle) -> bool {
    Registry::global().run(handle)
}

/// Remove a handler without invoking it.
pub fn unregister(handle: Handle) -> bool {
    Registry::global().unregister(handle)
}

/// Move a handler to a new dedup key, reviving it if it was cancelled.
pub fn re_register(handle: Handle, key: Option<&str>) {
    Registry::global().re_register(handle, key);
}

/// Run every registered handler on the process-wide registry, in
/// registration order.
pub fn run_all() {
    Registry::global().run_all();
}

/// Cancel every registered handler on the process-wide registry.
pub fn unregister_all() {
    Registry::global().unregister_all();
}

/// Whether a handle is currently registered on the process-wide registry.
pub fn is_registered(handle: Handle) -> bool {
    Registry::global().is_registered(handle)
}

/// Ordered snapshot of the process-wide registry's live handles.
pub fn handles() -> Vec<Handle> {
    Registry::global().handles()
}
