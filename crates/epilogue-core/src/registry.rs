//! The handler registry: live set, dedup-key accounting, invocation.
//!
//! ## Design
//!
//! - **One lock scope per operation**: all registry state (entries, order,
//!   key counts, id counter) lives behind a single `parking_lot::Mutex`.
//!   The `run` sequence (unregister, check the key's remaining count, then
//!   invoke) is a compound check-then-act and is only sound because every
//!   step happens under the same lock acquisition.
//!
//! - **Callbacks run outside the lock**: a handler may re-enter the registry
//!   (register a sibling, cancel another handler, even call `run_all`), so
//!   the callback is moved out of the state first and invoked after the
//!   guard is dropped.
//!
//! - **Identity, not position**: entries are keyed by an opaque monotonic
//!   id; a separate id list carries registration order. Removals never
//!   shift the identity of surviving registrations.
//!
//! - **Cancelled ≠ consumed**: `unregister` parks an entry (callback
//!   retained) so `re_register` can revive it; `run` removes the entry
//!   outright, whether the callback fired or a dedup sibling suppressed it.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::callback::{Callback, IntoCallback, InvalidCallbackError};
use crate::handle::Handle;
use crate::hook;

/// One known callback registration.
struct Entry {
    callback: Callback,
    key: Option<String>,
    /// Whether the entry is in the live set.
    registered: bool,
}

/// Mutable registry state.
struct Inner {
    /// Every known entry, parked ones included.
    entries: HashMap<u64, Entry>,
    /// Ids of registered entries in registration order. Revival appends.
    order: Vec<u64>,
    /// Live reference count per dedup key, over registered entries only.
    key_counts: HashMap<String, usize>,
    next_id: u64,
}

/// A registry of deferred callbacks.
///
/// The process-wide instance from [`Registry::global`] is the one wired to
/// the termination hook; detached instances from [`Registry::new`] are
/// plain containers for embedding and tests, and their handlers only run
/// when the owner calls [`run_all`](Registry::run_all).
pub struct Registry {
    inner: Mutex<Inner>,
    /// Set only on the global instance: the first registration installs the
    /// process-termination hook.
    hooked: bool,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create a detached registry with no termination hook.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hook(false)
    }

    fn with_hook(hooked: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: Vec::new(),
                key_counts: HashMap::new(),
                next_id: 0,
            }),
            hooked,
        }
    }

    /// The process-wide registry.
    ///
    /// Its first successful registration installs the single termination
    /// hook, which runs [`run_all`](Registry::run_all) as the process ends.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| Self::with_hook(true))
    }

    /// Register a callback without a dedup key.
    ///
    /// Validation happens here, eagerly: a callback that cannot be invoked
    /// is rejected now rather than discovered during process teardown.
    pub fn register<C: IntoCallback>(&self, callback: C) -> Result<Handle, InvalidCallbackError> {
        Ok(self.create(callback.into_callback()?, None))
    }

    /// Register a callback under a dedup key.
    ///
    /// Among all currently-registered handlers sharing a key, only the last
    /// one to be removed fires its callback.
    pub fn register_keyed<C: IntoCallback>(
        &self,
        key: &str,
        callback: C,
    ) -> Result<Handle, InvalidCallbackError> {
        Ok(self.create(callback.into_callback()?, Some(key)))
    }

    fn create(&self, callback: Callback, key: Option<&str>) -> Handle {
        if self.hooked {
            hook::install();
        }
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(
            id,
            Entry {
                callback,
                key: None,
                registered: false,
            },
        );
        attach(&mut inner, id, key);
        tracing::debug!(id, key = ?key, "handler registered");
        Handle(id)
    }

    /// Invoke a handler now and remove it.
    ///
    /// The handler is unregistered first; the callback then fires only if no
    /// other registered handler still holds its dedup key. Returns `true`
    /// whenever the handle was registered, invoked or suppressed alike, and
    /// `false` for a stale handle, without any effect.
    pub fn run(&self, handle: Handle) -> bool {
        let fired = {
            let mut inner = self.inner.lock();
            let Some(remaining) = detach(&mut inner, handle.0) else {
                return false;
            };
            match inner.entries.remove(&handle.0) {
                Some(entry) if remaining == 0 => Some(entry.callback),
                _ => None,
            }
        };
        match fired {
            Some(mut callback) => invoke_isolated(handle, &mut callback),
            None => tracing::debug!(id = handle.0, "invocation suppressed; dedup key still held"),
        }
        true
    }

    /// Remove a handler without invoking it.
    ///
    /// The registration is parked, not destroyed: [`re_register`] can revive
    /// it later. Returns `false` for a stale handle.
    ///
    /// [`re_register`]: Registry::re_register
    pub fn unregister(&self, handle: Handle) -> bool {
        let mut inner = self.inner.lock();
        if detach(&mut inner, handle.0).is_none() {
            return false;
        }
        tracing::trace!(id = handle.0, "handler cancelled");
        true
    }

    /// Move a handler to a new dedup key (`None` clears it), reviving the
    /// handler if it was cancelled.
    ///
    /// Total over its inputs: a handle consumed by [`run`](Registry::run) or
    /// foreign to this registry is ignored, and re-keying a registered
    /// handler to its current key changes nothing. A revived handler rejoins
    /// the invocation order at the end.
    pub fn re_register(&self, handle: Handle, key: Option<&str>) {
        let mut inner = self.inner.lock();
        attach(&mut inner, handle.0, key);
    }

    /// Run every registered handler in registration order.
    ///
    /// Iterates over a snapshot: handlers removed mid-pass (dedup siblings,
    /// cancellations performed by earlier callbacks) are skipped, and
    /// handlers registered mid-pass wait for the next pass.
    pub fn run_all(&self) {
        let snapshot: Vec<u64> = self.inner.lock().order.clone();
        if !snapshot.is_empty() {
            tracing::debug!(handlers = snapshot.len(), "running registered handlers");
        }
        for id in snapshot {
            self.run(Handle(id));
        }
    }

    /// Cancel every registered handler. No callback is invoked.
    pub fn unregister_all(&self) {
        let snapshot: Vec<u64> = self.inner.lock().order.clone();
        for id in snapshot {
            self.unregister(Handle(id));
        }
    }

    /// Whether the handle is currently registered here.
    #[must_use]
    pub fn is_registered(&self, handle: Handle) -> bool {
        self.inner
            .lock()
            .entries
            .get(&handle.0)
            .is_some_and(|entry| entry.registered)
    }

    /// Ordered snapshot of the currently-registered handles.
    #[must_use]
    pub fn handles(&self) -> Vec<Handle> {
        self.inner.lock().order.iter().map(|&id| Handle(id)).collect()
    }

    /// Number of currently-registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    /// Whether no handler is currently registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live count of registered handlers sharing `key`.
    #[must_use]
    pub fn key_count(&self, key: &str) -> usize {
        self.inner.lock().key_counts.get(key).copied().unwrap_or(0)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared (re-)registration path: transfers the dedup key and inserts the
/// entry into the live set. Idempotent for a registered entry with an
/// unchanged key; a no-op for an unknown id.
fn attach(inner: &mut Inner, id: u64, key: Option<&str>) {
    let Some(entry) = inner.entries.get_mut(&id) else {
        return;
    };
    if entry.registered {
        if entry.key.as_deref() == key {
            return;
        }
        if let Some(old) = entry.key.take() {
            release_key(&mut inner.key_counts, &old);
        }
    } else {
        entry.registered = true;
        inner.order.push(id);
    }
    entry.key = key.map(str::to_owned);
    if let Some(k) = key {
        *inner.key_counts.entry(k.to_owned()).or_insert(0) += 1;
    }
}

/// Remove an entry from the live set without touching its callback.
///
/// Returns the remaining live count for the entry's key (`0` for keyless
/// entries), or `None` if the entry was not registered.
fn detach(inner: &mut Inner, id: u64) -> Option<usize> {
    let entry = inner.entries.get_mut(&id)?;
    if !entry.registered {
        return None;
    }
    entry.registered = false;
    let remaining = match &entry.key {
        Some(key) => release_key(&mut inner.key_counts, key),
        None => 0,
    };
    inner.order.retain(|&other| other != id);
    Some(remaining)
}

/// Decrement a key's live count, dropping the map entry at zero.
/// Returns the remaining count.
fn release_key(counts: &mut HashMap<String, usize>, key: &str) -> usize {
    match counts.get_mut(key) {
        Some(count) if *count > 1 => {
            *count -= 1;
            *count
        }
        Some(_) => {
            counts.remove(key);
            0
        }
        None => 0,
    }
}

/// Invoke a callback with panic isolation.
///
/// A panicking handler is logged and swallowed: the termination pass
/// continues, and no unwind can cross into the C runtime's exit machinery.
fn invoke_isolated(handle: Handle, callback: &mut Callback) {
    tracing::debug!(id = handle.0, "invoking handler");
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback.invoke())) {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| String::from("non-string panic payload"));
        tracing::error!(id = handle.0, panic = %message, "handler panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// A handler that appends `label` to the shared log when invoked.
    fn speak(log: &Log, label: &'static str) -> impl FnMut() + Send + 'static {
        let log = Arc::clone(log);
        move || log.lock().push(label)
    }

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl FnMut() + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_returns_distinct_handles() {
        let registry = Registry::new();
        let h1 = registry.register(|| {}).unwrap();
        let h2 = registry.register(|| {}).unwrap();
        assert_ne!(h1, h2);
        assert!(registry.is_registered(h1));
        assert!(registry.is_registered(h2));
    }

    #[test]
    fn register_does_not_invoke() {
        let registry = Registry::new();
        let count = counter();
        registry.register(bump(&count)).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn foreign_handle_is_stale_everywhere() {
        let a = Registry::new();
        let b = Registry::new();
        let h = a.register(|| {}).unwrap();
        // Same numeric id may exist in `b`, but semantics are per registry:
        // `b` has no entry for it yet.
        assert!(!b.is_registered(h));
        assert!(!b.run(h));
        assert!(!b.unregister(h));
    }

    // -----------------------------------------------------------------------
    // run
    // -----------------------------------------------------------------------

    #[test]
    fn run_invokes_once_and_removes() {
        let registry = Registry::new();
        let count = counter();
        let h = registry.register(bump(&count)).unwrap();

        assert!(registry.run(h));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!registry.is_registered(h));
        assert!(registry.is_empty());

        // Second run: stale, no effect.
        assert!(!registry.run(h));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_after_unregister_is_stale() {
        let registry = Registry::new();
        let count = counter();
        let h = registry.register(bump(&count)).unwrap();
        assert!(registry.unregister(h));
        assert!(!registry.run(h));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    // -----------------------------------------------------------------------
    // unregister
    // -----------------------------------------------------------------------

    #[test]
    fn unregister_never_invokes() {
        let registry = Registry::new();
        let count = counter();
        let h = registry.register_keyed("lock", bump(&count)).unwrap();
        assert!(registry.unregister(h));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!registry.is_registered(h));
    }

    #[test]
    fn double_unregister_returns_false() {
        let registry = Registry::new();
        let h = registry.register(|| {}).unwrap();
        assert!(registry.unregister(h));
        assert!(!registry.unregister(h));
    }

    #[test]
    fn unregister_all_is_silent() {
        let registry = Registry::new();
        let count = counter();
        for _ in 0..3 {
            registry.register(bump(&count)).unwrap();
        }
        registry.unregister_all();
        assert!(registry.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    // -----------------------------------------------------------------------
    // Dedup keys
    // -----------------------------------------------------------------------

    #[test]
    fn dedup_only_last_survivor_fires() {
        let registry = Registry::new();
        let c1 = counter();
        let c2 = counter();
        let h1 = registry.register_keyed("lock", bump(&c1)).unwrap();
        let h2 = registry.register_keyed("lock", bump(&c2)).unwrap();

        assert!(registry.run(h1));
        assert_eq!(c1.load(Ordering::SeqCst), 0, "suppressed by sibling");
        assert!(!registry.is_registered(h1), "suppressed handle still removed");

        assert!(registry.run(h2));
        assert_eq!(c2.load(Ordering::SeqCst), 1, "last survivor fires");
    }

    #[test]
    fn dedup_holds_in_any_removal_order() {
        let registry = Registry::new();
        let c1 = counter();
        let c2 = counter();
        let h1 = registry.register_keyed("flush", bump(&c1)).unwrap();
        let h2 = registry.register_keyed("flush", bump(&c2)).unwrap();

        // Reverse order: the later registration goes first and is suppressed.
        assert!(registry.run(h2));
        assert_eq!(c2.load(Ordering::SeqCst), 0);
        assert!(registry.run(h1));
        assert_eq!(c1.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dedup_three_siblings_single_invocation() {
        let registry = Registry::new();
        let count = counter();
        let handles: Vec<Handle> = (0..3)
            .map(|_| registry.register_keyed("once", bump(&count)).unwrap())
            .collect();
        for h in handles {
            registry.run(h);
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregistered_sibling_does_not_suppress() {
        let registry = Registry::new();
        let c1 = counter();
        let c2 = counter();
        let h1 = registry.register_keyed("db", bump(&c1)).unwrap();
        let h2 = registry.register_keyed("db", bump(&c2)).unwrap();

        // Cancelling h2 leaves h1 as the only live holder of "db".
        assert!(registry.unregister(h2));
        assert_eq!(registry.key_count("db"), 1);
        assert!(registry.run(h1));
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn keyless_handlers_never_suppress_each_other() {
        let registry = Registry::new();
        let c1 = counter();
        let c2 = counter();
        let h1 = registry.register(bump(&c1)).unwrap();
        let h2 = registry.register(bump(&c2)).unwrap();
        registry.run(h1);
        registry.run(h2);
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn key_counts_track_live_set() {
        let registry = Registry::new();
        let h1 = registry.register_keyed("tmp", || {}).unwrap();
        let h2 = registry.register_keyed("tmp", || {}).unwrap();
        assert_eq!(registry.key_count("tmp"), 2);
        registry.unregister(h1);
        assert_eq!(registry.key_count("tmp"), 1);
        registry.run(h2);
        assert_eq!(registry.key_count("tmp"), 0);
        assert_eq!(registry.key_count("never-used"), 0);
    }

    // -----------------------------------------------------------------------
    // re_register
    // -----------------------------------------------------------------------

    #[test]
    fn re_register_moves_key_in_place() {
        let registry = Registry::new();
        let h1 = registry.register_keyed("a", || {}).unwrap();
        let h2 = registry.register_keyed("a", || {}).unwrap();

        registry.re_register(h2, Some("b"));
        assert_eq!(registry.key_count("a"), 1);
        assert_eq!(registry.key_count("b"), 1);
        assert!(registry.is_registered(h2));
        // Re-keying does not change the invocation order.
        assert_eq!(registry.handles(), vec![h1, h2]);
    }

    #[test]
    fn re_register_unchanged_key_is_idempotent() {
        let registry = Registry::new();
        let h = registry.register_keyed("k", || {}).unwrap();
        registry.re_register(h, Some("k"));
        registry.re_register(h, Some("k"));
        assert_eq!(registry.key_count("k"), 1);
        assert_eq!(registry.handles(), vec![h]);
    }

    #[test]
    fn re_register_clears_key() {
        let registry = Registry::new();
        let h = registry.register_keyed("k", || {}).unwrap();
        registry.re_register(h, None);
        assert_eq!(registry.key_count("k"), 0);
        assert!(registry.is_registered(h));
    }

    #[test]
    fn re_register_revives_cancelled_handler() {
        let registry = Registry::new();
        let count = counter();
        let h1 = registry.register(bump(&count)).unwrap();
        let h2 = registry.register(|| {}).unwrap();

        assert!(registry.unregister(h1));
        registry.re_register(h1, None);
        assert!(registry.is_registered(h1));
        // Revival rejoins at the end of the order.
        assert_eq!(registry.handles(), vec![h2, h1]);

        assert!(registry.run(h1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn re_register_revival_counts_new_key() {
        let registry = Registry::new();
        let h = registry.register_keyed("old", || {}).unwrap();
        registry.unregister(h);
        assert_eq!(registry.key_count("old"), 0);

        registry.re_register(h, Some("new"));
        assert_eq!(registry.key_count("old"), 0);
        assert_eq!(registry.key_count("new"), 1);
    }

    #[test]
    fn re_register_after_run_is_a_no_op() {
        let registry = Registry::new();
        let count = counter();
        let h = registry.register(bump(&count)).unwrap();
        assert!(registry.run(h));

        // `run` is terminal: nothing left to revive.
        registry.re_register(h, Some("k"));
        assert!(!registry.is_registered(h));
        assert_eq!(registry.key_count("k"), 0);
    }

    #[test]
    fn re_register_foreign_handle_is_a_no_op() {
        let registry = Registry::new();
        let other = Registry::new();
        let h = other.register(|| {}).unwrap();
        registry.re_register(h, Some("k"));
        assert!(registry.is_empty());
        assert_eq!(registry.key_count("k"), 0);
    }

    // -----------------------------------------------------------------------
    // run_all / ordering
    // -----------------------------------------------------------------------

    #[test]
    fn run_all_preserves_registration_order() {
        let registry = Registry::new();
        let events = log();
        registry.register(speak(&events, "first")).unwrap();
        registry.register(speak(&events, "second")).unwrap();
        registry.register(speak(&events, "third")).unwrap();

        registry.run_all();
        assert_eq!(*events.lock(), vec!["first", "second", "third"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn run_all_respects_dedup() {
        let registry = Registry::new();
        let events = log();
        registry.register_keyed("lock", speak(&events, "one")).unwrap();
        registry.register(speak(&events, "plain")).unwrap();
        registry.register_keyed("lock", speak(&events, "two")).unwrap();

        registry.run_all();
        // "one" is unregistered first and suppressed because "two" still
        // holds the key at that point.
        assert_eq!(*events.lock(), vec!["plain", "two"]);
    }

    #[test]
    fn run_all_skips_handlers_cancelled_mid_pass() {
        let registry = Arc::new(Registry::new());
        let events = log();
        let victim: Arc<Mutex<Option<Handle>>> = Arc::new(Mutex::new(None));

        let saboteur = {
            let registry = Arc::clone(&registry);
            let victim = Arc::clone(&victim);
            let events = Arc::clone(&events);
            move || {
                events.lock().push("saboteur");
                if let Some(h) = *victim.lock() {
                    registry.unregister(h);
                }
            }
        };
        registry.register(saboteur).unwrap();
        let h = registry.register(speak(&events, "victim")).unwrap();
        *victim.lock() = Some(h);

        registry.run_all();
        assert_eq!(*events.lock(), vec!["saboteur"]);
    }

    #[test]
    fn run_all_defers_handlers_registered_mid_pass() {
        let registry = Arc::new(Registry::new());
        let count = counter();

        let recruiter = {
            let registry = Arc::clone(&registry);
            let count = Arc::clone(&count);
            move || {
                registry.register(bump(&count)).unwrap();
            }
        };
        registry.register(recruiter).unwrap();

        registry.run_all();
        // The mid-pass registration waits for the next pass.
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(registry.len(), 1);

        registry.run_all();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn run_all_isolates_panicking_handler() {
        let registry = Registry::new();
        let count = counter();
        registry.register(|| panic!("handler exploded")).unwrap();
        registry.register(bump(&count)).unwrap();

        registry.run_all();
        assert_eq!(count.load(Ordering::SeqCst), 1, "survivor still runs");
        assert!(registry.is_empty());
    }

    // -----------------------------------------------------------------------
    // Snapshots and counts
    // -----------------------------------------------------------------------

    #[test]
    fn handles_reflect_survivors_in_creation_order() {
        let registry = Registry::new();
        let all: Vec<Handle> = (0..5).map(|_| registry.register(|| {}).unwrap()).collect();
        registry.unregister(all[1]);
        registry.unregister(all[3]);

        assert_eq!(registry.handles(), vec![all[0], all[2], all[4]]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn lock_pair_second_runner_fires() {
        // Two handlers guard the same lock file; whichever is run while the
        // other is still registered stays silent.
        let registry = Registry::new();
        let c1 = counter();
        let c2 = counter();
        let h1 = registry.register_keyed("lock", bump(&c1)).unwrap();
        let h2 = registry.register_keyed("lock", bump(&c2)).unwrap();

        assert!(registry.run(h1));
        assert_eq!(c1.load(Ordering::SeqCst), 0);
        assert!(!registry.is_registered(h1));

        assert!(registry.run(h2));
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert!(!registry.is_registered(h2));
    }

    // -----------------------------------------------------------------------
    // Global registry
    // -----------------------------------------------------------------------

    // Tests touching the process-global registry share state; serialize
    // them and start each from a clean live set.
    static GLOBAL_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn lock_global() -> parking_lot::MutexGuard<'static, ()> {
        let guard = GLOBAL_TEST_LOCK.lock();
        Registry::global().unregister_all();
        guard
    }

    #[test]
    fn global_registration_installs_hook() {
        let _guard = lock_global();
        let h = crate::register(|| {}).unwrap();
        assert!(hook::is_installed());
        assert!(crate::is_registered(h));
        assert!(crate::unregister(h));
    }

    #[test]
    fn global_free_functions_cover_the_surface() {
        let _guard = lock_global();
        let count = counter();
        let h1 = crate::register_keyed("g", bump(&count)).unwrap();
        let h2 = crate::register_keyed("g", bump(&count)).unwrap();
        assert_eq!(crate::handles(), vec![h1, h2]);

        crate::re_register(h2, None);
        assert!(crate::run(h1));
        assert_eq!(count.load(Ordering::SeqCst), 1, "h1 fires after h2 left the key");

        crate::run_all();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(Registry::global().is_empty());
    }

    #[test]
    fn global_unregister_all_silences_everything() {
        let _guard = lock_global();
        let count = counter();
        for _ in 0..4 {
            crate::register(bump(&count)).unwrap();
        }
        crate::unregister_all();
        crate::run_all();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
