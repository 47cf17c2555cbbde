//! Deferred actions and their registration-time validation.
//!
//! A [`Callback`] owns the deferred work as a boxed closure; whatever
//! arguments the action needs are closure captures. Validation is
//! front-loaded: anything that can make a callback non-invocable must fail
//! at registration time, inside the caller's normal control flow, because
//! the alternative is a failure during process teardown where nothing can
//! report it.

use std::any::type_name;
use std::fmt;
use std::sync::Weak;

use thiserror::Error;

/// A callback target failed validation at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("callback target `{target}` is not invocable (already dropped)")]
pub struct InvalidCallbackError {
    target: &'static str,
}

impl InvalidCallbackError {
    /// Type name of the target that failed validation.
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }
}

/// A deferred action: an owned invocable capturing its own target and
/// bound state.
pub struct Callback {
    action: Box<dyn FnMut() + Send + 'static>,
}

impl Callback {
    /// Wrap a closure.
    ///
    /// Closures carry their bound state in their captures, so this
    /// conversion cannot fail.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self { action: Box::new(f) }
    }

    /// Bind a method-like action to a shared target held through a [`Weak`]
    /// reference.
    ///
    /// Fails with [`InvalidCallbackError`] if the target is already gone at
    /// registration time. A target dropped *after* registration degrades the
    /// invocation to a logged no-op.
    pub fn bind<T, F>(target: Weak<T>, mut f: F) -> Result<Self, InvalidCallbackError>
    where
        T: Send + Sync + 'static,
        F: FnMut(&T) + Send + 'static,
    {
        if target.upgrade().is_none() {
            return Err(InvalidCallbackError {
                target: type_name::<T>(),
            });
        }
        Ok(Self::new(move || match target.upgrade() {
            Some(t) => f(&t),
            None => tracing::debug!(
                target_type = type_name::<T>(),
                "callback target dropped before invocation"
            ),
        }))
    }

    pub(crate) fn invoke(&mut self) {
        (self.action)();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Conversion into a validated [`Callback`].
///
/// Registration funnels every accepted form through this trait so that
/// whatever can fail, fails at registration time.
pub trait IntoCallback {
    /// Validate and convert into a [`Callback`].
    fn into_callback(self) -> Result<Callback, InvalidCallbackError>;
}

impl IntoCallback for Callback {
    fn into_callback(self) -> Result<Callback, InvalidCallbackError> {
        Ok(self)
    }
}

impl<F> IntoCallback for F
where
    F: FnMut() + Send + 'static,
{
    fn into_callback(self) -> Result<Callback, InvalidCallbackError> {
        Ok(Callback::new(self))
    }
}
