//! Opaque registration handles.

use std::fmt;

/// Identifies one deferred-callback registration.
///
/// A handle is a stable token assigned at registration and never reused for
/// another callback within the same registry. It is only ever a lookup key,
/// never a positional index, so removing one handler cannot shift the
/// identity of the survivors.
///
/// Handles are inert once their registration has been consumed by
/// [`run`](crate::registry::Registry::run): every further operation on them
/// is a no-op reporting `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub(crate) u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_id() {
        assert_eq!(Handle(7).to_string(), "handle#7");
    }

    #[test]
    fn handles_order_by_assignment() {
        assert!(Handle(1) < Handle(2));
        assert_eq!(Handle(3), Handle(3));
    }
}
