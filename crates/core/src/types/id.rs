//! Newtype ID for guest records.

use serde::{Deserialize, Serialize};

/// Identifier of a [`Guest`](crate::guest::Guest) record.
///
/// Assigned by the store on insert; opaque to the rest of the system.
/// Wrapping the raw `i64` keeps guest ids from being mixed up with other
/// integers in handler signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i64);

impl GuestId {
    /// Create an ID from the store's raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for GuestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GuestId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<GuestId> for i64 {
    fn from(id: GuestId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = GuestId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(GuestId::from(42), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(GuestId::new(7).to_string(), "7");
    }
}
