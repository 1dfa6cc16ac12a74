//! Approval state for guest registrations.

use serde::{Deserialize, Serialize};

/// Approval state of a guest's attendance request.
///
/// Three-variant enum rather than a nullable boolean so every transition
/// site is forced to handle all three states. The store column is still a
/// nullable boolean (`NULL` pending, `1` approved, `0` rejected); use
/// [`Approval::from_db`] / [`Approval::as_db`] at that boundary.
///
/// Every guest starts [`Pending`](Approval::Pending). Any transition from
/// any state to any state is legal; only an explicit admin action moves a
/// record back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Approval {
    /// Registered, awaiting the host's decision.
    #[default]
    Pending,
    /// The host approved the request.
    Approved,
    /// The host rejected the request.
    Rejected,
}

impl Approval {
    /// Map the store's nullable-boolean column into the enum.
    #[must_use]
    pub const fn from_db(value: Option<bool>) -> Self {
        match value {
            None => Self::Pending,
            Some(true) => Self::Approved,
            Some(false) => Self::Rejected,
        }
    }

    /// Map the enum back to the store's nullable-boolean column.
    #[must_use]
    pub const fn as_db(self) -> Option<bool> {
        match self {
            Self::Pending => None,
            Self::Approved => Some(true),
            Self::Rejected => Some(false),
        }
    }

    /// Primary sort key for the admin view: pending guests first, then
    /// approved, then rejected.
    #[must_use]
    pub const fn sort_bucket(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
        }
    }

    /// Whether this state is [`Pending`](Self::Pending).
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this state is [`Approved`](Self::Approved).
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether this state is [`Rejected`](Self::Rejected).
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

impl std::fmt::Display for Approval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for Approval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid approval state: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_mapping_roundtrip() {
        for state in [Approval::Pending, Approval::Approved, Approval::Rejected] {
            assert_eq!(Approval::from_db(state.as_db()), state);
        }
    }

    #[test]
    fn test_db_mapping_values() {
        assert_eq!(Approval::from_db(None), Approval::Pending);
        assert_eq!(Approval::from_db(Some(true)), Approval::Approved);
        assert_eq!(Approval::from_db(Some(false)), Approval::Rejected);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(Approval::default(), Approval::Pending);
    }

    #[test]
    fn test_sort_bucket_order() {
        assert!(Approval::Pending.sort_bucket() < Approval::Approved.sort_bucket());
        assert!(Approval::Approved.sort_bucket() < Approval::Rejected.sort_bucket());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pending".parse::<Approval>(), Ok(Approval::Pending));
        assert_eq!("approved".parse::<Approval>(), Ok(Approval::Approved));
        assert_eq!("rejected".parse::<Approval>(), Ok(Approval::Rejected));
        assert!("maybe".parse::<Approval>().is_err());
    }
}
