//! The two independently-attendable sub-events.

use serde::{Deserialize, Serialize};

/// One of the two sub-events a guest can request attendance to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The dinner before the party.
    Dinner,
    /// The main party.
    Party,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dinner => write!(f, "dinner"),
            Self::Party => write!(f, "party"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dinner" => Ok(Self::Dinner),
            "party" => Ok(Self::Party),
            _ => Err(format!("invalid event: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        for event in [EventKind::Dinner, EventKind::Party] {
            assert_eq!(event.to_string().parse::<EventKind>(), Ok(event));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("brunch".parse::<EventKind>().is_err());
    }
}
