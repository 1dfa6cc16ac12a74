//! The guest record and the reconciliation rules derived from it.
//!
//! Everything here is pure: the admin ordering, the confirmed-list filter,
//! and the personalized-lookup outcome are all functions over in-memory
//! guest records, so the rules can be tested with literal inputs.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Approval, Email, EmailError, EventKind, GuestId};

/// A person who has requested (or been granted) attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Store-assigned identifier.
    pub id: GuestId,
    /// First name, as entered at registration.
    pub name: String,
    /// Last name, as entered at registration.
    pub lastname: String,
    /// Registration email; unique across all guests.
    pub email: Email,
    /// Requested dinner attendance.
    pub diner: bool,
    /// Requested party attendance.
    pub party: bool,
    /// Current approval state.
    pub approval: Approval,
    /// Assigned at creation, immutable; tie-break sort key.
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Display name used in lists and the personalized page.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }

    /// Whether this guest requested attendance to `event`.
    #[must_use]
    pub const fn attends(&self, event: EventKind) -> bool {
        match event {
            EventKind::Dinner => self.diner,
            EventKind::Party => self.party,
        }
    }

    /// Whether this guest appears on the public confirmed list for `event`:
    /// approved by the host and attending that event.
    #[must_use]
    pub const fn is_confirmed_for(&self, event: EventKind) -> bool {
        self.approval.is_approved() && self.attends(event)
    }
}

/// Errors rejecting an RSVP candidate before it reaches the store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RsvpError {
    /// First name is empty after trimming.
    #[error("please enter your first name")]
    MissingName,
    /// Last name is empty after trimming.
    #[error("please enter your last name")]
    MissingLastname,
    /// Email failed to parse.
    #[error("please enter a valid email address")]
    InvalidEmail(#[source] EmailError),
    /// Neither dinner nor party was selected.
    #[error("please confirm attendance to the dinner, the party, or both")]
    NoEventSelected,
}

/// A validated registration candidate.
///
/// Construction through [`RsvpRequest::new`] is the only way to get one,
/// so a request in hand always has non-empty names, a parseable email, and
/// at least one event selected. The store sets the id, the pending approval
/// state, and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpRequest {
    /// First name, trimmed.
    pub name: String,
    /// Last name, trimmed.
    pub lastname: String,
    /// Validated registration email.
    pub email: Email,
    /// Requests dinner attendance.
    pub diner: bool,
    /// Requests party attendance.
    pub party: bool,
}

impl RsvpRequest {
    /// Validate a raw form submission into a registration candidate.
    ///
    /// # Errors
    ///
    /// Returns an [`RsvpError`] naming the first field the guest has to
    /// correct; messages are written to be shown verbatim on the form.
    pub fn new(
        name: &str,
        lastname: &str,
        email: &str,
        diner: bool,
        party: bool,
    ) -> Result<Self, RsvpError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RsvpError::MissingName);
        }

        let lastname = lastname.trim();
        if lastname.is_empty() {
            return Err(RsvpError::MissingLastname);
        }

        let email = Email::parse(email).map_err(RsvpError::InvalidEmail)?;

        if !diner && !party {
            return Err(RsvpError::NoEventSelected);
        }

        Ok(Self {
            name: name.to_owned(),
            lastname: lastname.to_owned(),
            email,
            diner,
            party,
        })
    }
}

/// Order guests for the admin dashboard.
///
/// Stable, total composite ordering: pending before approved before
/// rejected, newest registration first within each group.
pub fn sort_for_admin(guests: &mut [Guest]) {
    guests.sort_by_key(|g| (g.approval.sort_bucket(), Reverse(g.created_at)));
}

/// Guests shown on the public confirmed list for `event`.
///
/// Pending and rejected guests never appear, whatever their event flags.
/// Input order (newest first, from the store) is preserved.
#[must_use]
pub fn confirmed_for(guests: &[Guest], event: EventKind) -> Vec<&Guest> {
    guests.iter().filter(|g| g.is_confirmed_for(event)).collect()
}

/// What the personalized invitation page shows for a looked-up email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationOutcome<'a> {
    /// Approved guest: show the full invitation with their events.
    Approved(&'a Guest),
    /// The host rejected this registration.
    Rejected,
    /// Registered but not yet decided.
    Pending,
    /// No registration found. Presented with copy that also covers
    /// "not approved", so the endpoint cannot be used to probe which
    /// emails are registered.
    Unknown,
}

/// Resolve a `find_by_email` result into the page to show.
#[must_use]
pub fn invitation_outcome(guest: Option<&Guest>) -> InvitationOutcome<'_> {
    match guest {
        Some(g) => match g.approval {
            Approval::Approved => InvitationOutcome::Approved(g),
            Approval::Rejected => InvitationOutcome::Rejected,
            Approval::Pending => InvitationOutcome::Pending,
        },
        None => InvitationOutcome::Unknown,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn guest(id: i64, approval: Approval, created_secs: i64) -> Guest {
        Guest {
            id: GuestId::new(id),
            name: format!("Guest{id}"),
            lastname: "Example".to_owned(),
            email: Email::parse(&format!("guest{id}@example.com")).unwrap(),
            diner: true,
            party: true,
            approval,
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_rsvp_request_trims_and_validates() {
        let req = RsvpRequest::new(" Ada ", " Lovelace ", "ada@example.com", true, false).unwrap();
        assert_eq!(req.name, "Ada");
        assert_eq!(req.lastname, "Lovelace");
        assert_eq!(req.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_rsvp_request_requires_names() {
        assert!(matches!(
            RsvpRequest::new("  ", "Lovelace", "ada@example.com", true, true),
            Err(RsvpError::MissingName)
        ));
        assert!(matches!(
            RsvpRequest::new("Ada", "", "ada@example.com", true, true),
            Err(RsvpError::MissingLastname)
        ));
    }

    #[test]
    fn test_rsvp_request_requires_valid_email() {
        assert!(matches!(
            RsvpRequest::new("Ada", "Lovelace", "not-an-email", true, true),
            Err(RsvpError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_rsvp_request_requires_an_event() {
        assert!(matches!(
            RsvpRequest::new("Ada", "Lovelace", "ada@example.com", false, false),
            Err(RsvpError::NoEventSelected)
        ));
    }

    #[test]
    fn test_sort_for_admin_composite_ordering() {
        // A(approved, t=10), B(pending, t=5), C(rejected, t=20), D(pending, t=8)
        let a = guest(1, Approval::Approved, 10);
        let b = guest(2, Approval::Pending, 5);
        let c = guest(3, Approval::Rejected, 20);
        let d = guest(4, Approval::Pending, 8);

        let mut guests = vec![a.clone(), b.clone(), c.clone(), d.clone()];
        sort_for_admin(&mut guests);

        assert_eq!(guests, vec![d, b, a, c]);
    }

    #[test]
    fn test_sort_for_admin_is_stable_on_equal_keys() {
        // Same bucket, same timestamp: input order must be preserved.
        let first = guest(1, Approval::Pending, 100);
        let second = guest(2, Approval::Pending, 100);

        let mut guests = vec![first.clone(), second.clone()];
        sort_for_admin(&mut guests);

        assert_eq!(guests, vec![first, second]);
    }

    #[test]
    fn test_sort_for_admin_groups_all_buckets() {
        let mut guests = vec![
            guest(1, Approval::Rejected, 1),
            guest(2, Approval::Approved, 2),
            guest(3, Approval::Pending, 3),
            guest(4, Approval::Approved, 9),
            guest(5, Approval::Pending, 7),
        ];
        sort_for_admin(&mut guests);

        let buckets: Vec<u8> = guests.iter().map(|g| g.approval.sort_bucket()).collect();
        assert_eq!(buckets, vec![0, 0, 1, 1, 2]);
        // Newest first within the pending and approved groups.
        assert_eq!(guests.first().unwrap().id, GuestId::new(5));
        assert_eq!(guests.get(2).unwrap().id, GuestId::new(4));
    }

    #[test]
    fn test_confirmed_for_excludes_unapproved_and_wrong_event() {
        let mut dinner_only = guest(1, Approval::Approved, 1);
        dinner_only.party = false;
        let mut party_only = guest(2, Approval::Approved, 2);
        party_only.diner = false;
        let pending = guest(3, Approval::Pending, 3);
        let rejected = guest(4, Approval::Rejected, 4);

        let guests = vec![dinner_only, party_only, pending, rejected];

        let dinner = confirmed_for(&guests, EventKind::Dinner);
        assert_eq!(dinner.len(), 1);
        assert_eq!(dinner.first().unwrap().id, GuestId::new(1));

        let party = confirmed_for(&guests, EventKind::Party);
        assert_eq!(party.len(), 1);
        assert_eq!(party.first().unwrap().id, GuestId::new(2));
    }

    #[test]
    fn test_confirmed_for_empty_store() {
        assert!(confirmed_for(&[], EventKind::Dinner).is_empty());
        assert!(confirmed_for(&[], EventKind::Party).is_empty());
    }

    #[test]
    fn test_invitation_outcome_covers_all_states() {
        let approved = guest(1, Approval::Approved, 1);
        let rejected = guest(2, Approval::Rejected, 2);
        let pending = guest(3, Approval::Pending, 3);

        assert!(matches!(
            invitation_outcome(Some(&approved)),
            InvitationOutcome::Approved(g) if g.id == GuestId::new(1)
        ));
        assert_eq!(invitation_outcome(Some(&rejected)), InvitationOutcome::Rejected);
        assert_eq!(invitation_outcome(Some(&pending)), InvitationOutcome::Pending);
        assert_eq!(invitation_outcome(None), InvitationOutcome::Unknown);
    }

    #[test]
    fn test_full_name() {
        let g = guest(1, Approval::Pending, 1);
        assert_eq!(g.full_name(), "Guest1 Example");
    }
}
