//! Integration tests for the guest store adapter.
//!
//! These run against a migrated in-memory `SQLite` database, so the unique
//! index, the tri-state column mapping, and the ordering are exercised for
//! real.

use soiree_core::{Approval, Email, GuestId, RsvpRequest};
use soiree_integration_tests::test_pool;
use soiree_site::db::{GuestRepository, RepositoryError};

fn rsvp(name: &str, email: &str, diner: bool, party: bool) -> RsvpRequest {
    RsvpRequest::new(name, "Example", email, diner, party).expect("valid test rsvp")
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn distinct_emails_register_with_distinct_ids() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let first = repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");
    let second = repo
        .insert(&rsvp("Grace", "grace@example.com", true, false))
        .await
        .expect("insert");

    assert_ne!(first, second);

    let found = repo
        .find_by_email(&Email::parse("ada@example.com").expect("email"))
        .await
        .expect("query")
        .expect("registered guest");
    assert_eq!(found.id, first);
    assert_eq!(found.name, "Ada");
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_writes_nothing() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");

    let result = repo.insert(&rsvp("Imposter", "ada@example.com", false, true)).await;
    assert!(matches!(result, Err(RepositoryError::DuplicateEmail)));

    // The first record is untouched and still the only one.
    let all = repo.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all.first().expect("guest").name, "Ada");
}

#[tokio::test]
async fn duplicate_check_is_case_sensitive() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");

    // Different case, different registration - uniqueness is exact-match.
    repo.insert(&rsvp("Ada", "Ada@example.com", true, true))
        .await
        .expect("case-different email registers");

    assert_eq!(repo.list_all().await.expect("list").len(), 2);
}

#[tokio::test]
async fn register_round_trips_every_field() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let candidate = rsvp("Ada", "ada+rsvp@example.com", true, false);
    let id = repo.insert(&candidate).await.expect("insert");

    let all = repo.list_all().await.expect("list");
    assert_eq!(all.len(), 1);

    let guest = all.into_iter().next().expect("guest");
    assert_eq!(guest.id, id);
    assert_eq!(guest.name, candidate.name);
    assert_eq!(guest.lastname, candidate.lastname);
    assert_eq!(guest.email, candidate.email);
    assert_eq!(guest.diner, candidate.diner);
    assert_eq!(guest.party, candidate.party);
    assert_eq!(guest.approval, Approval::Pending);
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
async fn list_all_is_newest_first() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let first = repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");
    let second = repo
        .insert(&rsvp("Grace", "grace@example.com", true, true))
        .await
        .expect("insert");
    let third = repo.insert(&rsvp("Alan", "alan@example.com", true, true)).await.expect("insert");

    let ids: Vec<_> = repo.list_all().await.expect("list").into_iter().map(|g| g.id).collect();
    // Inserts within a test can share a timestamp; the id tie-break keeps
    // the order deterministic either way.
    assert_eq!(ids, vec![third, second, first]);
}

// =============================================================================
// Approval transitions
// =============================================================================

#[tokio::test]
async fn set_approval_overwrites_unconditionally() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let id = repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");

    // Reject, then back to pending: no residue from the intermediate state.
    repo.set_approval(id, Approval::Rejected).await.expect("reject");
    repo.set_approval(id, Approval::Pending).await.expect("set pending");

    let guest = repo.get(id).await.expect("get").expect("guest");
    assert_eq!(guest.approval, Approval::Pending);

    // Approved -> approved is legal too.
    repo.set_approval(id, Approval::Approved).await.expect("approve");
    repo.set_approval(id, Approval::Approved).await.expect("approve again");

    let guest = repo.get(id).await.expect("get").expect("guest");
    assert_eq!(guest.approval, Approval::Approved);
}

#[tokio::test]
async fn set_approval_on_missing_id_is_not_found() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let result = repo.set_approval(GuestId::new(4242), Approval::Approved).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn transitions_do_not_touch_other_fields() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let id = repo.insert(&rsvp("Ada", "ada@example.com", true, false)).await.expect("insert");
    let before = repo.get(id).await.expect("get").expect("guest");

    repo.set_approval(id, Approval::Approved).await.expect("approve");

    let after = repo.get(id).await.expect("get").expect("guest");
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.email, before.email);
    assert_eq!(after.diner, before.diner);
    assert_eq!(after.party, before.party);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn remove_then_find_by_email_is_absent() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let email = Email::parse("ada@example.com").expect("email");
    let id = repo.insert(&rsvp("Ada", "ada@example.com", true, true)).await.expect("insert");

    assert!(repo.delete(id).await.expect("delete"));
    assert!(repo.find_by_email(&email).await.expect("query").is_none());

    // The email is free for a fresh registration afterwards.
    repo.insert(&rsvp("Ada", "ada@example.com", false, true))
        .await
        .expect("re-register after delete");
}

#[tokio::test]
async fn remove_missing_id_is_a_noop() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    assert!(!repo.delete(GuestId::new(4242)).await.expect("delete"));
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn find_by_email_tolerates_zero_matches() {
    let pool = test_pool().await;
    let repo = GuestRepository::new(&pool);

    let absent = repo
        .find_by_email(&Email::parse("nobody@example.com").expect("email"))
        .await
        .expect("query");
    assert!(absent.is_none());
}
