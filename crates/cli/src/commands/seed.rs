//! Seed the database with sample guests for local development.

use soiree_core::RsvpRequest;
use soiree_site::db::{GuestRepository, RepositoryError};

/// Sample registrations: name, lastname, email, diner, party.
const SAMPLE_GUESTS: &[(&str, &str, &str, bool, bool)] = &[
    ("Ada", "Lovelace", "ada@example.com", true, true),
    ("Grace", "Hopper", "grace@example.com", true, false),
    ("Alan", "Turing", "alan@example.com", false, true),
    ("Margaret", "Hamilton", "margaret@example.com", true, true),
];

/// Insert the sample guests, skipping any already registered.
///
/// # Errors
///
/// Returns an error if the connection fails, a sample fails validation, or
/// an insert fails for a reason other than an existing registration.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = GuestRepository::new(&pool);

    let mut inserted = 0_u32;
    for (name, lastname, email, diner, party) in SAMPLE_GUESTS {
        let rsvp = RsvpRequest::new(name, lastname, email, *diner, *party)?;
        match repo.insert(&rsvp).await {
            Ok(id) => {
                tracing::info!(guest_id = %id, email = %rsvp.email, "Seeded guest");
                inserted += 1;
            }
            Err(RepositoryError::DuplicateEmail) => {
                tracing::info!(email = %rsvp.email, "Already registered, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(inserted, "Seeding complete");
    Ok(())
}
