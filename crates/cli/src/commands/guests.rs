//! Guest management commands.

use soiree_core::{Approval, Email, sort_for_admin};
use soiree_site::db::GuestRepository;

/// Print every guest in admin order.
///
/// # Errors
///
/// Returns an error if the connection or the query fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = GuestRepository::new(&pool);

    let mut guests = repo.list_all().await?;
    sort_for_admin(&mut guests);

    #[allow(clippy::print_stdout)]
    {
        println!("{:<12} {:<24} {:<32} {:<6} {:<6}", "status", "name", "email", "diner", "party");
        for guest in &guests {
            println!(
                "{:<12} {:<24} {:<32} {:<6} {:<6}",
                guest.approval.to_string(),
                guest.full_name(),
                guest.email,
                guest.diner,
                guest.party
            );
        }
        println!("{} guest(s)", guests.len());
    }

    Ok(())
}

/// Set a guest's approval state by email.
///
/// Note: this does not dispatch the invitation email; approving from the
/// admin panel does.
///
/// # Errors
///
/// Returns an error if the email or status is invalid, the guest does not
/// exist, or the update fails.
pub async fn set_status(email: &str, status: &str) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let approval: Approval = status.parse()?;

    let pool = super::connect().await?;
    let repo = GuestRepository::new(&pool);

    let guest = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| format!("no guest registered as {email}"))?;

    repo.set_approval(guest.id, approval).await?;
    tracing::info!(guest_id = %guest.id, %approval, "Approval state updated");

    Ok(())
}
