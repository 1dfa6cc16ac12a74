//! Guest repository: the store adapter for guest records.
//!
//! All reconciliation rules live in `soiree-core`; this module only maps
//! rows to [`Guest`] values and domain errors.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use soiree_core::{Approval, Email, Guest, GuestId, RsvpRequest};

use super::RepositoryError;

/// Raw row shape of the `guests` table.
#[derive(sqlx::FromRow)]
struct GuestRow {
    id: i64,
    name: String,
    lastname: String,
    email: String,
    diner: bool,
    party: bool,
    approved: Option<bool>,
    created_at: DateTime<Utc>,
}

impl GuestRow {
    fn into_guest(self) -> Result<Guest, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Guest {
            id: GuestId::new(self.id),
            name: self.name,
            lastname: self.lastname,
            email,
            diner: self.diner,
            party: self.party,
            approval: Approval::from_db(self.approved),
            created_at: self.created_at,
        })
    }
}

/// Repository for guest database operations.
pub struct GuestRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GuestRepository<'a> {
    /// Create a new guest repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated registration with a pending approval state.
    ///
    /// The creation timestamp is assigned here and never changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateEmail` if the email is already
    /// registered (unique-index violation).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, rsvp: &RsvpRequest) -> Result<GuestId, RepositoryError> {
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO guests (name, lastname, email, diner, party, approved, created_at)
            VALUES (?, ?, ?, ?, ?, NULL, ?)
            RETURNING id
            ",
        )
        .bind(&rsvp.name)
        .bind(&rsvp.lastname)
        .bind(rsvp.email.as_str())
        .bind(rsvp.diner)
        .bind(rsvp.party)
        .bind(created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::DuplicateEmail;
            }
            RepositoryError::Database(e)
        })?;

        Ok(GuestId::new(id))
    }

    /// Get a guest by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get(&self, id: GuestId) -> Result<Option<Guest>, RepositoryError> {
        let row: Option<GuestRow> = sqlx::query_as(
            r"
            SELECT id, name, lastname, email, diner, party, approved, created_at
            FROM guests
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(GuestRow::into_guest).transpose()
    }

    /// Exact-match lookup by email.
    ///
    /// At most one record can match (unique index); zero matches is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Guest>, RepositoryError> {
        let row: Option<GuestRow> = sqlx::query_as(
            r"
            SELECT id, name, lastname, email, diner, party, approved, created_at
            FROM guests
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(GuestRow::into_guest).transpose()
    }

    /// Every guest, newest registration first.
    ///
    /// Id is the tie-break for identical timestamps so the order is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn list_all(&self) -> Result<Vec<Guest>, RepositoryError> {
        let rows: Vec<GuestRow> = sqlx::query_as(
            r"
            SELECT id, name, lastname, email, diner, party, approved, created_at
            FROM guests
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(GuestRow::into_guest).collect()
    }

    /// Unconditionally set the approval state.
    ///
    /// Any transition from any state to any state is legal, including
    /// writing the state the record already has.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the guest doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_approval(
        &self,
        id: GuestId,
        approval: Approval,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE guests
            SET approved = ?
            WHERE id = ?
            ",
        )
        .bind(approval.as_db())
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Permanently delete a guest.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was deleted, `false` if the id did not
    /// exist (deleting a missing guest is a no-op).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: GuestId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM guests
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
