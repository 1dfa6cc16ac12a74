//! Approval notification dispatch.
//!
//! Composes the invitation email for an approved guest and submits it to
//! the configured delivery endpoint over a single synchronous POST. Any
//! non-2xx response or transport error is a dispatch failure; failures are
//! logged and reported as a boolean so the approval transition they follow
//! is never blocked or rolled back by mail trouble.

use askama::Template;
use serde::Serialize;
use thiserror::Error;

use soiree_core::Guest;

use crate::config::{EventConfig, MailerConfig, SiteConfig};

/// Errors that can occur when dispatching a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Delivery endpoint returned a non-success response.
    #[error("delivery endpoint error: {status} - {message}")]
    Endpoint { status: u16, message: String },

    /// Failed to render an email body template.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// JSON payload accepted by the delivery endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailPayload {
    business_name: String,
    from_name: String,
    from_email: String,
    to: Vec<String>,
    subject: String,
    text: String,
    html: String,
}

/// HTML invitation email body.
#[derive(Template)]
#[template(path = "email/invitation.html")]
struct InvitationEmailHtml<'a> {
    host_name: &'a str,
    guest_name: &'a str,
    dinner_line: Option<String>,
    party_line: Option<String>,
    invitation_url: &'a str,
}

/// Plain text invitation email body.
#[derive(Template)]
#[template(path = "email/invitation.txt")]
struct InvitationEmailText<'a> {
    host_name: &'a str,
    invitation_url: &'a str,
}

/// Client for the approval-email delivery endpoint.
#[derive(Clone)]
pub struct NotificationClient {
    client: reqwest::Client,
    mailer: MailerConfig,
    host_name: String,
    base_url: String,
    event: EventConfig,
}

impl NotificationClient {
    /// Create a new notification client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(mailer: MailerConfig, config: &SiteConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            mailer,
            host_name: config.host_name.clone(),
            base_url: config.base_url.clone(),
            event: config.event.clone(),
        })
    }

    /// Send the invitation email for a freshly approved guest.
    ///
    /// Returns whether the dispatch succeeded. Never raises: failures are
    /// logged here and surfaced to the admin as a notice, and the approval
    /// that triggered the dispatch stands either way.
    pub async fn notify_approved(&self, guest: &Guest) -> bool {
        match self.send_invitation(guest).await {
            Ok(()) => {
                tracing::info!(email = %guest.email, "Approval notification sent");
                true
            }
            Err(e) => {
                tracing::warn!(email = %guest.email, error = %e, "Approval notification failed");
                false
            }
        }
    }

    async fn send_invitation(&self, guest: &Guest) -> Result<(), NotifyError> {
        let payload = self.compose(guest)?;

        let response = self
            .client
            .post(&self.mailer.endpoint)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Build the payload: recipient is the guest, and the body names only
    /// the events the guest is attending.
    fn compose(&self, guest: &Guest) -> Result<EmailPayload, NotifyError> {
        let invitation_url = format!(
            "{}/inv/{}",
            self.base_url,
            urlencoding::encode(guest.email.as_str())
        );

        let dinner_line = guest.diner.then(|| {
            format!(
                "{} - {}",
                self.event.dinner.name, self.event.dinner.schedule
            )
        });
        let party_line = guest
            .party
            .then(|| format!("{} - {}", self.event.party.name, self.event.party.schedule));

        let guest_name = guest.full_name();
        let html = InvitationEmailHtml {
            host_name: &self.host_name,
            guest_name: &guest_name,
            dinner_line,
            party_line,
            invitation_url: &invitation_url,
        }
        .render()?;
        let text = InvitationEmailText {
            host_name: &self.host_name,
            invitation_url: &invitation_url,
        }
        .render()?;

        Ok(EmailPayload {
            business_name: self.mailer.business_name.clone(),
            from_name: self.mailer.from_name.clone(),
            from_email: self.mailer.from_email.clone(),
            to: vec![guest.email.to_string()],
            subject: format!("You're invited to {}'s party", self.host_name),
            text,
            html,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use secrecy::SecretString;

    use soiree_core::{Approval, Email, GuestId};

    use crate::config::VenueConfig;

    use super::*;

    fn test_client() -> NotificationClient {
        let config = SiteConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://party.example.com".to_string(),
            admin_password: SecretString::from("x".repeat(32)),
            host_name: "Alex".to_string(),
            event: EventConfig {
                date_text: "Saturday, May 31".to_string(),
                dinner: VenueConfig {
                    name: "The Supper Club".to_string(),
                    schedule: "Saturday, 9pm to 1am".to_string(),
                    maps_link: None,
                },
                party: VenueConfig {
                    name: "Club Midnight".to_string(),
                    schedule: "Sunday, 1am to 6am".to_string(),
                    maps_link: None,
                },
            },
            mailer: None,
            sentry_dsn: None,
        };
        let mailer = MailerConfig {
            endpoint: "https://mail.example.com/send".to_string(),
            business_name: "Alex Party".to_string(),
            from_name: "Alex".to_string(),
            from_email: "alex@example.com".to_string(),
        };
        NotificationClient::new(mailer, &config).unwrap()
    }

    fn test_guest(diner: bool, party: bool) -> Guest {
        Guest {
            id: GuestId::new(1),
            name: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: Email::parse("ada+rsvp@example.com").unwrap(),
            diner,
            party,
            approval: Approval::Approved,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compose_addresses_the_guest() {
        let payload = test_client().compose(&test_guest(true, true)).unwrap();
        assert_eq!(payload.to, vec!["ada+rsvp@example.com".to_string()]);
        assert_eq!(payload.business_name, "Alex Party");
        assert_eq!(payload.from_email, "alex@example.com");
    }

    #[test]
    fn test_compose_encodes_email_in_link() {
        let payload = test_client().compose(&test_guest(true, true)).unwrap();
        assert!(
            payload
                .text
                .contains("https://party.example.com/inv/ada%2Brsvp%40example.com")
        );
    }

    #[test]
    fn test_compose_includes_only_attended_events() {
        let dinner_only = test_client().compose(&test_guest(true, false)).unwrap();
        assert!(dinner_only.html.contains("The Supper Club"));
        assert!(!dinner_only.html.contains("Club Midnight"));

        let party_only = test_client().compose(&test_guest(false, true)).unwrap();
        assert!(!party_only.html.contains("The Supper Club"));
        assert!(party_only.html.contains("Club Midnight"));
    }

    #[test]
    fn test_payload_serializes_with_camel_case_keys() {
        let payload = test_client().compose(&test_guest(true, true)).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("businessName").is_some());
        assert!(json.get("fromName").is_some());
        assert!(json.get("fromEmail").is_some());
        assert!(json.get("to").unwrap().is_array());
    }
}
