//! Session-related models for the site.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
