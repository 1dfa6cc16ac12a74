//! Core types for Soiree.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod approval;
pub mod email;
pub mod event;
pub mod id;

pub use approval::Approval;
pub use email::{Email, EmailError};
pub use event::EventKind;
pub use id::GuestId;
