//! Presentation units bound to the record store.
//!
//! # Responsibility
//! - `record_view`: one display/edit unit per contact.
//! - `app_shell`: list coordinator, creation form and summary footer.
//!
//! # Invariants
//! - Views hold non-owning copies of contacts; the store stays canonical.
//! - Every view subscription is released on teardown.

pub mod app_shell;
pub mod record_view;
