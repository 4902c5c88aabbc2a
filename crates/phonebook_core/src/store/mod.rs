//! Record store: canonical contact collection plus change notifications.
//!
//! # Responsibility
//! - Own the in-memory contact list for one application instance.
//! - Write every mutation through a `ContactRepository` before acknowledging.
//! - Notify subscribers with typed events.

pub mod event;
pub mod record_store;
