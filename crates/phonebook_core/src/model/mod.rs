//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical phonebook record and its input shape.
//! - Keep pending/persisted identity explicit in the type.
//!
//! # Invariants
//! - Every persisted contact is identified by a stable `ContactId`.
//! - All four text fields are always present.

pub mod contact;
