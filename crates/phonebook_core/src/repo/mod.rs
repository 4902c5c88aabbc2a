//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value persistence contract used by the record store.
//! - Isolate SQLite details from store/view orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Contact::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Unavailable`,
//!   `QuotaExceeded`) in addition to DB transport errors.

pub mod contact_repo;
pub mod memory_repo;
