//! In-memory contact repository.
//!
//! # Responsibility
//! - Provide a storage backend that needs no database file.
//! - Simulate storage failures (unavailable, quota exceeded) for callers
//!   that must prove they never diverge from durable state.
//!
//! # Invariants
//! - Clones share one backing state, so a dropped store can be "reloaded"
//!   from a surviving handle.
//! - A failed write leaves the backing state untouched.

use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{persisted_id, ContactRepository, RepoError, RepoResult};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<Contact>,
    unavailable: bool,
    quota: Option<usize>,
}

/// Shared-handle in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactRepository {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that refuses to hold more than `limit` records.
    pub fn with_quota(limit: usize) -> Self {
        let repo = Self::default();
        repo.state.borrow_mut().quota = Some(limit);
        repo
    }

    /// Toggles simulated storage outage; every operation fails while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.borrow_mut().unavailable = unavailable;
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.state.borrow().unavailable {
            return Err(RepoError::Unavailable(
                "in-memory storage switched off".to_string(),
            ));
        }
        Ok(())
    }
}

impl ContactRepository for MemoryContactRepository {
    fn load_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.ensure_available()?;
        Ok(self.state.borrow().records.clone())
    }

    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        self.ensure_available()?;
        let id = persisted_id(contact)?;

        let mut state = self.state.borrow_mut();
        if let Some(limit) = state.quota {
            if state.records.len() >= limit {
                return Err(RepoError::QuotaExceeded { limit });
            }
        }
        if state.records.iter().any(|stored| stored.id == Some(id)) {
            return Err(RepoError::InvalidData(format!(
                "duplicate contact id `{id}`"
            )));
        }
        state.records.push(contact.clone());
        Ok(id)
    }

    fn save_contact(&self, contact: &Contact) -> RepoResult<()> {
        self.ensure_available()?;
        let id = persisted_id(contact)?;

        let mut state = self.state.borrow_mut();
        let stored = state
            .records
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(RepoError::NotFound(id))?;
        stored.apply(contact.fields());
        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.ensure_available()?;

        let mut state = self.state.borrow_mut();
        let position = state
            .records
            .iter()
            .position(|stored| stored.id == Some(id))
            .ok_or(RepoError::NotFound(id))?;
        state.records.remove(position);
        Ok(())
    }
}
