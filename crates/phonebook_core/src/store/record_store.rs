//! Record store over a pluggable contact repository.
//!
//! # Responsibility
//! - Provide load/create/save/delete entry points for shell and views.
//! - Keep the in-memory collection identical to what storage holds.
//!
//! # Invariants
//! - Storage is written first; memory changes and events happen only after
//!   the write succeeded. A failed write leaves memory untouched and emits
//!   nothing.
//! - A saved contact never has an empty name.
//! - Contact field values are never logged.

use crate::model::contact::{Contact, ContactFields, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::store::event::{EventHub, Listener, StoreEvent, SubscriptionId, Topic};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence failed; the operation was abandoned.
    Repo(RepoError),
    /// Target contact is not in the collection.
    NotFound(ContactId),
    /// Save attempted with an empty name.
    EmptyName(ContactId),
    /// Operation needs a persisted contact but got a pending one.
    PendingContact,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::EmptyName(id) => write!(f, "contact {id} cannot be saved with an empty name"),
            Self::PendingContact => write!(f, "contact has not been persisted yet"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Owning contact collection with write-through persistence.
pub struct RecordStore<R: ContactRepository> {
    repo: R,
    contacts: Vec<Contact>,
    events: EventHub,
}

impl<R: ContactRepository> RecordStore<R> {
    /// Creates an empty store; call `load` to pull persisted contacts.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            contacts: Vec::new(),
            events: EventHub::new(),
        }
    }

    /// Replaces the collection with persisted contacts.
    ///
    /// Emits `Reset` followed by one `Added` per contact in persisted order,
    /// and returns the number of loaded contacts.
    pub fn load(&mut self) -> StoreResult<usize> {
        let loaded = self.repo.load_contacts().map_err(|err| {
            error!("event=contact_load module=store status=error error={err}");
            StoreError::from(err)
        })?;

        self.contacts = loaded;
        self.events.emit(&StoreEvent::Reset);
        for contact in &self.contacts {
            self.events.emit(&StoreEvent::Added(contact.clone()));
        }

        info!(
            "event=contact_load module=store status=ok count={}",
            self.contacts.len()
        );
        Ok(self.contacts.len())
    }

    /// Builds, persists and appends a new contact, then emits `Added`.
    ///
    /// Empty fields are replaced by placeholders.
    pub fn create(&mut self, fields: ContactFields) -> StoreResult<Contact> {
        let mut contact = Contact::pending(fields);
        contact
            .assign_id(Uuid::new_v4())
            .map_err(RepoError::from)?;

        let id = self.repo.create_contact(&contact).map_err(|err| {
            error!("event=contact_create module=store status=error error={err}");
            StoreError::from(err)
        })?;

        self.contacts.push(contact.clone());
        info!("event=contact_create module=store status=ok id={id}");
        self.events.emit(&StoreEvent::Added(contact.clone()));
        Ok(contact)
    }

    /// Overwrites all four fields of a contact, persists, then emits `Changed`.
    pub fn save(&mut self, id: ContactId, fields: ContactFields) -> StoreResult<Contact> {
        if fields.name.is_empty() {
            return Err(StoreError::EmptyName(id));
        }
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;

        let mut updated = self.contacts[index].clone();
        updated.apply(fields);
        self.repo.save_contact(&updated).map_err(|err| {
            error!("event=contact_save module=store status=error id={id} error={err}");
            StoreError::from(err)
        })?;

        self.contacts[index] = updated.clone();
        info!("event=contact_save module=store status=ok id={id}");
        self.events.emit(&StoreEvent::Changed(updated.clone()));
        Ok(updated)
    }

    /// Removes a contact from storage and memory, then emits `Removed`.
    pub fn delete(&mut self, id: ContactId) -> StoreResult<Contact> {
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;

        self.repo.delete_contact(id).map_err(|err| {
            error!("event=contact_delete module=store status=error id={id} error={err}");
            StoreError::from(err)
        })?;

        let removed = self.contacts.remove(index);
        info!("event=contact_delete module=store status=ok id={id}");
        self.events.emit(&StoreEvent::Removed(removed.clone()));
        Ok(removed)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == Some(id))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn subscribe(&mut self, topic: Topic, listener: Listener) -> SubscriptionId {
        self.events.subscribe(topic, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn index_of(&self, id: ContactId) -> Option<usize> {
        self.contacts
            .iter()
            .position(|contact| contact.id == Some(id))
    }
}
