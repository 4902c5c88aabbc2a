//! Core logic for the phonebook.
//! Record store, per-contact views and the application shell live here;
//! front ends only forward user actions.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use config::{PhonebookConfig, DEFAULT_DB_FILE_NAME, DEFAULT_NAMESPACE};
pub use logging::{init_logging, logging_status};
pub use model::contact::{
    Contact, ContactField, ContactFields, ContactId, ContactValidationError,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use repo::memory_repo::MemoryContactRepository;
pub use store::event::{Listener, StoreEvent, SubscriptionId, Topic};
pub use store::record_store::{RecordStore, StoreError, StoreResult};
pub use view::app_shell::{AppShell, Summary};
pub use view::record_view::{CloseOutcome, RecordView, ViewMode};
