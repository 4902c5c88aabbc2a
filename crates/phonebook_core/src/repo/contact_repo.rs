//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide load/create/save/delete over one namespace of stored contacts.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Rows of one namespace are enumerated in insertion order (`seq ASC`).
//! - Write paths call `Contact::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for contact storage operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
    /// Backing storage cannot be reached.
    Unavailable(String),
    /// Backing storage refused the write because it is full.
    QuotaExceeded { limit: usize },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::Unavailable(message) => write!(f, "contact storage unavailable: {message}"),
            Self::QuotaExceeded { limit } => {
                write!(f, "contact storage quota exceeded (limit {limit})")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pluggable key-value persistence for contacts.
///
/// Implementations own exactly one namespace; the record store is their only
/// writer.
pub trait ContactRepository {
    /// Returns every live contact in persisted order.
    fn load_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Persists a contact that already carries its identifier.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Overwrites the four fields of an existing contact.
    fn save_contact(&self, contact: &Contact) -> RepoResult<()>;
    /// Removes a contact from storage.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// Returns the id of a contact headed for storage, rejecting pending ones.
pub(crate) fn persisted_id(contact: &Contact) -> RepoResult<ContactId> {
    contact.validate()?;
    contact.id.ok_or_else(|| {
        RepoError::InvalidData("pending contact has no identifier assigned".to_string())
    })
}

/// SQLite-backed contact repository bound to one namespace.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
    namespace: String,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when `namespace` is empty.
    /// - `Db` when the `contacts` table is missing (migrations not applied).
    pub fn try_new(conn: &'conn Connection, namespace: impl Into<String>) -> RepoResult<Self> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "contact namespace cannot be empty".to_string(),
            ));
        }
        conn.query_row("SELECT COUNT(*) FROM contacts LIMIT 1;", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(Self { conn, namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn load_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, sur_name, phone_number, type
             FROM contacts
             WHERE namespace = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([self.namespace.as_str()])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        let id = persisted_id(contact)?;

        self.conn.execute(
            "INSERT INTO contacts (namespace, uuid, name, sur_name, phone_number, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                self.namespace.as_str(),
                id.to_string(),
                contact.name.as_str(),
                contact.sur_name.as_str(),
                contact.phone_number.as_str(),
                contact.kind.as_str(),
            ],
        )?;

        Ok(id)
    }

    fn save_contact(&self, contact: &Contact) -> RepoResult<()> {
        let id = persisted_id(contact)?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                sur_name = ?2,
                phone_number = ?3,
                type = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE namespace = ?5 AND uuid = ?6;",
            params![
                contact.name.as_str(),
                contact.sur_name.as_str(),
                contact.phone_number.as_str(),
                contact.kind.as_str(),
                self.namespace.as_str(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM contacts WHERE namespace = ?1 AND uuid = ?2;",
            params![self.namespace.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in contacts.uuid"))
    })?;

    // Stored values are taken verbatim; placeholders only apply to new records.
    let contact = Contact {
        id: Some(id),
        name: row.get("name")?,
        sur_name: row.get("sur_name")?,
        phone_number: row.get("phone_number")?,
        kind: row.get("type")?,
    };
    contact.validate()?;
    Ok(contact)
}
