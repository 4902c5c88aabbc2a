//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical phonebook record (`Contact`) and the four-field
//!   input record (`ContactFields`) used by forms and save paths.
//! - Apply placeholder defaults at construction time.
//!
//! # Invariants
//! - `id` is `None` while pending and never changes once assigned.
//! - A persisted contact never carries an empty name.
//! - Serialized field names follow the stored record layout
//!   (`name`, `surName`, `phoneNumber`, `type`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to a contact when it is first persisted.
pub type ContactId = Uuid;

pub const DEFAULT_NAME: &str = "empty name...";
pub const DEFAULT_SUR_NAME: &str = "empty surName...";
pub const DEFAULT_PHONE_NUMBER: &str = "empty phoneNumber...";
pub const DEFAULT_TYPE: &str = "empty type...";

/// Validation failures for contact state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Identifier is the nil UUID.
    NilId,
    /// Persisted contact has an empty name.
    EmptyName(ContactId),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "contact id must not be nil"),
            Self::EmptyName(id) => write!(f, "contact {id} has an empty name"),
        }
    }
}

impl Error for ContactValidationError {}

/// Which of the four contact inputs an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    SurName,
    PhoneNumber,
    Type,
}

/// Four text values as entered by the user.
///
/// No placeholder substitution happens here; empty strings are meaningful to
/// callers (form presence checks, the empty-name deletion gesture).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub name: String,
    pub sur_name: String,
    pub phone_number: String,
    /// Free-text category label, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        sur_name: impl Into<String>,
        phone_number: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sur_name: sur_name.into(),
            phone_number: phone_number.into(),
            kind: kind.into(),
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::SurName => &self.sur_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Type => &self.kind,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::SurName => self.sur_name = value,
            ContactField::PhoneNumber => self.phone_number = value,
            ContactField::Type => self.kind = value,
        }
    }

    /// Returns `true` when at least one of the four inputs is empty.
    pub fn has_empty_field(&self) -> bool {
        self.name.is_empty()
            || self.sur_name.is_empty()
            || self.phone_number.is_empty()
            || self.kind.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Canonical phonebook record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// `None` while pending, assigned once on first persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub name: String,
    pub sur_name: String,
    pub phone_number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Contact {
    /// Builds a pending contact, replacing empty fields with placeholders.
    pub fn pending(fields: ContactFields) -> Self {
        Self {
            id: None,
            name: or_placeholder(fields.name, DEFAULT_NAME),
            sur_name: or_placeholder(fields.sur_name, DEFAULT_SUR_NAME),
            phone_number: or_placeholder(fields.phone_number, DEFAULT_PHONE_NUMBER),
            kind: or_placeholder(fields.kind, DEFAULT_TYPE),
        }
    }

    /// Builds a persisted contact with an existing identifier.
    ///
    /// Used by read paths where identity already exists in storage.
    pub fn with_id(id: ContactId, fields: ContactFields) -> Result<Self, ContactValidationError> {
        let mut contact = Self::pending(fields);
        contact.assign_id(id)?;
        Ok(contact)
    }

    /// Moves a pending contact to the persisted state.
    pub fn assign_id(&mut self, id: ContactId) -> Result<(), ContactValidationError> {
        if id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }

    /// Overwrites all four fields at once.
    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.sur_name = fields.sur_name;
        self.phone_number = fields.phone_number;
        self.kind = fields.kind;
    }

    /// Returns a copy of the four editable fields.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            sur_name: self.sur_name.clone(),
            phone_number: self.phone_number.clone(),
            kind: self.kind.clone(),
        }
    }

    /// Checks invariants required before a write or after a read.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if let Some(id) = self.id {
            if id.is_nil() {
                return Err(ContactValidationError::NilId);
            }
            if self.name.is_empty() {
                return Err(ContactValidationError::EmptyName(id));
            }
        }
        Ok(())
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
