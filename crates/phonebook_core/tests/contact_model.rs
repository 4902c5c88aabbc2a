use phonebook_core::model::contact::{
    DEFAULT_NAME, DEFAULT_PHONE_NUMBER, DEFAULT_SUR_NAME, DEFAULT_TYPE,
};
use phonebook_core::{Contact, ContactField, ContactFields, ContactValidationError};
use uuid::Uuid;

#[test]
fn pending_contact_fills_placeholders_for_empty_fields() {
    let contact = Contact::pending(ContactFields::default());

    assert!(contact.is_pending());
    assert_eq!(contact.name, DEFAULT_NAME);
    assert_eq!(contact.sur_name, DEFAULT_SUR_NAME);
    assert_eq!(contact.phone_number, DEFAULT_PHONE_NUMBER);
    assert_eq!(contact.kind, DEFAULT_TYPE);
}

#[test]
fn pending_contact_keeps_given_values() {
    let contact = Contact::pending(ContactFields::new("Ada", "", "555-0100", "mobile"));

    assert_eq!(contact.name, "Ada");
    assert_eq!(contact.sur_name, DEFAULT_SUR_NAME);
    assert_eq!(contact.phone_number, "555-0100");
    assert_eq!(contact.kind, "mobile");
}

#[test]
fn assign_id_persists_and_rejects_nil() {
    let mut contact = Contact::pending(ContactFields::new("A", "B", "1", "home"));

    let err = contact.assign_id(Uuid::nil()).unwrap_err();
    assert_eq!(err, ContactValidationError::NilId);
    assert!(contact.is_pending());

    let id = Uuid::new_v4();
    contact.assign_id(id).unwrap();
    assert!(contact.is_persisted());
    assert_eq!(contact.id, Some(id));
}

#[test]
fn apply_overwrites_all_fields_without_placeholders() {
    let mut contact = Contact::with_id(
        Uuid::new_v4(),
        ContactFields::new("A", "B", "1", "home"),
    )
    .unwrap();

    contact.apply(ContactFields::new("C", "", "2", "work"));
    assert_eq!(contact.fields(), ContactFields::new("C", "", "2", "work"));
}

#[test]
fn validate_rejects_persisted_contact_with_empty_name() {
    let id = Uuid::new_v4();
    let mut contact = Contact::with_id(id, ContactFields::new("A", "B", "1", "home")).unwrap();
    contact.name.clear();

    assert_eq!(
        contact.validate().unwrap_err(),
        ContactValidationError::EmptyName(id)
    );
}

#[test]
fn fields_report_empty_inputs() {
    let mut fields = ContactFields::new("A", "B", "1", "home");
    assert!(!fields.has_empty_field());

    fields.set(ContactField::PhoneNumber, "");
    assert!(fields.has_empty_field());
    assert_eq!(fields.get(ContactField::Type), "home");

    fields.clear();
    assert_eq!(fields, ContactFields::default());
}

#[test]
fn serialization_uses_stored_record_field_names() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let contact = Contact::with_id(id, ContactFields::new("Ada", "Lovelace", "555-0100", "mobile"))
        .unwrap();

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["surName"], "Lovelace");
    assert_eq!(json["phoneNumber"], "555-0100");
    assert_eq!(json["type"], "mobile");

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn pending_contact_serializes_without_id() {
    let contact = Contact::pending(ContactFields::new("A", "B", "1", "home"));
    let json = serde_json::to_value(&contact).unwrap();
    assert!(json.get("id").is_none());
}
