use phonebook_core::{
    CloseOutcome, ContactField, ContactFields, MemoryContactRepository, RecordStore, RecordView,
    StoreError, ViewMode,
};

fn store_with_contact() -> (
    RecordStore<MemoryContactRepository>,
    MemoryContactRepository,
    phonebook_core::Contact,
) {
    let repo = MemoryContactRepository::new();
    let mut store = RecordStore::new(repo.clone());
    let contact = store
        .create(ContactFields::new("A", "B", "1", "home"))
        .unwrap();
    (store, repo, contact)
}

#[test]
fn attach_renders_display_line_and_subscribes() {
    let (mut store, _repo, contact) = store_with_contact();
    let view = RecordView::attach(&mut store, &contact).unwrap();

    assert_eq!(view.mode(), ViewMode::Display);
    assert_eq!(view.rendered(), "A B | 1 | home");
    assert!(view.is_attached());
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn pending_contact_cannot_be_attached() {
    let mut store = RecordStore::new(MemoryContactRepository::new());
    let pending = phonebook_core::Contact::pending(ContactFields::new("A", "B", "1", "home"));

    let err = RecordView::attach(&mut store, &pending).unwrap_err();
    assert!(matches!(err, StoreError::PendingContact));
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn edit_then_close_saves_all_inputs() {
    let (mut store, _repo, contact) = store_with_contact();
    let id = contact.id.unwrap();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    view.edit();
    assert!(view.is_editing());
    assert_eq!(view.inputs(), contact.fields());
    assert!(view.set_input(ContactField::Name, "Ada"));
    assert!(view.set_input(ContactField::SurName, "Lovelace"));
    assert!(view.set_input(ContactField::PhoneNumber, "555-0100"));
    assert!(view.set_input(ContactField::Type, "mobile"));

    assert_eq!(view.close(&mut store).unwrap(), CloseOutcome::Saved);
    assert_eq!(view.mode(), ViewMode::Display);
    assert_eq!(view.rendered(), "Ada Lovelace | 555-0100 | mobile");
    assert_eq!(
        store.get(id).unwrap().fields(),
        ContactFields::new("Ada", "Lovelace", "555-0100", "mobile")
    );
}

#[test]
fn inputs_are_ignored_outside_editing() {
    let (mut store, _repo, contact) = store_with_contact();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    assert!(!view.set_input(ContactField::Name, "Ada"));
    assert_eq!(view.close(&mut store).unwrap(), CloseOutcome::NotEditing);
    assert_eq!(store.get(contact.id.unwrap()), Some(&contact));
}

#[test]
fn empty_name_on_close_deletes_the_contact() {
    let (mut store, repo, contact) = store_with_contact();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    view.edit();
    view.set_input(ContactField::Name, "");
    assert_eq!(view.close(&mut store).unwrap(), CloseOutcome::Deleted);

    assert!(store.is_empty());
    assert!(repo.is_empty());
    assert!(view.is_removed());
    assert!(!store.contacts().iter().any(|c| c.sur_name == "B"));
}

#[test]
fn view_rerenders_when_contact_changes_elsewhere() {
    let (mut store, _repo, contact) = store_with_contact();
    let id = contact.id.unwrap();
    let view = RecordView::attach(&mut store, &contact).unwrap();

    store
        .save(id, ContactFields::new("Grace", "Hopper", "555-0199", "work"))
        .unwrap();

    assert_eq!(view.rendered(), "Grace Hopper | 555-0199 | work");
    assert_eq!(view.contact().name, "Grace");
}

#[test]
fn failed_save_keeps_editing_state_and_inputs() {
    let (mut store, repo, contact) = store_with_contact();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    view.edit();
    view.set_input(ContactField::Name, "Ada");
    repo.set_unavailable(true);

    assert!(view.close(&mut store).is_err());
    assert!(view.is_editing());
    assert_eq!(view.inputs().name, "Ada");
    assert_eq!(store.get(contact.id.unwrap()).unwrap().name, "A");
}

#[test]
fn clear_deletes_and_releases_subscription() {
    let (mut store, _repo, contact) = store_with_contact();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    view.clear(&mut store).unwrap();
    assert!(view.is_removed());
    assert!(store.is_empty());
    assert!(!view.is_attached());
    assert_eq!(store.subscriber_count(), 0);

    view.detach(&mut store);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn removal_elsewhere_stops_listening_without_detach() {
    let (mut store, _repo, contact) = store_with_contact();
    let id = contact.id.unwrap();
    let other = store
        .create(ContactFields::new("C", "D", "2", "work"))
        .unwrap();
    let view = RecordView::attach(&mut store, &contact).unwrap();
    let other_view = RecordView::attach(&mut store, &other).unwrap();
    assert_eq!(store.subscriber_count(), 2);

    store.delete(id).unwrap();

    assert!(view.is_removed());
    assert!(!view.is_attached());
    assert!(other_view.is_attached());
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn detached_view_ignores_later_changes() {
    let (mut store, _repo, contact) = store_with_contact();
    let id = contact.id.unwrap();
    let mut view = RecordView::attach(&mut store, &contact).unwrap();

    view.detach(&mut store);
    store
        .save(id, ContactFields::new("Z", "Y", "9", "other"))
        .unwrap();

    assert_eq!(view.rendered(), "A B | 1 | home");
}
