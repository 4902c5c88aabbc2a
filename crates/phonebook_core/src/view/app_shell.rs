//! Top-level list coordinator.
//!
//! # Responsibility
//! - Keep one `RecordView` per contact in the store, in store order.
//! - Own the four-input creation form.
//! - Reflect aggregate state (visibility and remaining count).
//!
//! # Invariants
//! - Store events are queued by the shell's listener and applied after each
//!   store call returns (`sync`), never during dispatch.
//! - `summary().remaining` equals the store's collection size after `sync`.
//! - Views of removed contacts are detached and dropped.

use crate::model::contact::{Contact, ContactField, ContactFields, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::store::event::{StoreEvent, SubscriptionId, Topic};
use crate::store::record_store::{RecordStore, StoreResult};
use crate::view::record_view::{CloseOutcome, RecordView};
use log::{debug, error, info};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Aggregate state shown around the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of contacts in the store.
    pub remaining: usize,
    /// List region visibility.
    pub main_visible: bool,
    /// Footer visibility.
    pub footer_visible: bool,
    /// Footer text; `None` while hidden.
    pub footer_text: Option<String>,
}

impl Summary {
    fn from_count(remaining: usize) -> Self {
        if remaining == 0 {
            return Self::default();
        }
        let noun = if remaining == 1 { "contact" } else { "contacts" };
        Self {
            remaining,
            main_visible: true,
            footer_visible: true,
            footer_text: Some(format!("{remaining} {noun} remaining")),
        }
    }
}

/// Application shell over an explicitly constructed record store.
pub struct AppShell<R: ContactRepository> {
    store: RecordStore<R>,
    views: Vec<RecordView>,
    form: ContactFields,
    inbox: Rc<RefCell<VecDeque<StoreEvent>>>,
    subscription: SubscriptionId,
    summary: Summary,
}

impl<R: ContactRepository> AppShell<R> {
    /// Takes ownership of `store` and subscribes to all of its events.
    pub fn new(mut store: RecordStore<R>) -> Self {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let listener_inbox = Rc::clone(&inbox);
        let subscription = store.subscribe(
            Topic::All,
            Box::new(move |event| {
                listener_inbox.borrow_mut().push_back(event.clone());
                ControlFlow::Continue(())
            }),
        );
        let summary = Summary::from_count(store.len());

        Self {
            store,
            views: Vec::new(),
            form: ContactFields::default(),
            inbox,
            subscription,
            summary,
        }
    }

    /// Loads persisted contacts and builds their views.
    pub fn start(&mut self) -> StoreResult<usize> {
        let count = self.store.load()?;
        self.sync();
        info!("event=shell_start module=shell status=ok count={count}");
        Ok(count)
    }

    /// Builds a view for `contact` and appends it to the list.
    pub fn add_one(&mut self, contact: &Contact) -> StoreResult<()> {
        let view = RecordView::attach(&mut self.store, contact)?;
        self.views.push(view);
        Ok(())
    }

    /// Rebuilds the list from every contact currently in the store.
    pub fn add_all(&mut self) -> StoreResult<()> {
        self.detach_all();
        let contacts = self.store.contacts().to_vec();
        for contact in &contacts {
            self.add_one(contact)?;
        }
        self.render();
        Ok(())
    }

    /// Creates a contact from the form.
    ///
    /// Returns `Ok(None)` without touching the store when any input is empty.
    /// The form is cleared only after the contact was persisted.
    pub fn create(&mut self) -> StoreResult<Option<Contact>> {
        if self.form.has_empty_field() {
            debug!("event=shell_create module=shell status=skipped reason=empty_field");
            return Ok(None);
        }

        let contact = self.store.create(self.form.clone())?;
        self.sync();
        self.form.clear();
        Ok(Some(contact))
    }

    pub fn set_form_input(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn form(&self) -> &ContactFields {
        &self.form
    }

    /// Puts the view of `id` into editing mode. Returns `false` when absent.
    pub fn edit(&mut self, id: ContactId) -> bool {
        match self.view_mut(id) {
            Some(view) => {
                view.edit();
                true
            }
            None => false,
        }
    }

    /// Sets one edit input on the view of `id`.
    pub fn set_view_input(
        &mut self,
        id: ContactId,
        field: ContactField,
        value: impl Into<String>,
    ) -> bool {
        self.view_mut(id)
            .is_some_and(|view| view.set_input(field, value))
    }

    /// Runs the save/close action of the view of `id`.
    pub fn close(&mut self, id: ContactId) -> StoreResult<CloseOutcome> {
        let Some(index) = self.view_index(id) else {
            return Ok(CloseOutcome::NotEditing);
        };
        let outcome = self.views[index].close(&mut self.store);
        self.sync();
        outcome
    }

    /// Runs the destroy action of the view of `id`.
    pub fn destroy(&mut self, id: ContactId) -> StoreResult<bool> {
        let Some(index) = self.view_index(id) else {
            return Ok(false);
        };
        let cleared = self.views[index].clear(&mut self.store);
        self.sync();
        cleared.map(|()| true)
    }

    /// Applies queued store events, then refreshes the summary.
    pub fn sync(&mut self) {
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else {
                break;
            };
            match event {
                StoreEvent::Reset => self.detach_all(),
                StoreEvent::Added(contact) => {
                    if let Err(err) = self.add_one(&contact) {
                        error!("event=shell_add module=shell status=error error={err}");
                    }
                }
                StoreEvent::Removed(contact) => {
                    if let Some(id) = contact.id {
                        self.remove_view(id);
                    }
                }
                // Views re-render themselves.
                StoreEvent::Changed(_) => {}
            }
        }
        self.render();
    }

    /// Recomputes visibility and footer text from the store.
    pub fn render(&mut self) -> &Summary {
        self.summary = Summary::from_count(self.store.len());
        &self.summary
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn views(&self) -> &[RecordView] {
        &self.views
    }

    pub fn view(&self, id: ContactId) -> Option<&RecordView> {
        self.views.iter().find(|view| view.contact_id() == id)
    }

    /// Rendered lines of every view, in list order.
    pub fn rendered_lines(&self) -> Vec<String> {
        self.views.iter().map(RecordView::rendered).collect()
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    /// Releases every subscription and hands the store back.
    pub fn shutdown(mut self) -> RecordStore<R> {
        self.detach_all();
        self.store.unsubscribe(self.subscription);
        self.store
    }

    fn view_mut(&mut self, id: ContactId) -> Option<&mut RecordView> {
        self.views.iter_mut().find(|view| view.contact_id() == id)
    }

    fn view_index(&self, id: ContactId) -> Option<usize> {
        self.views.iter().position(|view| view.contact_id() == id)
    }

    fn remove_view(&mut self, id: ContactId) {
        if let Some(index) = self.view_index(id) {
            let mut view = self.views.remove(index);
            view.detach(&mut self.store);
        }
    }

    fn detach_all(&mut self) {
        for mut view in self.views.drain(..) {
            view.detach(&mut self.store);
        }
    }
}
