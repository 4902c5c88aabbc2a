//! Per-contact display/edit view.
//!
//! # Responsibility
//! - Render one contact as a text line.
//! - Switch between `Display` and `Editing` and write edits back to the store.
//!
//! # Invariants
//! - The view follows its contact through a `Topic::Contact` subscription:
//!   `Changed` re-renders; `Removed` marks the view removed and releases the
//!   subscription from inside the listener, so the view stops listening
//!   without any caller action.
//! - `close` with an empty name deletes the contact instead of saving it.
//! - A failed save keeps the view in `Editing` with inputs intact.
//! - No state borrow is held across a store call.

use crate::model::contact::{Contact, ContactField, ContactFields, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::store::event::{StoreEvent, SubscriptionId, Topic};
use crate::store::record_store::{RecordStore, StoreError, StoreResult};
use log::debug;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Rendering mode of a record view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Display,
    Editing,
}

/// Result of the save/close action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Saved,
    /// Name input was empty, so the contact was deleted.
    Deleted,
    /// View was not editing; nothing happened.
    NotEditing,
}

#[derive(Debug)]
struct ViewState {
    contact: Contact,
    mode: ViewMode,
    inputs: ContactFields,
    rendered: String,
    removed: bool,
}

impl ViewState {
    fn render(&mut self) {
        // Inputs mirror the contact whenever the view re-renders.
        self.inputs = self.contact.fields();
        self.rendered = match self.mode {
            ViewMode::Display => format!(
                "{} {} | {} | {}",
                self.contact.name,
                self.contact.sur_name,
                self.contact.phone_number,
                self.contact.kind
            ),
            ViewMode::Editing => format!(
                "[editing] name={} surName={} phoneNumber={} type={}",
                self.inputs.name, self.inputs.sur_name, self.inputs.phone_number, self.inputs.kind
            ),
        };
    }

    fn on_event(&mut self, event: &StoreEvent) -> ControlFlow<()> {
        match event {
            StoreEvent::Changed(contact) => {
                self.contact = contact.clone();
                self.render();
            }
            StoreEvent::Removed(_) => {
                self.removed = true;
                return ControlFlow::Break(());
            }
            StoreEvent::Added(_) | StoreEvent::Reset => {}
        }
        ControlFlow::Continue(())
    }
}

/// Display/edit unit bound to exactly one persisted contact.
#[derive(Debug)]
pub struct RecordView {
    contact_id: ContactId,
    state: Rc<RefCell<ViewState>>,
    subscription: Option<SubscriptionId>,
}

impl RecordView {
    /// Binds a view to `contact` and subscribes it to that contact's events.
    ///
    /// # Errors
    /// - `PendingContact` when `contact` has no identifier yet.
    pub fn attach<R: ContactRepository>(
        store: &mut RecordStore<R>,
        contact: &Contact,
    ) -> StoreResult<Self> {
        let contact_id = contact.id.ok_or(StoreError::PendingContact)?;

        let mut state = ViewState {
            contact: contact.clone(),
            mode: ViewMode::Display,
            inputs: contact.fields(),
            rendered: String::new(),
            removed: false,
        };
        state.render();
        let state = Rc::new(RefCell::new(state));

        let listener_state = Rc::clone(&state);
        let subscription = store.subscribe(
            Topic::Contact(contact_id),
            Box::new(move |event| listener_state.borrow_mut().on_event(event)),
        );
        debug!("event=view_attach module=view status=ok id={contact_id}");

        Ok(Self {
            contact_id,
            state,
            subscription: Some(subscription),
        })
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    /// Latest contact snapshot seen by this view.
    pub fn contact(&self) -> Contact {
        self.state.borrow().contact.clone()
    }

    pub fn mode(&self) -> ViewMode {
        self.state.borrow().mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == ViewMode::Editing
    }

    /// Whether the bound contact has been removed from the store.
    pub fn is_removed(&self) -> bool {
        self.state.borrow().removed
    }

    /// Whether the view still holds a live store subscription.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some() && !self.is_removed()
    }

    /// Re-renders and returns the current text line.
    pub fn render(&self) -> String {
        let mut state = self.state.borrow_mut();
        state.render();
        state.rendered.clone()
    }

    /// Last rendered text line.
    pub fn rendered(&self) -> String {
        self.state.borrow().rendered.clone()
    }

    /// Current input values.
    pub fn inputs(&self) -> ContactFields {
        self.state.borrow().inputs.clone()
    }

    /// Enters editing mode with inputs populated from the contact.
    pub fn edit(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.removed {
            return;
        }
        state.mode = ViewMode::Editing;
        state.render();
    }

    /// Sets one input; ignored unless editing.
    pub fn set_input(&mut self, field: ContactField, value: impl Into<String>) -> bool {
        let mut state = self.state.borrow_mut();
        if state.mode != ViewMode::Editing {
            return false;
        }
        state.inputs.set(field, value);
        true
    }

    /// Reads the inputs and saves them, or deletes the contact when the name
    /// input is empty.
    pub fn close<R: ContactRepository>(
        &mut self,
        store: &mut RecordStore<R>,
    ) -> StoreResult<CloseOutcome> {
        let inputs = {
            let state = self.state.borrow();
            if state.mode != ViewMode::Editing {
                return Ok(CloseOutcome::NotEditing);
            }
            state.inputs.clone()
        };

        if inputs.name.is_empty() {
            // Clearing the name is the deletion gesture.
            store.delete(self.contact_id)?;
            self.state.borrow_mut().mode = ViewMode::Display;
            return Ok(CloseOutcome::Deleted);
        }

        store.save(self.contact_id, inputs)?;
        let mut state = self.state.borrow_mut();
        state.mode = ViewMode::Display;
        state.render();
        Ok(CloseOutcome::Saved)
    }

    /// Explicit destroy action.
    pub fn clear<R: ContactRepository>(&mut self, store: &mut RecordStore<R>) -> StoreResult<()> {
        store.delete(self.contact_id)?;
        Ok(())
    }

    /// Stops listening to the store. Safe to call more than once, and a no-op
    /// once the contact was removed.
    pub fn detach<R: ContactRepository>(&mut self, store: &mut RecordStore<R>) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        if !self.is_removed() {
            store.unsubscribe(subscription);
            debug!(
                "event=view_detach module=view status=ok id={}",
                self.contact_id
            );
        }
    }
}
