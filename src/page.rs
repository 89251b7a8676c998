//! The host page: every element the dispatcher and countdowns act on,
//! addressable by identifier.
//!
//! A [`Page`] is one page view. It is passed explicitly to dispatcher
//! operations, so independent pages never share a backdrop.

pub mod catalog;
mod form;

use std::collections::HashMap;

pub use catalog::PageKind;
pub use form::{ChoiceOption, Field, FieldKind, Form};

use crate::error::LookupError;
use crate::model::{FeedEntry, Pulse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// The dimming overlay shared by every modal on the page.
#[derive(Debug, Default)]
pub struct Backdrop {
    visibility: Visibility,
}

impl Backdrop {
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn is_shown(&self) -> bool {
        matches!(self.visibility, Visibility::Shown)
    }

    pub(crate) const fn show(&mut self) {
        self.visibility = Visibility::Shown;
    }

    pub(crate) const fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }
}

#[derive(Debug)]
pub struct ModalPanel {
    name: String,
    title: String,
    visibility: Visibility,
    active: bool,
    form: Form,
}

impl ModalPanel {
    pub fn new(name: impl Into<String>, title: impl Into<String>, form: Form) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            visibility: Visibility::Hidden,
            active: false,
            form,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn is_shown(&self) -> bool {
        matches!(self.visibility, Visibility::Shown)
    }

    /// Whether the panel carries the "shown" presentation state.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub(crate) const fn show(&mut self) {
        self.visibility = Visibility::Shown;
        self.active = true;
    }

    pub(crate) const fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.active = false;
    }

    pub fn field(&self, id: &str) -> Result<&Field, LookupError> {
        self.form
            .field(id)
            .ok_or_else(|| missing_field(&self.name, id))
    }

    pub fn field_mut(&mut self, id: &str) -> Result<&mut Field, LookupError> {
        let name = &self.name;
        self.form
            .field_mut(id)
            .ok_or_else(|| missing_field(name, id))
    }
}

fn missing_field(modal: &str, field: &str) -> LookupError {
    LookupError::MissingField {
        modal: modal.to_string(),
        field: field.to_string(),
    }
}

/// An element showing rendered countdown text.
#[derive(Debug, Clone, Default)]
pub struct DisplayTarget {
    text: String,
}

impl DisplayTarget {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// A countdown the page registers when it loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSlot {
    pub duration_secs: u64,
    pub target: String,
}

#[derive(Debug, Default)]
pub struct Page {
    title: String,
    backdrop: Backdrop,
    modals: HashMap<String, ModalPanel>,
    modal_order: Vec<String>,
    displays: HashMap<String, DisplayTarget>,
    countdowns: Vec<CountdownSlot>,
    pulses: Vec<Pulse>,
    active_modal: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_modal(mut self, modal: ModalPanel) -> Self {
        self.modal_order.push(modal.name.clone());
        self.modals.insert(modal.name.clone(), modal);
        self
    }

    #[must_use]
    pub fn with_display(mut self, id: impl Into<String>) -> Self {
        self.displays.insert(id.into(), DisplayTarget::default());
        self
    }

    /// Declare a countdown started on page load, along with its display.
    #[must_use]
    pub fn with_countdown(mut self, duration_secs: u64, target: impl Into<String>) -> Self {
        let target = target.into();
        self = self.with_display(target.clone());
        self.countdowns.push(CountdownSlot {
            duration_secs,
            target,
        });
        self
    }

    /// Add a feed item and register its expiry countdown.
    #[must_use]
    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self = self.with_countdown(pulse.expires_in, pulse.countdown_target());
        self.pulses.push(pulse);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Every pulse with its replies, in the order the feed lists them.
    pub fn feed_entries(&self) -> Vec<FeedEntry<'_>> {
        self.pulses.iter().flat_map(Pulse::entries).collect()
    }

    pub fn countdowns(&self) -> &[CountdownSlot] {
        &self.countdowns
    }

    /// Modal names in declaration order.
    pub fn modal_names(&self) -> impl Iterator<Item = &str> {
        self.modal_order.iter().map(String::as_str)
    }

    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal.as_deref()
    }

    pub(crate) fn set_active_modal(&mut self, name: Option<String>) {
        self.active_modal = name;
    }

    pub fn modal(&self, name: &str) -> Result<&ModalPanel, LookupError> {
        self.modals
            .get(name)
            .ok_or_else(|| LookupError::MissingModal(name.to_string()))
    }

    pub fn modal_mut(&mut self, name: &str) -> Result<&mut ModalPanel, LookupError> {
        self.modals
            .get_mut(name)
            .ok_or_else(|| LookupError::MissingModal(name.to_string()))
    }

    /// Borrow a modal together with the shared backdrop.
    pub(crate) fn modal_with_backdrop(
        &mut self,
        name: &str,
    ) -> Result<(&mut ModalPanel, &mut Backdrop), LookupError> {
        let modal = self
            .modals
            .get_mut(name)
            .ok_or_else(|| LookupError::MissingModal(name.to_string()))?;
        Ok((modal, &mut self.backdrop))
    }

    pub fn display(&self, id: &str) -> Result<&DisplayTarget, LookupError> {
        self.displays
            .get(id)
            .ok_or_else(|| LookupError::MissingDisplay(id.to_string()))
    }

    pub fn display_mut(&mut self, id: &str) -> Result<&mut DisplayTarget, LookupError> {
        self.displays
            .get_mut(id)
            .ok_or_else(|| LookupError::MissingDisplay(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lookups() {
        let page = Page::new("empty").with_display("clock");
        assert_eq!(
            page.modal("create-report-modal").unwrap_err(),
            LookupError::MissingModal("create-report-modal".to_string())
        );
        assert!(page.display("clock").is_ok());
        assert!(matches!(
            page.display("other"),
            Err(LookupError::MissingDisplay(_))
        ));
    }

    #[test]
    fn test_modal_field_lookup() {
        let mut modal = ModalPanel::new(
            "create-reply-modal",
            "Reply",
            Form::new([Field::text("reply_message", "Message")]),
        );
        assert!(modal.field_mut("reply_message").is_ok());
        assert_eq!(
            modal.field("reply_object_id").unwrap_err(),
            LookupError::MissingField {
                modal: "create-reply-modal".to_string(),
                field: "reply_object_id".to_string(),
            }
        );
    }

    #[test]
    fn test_pulse_registers_countdown_display() {
        let page = Page::new("feed").with_pulse(Pulse {
            id: 3,
            creator_id: 1,
            creator: "alice".to_string(),
            message: "hello".to_string(),
            expires_in: 264,
            replies: Vec::new(),
        });
        assert_eq!(
            page.countdowns(),
            &[CountdownSlot {
                duration_secs: 264,
                target: "pulse-3-countdown".to_string(),
            }]
        );
        assert_eq!(page.display("pulse-3-countdown").unwrap().text(), "");
    }
}
