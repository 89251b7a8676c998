//! Modal dispatcher: opens and closes the page's modals and routes target
//! references into their forms.
//!
//! The dispatcher holds no page state of its own. Every operation takes the
//! [`Page`] it acts on, resolves all referenced elements first and only then
//! mutates, so a [`LookupError`] never leaves a half-applied change behind.
//!
//! At most one modal is open at a time and the backdrop mirrors it:
//! opening a second modal closes the first through [`ModalDispatcher::close`].

mod schema;

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

pub use schema::{ModalSchema, TargetBinding, default_schemas};

use crate::error::LookupError;
use crate::model::TargetRef;
use crate::page::Page;

/// Form values collected from a modal when the user submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub modal: String,
    pub target: Option<TargetRef>,
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub struct ModalDispatcher {
    schemas: HashMap<String, ModalSchema>,
}

impl ModalDispatcher {
    pub fn new(schemas: impl IntoIterator<Item = ModalSchema>) -> Self {
        Self {
            schemas: schemas
                .into_iter()
                .map(|schema| (schema.name.clone(), schema))
                .collect(),
        }
    }

    /// Check every schema against the page's declared modals and fields.
    pub fn validate(&self, page: &Page) -> Result<(), LookupError> {
        for schema in self.schemas.values() {
            let modal = page.modal(&schema.name)?;
            for field in schema.referenced_fields() {
                modal.field(field)?;
            }
        }
        Ok(())
    }

    /// Write `target` into the modal's content-type and object-id fields.
    ///
    /// Call before [`ModalDispatcher::open`] so the values are in place
    /// before the user can submit.
    pub fn bind_target(
        &self,
        page: &mut Page,
        modal: &str,
        target: &TargetRef,
    ) -> Result<(), LookupError> {
        let panel = page.modal_mut(modal)?;
        let binding = self
            .schemas
            .get(modal)
            .and_then(|schema| schema.target.as_ref())
            .ok_or_else(|| LookupError::NoTargetBinding(modal.to_string()))?;

        for (field, value) in [
            (&binding.content_type_field, &target.content_type),
            (&binding.object_id_field, &target.object_id),
        ] {
            if !panel.field(field)?.accepts(value) {
                return Err(LookupError::UnknownChoice {
                    field: field.clone(),
                    code: value.clone(),
                });
            }
        }

        panel
            .field_mut(&binding.content_type_field)?
            .assign(&target.content_type);
        panel
            .field_mut(&binding.object_id_field)?
            .assign(&target.object_id);

        debug!(modal, target_ref = %target, "Bound target");
        Ok(())
    }

    /// Show the backdrop and the named modal.
    pub fn open(&self, page: &mut Page, modal: &str) -> Result<(), LookupError> {
        page.modal(modal)?;

        let current = page
            .active_modal()
            .filter(|active| *active != modal)
            .map(str::to_string);
        if let Some(current) = current {
            debug!(current = %current, next = modal, "Closing active modal before opening another");
            self.close(page, &current)?;
        }

        let (panel, backdrop) = page.modal_with_backdrop(modal)?;
        backdrop.show();
        panel.show();
        let visibility = panel.visibility();
        page.set_active_modal(Some(modal.to_string()));

        debug!(modal, ?visibility, "Opened modal");
        Ok(())
    }

    /// Hide the named modal, resetting its transient fields.
    ///
    /// The backdrop is hidden too unless a different modal is the one
    /// currently open. Closing a closed modal re-asserts the hidden state.
    pub fn close(&self, page: &mut Page, modal: &str) -> Result<(), LookupError> {
        let transient = self
            .schemas
            .get(modal)
            .map(|schema| schema.transient.as_slice())
            .unwrap_or_default();

        let panel = page.modal(modal)?;
        for field in transient {
            panel.field(field)?;
        }

        let releases_backdrop = page.active_modal().is_none_or(|active| active == modal);
        let (panel, backdrop) = page.modal_with_backdrop(modal)?;
        for field in transient {
            panel.field_mut(field)?.reset();
        }
        panel.hide();
        if releases_backdrop {
            backdrop.hide();
            page.set_active_modal(None);
        } else {
            warn!(
                modal,
                active = page.active_modal(),
                "Closed a modal that was not the open one"
            );
        }

        debug!(
            modal,
            reset = transient.len(),
            backdrop = ?page.backdrop().visibility(),
            "Closed modal"
        );
        Ok(())
    }

    /// Collect the modal's current form values.
    pub fn submission(&self, page: &Page, modal: &str) -> Result<FormSubmission, LookupError> {
        let panel = page.modal(modal)?;
        let target = match self.schemas.get(modal).and_then(|s| s.target.as_ref()) {
            Some(binding) => Some(TargetRef::new(
                panel.field(&binding.content_type_field)?.value(),
                panel.field(&binding.object_id_field)?.value(),
            )),
            None => None,
        };

        let submission = FormSubmission {
            modal: modal.to_string(),
            target,
            values: panel.form().values(),
        };
        info!(modal, target = ?submission.target, "Collected form submission");
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::catalog::{CREATE_PULSE_MODAL, CREATE_REPLY_MODAL, CREATE_REPORT_MODAL};
    use crate::page::{ChoiceOption, Field, Form, ModalPanel, PageKind, Visibility};

    fn setup() -> (ModalDispatcher, Page) {
        let dispatcher = ModalDispatcher::new(default_schemas());
        let page = PageKind::Feed.build();
        dispatcher.validate(&page).unwrap();
        (dispatcher, page)
    }

    fn value(page: &Page, modal: &str, field: &str) -> String {
        page.modal(modal)
            .unwrap()
            .field(field)
            .unwrap()
            .value()
            .to_string()
    }

    fn type_into(page: &mut Page, modal: &str, field: &str, text: &str) {
        let field = page.modal_mut(modal).unwrap().field_mut(field).unwrap();
        for c in text.chars() {
            field.push_char(c);
        }
    }

    #[test]
    fn test_open_then_close_visibility() {
        let (dispatcher, mut page) = setup();
        for name in [CREATE_PULSE_MODAL, CREATE_REPLY_MODAL, CREATE_REPORT_MODAL] {
            dispatcher.open(&mut page, name).unwrap();
            assert!(page.backdrop().is_shown());
            assert!(page.modal(name).unwrap().is_shown());
            assert!(page.modal(name).unwrap().is_active());
            assert_eq!(page.active_modal(), Some(name));

            dispatcher.close(&mut page, name).unwrap();
            assert!(!page.backdrop().is_shown());
            assert_eq!(page.modal(name).unwrap().visibility(), Visibility::Hidden);
            assert!(!page.modal(name).unwrap().is_active());
            assert_eq!(page.active_modal(), None);
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let (dispatcher, mut page) = setup();
        dispatcher.open(&mut page, CREATE_REPORT_MODAL).unwrap();
        type_into(&mut page, CREATE_REPORT_MODAL, "report_reason", "spam");

        dispatcher.close(&mut page, CREATE_REPORT_MODAL).unwrap();
        let once = (
            page.backdrop().visibility(),
            page.modal(CREATE_REPORT_MODAL).unwrap().visibility(),
            page.modal(CREATE_REPORT_MODAL).unwrap().form().values(),
        );
        dispatcher.close(&mut page, CREATE_REPORT_MODAL).unwrap();
        let twice = (
            page.backdrop().visibility(),
            page.modal(CREATE_REPORT_MODAL).unwrap().visibility(),
            page.modal(CREATE_REPORT_MODAL).unwrap().form().values(),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_bind_before_open() {
        let (dispatcher, mut page) = setup();
        for (content_type, object_id) in [("6", "1"), ("12", "4"), ("13", "900")] {
            let target = TargetRef::new(content_type, object_id);
            dispatcher
                .bind_target(&mut page, CREATE_REPLY_MODAL, &target)
                .unwrap();
            dispatcher.open(&mut page, CREATE_REPLY_MODAL).unwrap();
            assert_eq!(
                value(&page, CREATE_REPLY_MODAL, "reply_content_type"),
                content_type
            );
            assert_eq!(value(&page, CREATE_REPLY_MODAL, "reply_object_id"), object_id);
            dispatcher.close(&mut page, CREATE_REPLY_MODAL).unwrap();
        }
    }

    #[test]
    fn test_transient_fields_do_not_leak_between_targets() {
        let (dispatcher, mut page) = setup();

        dispatcher
            .bind_target(&mut page, CREATE_REPLY_MODAL, &TargetRef::new("12", "4"))
            .unwrap();
        dispatcher.open(&mut page, CREATE_REPLY_MODAL).unwrap();
        type_into(&mut page, CREATE_REPLY_MODAL, "reply_message", "see you there");
        dispatcher.close(&mut page, CREATE_REPLY_MODAL).unwrap();

        dispatcher
            .bind_target(&mut page, CREATE_REPLY_MODAL, &TargetRef::new("13", "5"))
            .unwrap();
        dispatcher.open(&mut page, CREATE_REPLY_MODAL).unwrap();

        assert_eq!(value(&page, CREATE_REPLY_MODAL, "reply_message"), "");
        assert_eq!(value(&page, CREATE_REPLY_MODAL, "reply_content_type"), "13");
        assert_eq!(value(&page, CREATE_REPLY_MODAL, "reply_object_id"), "5");
    }

    #[test]
    fn test_report_modal_scenario() {
        let (dispatcher, mut page) = setup();

        dispatcher
            .bind_target(&mut page, CREATE_REPORT_MODAL, &TargetRef::new("42", "7"))
            .unwrap();
        assert_eq!(value(&page, CREATE_REPORT_MODAL, "report_content_type"), "42");
        assert_eq!(value(&page, CREATE_REPORT_MODAL, "report_object_id"), "7");

        dispatcher.open(&mut page, CREATE_REPORT_MODAL).unwrap();
        assert!(page.backdrop().is_shown());
        assert!(page.modal(CREATE_REPORT_MODAL).unwrap().is_shown());

        type_into(&mut page, CREATE_REPORT_MODAL, "report_reason", "fake giveaway");
        page.modal_mut(CREATE_REPORT_MODAL)
            .unwrap()
            .field_mut("report_category")
            .unwrap()
            .assign("SCM");

        dispatcher.close(&mut page, CREATE_REPORT_MODAL).unwrap();
        assert!(!page.backdrop().is_shown());
        assert!(!page.modal(CREATE_REPORT_MODAL).unwrap().is_shown());
        assert_eq!(value(&page, CREATE_REPORT_MODAL, "report_reason"), "");
        assert_eq!(value(&page, CREATE_REPORT_MODAL, "report_category"), "");
    }

    #[test]
    fn test_modal_without_schema_keeps_its_form() {
        let (dispatcher, mut page) = setup();
        dispatcher.open(&mut page, CREATE_PULSE_MODAL).unwrap();
        type_into(&mut page, CREATE_PULSE_MODAL, "pulse_message", "draft");
        dispatcher.close(&mut page, CREATE_PULSE_MODAL).unwrap();
        assert_eq!(value(&page, CREATE_PULSE_MODAL, "pulse_message"), "draft");
    }

    #[test]
    fn test_opening_another_modal_closes_the_first() {
        let (dispatcher, mut page) = setup();
        dispatcher.open(&mut page, CREATE_REPLY_MODAL).unwrap();
        type_into(&mut page, CREATE_REPLY_MODAL, "reply_message", "half written");

        dispatcher.open(&mut page, CREATE_REPORT_MODAL).unwrap();
        assert!(!page.modal(CREATE_REPLY_MODAL).unwrap().is_shown());
        assert_eq!(value(&page, CREATE_REPLY_MODAL, "reply_message"), "");
        assert!(page.modal(CREATE_REPORT_MODAL).unwrap().is_shown());
        assert!(page.backdrop().is_shown());
        assert_eq!(page.active_modal(), Some(CREATE_REPORT_MODAL));
    }

    #[test]
    fn test_closing_an_inactive_modal_keeps_the_backdrop() {
        let (dispatcher, mut page) = setup();
        dispatcher.open(&mut page, CREATE_REPORT_MODAL).unwrap();
        dispatcher.close(&mut page, CREATE_REPLY_MODAL).unwrap();
        assert!(page.backdrop().is_shown());
        assert_eq!(page.active_modal(), Some(CREATE_REPORT_MODAL));
    }

    #[test]
    fn test_missing_modal_fails_without_mutation() {
        let (dispatcher, mut page) = setup();
        assert_eq!(
            dispatcher.open(&mut page, "create-poll-modal"),
            Err(LookupError::MissingModal("create-poll-modal".to_string()))
        );
        assert!(!page.backdrop().is_shown());
        assert!(dispatcher.close(&mut page, "create-poll-modal").is_err());
    }

    #[test]
    fn test_bind_target_requires_binding() {
        let (dispatcher, mut page) = setup();
        assert_eq!(
            dispatcher.bind_target(&mut page, CREATE_PULSE_MODAL, &TargetRef::new("12", "1")),
            Err(LookupError::NoTargetBinding(CREATE_PULSE_MODAL.to_string()))
        );
    }

    #[test]
    fn test_bind_target_missing_field_leaves_form_untouched() {
        let dispatcher = ModalDispatcher::new([ModalSchema::new("broken")
            .with_target("broken_content_type", "broken_object_id")]);
        let mut page = Page::new("test").with_modal(ModalPanel::new(
            "broken",
            "Broken",
            Form::new([Field::hidden("broken_content_type")]),
        ));

        let result = dispatcher.bind_target(&mut page, "broken", &TargetRef::new("12", "1"));
        assert!(matches!(result, Err(LookupError::MissingField { .. })));
        assert_eq!(value(&page, "broken", "broken_content_type"), "");
        assert!(dispatcher.validate(&page).is_err());
    }

    #[test]
    fn test_close_with_missing_transient_field_leaves_modal_open() {
        let dispatcher = ModalDispatcher::new([
            ModalSchema::new("partial").with_transient(["message", "missing"])
        ]);
        let mut page = Page::new("test").with_modal(ModalPanel::new(
            "partial",
            "Partial",
            Form::new([Field::text("message", "Message")]),
        ));
        dispatcher.open(&mut page, "partial").unwrap();
        type_into(&mut page, "partial", "message", "kept");

        assert!(dispatcher.close(&mut page, "partial").is_err());
        assert!(page.modal("partial").unwrap().is_shown());
        assert_eq!(value(&page, "partial", "message"), "kept");
    }

    #[test]
    fn test_bind_target_into_choice_field() {
        let dispatcher = ModalDispatcher::new([ModalSchema::new("picker")
            .with_target("kind", "id")]);
        let mut page = Page::new("test").with_modal(ModalPanel::new(
            "picker",
            "Picker",
            Form::new([
                Field::choice(
                    "kind",
                    "Kind",
                    [ChoiceOption::new("12", "Pulse"), ChoiceOption::new("13", "Reply")],
                ),
                Field::hidden("id"),
            ]),
        ));

        dispatcher
            .bind_target(&mut page, "picker", &TargetRef::new("13", "2"))
            .unwrap();
        assert_eq!(value(&page, "picker", "kind"), "13");

        let result = dispatcher.bind_target(&mut page, "picker", &TargetRef::new("6", "3"));
        assert_eq!(
            result,
            Err(LookupError::UnknownChoice {
                field: "kind".to_string(),
                code: "6".to_string(),
            })
        );
        assert_eq!(value(&page, "picker", "id"), "2");
    }

    #[test]
    fn test_submission_collects_target_and_values() {
        let (dispatcher, mut page) = setup();
        dispatcher
            .bind_target(&mut page, CREATE_REPORT_MODAL, &TargetRef::new("6", "3"))
            .unwrap();
        type_into(&mut page, CREATE_REPORT_MODAL, "report_reason", "impersonation");

        let submission = dispatcher.submission(&page, CREATE_REPORT_MODAL).unwrap();
        assert_eq!(submission.target, Some(TargetRef::new("6", "3")));
        assert_eq!(submission.values["report_reason"], "impersonation");
        assert_eq!(submission.values["report_category"], "");

        let pulse = dispatcher.submission(&page, CREATE_PULSE_MODAL).unwrap();
        assert_eq!(pulse.target, None);
    }
}
