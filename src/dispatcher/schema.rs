use serde::{Deserialize, Serialize};

use crate::page::catalog::{CREATE_REPLY_MODAL, CREATE_REPORT_MODAL};

/// The hidden fields a modal's target reference is written into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetBinding {
    pub content_type_field: String,
    pub object_id_field: String,
}

/// Declares how the dispatcher treats one modal's form.
///
/// `transient` lists the fields reset on close. Target fields are rewritten
/// on every bind and are not listed there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSchema {
    pub name: String,
    #[serde(default)]
    pub target: Option<TargetBinding>,
    #[serde(default)]
    pub transient: Vec<String>,
}

impl ModalSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            transient: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target(
        mut self,
        content_type_field: impl Into<String>,
        object_id_field: impl Into<String>,
    ) -> Self {
        self.target = Some(TargetBinding {
            content_type_field: content_type_field.into(),
            object_id_field: object_id_field.into(),
        });
        self
    }

    #[must_use]
    pub fn with_transient<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transient.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Every field id this schema refers to.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.target
            .iter()
            .flat_map(|binding| {
                [
                    binding.content_type_field.as_str(),
                    binding.object_id_field.as_str(),
                ]
            })
            .chain(self.transient.iter().map(String::as_str))
    }
}

/// Schemas for the reply and report modals.
pub fn default_schemas() -> Vec<ModalSchema> {
    vec![
        ModalSchema::new(CREATE_REPLY_MODAL)
            .with_target("reply_content_type", "reply_object_id")
            .with_transient(["reply_message"]),
        ModalSchema::new(CREATE_REPORT_MODAL)
            .with_target("report_content_type", "report_object_id")
            .with_transient(["report_reason", "report_category"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_fields() {
        let schema = ModalSchema::new("create-report-modal")
            .with_target("report_content_type", "report_object_id")
            .with_transient(["report_reason"]);
        let fields: Vec<_> = schema.referenced_fields().collect();
        assert_eq!(
            fields,
            vec!["report_content_type", "report_object_id", "report_reason"]
        );
    }

    #[test]
    fn test_schema_from_toml() {
        let schema: ModalSchema = toml::from_str(
            r#"
            name = "create-reply-modal"
            transient = ["reply_message"]

            [target]
            content_type_field = "reply_content_type"
            object_id_field = "reply_object_id"
            "#,
        )
        .unwrap();
        assert_eq!(schema, default_schemas()[0]);
    }

    #[test]
    fn test_schema_without_target() {
        let schema: ModalSchema = toml::from_str(r#"name = "create-pulse-modal""#).unwrap();
        assert!(schema.target.is_none());
        assert!(schema.transient.is_empty());
    }
}
