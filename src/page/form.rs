//! Forms embedded in modal panels.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed by the user.
    Text {
        value: String,
        placeholder: Option<String>,
    },
    /// Value written by the page, never edited by the user.
    Hidden { value: String },
    /// Selection among fixed options. Index 0 is the default.
    Choice {
        options: Vec<ChoiceOption>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: String,
    label: String,
    kind: FieldKind,
}

impl Field {
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::Text {
                value: String::new(),
                placeholder: None,
            },
        }
    }

    pub fn hidden(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind: FieldKind::Hidden {
                value: String::new(),
            },
        }
    }

    pub fn choice(
        id: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = ChoiceOption>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::Choice {
                options: options.into_iter().collect(),
                selected: 0,
            },
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        if let FieldKind::Text { placeholder, .. } = &mut self.kind {
            *placeholder = Some(text.into());
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether the user can focus and edit this field.
    pub const fn is_editable(&self) -> bool {
        !matches!(self.kind, FieldKind::Hidden { .. })
    }

    /// Current value: the text for text and hidden fields, the selected
    /// option's code for choice fields.
    pub fn value(&self) -> &str {
        match &self.kind {
            FieldKind::Text { value, .. } | FieldKind::Hidden { value } => value,
            FieldKind::Choice { options, selected } => options
                .get(*selected)
                .map_or("", |option| option.code.as_str()),
        }
    }

    /// Whether [`Field::assign`] would accept `value`.
    pub fn accepts(&self, value: &str) -> bool {
        match &self.kind {
            FieldKind::Text { .. } | FieldKind::Hidden { .. } => true,
            FieldKind::Choice { options, .. } => options.iter().any(|option| option.code == value),
        }
    }

    /// Write `value` into the field. For choice fields this selects the
    /// option with a matching code and returns `false` if there is none.
    pub fn assign(&mut self, value: &str) -> bool {
        match &mut self.kind {
            FieldKind::Text { value: current, .. } | FieldKind::Hidden { value: current } => {
                value.clone_into(current);
                true
            }
            FieldKind::Choice { options, selected } => {
                match options.iter().position(|option| option.code == value) {
                    Some(index) => {
                        *selected = index;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Return the field to its empty/default state.
    pub fn reset(&mut self) {
        match &mut self.kind {
            FieldKind::Text { value, .. } | FieldKind::Hidden { value } => value.clear(),
            FieldKind::Choice { selected, .. } => *selected = 0,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let FieldKind::Text { value, .. } = &mut self.kind {
            value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let FieldKind::Text { value, .. } = &mut self.kind {
            value.pop();
        }
    }

    /// Move a choice selection by `delta`, wrapping around.
    pub fn cycle(&mut self, delta: isize) {
        let FieldKind::Choice { options, selected } = &mut self.kind else {
            return;
        };
        let len = options.len();
        if len == 0 {
            return;
        }
        let step = delta.unsigned_abs() % len;
        *selected = if delta < 0 {
            (*selected + len - step) % len
        } else {
            (*selected + step) % len
        };
    }
}

/// Ordered set of uniquely identified fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    pub fn field_at_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    /// Indices of the fields the user can focus, in declaration order.
    pub fn editable_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_editable())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.id.clone(), field.value().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Field {
        Field::choice(
            "category",
            "Category",
            [
                ChoiceOption::new("", "---------"),
                ChoiceOption::new("SPM", "Spam"),
                ChoiceOption::new("SCM", "Scam or fraud"),
            ],
        )
    }

    #[test]
    fn test_choice_assign_and_reset() {
        let mut field = categories();
        assert_eq!(field.value(), "");
        assert!(field.assign("SCM"));
        assert_eq!(field.value(), "SCM");
        assert!(!field.assign("XXX"));
        assert_eq!(field.value(), "SCM");
        field.reset();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut field = categories();
        field.cycle(-1);
        assert_eq!(field.value(), "SCM");
        field.cycle(1);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_text_editing() {
        let mut field = Field::text("reason", "Reason");
        field.push_char('h');
        field.push_char('i');
        field.pop_char();
        assert_eq!(field.value(), "h");
        field.reset();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_hidden_fields_are_not_editable() {
        let form = Form::new([
            Field::hidden("content_type"),
            Field::text("message", "Message"),
            Field::hidden("object_id"),
        ]);
        assert_eq!(form.editable_indices(), vec![1]);
    }
}
