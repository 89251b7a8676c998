use thiserror::Error;

/// A referenced page element could not be located.
///
/// These are integration defects: every identifier is a literal chosen by
/// the render layer, so none of them is recoverable at runtime. Lookups run
/// before any mutation, so a failed operation leaves the page untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no modal named `{0}` on this page")]
    MissingModal(String),

    #[error("modal `{modal}` has no field `{field}`")]
    MissingField { modal: String, field: String },

    #[error("no display target `{0}` on this page")]
    MissingDisplay(String),

    #[error("modal `{0}` does not declare a target binding")]
    NoTargetBinding(String),

    #[error("field `{field}` has no option `{code}`")]
    UnknownChoice { field: String, code: String },
}
