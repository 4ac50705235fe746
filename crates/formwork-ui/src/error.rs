use thiserror::Error;

use crate::widget_id::WidgetId;

/// Errors surfaced by configuration parsing and handle lookups.
///
/// Interaction never fails: out-of-range navigation is clamped and stale
/// values degrade to placeholders instead of producing an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("invalid color literal `{0}`")]
    InvalidColor(String),
    #[error("invalid length `{0}`")]
    InvalidLength(String),
    #[error("invalid locale tag `{0}`")]
    InvalidLocale(String),
    #[error("invalid date `{input}`: {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("{0} is not mounted")]
    WidgetNotMounted(WidgetId),
    #[error("{id} is not a {expected}")]
    WidgetTypeMismatch { id: WidgetId, expected: &'static str },
}

pub type UiResult<T> = Result<T, UiError>;
