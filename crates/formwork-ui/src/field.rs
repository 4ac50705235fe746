//! Label, validation message and helper text around a control.

use crate::accessibility::{AccessProps, Popup};
use crate::focus::FocusPolicy;
use crate::style::FieldState;
use crate::view::{LabelView, MessageKind, MessageView};
use crate::widget_id::{ElementId, IdProvider};

/// Presentation and accessibility flags common to every widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldProps {
    pub label: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub error: Option<String>,
    pub helper_text: Option<String>,
}

impl FieldProps {
    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Element describing the control: the error text, else the helper text.
    pub fn described_by(&self, ids: &FieldIds) -> Option<ElementId> {
        if self.error.is_some() {
            Some(ids.error.clone())
        } else if self.helper_text.is_some() {
            Some(ids.helper.clone())
        } else {
            None
        }
    }

    /// Message shown below the control. Error wins over helper text; both
    /// are hidden while `panel_open`.
    pub fn message(&self, ids: &FieldIds, panel_open: bool) -> Option<MessageView> {
        if panel_open {
            return None;
        }
        if let Some(error) = &self.error {
            return Some(MessageView {
                id: ids.error.clone(),
                text: error.clone(),
                kind: MessageKind::Error,
            });
        }
        self.helper_text.as_ref().map(|helper| MessageView {
            id: ids.helper.clone(),
            text: helper.clone(),
            kind: MessageKind::Helper,
        })
    }

    pub fn focus_policy(&self) -> FocusPolicy {
        if self.disabled {
            FocusPolicy::NotFocusable
        } else {
            FocusPolicy::Focusable
        }
    }

    /// Paint state of a dropdown trigger.
    pub fn state(&self, open: bool) -> FieldState {
        if self.disabled {
            FieldState::Disabled
        } else if self.is_invalid() {
            FieldState::Invalid
        } else if open {
            FieldState::Open
        } else {
            FieldState::Idle
        }
    }

    /// Combobox props of a dropdown trigger.
    pub fn trigger_access(&self, ids: &FieldIds, popup: Popup, open: bool) -> AccessProps {
        AccessProps::combobox(popup, open)
            .with_id(ids.control.clone())
            .with_required(self.required)
            .with_invalid(self.is_invalid())
            .with_described_by(self.described_by(ids))
            .with_disabled(self.disabled)
            .with_tab_index(self.focus_policy().tab_index())
    }

    pub fn label_view(&self, ids: &FieldIds) -> Option<LabelView> {
        self.label.as_ref().map(|text| LabelView {
            for_id: ids.control.clone(),
            text: text.clone(),
            required: self.required,
        })
    }
}

/// Element ids of one field, allocated once per widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub control: ElementId,
    pub error: ElementId,
    pub helper: ElementId,
}

impl FieldIds {
    pub fn allocate(ids: &IdProvider, prefix: &str) -> Self {
        Self {
            control: ids.allocate(prefix),
            error: ids.allocate("error"),
            helper: ids.allocate("helper"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> FieldIds {
        FieldIds::allocate(&IdProvider::new(), "select")
    }

    #[test]
    fn test_described_by_prefers_error() {
        let ids = ids();
        let mut props = FieldProps {
            helper_text: Some("Pick one".into()),
            ..Default::default()
        };
        assert_eq!(props.described_by(&ids), Some(ids.helper.clone()));

        props.error = Some("Required".into());
        assert_eq!(props.described_by(&ids), Some(ids.error.clone()));
        assert!(props.is_invalid());

        assert_eq!(FieldProps::default().described_by(&ids), None);
    }

    #[test]
    fn test_message_hidden_while_open() {
        let ids = ids();
        let props = FieldProps {
            error: Some("Required".into()),
            helper_text: Some("Pick one".into()),
            ..Default::default()
        };
        let message = props.message(&ids, false).unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, "Required");
        assert!(props.message(&ids, true).is_none());
    }

    #[test]
    fn test_trigger_access() {
        let ids = ids();
        let props = FieldProps {
            disabled: true,
            ..Default::default()
        };
        let access = props.trigger_access(&ids, Popup::Dialog, false);
        assert_eq!(access.attribute("tabindex").as_deref(), Some("-1"));
        assert_eq!(access.attribute("aria-haspopup").as_deref(), Some("dialog"));
        assert_eq!(access.attribute("id"), Some(ids.control.to_string()));
        assert_eq!(props.state(true), FieldState::Disabled);

        let enabled = FieldProps::default();
        assert_eq!(enabled.state(true), FieldState::Open);
        assert_eq!(
            enabled.trigger_access(&ids, Popup::Listbox, true).tab_index,
            Some(0)
        );
    }

    #[test]
    fn test_label_points_at_control() {
        let ids = ids();
        let props = FieldProps {
            label: Some("Country".into()),
            required: true,
            ..Default::default()
        };
        let label = props.label_view(&ids).unwrap();
        assert_eq!(label.for_id, ids.control);
        assert!(label.required);
        assert!(ids.control.as_str().starts_with("select-r"));
    }
}
