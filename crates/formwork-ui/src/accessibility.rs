//! Accessibility props of rendered elements.
//!
//! Every element a widget renders carries an [`AccessProps`]. Hosts that
//! produce HTML read [`AccessProps::aria_attributes`]; native hosts feed
//! [`AccessProps::to_accesskit`] into their AccessKit adapter.

use crate::widget_id::ElementId;
use accesskit::{Action, HasPopup, Invalid, Node, Role, Toggled};

/// Kind of popup a combobox trigger opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Listbox,
    Dialog,
}

impl Popup {
    fn as_str(&self) -> &'static str {
        match self {
            Popup::Listbox => "listbox",
            Popup::Dialog => "dialog",
        }
    }

    fn to_accesskit(self) -> HasPopup {
        match self {
            Popup::Listbox => HasPopup::Listbox,
            Popup::Dialog => HasPopup::Dialog,
        }
    }
}

/// Role, state and relations of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessProps {
    pub role: Role,
    pub id: Option<ElementId>,
    pub label: Option<String>,
    pub has_popup: Option<Popup>,
    pub expanded: Option<bool>,
    pub required: bool,
    pub invalid: bool,
    pub described_by: Option<ElementId>,
    pub selected: Option<bool>,
    pub checked: Option<bool>,
    pub active_descendant: Option<ElementId>,
    pub disabled: bool,
    pub hidden: bool,
    pub tab_index: Option<i32>,
}

impl AccessProps {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            id: None,
            label: None,
            has_popup: None,
            expanded: None,
            required: false,
            invalid: false,
            described_by: None,
            selected: None,
            checked: None,
            active_descendant: None,
            disabled: false,
            hidden: false,
            tab_index: None,
        }
    }

    /// Combobox trigger opening `popup`.
    pub fn combobox(popup: Popup, expanded: bool) -> Self {
        Self {
            has_popup: Some(popup),
            expanded: Some(expanded),
            ..Self::new(Role::ComboBox)
        }
    }

    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn with_described_by(mut self, id: Option<ElementId>) -> Self {
        self.described_by = id;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn with_active_descendant(mut self, id: Option<ElementId>) -> Self {
        self.active_descendant = id;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// DOM `role` value, `None` for roles expressed by the element itself.
    pub fn dom_role(&self) -> Option<&'static str> {
        match self.role {
            Role::ComboBox => Some("combobox"),
            Role::ListBox => Some("listbox"),
            Role::ListBoxOption => Some("option"),
            Role::Dialog => Some("dialog"),
            Role::CheckBox => Some("checkbox"),
            Role::Grid => Some("grid"),
            Role::GridCell => Some("gridcell"),
            _ => None,
        }
    }

    /// Attribute list in the order a DOM host would write it.
    pub fn aria_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if let Some(id) = &self.id {
            attrs.push(("id", id.to_string()));
        }
        if let Some(role) = self.dom_role() {
            attrs.push(("role", role.to_string()));
        }
        if let Some(label) = &self.label {
            attrs.push(("aria-label", label.clone()));
        }
        if let Some(popup) = self.has_popup {
            attrs.push(("aria-haspopup", popup.as_str().to_string()));
        }
        if let Some(expanded) = self.expanded {
            attrs.push(("aria-expanded", expanded.to_string()));
        }
        if self.role == Role::ComboBox || self.required {
            attrs.push(("aria-required", self.required.to_string()));
        }
        if self.role == Role::ComboBox || self.role == Role::CheckBox || self.invalid {
            attrs.push(("aria-invalid", self.invalid.to_string()));
        }
        if let Some(id) = &self.described_by {
            attrs.push(("aria-describedby", id.to_string()));
        }
        if let Some(id) = &self.active_descendant {
            attrs.push(("aria-activedescendant", id.to_string()));
        }
        if let Some(selected) = self.selected {
            attrs.push(("aria-selected", selected.to_string()));
        }
        if let Some(checked) = self.checked {
            attrs.push(("aria-checked", checked.to_string()));
        }
        if self.disabled {
            attrs.push(("aria-disabled", "true".to_string()));
        }
        if self.hidden {
            attrs.push(("aria-hidden", "true".to_string()));
        }
        if let Some(tab_index) = self.tab_index {
            attrs.push(("tabindex", tab_index.to_string()));
        }
        attrs
    }

    /// Value of a single attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.aria_attributes()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Build the AccessKit node for this element.
    ///
    /// Id relations (`aria-describedby`, `aria-activedescendant`) are DOM
    /// string ids and are left to the host, which owns the AccessKit id space.
    pub fn to_accesskit(&self) -> Node {
        let mut node = Node::new(self.role);
        if let Some(label) = &self.label {
            node.set_label(label.clone());
        }
        if let Some(popup) = self.has_popup {
            node.set_has_popup(popup.to_accesskit());
        }
        if let Some(expanded) = self.expanded {
            node.set_expanded(expanded);
        }
        if self.required {
            node.set_required();
        }
        if self.invalid {
            node.set_invalid(Invalid::True);
        }
        if let Some(selected) = self.selected {
            node.set_selected(selected);
        }
        if let Some(checked) = self.checked {
            node.set_toggled(if checked { Toggled::True } else { Toggled::False });
        }
        if self.disabled {
            node.set_disabled();
        }
        if self.hidden {
            node.set_hidden();
        }
        if self.tab_index.is_some_and(|i| i >= 0) && !self.disabled {
            node.add_action(Action::Focus);
        }
        node
    }
}
