use super::{BuildContext, Widget};
use crate::accessibility::AccessProps;
use crate::control::ValueMode;
use crate::event::ElementEvent;
use crate::field::{FieldIds, FieldProps};
use crate::focus::FocusPolicy;
use crate::style::CheckboxStyle;
use crate::tree::Part;
use crate::view::CheckboxView;
use crate::widget_id::IdProvider;
use accesskit::Role;
use formwork_input::{HandleStatus, Key};
use std::any::Any;
use std::rc::Rc;

/// Payload of a checkbox change, shaped like a native checkbox event target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxChangeEvent {
    pub checked: bool,
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Boolean toggle with a label, error and helper text.
pub struct Checkbox {
    checked: ValueMode<bool>,
    field: FieldProps,
    name: Option<String>,
    value: Option<String>,
    style: CheckboxStyle,
    on_change: Option<Rc<dyn Fn(&CheckboxChangeEvent)>>,
    ids: FieldIds,
    dirty: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            checked: ValueMode::Uncontrolled(false),
            field: FieldProps::default(),
            name: None,
            value: None,
            style: CheckboxStyle::default(),
            on_change: None,
            ids: FieldIds::allocate(&IdProvider::new(), "checkbox"),
            dirty: false,
        }
    }

    /// Make the checkbox controlled by its owner.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = ValueMode::Controlled(checked);
        self
    }

    /// Initial state of an uncontrolled checkbox.
    pub fn default_checked(mut self, checked: bool) -> Self {
        if !self.checked.is_controlled() {
            self.checked = ValueMode::Uncontrolled(checked);
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.field.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.field.disabled = disabled;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.field.error = Some(error.into());
        self
    }

    pub fn helper_text(mut self, helper: impl Into<String>) -> Self {
        self.field.helper_text = Some(helper.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn style(mut self, style: CheckboxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_change(mut self, f: impl Fn(&CheckboxChangeEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    /// Owner fed a new `checked` prop.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.field.disabled = disabled;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.field.error = error;
    }

    pub fn set_label(&mut self, label: Option<String>) {
        if self.field.label.is_some() != label.is_some() {
            self.dirty = true;
        }
        self.field.label = label;
    }

    pub fn is_checked(&self) -> bool {
        *self.checked.get()
    }

    pub fn is_controlled(&self) -> bool {
        self.checked.is_controlled()
    }

    pub fn is_disabled(&self) -> bool {
        self.field.disabled
    }

    pub fn field(&self) -> &FieldProps {
        &self.field
    }

    pub fn ids(&self) -> &FieldIds {
        &self.ids
    }

    /// Toggle as if clicked. Returns the reported change, or `None` when
    /// disabled.
    pub fn activate(&mut self) -> Option<CheckboxChangeEvent> {
        if self.field.disabled {
            return None;
        }
        let next = !self.is_checked();
        self.checked.commit(next);
        let event = CheckboxChangeEvent {
            checked: next,
            name: self.name.clone(),
            value: self.value.clone(),
        };
        tracing::debug!(checked = next, controlled = self.is_controlled(), "checkbox toggled");
        if let Some(on_change) = &self.on_change {
            on_change(&event);
        }
        Some(event)
    }

    pub fn view(&self) -> CheckboxView {
        let checked = self.is_checked();
        let invalid = self.field.is_invalid();
        let (fill, border) = self.style.box_colors(checked, invalid);
        let access = AccessProps::new(Role::CheckBox)
            .with_id(self.ids.control.clone())
            .with_checked(checked)
            .with_required(self.field.required)
            .with_invalid(invalid)
            .with_described_by(self.field.described_by(&self.ids))
            .with_disabled(self.field.disabled)
            .with_tab_index(self.focus_policy().tab_index());
        CheckboxView {
            id: self.ids.control.clone(),
            label: self.field.label_view(&self.ids),
            access,
            checked,
            disabled: self.field.disabled,
            fill,
            border,
            message: self.field.message(&self.ids, false),
        }
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Checkbox {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Checkbox"
    }

    fn build(&mut self, cx: &mut BuildContext<'_>) {
        cx.add(Part::Trigger);
        if self.field.label.is_some() {
            cx.add(Part::Label);
        }
        self.dirty = false;
    }

    fn needs_rebuild(&self) -> bool {
        self.dirty
    }

    fn focus_policy(&self) -> FocusPolicy {
        self.field.focus_policy()
    }

    fn handle_event(&mut self, part: Part, event: &ElementEvent) -> HandleStatus {
        let toggles = match (part, event) {
            (Part::Trigger | Part::Label, ElementEvent::Click) => true,
            (Part::Trigger, ElementEvent::KeyDown(key)) => key.key == Key::Space,
            _ => false,
        };
        if toggles && self.activate().is_some() {
            HandleStatus::consumed()
        } else {
            HandleStatus::ignored()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_input::KeyEvent;
    use std::cell::RefCell;

    #[test]
    fn test_uncontrolled_defaults() {
        assert!(!Checkbox::new().is_checked());
        assert!(Checkbox::new().default_checked(true).is_checked());
        assert!(!Checkbox::new().is_controlled());
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        for start in [false, true] {
            let mut checkbox = Checkbox::new().default_checked(start);
            checkbox.activate();
            assert_eq!(checkbox.is_checked(), !start);
            checkbox.activate();
            assert_eq!(checkbox.is_checked(), start);
        }
    }

    #[test]
    fn test_controlled_display_follows_prop() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut checkbox = Checkbox::new()
            .checked(false)
            .on_change(move |e| sink.borrow_mut().push(e.checked));

        for _ in 0..3 {
            checkbox.activate();
            assert!(!checkbox.is_checked());
        }
        assert_eq!(*events.borrow(), vec![true, true, true]);

        checkbox.set_checked(true);
        assert!(checkbox.is_checked());
        checkbox.activate();
        assert!(checkbox.is_checked());
        assert_eq!(events.borrow().last(), Some(&false));
    }

    #[test]
    fn test_controlled_ignores_default() {
        let checkbox = Checkbox::new().checked(false).default_checked(true);
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_disabled_is_noop() {
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let mut checkbox = Checkbox::new()
            .disabled(true)
            .on_change(move |_| *sink.borrow_mut() += 1);
        assert_eq!(checkbox.activate(), None);
        let status = checkbox.handle_event(Part::Trigger, &ElementEvent::Click);
        assert!(!status.is_handled());
        let status = checkbox.handle_event(Part::Label, &ElementEvent::Click);
        assert!(!status.is_handled());
        let space = ElementEvent::KeyDown(KeyEvent::new(Key::Space));
        let status = checkbox.handle_event(Part::Trigger, &space);
        assert!(!status.is_handled());
        assert!(!checkbox.is_checked());
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(checkbox.focus_policy(), FocusPolicy::NotFocusable);
    }

    #[test]
    fn test_change_event_carries_name_and_value() {
        let mut checkbox = Checkbox::new().name("terms").value("accepted");
        let event = checkbox.activate().unwrap();
        assert_eq!(
            event,
            CheckboxChangeEvent {
                checked: true,
                name: Some("terms".into()),
                value: Some("accepted".into()),
            }
        );
    }

    #[test]
    fn test_space_and_label_toggle() {
        let mut checkbox = Checkbox::new().label("Accept");
        checkbox.handle_event(Part::Trigger, &ElementEvent::KeyDown(KeyEvent::new(Key::Space)));
        assert!(checkbox.is_checked());
        checkbox.handle_event(Part::Label, &ElementEvent::Click);
        assert!(!checkbox.is_checked());
        let status = checkbox.handle_event(Part::Trigger, &ElementEvent::KeyDown(KeyEvent::new(Key::Enter)));
        assert!(!status.is_handled());
    }

    #[test]
    fn test_view_aria() {
        let checkbox = Checkbox::new()
            .helper_text("Optional")
            .error("Must accept")
            .default_checked(true);
        let view = checkbox.view();
        assert!(view.checked);
        assert_eq!(view.access.attribute("aria-invalid").as_deref(), Some("true"));
        assert_eq!(
            view.access.attribute("aria-describedby"),
            Some(checkbox.ids().error.to_string())
        );
        assert_eq!(view.message.unwrap().text, "Must accept");

        let plain = Checkbox::new().helper_text("Optional");
        assert_eq!(
            plain.view().access.described_by,
            Some(plain.ids().helper.clone())
        );
        assert_eq!(Checkbox::new().view().access.described_by, None);
    }
}
