use super::dropdown::{Dropdown, DropdownAction};
use super::{BuildContext, OptionValue, SelectOption, Widget, label_of};
use crate::accessibility::{AccessProps, Popup};
use crate::control::ValueMode;
use crate::event::{DocumentEvent, ElementEvent};
use crate::field::{FieldIds, FieldProps};
use crate::focus::FocusPolicy;
use crate::locale::Locale;
use crate::style::FieldStyle;
use crate::tree::Part;
use crate::view::{ListboxView, OptionView, SelectView, TriggerView};
use crate::widget_id::{ElementId, IdProvider};
use accesskit::Role;
use formwork_input::HandleStatus;
use std::any::Any;
use std::rc::Rc;

/// Single-value dropdown.
///
/// # Example
/// ```
/// use formwork_ui::widgets::{Select, SelectOption};
///
/// let select = Select::new(vec![
///     SelectOption::new("A", "a"),
///     SelectOption::new("B", "b"),
/// ])
/// .default_value("b");
/// assert_eq!(select.display_text(), "B");
/// ```
pub struct Select<V: OptionValue> {
    options: Vec<SelectOption<V>>,
    value: ValueMode<Option<V>>,
    dropdown: Dropdown,
    field: FieldProps,
    placeholder: Option<String>,
    locale: Option<Locale>,
    inherited_locale: Locale,
    style: FieldStyle,
    on_change: Option<Rc<dyn Fn(&V)>>,
    ids: FieldIds,
    listbox_id: ElementId,
    dirty: bool,
}

impl<V: OptionValue> Select<V> {
    pub fn new(options: Vec<SelectOption<V>>) -> Self {
        let ids = FieldIds::allocate(&IdProvider::new(), "select");
        let listbox_id = ids.control.child("listbox");
        Self {
            dropdown: Dropdown::new(options.len()),
            options,
            value: ValueMode::Uncontrolled(None),
            field: FieldProps::default(),
            placeholder: None,
            locale: None,
            inherited_locale: Locale::default(),
            style: FieldStyle::default(),
            on_change: None,
            ids,
            listbox_id,
            dirty: false,
        }
    }

    /// Make the select controlled by its owner.
    pub fn value(mut self, value: impl Into<Option<V>>) -> Self {
        self.value = ValueMode::Controlled(value.into());
        self
    }

    /// Initial selection of an uncontrolled select.
    pub fn default_value(mut self, value: V) -> Self {
        if !self.value.is_controlled() {
            self.value = ValueMode::Uncontrolled(Some(value));
        }
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
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

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_change(mut self, f: impl Fn(&V) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    /// Owner fed a new `value` prop. An uncontrolled select stays
    /// uncontrolled and keeps applying later choices itself.
    pub fn set_value(&mut self, value: Option<V>) {
        self.value.set(value);
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        if options.len() != self.options.len() {
            self.dirty = true;
        }
        self.dropdown.set_option_count(options.len());
        self.options = options;
    }

    /// Disabling an open select closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.field.disabled = disabled;
        if disabled {
            self.dropdown.close();
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.field.error = error;
    }

    pub fn set_helper_text(&mut self, helper: Option<String>) {
        self.field.helper_text = helper;
    }

    pub fn selected(&self) -> Option<&V> {
        self.value.get().as_ref()
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    /// Hover cursor, `-1` when nothing is hovered.
    pub fn hovered_index(&self) -> i32 {
        self.dropdown.hovered_index()
    }

    pub fn field(&self) -> &FieldProps {
        &self.field
    }

    pub fn ids(&self) -> &FieldIds {
        &self.ids
    }

    pub fn option_id(&self, index: usize) -> ElementId {
        self.ids.control.child(format_args!("option-{index}"))
    }

    fn effective_locale(&self) -> &Locale {
        self.locale.as_ref().unwrap_or(&self.inherited_locale)
    }

    fn placeholder_text(&self) -> String {
        self.placeholder
            .clone()
            .unwrap_or_else(|| self.effective_locale().select_placeholder().to_string())
    }

    fn selected_label(&self) -> Option<&str> {
        self.selected().and_then(|v| label_of(&self.options, v))
    }

    /// Label of the selected option, or the placeholder.
    pub fn display_text(&self) -> String {
        self.selected_label()
            .map(str::to_string)
            .unwrap_or_else(|| self.placeholder_text())
    }

    /// Trigger click.
    pub fn toggle(&mut self) {
        if !self.field.disabled {
            self.dropdown.toggle();
        }
    }

    /// Commit option `index`: close the panel and report the value.
    pub fn select_index(&mut self, index: usize) {
        let Some(option) = self.options.get(index) else {
            return;
        };
        let value = option.value.clone();
        self.dropdown.close();
        let applied = self.value.commit(Some(value.clone()));
        tracing::debug!(index, %value, applied, "select committed");
        if let Some(on_change) = &self.on_change {
            on_change(&value);
        }
    }

    pub fn view(&self) -> SelectView {
        let open = self.dropdown.is_open();
        let selected_label = self.selected_label();
        let trigger = TriggerView {
            access: self.field.trigger_access(&self.ids, Popup::Listbox, open),
            text: self.display_text(),
            is_placeholder: selected_label.is_none(),
            open,
            disabled: self.field.disabled,
            border: self.style.border_color(self.field.state(open)),
        };

        let listbox = open.then(|| {
            let hovered = self.dropdown.hovered();
            let options = self
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let selected = self.selected() == Some(&option.value);
                    OptionView {
                        id: self.option_id(i),
                        label: option.label.clone(),
                        selected,
                        hovered: hovered == Some(i),
                        disabled: false,
                        access: AccessProps::new(Role::ListBoxOption)
                            .with_id(self.option_id(i))
                            .with_selected(selected),
                        checkbox: None,
                    }
                })
                .collect();
            ListboxView {
                access: AccessProps::new(Role::ListBox)
                    .with_id(self.listbox_id.clone())
                    .with_active_descendant(hovered.map(|i| self.option_id(i)))
                    .with_tab_index(-1),
                options,
            }
        });

        SelectView {
            label: self.field.label_view(&self.ids),
            trigger,
            listbox,
            message: self.field.message(&self.ids, open),
        }
    }
}

impl<V: OptionValue> Widget for Select<V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Select"
    }

    fn build(&mut self, cx: &mut BuildContext<'_>) {
        self.inherited_locale = cx.locale().clone();
        if self.field.label.is_some() {
            cx.add(Part::Label);
        }
        cx.add(Part::Trigger);
        let listbox = cx.add(Part::Listbox);
        for i in 0..self.options.len() {
            cx.add_under(listbox, Part::Option(i));
        }
        self.dirty = false;
    }

    fn needs_rebuild(&self) -> bool {
        self.dirty
    }

    fn focus_policy(&self) -> FocusPolicy {
        self.field.focus_policy()
    }

    fn listens_to_document(&self) -> bool {
        true
    }

    fn handle_event(&mut self, part: Part, event: &ElementEvent) -> HandleStatus {
        if self.field.disabled {
            return HandleStatus::ignored();
        }
        match (part, event) {
            (Part::Trigger, ElementEvent::Click) => {
                self.toggle();
                HandleStatus::consumed()
            }
            (Part::Trigger, ElementEvent::KeyDown(key)) => self.dropdown.handle_trigger_key(key),
            (Part::Option(i), ElementEvent::Click) if self.is_open() => {
                self.select_index(i);
                HandleStatus::consumed()
            }
            (Part::Option(i), ElementEvent::PointerEnter) => {
                self.dropdown.hover(i);
                HandleStatus::handled()
            }
            (Part::Option(_), ElementEvent::PointerLeave) => {
                self.dropdown.clear_hover();
                HandleStatus::handled()
            }
            _ => HandleStatus::ignored(),
        }
    }

    fn handle_document_event(&mut self, event: &DocumentEvent) -> HandleStatus {
        match event {
            DocumentEvent::PointerDown { outside } => {
                if self.dropdown.handle_pointer_down(*outside) {
                    HandleStatus::handled()
                } else {
                    HandleStatus::ignored()
                }
            }
            DocumentEvent::KeyDown(key) => {
                let action = self.dropdown.handle_document_key(key);
                if let DropdownAction::Commit(index) = action {
                    self.select_index(index);
                }
                action.status()
            }
        }
    }
}
