use super::checkbox::Checkbox;
use super::dropdown::{Dropdown, DropdownAction};
use super::{BuildContext, OptionValue, SelectOption, Widget, label_of};
use crate::accessibility::{AccessProps, Popup};
use crate::control::ValueMode;
use crate::event::{DocumentEvent, ElementEvent};
use crate::field::{FieldIds, FieldProps};
use crate::focus::FocusPolicy;
use crate::locale::Locale;
use crate::style::{CheckboxStyle, FieldStyle};
use crate::tree::Part;
use crate::view::{ListboxView, OptionView, SelectView, TriggerView};
use crate::widget_id::{ElementId, IdProvider};
use accesskit::Role;
use formwork_input::HandleStatus;
use std::any::Any;
use std::rc::Rc;

/// Multi-value dropdown whose rows are checkboxes.
///
/// The panel stays open while picking. With `max_selections` set, adding
/// beyond the cap is rejected and the remaining rows render disabled;
/// removing is always allowed.
pub struct MultiSelect<V: OptionValue> {
    options: Vec<SelectOption<V>>,
    rows: Vec<Checkbox>,
    value: ValueMode<Vec<V>>,
    dropdown: Dropdown,
    field: FieldProps,
    placeholder: Option<String>,
    locale: Option<Locale>,
    inherited_locale: Locale,
    style: FieldStyle,
    checkbox_style: CheckboxStyle,
    max_selections: Option<usize>,
    show_count: bool,
    on_change: Option<Rc<dyn Fn(&[V])>>,
    ids: FieldIds,
    listbox_id: ElementId,
    dirty: bool,
}

/// Drop repeated values, keeping first occurrences in order.
fn dedup<V: PartialEq>(values: Vec<V>) -> Vec<V> {
    let mut unique: Vec<V> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

impl<V: OptionValue> MultiSelect<V> {
    pub fn new(options: Vec<SelectOption<V>>) -> Self {
        let ids = FieldIds::allocate(&IdProvider::new(), "multiselect");
        let listbox_id = ids.control.child("listbox");
        let mut multi = Self {
            dropdown: Dropdown::new(options.len()),
            options,
            rows: Vec::new(),
            value: ValueMode::Uncontrolled(Vec::new()),
            field: FieldProps::default(),
            placeholder: None,
            locale: None,
            inherited_locale: Locale::default(),
            style: FieldStyle::default(),
            checkbox_style: CheckboxStyle::default(),
            max_selections: None,
            show_count: true,
            on_change: None,
            ids,
            listbox_id,
            dirty: false,
        };
        multi.sync_rows();
        multi
    }

    /// Make the multi-select controlled by its owner.
    pub fn value(mut self, values: Vec<V>) -> Self {
        self.value = ValueMode::Controlled(dedup(values));
        self.sync_rows();
        self
    }

    /// Initial selection of an uncontrolled multi-select.
    pub fn default_value(mut self, values: Vec<V>) -> Self {
        if !self.value.is_controlled() {
            self.value = ValueMode::Uncontrolled(dedup(values));
            self.sync_rows();
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
        self.sync_rows();
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

    pub fn max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self.sync_rows();
        self
    }

    pub fn show_count(mut self, show_count: bool) -> Self {
        self.show_count = show_count;
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

    pub fn checkbox_style(mut self, style: CheckboxStyle) -> Self {
        self.checkbox_style = style;
        self.rows = Vec::new();
        self.sync_rows();
        self
    }

    pub fn on_change(mut self, f: impl Fn(&[V]) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    /// Owner fed a new `value` prop. The value mode is unchanged.
    pub fn set_value(&mut self, values: Vec<V>) {
        self.value.set(dedup(values));
        self.sync_rows();
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        if options.len() != self.options.len() {
            self.dirty = true;
        }
        self.dropdown.set_option_count(options.len());
        self.options = options;
        self.sync_rows();
    }

    pub fn set_max_selections(&mut self, max: Option<usize>) {
        self.max_selections = max;
        self.sync_rows();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.field.disabled = disabled;
        if disabled {
            self.dropdown.close();
        }
        self.sync_rows();
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.field.error = error;
    }

    pub fn set_helper_text(&mut self, helper: Option<String>) {
        self.field.helper_text = helper;
    }

    pub fn selected(&self) -> &[V] {
        self.value.get()
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    /// Checkbox rendered for option `index`.
    pub fn row(&self, index: usize) -> Option<&Checkbox> {
        self.rows.get(index)
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

    /// True when the cap is set and reached.
    pub fn at_capacity(&self) -> bool {
        self.max_selections
            .is_some_and(|max| self.selected().len() >= max)
    }

    fn is_selected(&self, value: &V) -> bool {
        self.selected().contains(value)
    }

    fn effective_locale(&self) -> &Locale {
        self.locale.as_ref().unwrap_or(&self.inherited_locale)
    }

    fn placeholder_text(&self) -> String {
        self.placeholder
            .clone()
            .unwrap_or_else(|| self.effective_locale().select_placeholder().to_string())
    }

    /// Trigger text: placeholder, the single label, a count, or a joined list.
    pub fn display_text(&self) -> String {
        match self.selected() {
            [] => self.placeholder_text(),
            [only] => label_of(&self.options, only)
                .map(str::to_string)
                .unwrap_or_else(|| self.placeholder_text()),
            many if self.show_count => self.effective_locale().selected_count(many.len()),
            many => many
                .iter()
                .map(|v| {
                    label_of(&self.options, v)
                        .map(str::to_string)
                        .unwrap_or_else(|| v.to_string())
                })
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Trigger click.
    pub fn toggle(&mut self) {
        if !self.field.disabled {
            self.dropdown.toggle();
        }
    }

    /// Activate the row of option `index` as if its checkbox was clicked.
    pub fn activate_row(&mut self, index: usize) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        if row.activate().is_some() {
            self.toggle_value(index);
        } else {
            tracing::debug!(index, "multiselect row is disabled");
        }
    }

    /// Add the value of option `index` if absent, remove it if present.
    pub fn toggle_value(&mut self, index: usize) {
        let Some(option) = self.options.get(index) else {
            return;
        };
        let mut next = self.selected().to_vec();
        match next.iter().position(|v| *v == option.value) {
            Some(position) => {
                next.remove(position);
            }
            None if self.at_capacity() => {
                tracing::debug!(index, max = ?self.max_selections, "selection cap reached");
                return;
            }
            None => next.push(option.value.clone()),
        }
        let applied = self.value.commit(next.clone());
        tracing::debug!(index, count = next.len(), applied, "multiselect toggled");
        self.sync_rows();
        if let Some(on_change) = &self.on_change {
            on_change(&next);
        }
    }

    /// Keep one controlled checkbox per option, mirroring membership.
    fn sync_rows(&mut self) {
        let at_capacity = self.at_capacity();
        self.rows.truncate(self.options.len());
        while self.rows.len() < self.options.len() {
            self.rows
                .push(Checkbox::new().checked(false).style(self.checkbox_style.clone()));
        }
        let selected = self.value.get();
        for (row, option) in self.rows.iter_mut().zip(&self.options) {
            let checked = selected.contains(&option.value);
            row.set_checked(checked);
            row.set_label(Some(option.label.clone()));
            row.set_disabled(self.field.disabled || (at_capacity && !checked));
        }
    }

    pub fn view(&self) -> SelectView {
        let open = self.dropdown.is_open();
        let trigger = TriggerView {
            access: self.field.trigger_access(&self.ids, Popup::Listbox, open),
            text: self.display_text(),
            is_placeholder: self.selected().is_empty(),
            open,
            disabled: self.field.disabled,
            border: self.style.border_color(self.field.state(open)),
        };

        let listbox = open.then(|| {
            let hovered = self.dropdown.hovered();
            let options = self
                .options
                .iter()
                .zip(&self.rows)
                .enumerate()
                .map(|(i, (option, row))| {
                    let selected = self.is_selected(&option.value);
                    OptionView {
                        id: self.option_id(i),
                        label: option.label.clone(),
                        selected,
                        hovered: hovered == Some(i),
                        disabled: row.is_disabled(),
                        access: AccessProps::new(Role::ListBoxOption)
                            .with_id(self.option_id(i))
                            .with_selected(selected)
                            .with_disabled(row.is_disabled()),
                        checkbox: Some(row.view()),
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

impl<V: OptionValue> Widget for MultiSelect<V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "MultiSelect"
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
                self.activate_row(i);
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
                    self.activate_row(index);
                }
                action.status()
            }
        }
    }
}
