//! Render snapshots.
//!
//! Widgets expose their current appearance as plain data. A host paints
//! these however it likes; nothing here feeds back into widget state.

use crate::accessibility::AccessProps;
use crate::style::{CalendarStyle, Color};
use crate::widget_id::ElementId;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    pub for_id: ElementId,
    pub text: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Helper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: ElementId,
    pub text: String,
    pub kind: MessageKind,
}

/// The always-visible combobox element.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerView {
    pub access: AccessProps,
    pub text: String,
    pub is_placeholder: bool,
    pub open: bool,
    pub disabled: bool,
    pub border: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub id: ElementId,
    pub label: String,
    pub selected: bool,
    pub hovered: bool,
    pub disabled: bool,
    pub access: AccessProps,
    /// Row checkbox of a multi-select option.
    pub checkbox: Option<CheckboxView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListboxView {
    pub access: AccessProps,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectView {
    pub label: Option<LabelView>,
    pub trigger: TriggerView,
    pub listbox: Option<ListboxView>,
    pub message: Option<MessageView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxView {
    pub id: ElementId,
    pub label: Option<LabelView>,
    pub access: AccessProps,
    pub checked: bool,
    pub disabled: bool,
    pub fill: Color,
    pub border: Color,
    pub message: Option<MessageView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayView {
    pub date: Date,
    pub day: u8,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Entry of the month or year panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: String,
    pub value: i32,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub access: AccessProps,
    pub month_title: String,
    pub year: i32,
    pub weekdays: [&'static str; 7],
    pub days: Vec<DayView>,
    pub month_choices: Option<Vec<ChoiceView>>,
    pub year_choices: Option<Vec<ChoiceView>>,
    pub style: CalendarStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatePickerView {
    pub label: Option<LabelView>,
    pub trigger: TriggerView,
    pub calendar: Option<CalendarView>,
    pub message: Option<MessageView>,
}
