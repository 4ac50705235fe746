use super::calendar::{
    self, CalendarDay, Clock, DatePolicy, GRID_CELLS, SystemClock, month_grid, year_range,
};
use super::dropdown::Dropdown;
use super::{BuildContext, Widget};
use crate::accessibility::{AccessProps, Popup};
use crate::control::ValueMode;
use crate::event::{DocumentEvent, ElementEvent};
use crate::field::{FieldIds, FieldProps};
use crate::focus::FocusPolicy;
use crate::locale::Locale;
use crate::style::{CalendarStyle, FieldStyle};
use crate::tree::Part;
use crate::view::{CalendarView, ChoiceView, DatePickerView, DayView, TriggerView};
use crate::widget_id::{ElementId, IdProvider};
use accesskit::Role;
use formwork_input::{HandleStatus, Key};
use std::any::Any;
use std::rc::Rc;
use time::{Date, Month};

/// Sub-panel shown over the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubPanel {
    #[default]
    None,
    Month,
    Year,
}

/// Date field with a calendar dropdown.
pub struct DatePicker {
    value: ValueMode<Option<Date>>,
    cursor: Date,
    dropdown: Dropdown,
    panel: SubPanel,
    policy: DatePolicy,
    field: FieldProps,
    placeholder: Option<String>,
    locale: Option<Locale>,
    inherited_locale: Locale,
    style: FieldStyle,
    calendar_style: CalendarStyle,
    clock: Rc<dyn Clock>,
    on_change: Option<Rc<dyn Fn(Date)>>,
    ids: FieldIds,
    dialog_id: ElementId,
}

impl DatePicker {
    pub fn new() -> Self {
        let ids = FieldIds::allocate(&IdProvider::new(), "datepicker");
        let dialog_id = ids.control.child("dialog");
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        Self {
            value: ValueMode::Uncontrolled(None),
            cursor: clock.today(),
            dropdown: Dropdown::new(0),
            panel: SubPanel::None,
            policy: DatePolicy::default(),
            field: FieldProps::default(),
            placeholder: None,
            locale: None,
            inherited_locale: Locale::default(),
            style: FieldStyle::default(),
            calendar_style: CalendarStyle::default(),
            clock,
            on_change: None,
            ids,
            dialog_id,
        }
    }

    /// Make the picker controlled by its owner.
    pub fn value(mut self, value: impl Into<Option<Date>>) -> Self {
        self.value = ValueMode::Controlled(value.into());
        self.reseed_cursor();
        self
    }

    /// Initial selection of an uncontrolled picker.
    pub fn default_value(mut self, value: Date) -> Self {
        if !self.value.is_controlled() {
            self.value = ValueMode::Uncontrolled(Some(value));
            self.reseed_cursor();
        }
        self
    }

    /// Source of "today". The cursor starts on today when nothing is selected.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self.reseed_cursor();
        self
    }

    pub fn min_date(mut self, date: Date) -> Self {
        self.policy.min = Some(date);
        self
    }

    pub fn max_date(mut self, date: Date) -> Self {
        self.policy.max = Some(date);
        self
    }

    pub fn disabled_dates(mut self, dates: Vec<Date>) -> Self {
        self.policy.disabled = dates;
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

    pub fn calendar_style(mut self, style: CalendarStyle) -> Self {
        self.calendar_style = style;
        self
    }

    pub fn on_change(mut self, f: impl Fn(Date) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    fn reseed_cursor(&mut self) {
        self.cursor = self.selected().unwrap_or_else(|| self.clock.today());
    }

    /// Owner fed a new `value` prop. A date also moves the cursor. The
    /// value mode is unchanged.
    pub fn set_value(&mut self, value: Option<Date>) {
        self.value.set(value);
        if let Some(date) = value {
            self.cursor = date;
        }
    }

    pub fn set_policy(&mut self, policy: DatePolicy) {
        self.policy = policy;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.field.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.field.error = error;
    }

    pub fn set_helper_text(&mut self, helper: Option<String>) {
        self.field.helper_text = helper;
    }

    pub fn selected(&self) -> Option<Date> {
        *self.value.get()
    }

    /// First day of the month in view is derived from this date.
    pub fn cursor(&self) -> Date {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn sub_panel(&self) -> SubPanel {
        self.panel
    }

    pub fn policy(&self) -> &DatePolicy {
        &self.policy
    }

    pub fn field(&self) -> &FieldProps {
        &self.field
    }

    pub fn ids(&self) -> &FieldIds {
        &self.ids
    }

    pub fn is_date_disabled(&self, date: Date) -> bool {
        self.policy.is_disabled(date)
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    fn effective_locale(&self) -> &Locale {
        self.locale.as_ref().unwrap_or(&self.inherited_locale)
    }

    /// Selected date formatted for the locale, or the placeholder.
    pub fn display_text(&self) -> String {
        match self.selected() {
            Some(date) => self.effective_locale().format_date(date),
            None => self
                .placeholder
                .clone()
                .unwrap_or_else(|| self.effective_locale().date_placeholder().to_string()),
        }
    }

    /// The 42 cells of the month in view.
    pub fn grid(&self) -> Vec<CalendarDay> {
        month_grid(self.cursor, self.selected(), self.clock.today())
    }

    /// Trigger click. Always collapses the sub-panel.
    pub fn toggle(&mut self) {
        if self.field.disabled {
            return;
        }
        self.dropdown.toggle();
        self.panel = SubPanel::None;
    }

    pub fn close(&mut self) {
        self.dropdown.close();
        self.panel = SubPanel::None;
    }

    /// Pick `date`. Disabled dates are ignored and return false.
    pub fn select_date(&mut self, date: Date) -> bool {
        if self.policy.is_disabled(date) {
            tracing::debug!(%date, "date is disabled");
            return false;
        }
        let applied = self.value.commit(Some(date));
        self.cursor = date;
        self.close();
        tracing::debug!(%date, applied, "date selected");
        if let Some(on_change) = &self.on_change {
            on_change(date);
        }
        true
    }

    /// Pick grid cell `index`.
    pub fn select_day(&mut self, index: usize) -> bool {
        match self.grid().get(index) {
            Some(day) => self.select_date(day.date),
            None => false,
        }
    }

    pub fn previous_month(&mut self) {
        self.cursor = calendar::shift_months(self.cursor, -1);
    }

    pub fn next_month(&mut self) {
        self.cursor = calendar::shift_months(self.cursor, 1);
    }

    pub fn previous_year(&mut self) {
        self.cursor = calendar::shift_years(self.cursor, -1);
    }

    pub fn next_year(&mut self) {
        self.cursor = calendar::shift_years(self.cursor, 1);
    }

    pub fn toggle_month_panel(&mut self) {
        self.panel = match self.panel {
            SubPanel::Month => SubPanel::None,
            _ => SubPanel::Month,
        };
    }

    pub fn toggle_year_panel(&mut self) {
        self.panel = match self.panel {
            SubPanel::Year => SubPanel::None,
            _ => SubPanel::Year,
        };
    }

    pub fn choose_month(&mut self, month: Month) {
        self.cursor = calendar::with_month(self.cursor, month);
        self.panel = SubPanel::None;
    }

    pub fn choose_year(&mut self, year: i32) {
        self.cursor = calendar::with_year(self.cursor, year);
        self.panel = SubPanel::None;
    }

    pub fn view(&self) -> DatePickerView {
        let open = self.is_open();
        let trigger = TriggerView {
            access: self.field.trigger_access(&self.ids, Popup::Dialog, open),
            text: self.display_text(),
            is_placeholder: self.selected().is_none(),
            open,
            disabled: self.field.disabled,
            border: self.style.border_color(self.field.state(open)),
        };
        DatePickerView {
            label: self.field.label_view(&self.ids),
            trigger,
            calendar: open.then(|| self.calendar_view()),
            message: self.field.message(&self.ids, open),
        }
    }

    fn calendar_view(&self) -> CalendarView {
        let locale = self.effective_locale();
        let days = self
            .grid()
            .into_iter()
            .map(|cell| DayView {
                date: cell.date,
                day: cell.date.day(),
                is_current_month: cell.is_current_month,
                is_today: cell.is_today,
                is_selected: cell.is_selected,
                is_disabled: self.policy.is_disabled(cell.date),
            })
            .collect();

        let month_choices = (self.panel == SubPanel::Month).then(|| {
            (1..=12u8)
                .filter_map(|m| Month::try_from(m).ok())
                .map(|month| ChoiceView {
                    label: locale.month_abbreviation(month),
                    value: u8::from(month) as i32,
                    current: month == self.cursor.month(),
                })
                .collect()
        });
        let year_choices = (self.panel == SubPanel::Year).then(|| {
            year_range(self.cursor.year())
                .map(|year| ChoiceView {
                    label: year.to_string(),
                    value: year,
                    current: year == self.cursor.year(),
                })
                .collect()
        });

        CalendarView {
            access: AccessProps::new(Role::Dialog)
                .with_id(self.dialog_id.clone())
                .with_tab_index(-1),
            month_title: locale.month_names()[u8::from(self.cursor.month()) as usize - 1].to_string(),
            year: self.cursor.year(),
            weekdays: locale.weekday_short(),
            days,
            month_choices,
            year_choices,
            style: self.calendar_style.clone(),
        }
    }
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for DatePicker {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "DatePicker"
    }

    fn build(&mut self, cx: &mut BuildContext<'_>) {
        self.inherited_locale = cx.locale().clone();
        if self.field.label.is_some() {
            cx.add(Part::Label);
        }
        cx.add(Part::Trigger);
        let dialog = cx.add(Part::Dialog);
        let header = [
            Part::PrevYear,
            Part::PrevMonth,
            Part::MonthToggle,
            Part::YearToggle,
            Part::NextMonth,
            Part::NextYear,
        ];
        let months = (0..12).map(Part::MonthChoice);
        let years = (0..year_range(0).count()).map(Part::YearChoice);
        let days = (0..GRID_CELLS).map(Part::Day);
        for part in header.into_iter().chain(months).chain(years).chain(days) {
            cx.add_under(dialog, part);
        }
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
            (Part::Trigger, ElementEvent::KeyDown(key)) if key.key.is_activation() => {
                self.toggle();
                HandleStatus::consumed()
            }
            (_, ElementEvent::Click) if self.is_open() => {
                match part {
                    Part::PrevYear => self.previous_year(),
                    Part::PrevMonth => self.previous_month(),
                    Part::NextMonth => self.next_month(),
                    Part::NextYear => self.next_year(),
                    Part::MonthToggle => self.toggle_month_panel(),
                    Part::YearToggle => self.toggle_year_panel(),
                    Part::MonthChoice(i) if self.panel == SubPanel::Month => {
                        if let Ok(month) = Month::try_from(i as u8 + 1) {
                            self.choose_month(month);
                        }
                    }
                    Part::YearChoice(i) if self.panel == SubPanel::Year => {
                        let year = *year_range(self.cursor.year()).start() + i as i32;
                        self.choose_year(year);
                    }
                    Part::Day(i) => {
                        self.select_day(i);
                    }
                    _ => return HandleStatus::ignored(),
                }
                HandleStatus::consumed()
            }
            _ => HandleStatus::ignored(),
        }
    }

    fn handle_document_event(&mut self, event: &DocumentEvent) -> HandleStatus {
        if !self.is_open() {
            return HandleStatus::ignored();
        }
        match event {
            DocumentEvent::PointerDown { outside: true } => {
                self.close();
                HandleStatus::handled()
            }
            DocumentEvent::KeyDown(key) if key.key == Key::Escape => {
                self.close();
                HandleStatus::handled()
            }
            _ => HandleStatus::ignored(),
        }
    }
}
