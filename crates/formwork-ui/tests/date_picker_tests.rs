//! DatePicker driven through a document.

use formwork_input::{Key, KeyEvent};
use formwork_ui::widgets::calendar::{month_grid, parse_iso_date};
use formwork_ui::{DatePicker, Document, FixedClock, Locale, Part, SubPanel};
use std::cell::RefCell;
use std::rc::Rc;
use time::macros::date;
use time::{Date, Month, Weekday};

fn january_picker(calls: Rc<RefCell<Vec<Date>>>) -> DatePicker {
    DatePicker::new()
        .clock(FixedClock(date!(2024 - 01 - 15)))
        .min_date(parse_iso_date("2024-01-01").unwrap())
        .max_date(parse_iso_date("2024-01-31").unwrap())
        .on_change(move |d| calls.borrow_mut().push(d))
}

#[test]
fn test_out_of_range_days_are_noops() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut doc = Document::new();
    let picker = doc.mount(january_picker(calls.clone()));
    doc.click_part(picker, Part::Trigger);

    // January 2024 starts on Monday: cells 31.. are February.
    doc.click_part(picker, Part::Day(31));
    assert!(calls.borrow().is_empty());
    assert!(doc.get(picker).unwrap().is_open());
    assert_eq!(doc.get(picker).unwrap().selected(), None);

    doc.click_part(picker, Part::PrevMonth);
    doc.click_part(picker, Part::Day(30));
    assert!(calls.borrow().is_empty());

    doc.click_part(picker, Part::NextMonth);
    doc.click_part(picker, Part::Day(19));
    assert_eq!(*calls.borrow(), vec![date!(2024 - 01 - 20)]);
    let widget = doc.get(picker).unwrap();
    assert_eq!(widget.selected(), Some(date!(2024 - 01 - 20)));
    assert!(!widget.is_open());
    assert_eq!(widget.display_text(), "20/01/2024");
}

#[test]
fn test_every_day_in_range_is_selectable() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let picker = january_picker(calls);
    for cell in picker.grid() {
        let in_range = cell.date.month() == Month::January && cell.date.year() == 2024;
        assert_eq!(picker.is_date_disabled(cell.date), !in_range, "{}", cell.date);
    }
}

#[test]
fn test_header_panels() {
    let mut doc = Document::new();
    let picker = doc.mount(DatePicker::new().clock(FixedClock(date!(2024 - 05 - 31))));
    doc.click_part(picker, Part::Trigger);

    doc.click_part(picker, Part::MonthToggle);
    assert_eq!(doc.get(picker).unwrap().sub_panel(), SubPanel::Month);
    doc.click_part(picker, Part::MonthChoice(1));
    let widget = doc.get(picker).unwrap();
    assert_eq!(widget.cursor(), date!(2024 - 02 - 29));
    assert_eq!(widget.sub_panel(), SubPanel::None);
    assert!(widget.is_open());

    doc.click_part(picker, Part::YearToggle);
    doc.click_part(picker, Part::YearChoice(9));
    assert_eq!(doc.get(picker).unwrap().cursor(), date!(2023 - 02 - 28));

    // Choices are inert while their panel is hidden.
    doc.click_part(picker, Part::MonthChoice(5));
    assert_eq!(doc.get(picker).unwrap().cursor().month(), Month::February);
}

#[test]
fn test_keyboard_and_escape() {
    let mut doc = Document::new();
    let picker = doc.mount(DatePicker::new().clock(FixedClock(date!(2024 - 05 - 31))));
    assert!(doc.focus(picker));

    doc.key_down(KeyEvent::new(Key::Space));
    assert!(doc.get(picker).unwrap().is_open());
    doc.key_down(KeyEvent::new(Key::Escape));
    assert!(!doc.get(picker).unwrap().is_open());

    doc.key_down(KeyEvent::new(Key::ArrowDown));
    doc.click_part(picker, Part::YearToggle);
    doc.click_outside();
    let widget = doc.get(picker).unwrap();
    assert!(!widget.is_open());
    assert_eq!(widget.sub_panel(), SubPanel::None);
}

#[test]
fn test_controlled_picker_waits_for_owner() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let mut doc = Document::with_locale(Locale::parse("de-DE").unwrap());
    let picker = doc.mount(
        DatePicker::new()
            .clock(FixedClock(date!(2024 - 05 - 31)))
            .value(date!(2024 - 05 - 01))
            .on_change(move |d| sink.borrow_mut().push(d)),
    );
    doc.click_part(picker, Part::Trigger);
    doc.click_part(picker, Part::Day(9));
    assert_eq!(*calls.borrow(), vec![date!(2024 - 05 - 08)]);
    assert_eq!(doc.get(picker).unwrap().display_text(), "01.05.2024");

    doc.update(picker, |p| p.set_value(Some(date!(2024 - 05 - 08))))
        .unwrap();
    assert_eq!(doc.get(picker).unwrap().display_text(), "08.05.2024");
}

#[test]
fn test_grid_shape() {
    let today = date!(2024 - 06 - 15);
    for year in [2023, 2024, 2025] {
        for month in 1..=12u8 {
            let month = Month::try_from(month).unwrap();
            let cursor = Date::from_calendar_date(year, month, 1).unwrap();
            let grid = month_grid(cursor, None, today);
            assert_eq!(grid.len(), 42);
            assert_eq!(grid[0].date.weekday(), Weekday::Monday);
            for pair in grid.windows(2) {
                assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
            }
            let current = grid.iter().filter(|c| c.is_current_month).count();
            assert_eq!(current, month.length(year) as usize);
        }
    }
}
