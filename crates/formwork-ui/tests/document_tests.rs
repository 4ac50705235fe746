//! Mounting, focus order and listener lifetime.

use formwork_core::config::Config;
use formwork_input::{EventBatch, Key, KeyEvent};
use formwork_ui::{
    Checkbox, CheckboxChangeEvent, DatePicker, Document, MultiSelect, Part, Select, SelectOption,
    UiError, UiInput,
};
use std::cell::RefCell;
use std::rc::Rc;

fn options() -> Vec<SelectOption<u32>> {
    (1..=3)
        .map(|n| SelectOption::new(format!("Option {n}"), n))
        .collect()
}

#[test]
fn test_no_listener_leak_after_unmount() {
    let mut doc = Document::new();
    let select = doc.mount(Select::new(options()));
    let multi = doc.mount(MultiSelect::new(options()));
    let picker = doc.mount(DatePicker::new());
    let checkbox = doc.mount(Checkbox::new());
    assert_eq!(doc.listener_count(), 6);

    // Unmount while open as well as while closed.
    doc.click_part(multi, Part::Trigger);
    doc.unmount(multi).unwrap();
    doc.unmount(select).unwrap();
    doc.unmount(picker).unwrap();
    doc.unmount(checkbox).unwrap();
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(doc.widget_count(), 0);
    assert!(doc.tree().is_empty());

    assert_eq!(doc.unmount(checkbox).err(), Some(UiError::WidgetNotMounted(checkbox.id())));
}

#[test]
fn test_tab_order_skips_disabled() {
    let mut doc = Document::new();
    let first = doc.mount(Select::new(options()));
    let disabled = doc.mount(Checkbox::new().disabled(true));
    let last = doc.mount(Checkbox::new());

    doc.key_down(KeyEvent::new(Key::Tab));
    assert_eq!(doc.focused(), Some(first.id()));
    doc.key_down(KeyEvent::new(Key::Tab));
    assert_eq!(doc.focused(), Some(last.id()));
    doc.key_down(KeyEvent::new(Key::Tab));
    assert_eq!(doc.focused(), Some(first.id()));
    doc.key_down(KeyEvent::new(Key::Tab).with_shift());
    assert_eq!(doc.focused(), Some(last.id()));

    doc.update(disabled, |c| c.set_disabled(false)).unwrap();
    doc.key_down(KeyEvent::new(Key::Tab).with_shift());
    assert_eq!(doc.focused(), Some(disabled.id()));
}

#[test]
fn test_checkbox_round_trip_through_document() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let mut doc = Document::new();
    let checkbox = doc.mount(
        Checkbox::new()
            .label("Accept terms")
            .name("terms")
            .on_change(move |e: &CheckboxChangeEvent| sink.borrow_mut().push(e.checked)),
    );

    doc.click_part(checkbox, Part::Label);
    assert!(doc.get(checkbox).unwrap().is_checked());
    doc.key_down(KeyEvent::new(Key::Space));
    assert!(!doc.get(checkbox).unwrap().is_checked());
    assert_eq!(*events.borrow(), vec![true, false]);
}

#[test]
fn test_controlled_checkbox_through_document() {
    let mut doc = Document::new();
    let checkbox = doc.mount(Checkbox::new().checked(true));
    doc.click_part(checkbox, Part::Trigger);
    assert!(doc.get(checkbox).unwrap().is_checked());
    doc.update(checkbox, |c| c.set_checked(false)).unwrap();
    assert!(!doc.get(checkbox).unwrap().is_checked());
}

#[test]
fn test_label_added_on_update() {
    let mut doc = Document::new();
    let checkbox = doc.mount(Checkbox::new());
    assert!(doc.part(checkbox, Part::Label).is_none());
    doc.update(checkbox, |c| c.set_label(Some("Subscribe".into())))
        .unwrap();
    assert!(doc.part(checkbox, Part::Label).is_some());
}

#[test]
fn test_batch_keeps_unconsumed_input() {
    let mut doc = Document::new();
    let select = doc.mount(Select::new(options()));
    let trigger = doc.part(select, Part::Trigger).unwrap();
    let mut batch: EventBatch<UiInput> = [
        UiInput::Click { target: trigger },
        UiInput::KeyDown(KeyEvent::new(Key::ArrowDown)),
        UiInput::KeyDown(KeyEvent::new(Key::Enter)),
        UiInput::KeyDown(KeyEvent::new(Key::Character('q'))),
    ]
    .into_iter()
    .collect();
    doc.dispatch(&mut batch);

    let widget = doc.get(select).unwrap();
    assert_eq!(widget.selected(), Some(&2));
    assert!(!widget.is_open());
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_document_from_config() {
    let doc = Document::from_config(&Config::default().with_locale("fr-FR")).unwrap();
    assert_eq!(doc.locale().tag(), "fr-FR");
    assert!(Document::from_config(&Config::default().with_locale("??")).is_err());
}
