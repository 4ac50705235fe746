//! Scripted tour of every widget.
//!
//! Mounts a select, a multi-select, a date picker and a checkbox into one
//! document, feeds them a batch of input the way a host would, and prints
//! the resulting trigger texts and ARIA attributes.
//!
//! Run with: cargo run -p formwork --example playground
//! Set `RUST_LOG=formwork_ui=trace` to watch the event routing.

use formwork::prelude::*;
use formwork::ui::AccessProps;
use time::macros::date;

fn print_access(name: &str, access: &AccessProps) {
    let attrs: Vec<String> = access
        .aria_attributes()
        .into_iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect();
    println!("  {name}: {}", attrs.join(" "));
}

fn main() -> UiResult<()> {
    let config = Config::default()
        .with_locale("es-ES")
        .with_log_filter("info,formwork_ui=debug");
    let mut doc = formwork::init(&config)?;

    let country = doc.mount(
        Select::new(vec![
            SelectOption::new("España", "es"),
            SelectOption::new("Francia", "fr"),
            SelectOption::new("Portugal", "pt"),
        ])
        .label("País")
        .required(true)
        .on_change(|value| println!("country -> {value}")),
    );

    let toppings = doc.mount(
        MultiSelect::new(vec![
            SelectOption::new("Queso", "cheese"),
            SelectOption::new("Champiñones", "mushroom"),
            SelectOption::new("Aceitunas", "olive"),
        ])
        .label("Ingredientes")
        .max_selections(2)
        .helper_text("Máximo dos")
        .on_change(|values| println!("toppings -> {values:?}")),
    );

    let delivery = doc.mount(
        DatePicker::new()
            .label("Entrega")
            .clock(FixedClock(date!(2024 - 05 - 15)))
            .min_date(date!(2024 - 05 - 16))
            .max_date(date!(2024 - 06 - 30))
            .on_change(|day| println!("delivery -> {day}")),
    );

    let terms = doc.mount(
        Checkbox::new()
            .label("Acepto las condiciones")
            .name("terms")
            .error("Obligatorio")
            .on_change(|event| println!("terms -> {}", event.checked)),
    );

    // Keyboard: tab to the select, open it, move down, commit.
    let mut batch: EventBatch<UiInput> = [
        UiInput::KeyDown(KeyEvent::new(Key::Tab)),
        UiInput::KeyDown(KeyEvent::new(Key::Enter)),
        UiInput::KeyDown(KeyEvent::new(Key::ArrowDown)),
        UiInput::KeyDown(KeyEvent::new(Key::Enter)),
    ]
    .into_iter()
    .collect();
    doc.dispatch(&mut batch);

    // Pointer: pick two toppings, try a third past the cap.
    doc.click_part(toppings, Part::Trigger);
    for index in [0, 2, 1] {
        doc.click_part(toppings, Part::Option(index));
    }
    doc.click_outside();

    // Pointer: a disabled day, then a valid one.
    doc.click_part(delivery, Part::Trigger);
    doc.click_part(delivery, Part::Day(16));
    doc.click_part(delivery, Part::Day(17));

    doc.click_part(terms, Part::Label);

    println!();
    println!("País = {}", doc.get(country)?.display_text());
    println!("Ingredientes = {}", doc.get(toppings)?.display_text());
    println!("Entrega = {}", doc.get(delivery)?.display_text());
    println!("Condiciones = {}", doc.get(terms)?.is_checked());

    println!();
    println!("accessibility:");
    print_access("select", &doc.get(country)?.view().trigger.access);
    print_access("multiselect", &doc.get(toppings)?.view().trigger.access);
    print_access("datepicker", &doc.get(delivery)?.view().trigger.access);
    print_access("checkbox", &doc.get(terms)?.view().access);

    doc.unmount(country)?;
    doc.unmount(toppings)?;
    doc.unmount(delivery)?;
    doc.unmount(terms)?;
    println!();
    println!("listeners after teardown: {}", doc.listener_count());

    Ok(())
}
