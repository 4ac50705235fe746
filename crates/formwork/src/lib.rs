//! Formwork - accessible form widgets
//!
//! Formwork provides the interactive form controls most forms need beyond
//! plain text inputs:
//!
//! - **Select**: single choice from a dropdown listbox
//! - **MultiSelect**: checkbox rows with an optional selection cap
//! - **DatePicker**: calendar dropdown with min/max bounds and disabled dates
//! - **Checkbox**: controlled or uncontrolled boolean toggle
//!
//! Widgets live in a headless [`Document`](formwork_ui::Document). A host
//! translates its native input into [`UiInput`](formwork_ui::UiInput) events
//! and paints the `view()` snapshots the widgets expose.
//!
//! # Quick Start
//!
//! ```no_run
//! use formwork::prelude::*;
//!
//! fn main() -> UiResult<()> {
//!     let mut doc = formwork::init(&Config::default().with_locale("en-US"))?;
//!     let terms = doc.mount(Checkbox::new().label("I accept the terms"));
//!     doc.click_part(terms, Part::Trigger);
//!     assert!(doc.get(terms)?.is_checked());
//!     Ok(())
//! }
//! ```

// Re-export sub-crates
pub use formwork_core as core;
pub use formwork_input as input;
pub use formwork_ui as ui;

pub use formwork_core::{BenchmarkMode, Config};
pub use formwork_ui::{Document, UiError, UiResult};

/// Install logging and profiling according to `config` and create an empty
/// document using its locale.
pub fn init(config: &Config) -> UiResult<Document> {
    formwork_core::logging::init_with_filter(&config.log_filter);
    formwork_core::profiling::init_profiling(config.benchmark);
    let document = Document::from_config(config)?;
    tracing::info!(locale = %document.locale(), "formwork initialized");
    Ok(document)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use formwork_core::{BenchmarkMode, Config};
    pub use formwork_input::{EventBatch, HandleStatus, Key, KeyEvent, Modifiers};
    pub use formwork_ui::{
        Checkbox, CheckboxChangeEvent, Clock, Color, DatePicker, DatePolicy, Document, FieldStyle,
        FixedClock, Length, Locale, MultiSelect, NodeId, Part, Select, SelectOption, SubPanel,
        SystemClock, UiError, UiInput, UiResult, WidgetHandle,
    };
}
