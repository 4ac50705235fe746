//! Formwork UI - accessible form widgets over a headless document
//!
//! This crate provides:
//! - `Select`, `MultiSelect`, `DatePicker` and `Checkbox` widgets
//! - A shared dropdown state machine with keyboard navigation
//! - A [`Document`] host routing pointer and key input, focus and
//!   document-level listeners
//! - Render snapshots (`view()`) carrying ARIA props and `accesskit` nodes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # use formwork_ui::{Document, Part, Select, SelectOption};
//! let mut doc = Document::new();
//! let country = doc.mount(
//!     Select::new(vec![
//!         SelectOption::new("Spain", "es"),
//!         SelectOption::new("France", "fr"),
//!     ])
//!     .label("Country")
//!     .on_change(|value| println!("picked {value}")),
//! );
//!
//! doc.click_part(country, Part::Trigger);
//! doc.click_part(country, Part::Option(1));
//! assert_eq!(doc.get(country).unwrap().selected(), Some(&"fr"));
//! ```

pub mod accessibility;
pub mod control;
pub mod document;
pub mod error;
pub mod event;
pub mod field;
pub mod focus;
pub mod listeners;
pub mod locale;
pub mod style;
pub mod tree;
pub mod view;
pub mod widget_id;
pub mod widgets;

pub use accessibility::{AccessProps, Popup};
pub use control::ValueMode;
pub use document::{Document, WidgetHandle};
pub use error::{UiError, UiResult};
pub use event::{DocumentEvent, ElementEvent, UiInput};
pub use field::{FieldIds, FieldProps};
pub use focus::{FocusDirection, FocusEvent, FocusManager, FocusPolicy};
pub use listeners::{DocumentListeners, Subscription};
pub use locale::Locale;
pub use style::{CalendarStyle, CheckboxStyle, Color, FieldState, FieldStyle, Length};
pub use tree::{NodeId, Part, UiTree};
pub use view::*;
pub use widget_id::{ElementId, IdProvider, WidgetId};
pub use widgets::{
    Checkbox, CheckboxChangeEvent, Clock, DatePicker, DatePolicy, Dropdown, DropdownAction,
    FixedClock, MultiSelect, OptionValue, Select, SelectOption, SubPanel, SystemClock, Widget,
};
