//! Form widgets and the trait the document drives them through.

pub mod calendar;
pub mod checkbox;
pub mod date_picker;
pub mod dropdown;
pub mod multi_select;
pub mod select;

pub use calendar::{CalendarDay, Clock, DatePolicy, FixedClock, SystemClock};
pub use checkbox::{Checkbox, CheckboxChangeEvent};
pub use date_picker::{DatePicker, SubPanel};
pub use dropdown::{Dropdown, DropdownAction};
pub use multi_select::MultiSelect;
pub use select::Select;

use crate::event::{DocumentEvent, ElementEvent};
use crate::focus::FocusPolicy;
use crate::locale::Locale;
use crate::tree::{NodeId, Part, UiTree};
use formwork_input::HandleStatus;
use std::any::Any;
use std::fmt;

/// Base trait for all form widgets.
pub trait Widget: Any {
    /// Get widget type as Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get mutable widget type as Any for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Short type name used in errors and logs.
    fn type_name(&self) -> &'static str;

    /// Render the widget's part nodes below `cx.root()`.
    ///
    /// Called on mount and whenever [`Widget::needs_rebuild`] reports true.
    /// Element ids are not touched here: a widget allocates them once, when
    /// it is constructed, and keeps them across rebuilds.
    fn build(&mut self, cx: &mut BuildContext<'_>);

    /// True when the set of rendered parts changed since the last build.
    fn needs_rebuild(&self) -> bool {
        false
    }

    fn focus_policy(&self) -> FocusPolicy;

    /// Whether the widget observes document-level pointer and key events.
    fn listens_to_document(&self) -> bool {
        false
    }

    /// Handle an event targeted at one of the widget's parts.
    fn handle_event(&mut self, part: Part, event: &ElementEvent) -> HandleStatus;

    /// Handle a document-level event.
    fn handle_document_event(&mut self, _event: &DocumentEvent) -> HandleStatus {
        HandleStatus::ignored()
    }
}

/// Access to the document while a widget renders.
pub struct BuildContext<'a> {
    tree: &'a mut UiTree,
    root: NodeId,
    locale: &'a Locale,
}

impl<'a> BuildContext<'a> {
    pub fn new(tree: &'a mut UiTree, root: NodeId, locale: &'a Locale) -> Self {
        Self { tree, root, locale }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a part directly below the widget root.
    pub fn add(&mut self, part: Part) -> NodeId {
        self.add_under(self.root, part).unwrap_or(self.root)
    }

    /// Add a part below `parent`. `None` if `parent` is not in the tree.
    pub fn add_under(&mut self, parent: NodeId, part: Part) -> Option<NodeId> {
        self.tree.add_child(parent, part)
    }

    /// Document locale, for widgets without a locale of their own.
    pub fn locale(&self) -> &Locale {
        self.locale
    }
}

/// Values a select or multi-select can carry.
pub trait OptionValue: Clone + PartialEq + fmt::Debug + fmt::Display + 'static {}

impl<T> OptionValue for T where T: Clone + PartialEq + fmt::Debug + fmt::Display + 'static {}

/// A selectable choice of a [`Select`] or [`MultiSelect`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

impl<V> SelectOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Label of the first option whose value equals `value`.
pub(crate) fn label_of<'a, V: PartialEq>(options: &'a [SelectOption<V>], value: &V) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.value == *value)
        .map(|option| option.label.as_str())
}
