//! Widget host.
//!
//! A [`Document`] owns mounted widgets, the node tree they render into, the
//! document-level listener registry and the focus manager. Hosts feed it
//! input through the event entry points; every state change caused by one
//! event is applied before the entry point returns.

use crate::error::{UiError, UiResult};
use crate::event::{DocumentEvent, ElementEvent, UiInput};
use crate::focus::{FocusDirection, FocusEvent, FocusManager, FocusPolicy};
use crate::listeners::{DocumentListeners, ListenerKind, Subscription, is_outside};
use crate::locale::Locale;
use crate::tree::{NodeId, Part, UiTree};
use crate::widget_id::WidgetId;
use crate::widgets::{BuildContext, Widget};
use formwork_core::config::Config;
use formwork_core::profiling::{self, profile_function};
use formwork_input::{EventBatch, HandleStatus, Key, KeyEvent};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Typed handle to a mounted widget.
///
/// Holds only the widget id; `PhantomData<*const W>` keeps the handle `Copy`
/// whatever `W` is.
pub struct WidgetHandle<W: ?Sized> {
    id: WidgetId,
    _phantom: PhantomData<*const W>,
}

impl<W: ?Sized> WidgetHandle<W> {
    fn new(id: WidgetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }
}

impl<W: ?Sized> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: ?Sized> Copy for WidgetHandle<W> {}

impl<W: ?Sized> PartialEq for WidgetHandle<W> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<W: ?Sized> Eq for WidgetHandle<W> {}

impl<W: ?Sized> fmt::Debug for WidgetHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetHandle").field(&self.id).finish()
    }
}

struct WidgetEntry {
    widget: Box<dyn Widget>,
    root: NodeId,
    subscription: Option<Subscription>,
}

/// Host of mounted widgets.
pub struct Document {
    tree: UiTree,
    widgets: IndexMap<WidgetId, WidgetEntry>,
    listeners: DocumentListeners,
    focus: FocusManager,
    locale: Locale,
}

impl Document {
    /// Empty document using the default locale.
    pub fn new() -> Self {
        Self::with_locale(Locale::default())
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            tree: UiTree::new(),
            widgets: IndexMap::new(),
            listeners: DocumentListeners::new(),
            focus: FocusManager::new(),
            locale,
        }
    }

    /// Document whose locale comes from `config`, or from the operating
    /// system when the config leaves it unset.
    pub fn from_config(config: &Config) -> UiResult<Self> {
        let locale = match &config.locale {
            Some(tag) => Locale::parse(tag)?,
            None => Locale::system(),
        };
        Ok(Self::with_locale(locale))
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Change the document locale. Every widget is rebuilt so those without
    /// a locale of their own pick it up.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        let ids: Vec<WidgetId> = self.widgets.keys().copied().collect();
        for id in ids {
            self.rebuild(id);
        }
    }

    /// Mount `widget`, render its parts and register its listeners.
    pub fn mount<W: Widget>(&mut self, widget: W) -> WidgetHandle<W> {
        let id = WidgetId::next();
        let root = self.tree.add_root(id);
        let mut widget: Box<dyn Widget> = Box::new(widget);
        widget.build(&mut BuildContext::new(&mut self.tree, root, &self.locale));
        self.focus.register(id, widget.focus_policy());
        let subscription = widget
            .listens_to_document()
            .then(|| self.listeners.subscribe(id));
        tracing::debug!(%id, widget = widget.type_name(), "widget mounted");
        self.widgets.insert(
            id,
            WidgetEntry {
                widget,
                root,
                subscription,
            },
        );
        WidgetHandle::new(id)
    }

    /// Tear down a widget and hand it back.
    pub fn unmount<W: Widget>(&mut self, handle: WidgetHandle<W>) -> UiResult<W> {
        let id = handle.id;
        // Check the type before removing anything.
        self.get(handle)?;
        let entry = self
            .widgets
            .shift_remove(&id)
            .ok_or(UiError::WidgetNotMounted(id))?;

        let removed = self.tree.remove_subtree(entry.root);
        self.focus.unregister(id);
        if let Some(subscription) = &entry.subscription {
            self.listeners.release(subscription);
        }
        tracing::debug!(%id, nodes = removed, "widget unmounted");

        let widget: Box<dyn Any> = entry.widget;
        widget
            .downcast::<W>()
            .map(|widget| *widget)
            .map_err(|_| type_mismatch::<W>(id))
    }

    pub fn contains<W: ?Sized>(&self, handle: WidgetHandle<W>) -> bool {
        self.widgets.contains_key(&handle.id)
    }

    pub fn get<W: Widget>(&self, handle: WidgetHandle<W>) -> UiResult<&W> {
        let entry = self
            .widgets
            .get(&handle.id)
            .ok_or(UiError::WidgetNotMounted(handle.id))?;
        entry
            .widget
            .as_any()
            .downcast_ref::<W>()
            .ok_or_else(|| type_mismatch::<W>(handle.id))
    }

    /// Direct mutable access. Structural changes made through this are not
    /// re-rendered until the next event; use [`Document::update`] instead.
    pub fn get_mut<W: Widget>(&mut self, handle: WidgetHandle<W>) -> UiResult<&mut W> {
        let entry = self
            .widgets
            .get_mut(&handle.id)
            .ok_or(UiError::WidgetNotMounted(handle.id))?;
        entry
            .widget
            .as_any_mut()
            .downcast_mut::<W>()
            .ok_or_else(|| type_mismatch::<W>(handle.id))
    }

    /// Change a widget's props, then re-render it if its structure changed.
    pub fn update<W: Widget, R>(
        &mut self,
        handle: WidgetHandle<W>,
        f: impl FnOnce(&mut W) -> R,
    ) -> UiResult<R> {
        let result = f(self.get_mut(handle)?);
        self.refresh(handle.id);
        Ok(result)
    }

    /// Node rendered for `part` of a widget.
    pub fn part<W: ?Sized>(&self, handle: WidgetHandle<W>, part: Part) -> Option<NodeId> {
        self.tree.find_part(handle.id, part)
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Focus a widget programmatically. False if it is not focusable.
    pub fn focus<W: ?Sized>(&mut self, handle: WidgetHandle<W>) -> bool {
        self.focus.set_focus(handle.id)
    }

    pub fn focus_policy<W: ?Sized>(&self, handle: WidgetHandle<W>) -> Option<FocusPolicy> {
        self.widgets
            .get(&handle.id)
            .map(|entry| entry.widget.focus_policy())
    }

    pub fn focus_manager(&self) -> &FocusManager {
        &self.focus
    }

    /// Take the focus changes recorded since the last call, oldest first.
    ///
    /// Hosts that move native focus should drain this once per frame.
    pub fn pop_focus_events(&mut self) -> Vec<FocusEvent> {
        self.focus.pop_events()
    }

    /// Number of registered document-level listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Pointer pressed on `target`, or on the bare document for `None`.
    pub fn pointer_down(&mut self, target: Option<NodeId>) -> HandleStatus {
        profile_function!();
        let owner = target.and_then(|node| self.tree.owner(node));
        match owner {
            Some(owner) if self.focus.set_focus(owner) => {}
            _ => self.focus.clear_focus(),
        }

        let mut status = HandleStatus::ignored();
        for id in self.listeners.subscribers(ListenerKind::PointerDown) {
            let Some(entry) = self.widgets.get_mut(&id) else {
                continue;
            };
            let outside = is_outside(&self.tree, target, entry.root);
            tracing::trace!(%id, outside, "pointer-down offered to document listener");
            status |= entry
                .widget
                .handle_document_event(&DocumentEvent::PointerDown { outside });
        }
        self.refresh_all();
        status
    }

    /// Pointer pressed and released on `target`.
    pub fn click(&mut self, target: NodeId) -> HandleStatus {
        profile_function!();
        let status = self.pointer_down(Some(target));
        status | self.element_event(target, ElementEvent::Click)
    }

    /// Click the node rendered for `part` of a widget. Ignored when the
    /// widget has no such part.
    pub fn click_part<W: ?Sized>(&mut self, handle: WidgetHandle<W>, part: Part) -> HandleStatus {
        match self.part(handle, part) {
            Some(node) => self.click(node),
            None => {
                tracing::warn!(id = %handle.id, ?part, "click on a part that is not rendered");
                HandleStatus::ignored()
            }
        }
    }

    /// Pointer pressed on the bare document.
    pub fn click_outside(&mut self) -> HandleStatus {
        self.pointer_down(None)
    }

    pub fn pointer_enter(&mut self, target: NodeId) -> HandleStatus {
        profile_function!();
        self.element_event(target, ElementEvent::PointerEnter)
    }

    pub fn pointer_leave(&mut self, target: NodeId) -> HandleStatus {
        profile_function!();
        self.element_event(target, ElementEvent::PointerLeave)
    }

    /// Key pressed.
    ///
    /// The focused widget's trigger sees the key first. Unless it consumes
    /// it, every document-level listener sees it next. An unconsumed `Tab`
    /// moves focus.
    pub fn key_down(&mut self, event: KeyEvent) -> HandleStatus {
        profile_function!();
        let mut status = HandleStatus::ignored();

        if let Some(focused) = self.focus.focused()
            && let Some(entry) = self.widgets.get_mut(&focused)
            && self.tree.find_part(focused, Part::Trigger).is_some()
        {
            status |= entry
                .widget
                .handle_event(Part::Trigger, &ElementEvent::KeyDown(event));
        }

        if !status.is_consumed() {
            for id in self.listeners.subscribers(ListenerKind::KeyDown) {
                if let Some(entry) = self.widgets.get_mut(&id) {
                    status |= entry
                        .widget
                        .handle_document_event(&DocumentEvent::KeyDown(event));
                }
            }
        }

        if !status.is_consumed() && event.key == Key::Tab {
            let direction = if event.modifiers.shift {
                FocusDirection::Previous
            } else {
                FocusDirection::Next
            };
            let target = self.focus.navigate(direction);
            tracing::trace!(?target, ?direction, "focus moved");
            status |= HandleStatus::consumed();
        }

        self.refresh_all();
        status
    }

    /// Feed a batch of host input. Consumed events leave the batch.
    pub fn dispatch(&mut self, batch: &mut EventBatch<UiInput>) {
        profile_function!();
        profiling::new_frame();
        batch.dispatch(|input| self.handle_input(input));
    }

    fn handle_input(&mut self, input: &UiInput) -> HandleStatus {
        match *input {
            UiInput::PointerDown { target } => self.pointer_down(target),
            UiInput::Click { target } => self.click(target),
            UiInput::PointerEnter { target } => self.pointer_enter(target),
            UiInput::PointerLeave { target } => self.pointer_leave(target),
            UiInput::KeyDown(event) => self.key_down(event),
        }
    }

    fn element_event(&mut self, target: NodeId, event: ElementEvent) -> HandleStatus {
        let (Some(owner), Some(part)) = (self.tree.owner(target), self.tree.part(target)) else {
            tracing::warn!(?target, "event on a node that is not in the tree");
            return HandleStatus::ignored();
        };
        let status = match self.widgets.get_mut(&owner) {
            Some(entry) => entry.widget.handle_event(part, &event),
            None => HandleStatus::ignored(),
        };
        self.refresh_all();
        status
    }

    fn refresh_all(&mut self) {
        let ids: Vec<WidgetId> = self.widgets.keys().copied().collect();
        for id in ids {
            self.refresh(id);
        }
    }

    /// Re-render a widget whose structure changed and sync its focus policy.
    fn refresh(&mut self, id: WidgetId) {
        let needs_rebuild = self
            .widgets
            .get(&id)
            .is_some_and(|entry| entry.widget.needs_rebuild());
        if needs_rebuild {
            self.rebuild(id);
        }
        if let Some(entry) = self.widgets.get(&id) {
            self.focus.register(id, entry.widget.focus_policy());
        }
    }

    fn rebuild(&mut self, id: WidgetId) {
        let Some(entry) = self.widgets.get_mut(&id) else {
            return;
        };
        let removed = self.tree.clear_children(entry.root);
        entry
            .widget
            .build(&mut BuildContext::new(&mut self.tree, entry.root, &self.locale));
        tracing::trace!(%id, removed, "widget rebuilt");
        self.focus.register(id, entry.widget.focus_policy());
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn type_mismatch<W: 'static>(id: WidgetId) -> UiError {
    UiError::WidgetTypeMismatch {
        id,
        expected: std::any::type_name::<W>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Checkbox, Select, SelectOption};

    fn options() -> Vec<SelectOption<&'static str>> {
        vec![SelectOption::new("A", "a"), SelectOption::new("B", "b")]
    }

    #[test]
    fn test_mount_builds_parts_and_listeners() {
        let mut doc = Document::new();
        let select = doc.mount(Select::new(options()).label("Letter"));
        assert!(doc.part(select, Part::Trigger).is_some());
        assert!(doc.part(select, Part::Label).is_some());
        assert!(doc.part(select, Part::Option(1)).is_some());
        assert_eq!(doc.listener_count(), 2);

        let checkbox = doc.mount(Checkbox::new());
        assert_eq!(doc.listener_count(), 2);
        assert_eq!(doc.widget_count(), 2);
        assert!(doc.contains(checkbox));
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut doc = Document::new();
        let select = doc.mount(Select::new(options()));
        doc.click_part(select, Part::Trigger);
        assert!(doc.get(select).unwrap().is_open());

        let widget = doc.unmount(select).unwrap();
        assert!(widget.is_open());
        assert_eq!(doc.listener_count(), 0);
        assert!(doc.tree().is_empty());
        assert_eq!(doc.focused(), None);
        assert!(matches!(doc.get(select), Err(UiError::WidgetNotMounted(_))));
    }

    #[test]
    fn test_wrong_handle_type() {
        let mut doc = Document::new();
        let checkbox = doc.mount(Checkbox::new());
        let forged: WidgetHandle<Select<&'static str>> = WidgetHandle::new(checkbox.id());
        assert!(matches!(
            doc.get(forged),
            Err(UiError::WidgetTypeMismatch { .. })
        ));
        assert!(doc.unmount(forged).is_err());
        assert!(doc.contains(checkbox));
    }

    #[test]
    fn test_outside_click_closes() {
        let mut doc = Document::new();
        let first = doc.mount(Select::new(options()));
        let second = doc.mount(Select::new(options()));
        doc.click_part(first, Part::Trigger);

        doc.click_part(first, Part::Listbox);
        assert!(doc.get(first).unwrap().is_open());

        doc.click_part(second, Part::Trigger);
        assert!(!doc.get(first).unwrap().is_open());
        assert!(doc.get(second).unwrap().is_open());

        doc.click_outside();
        assert!(!doc.get(second).unwrap().is_open());
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_keys_reach_focused_trigger_then_document() {
        let mut doc = Document::new();
        let select = doc.mount(Select::new(options()));
        assert!(doc.focus(select));

        doc.key_down(KeyEvent::new(Key::Enter));
        assert!(doc.get(select).unwrap().is_open());
        doc.key_down(KeyEvent::new(Key::ArrowDown));
        assert_eq!(doc.get(select).unwrap().hovered_index(), 1);
        doc.key_down(KeyEvent::new(Key::Enter));
        assert_eq!(doc.get(select).unwrap().selected(), Some(&"b"));
        assert!(!doc.get(select).unwrap().is_open());
    }

    #[test]
    fn test_update_rebuilds_options() {
        let mut doc = Document::new();
        let select = doc.mount(Select::new(options()));
        assert!(doc.part(select, Part::Option(2)).is_none());
        doc.update(select, |s| {
            s.set_options(vec![
                SelectOption::new("A", "a"),
                SelectOption::new("B", "b"),
                SelectOption::new("C", "c"),
            ])
        })
        .unwrap();
        assert!(doc.part(select, Part::Option(2)).is_some());
    }

    #[test]
    fn test_disabling_drops_focus() {
        let mut doc = Document::new();
        let checkbox = doc.mount(Checkbox::new());
        assert!(doc.focus(checkbox));
        doc.update(checkbox, |c| c.set_disabled(true)).unwrap();
        assert_eq!(doc.focused(), None);
        assert_eq!(doc.focus_policy(checkbox), Some(FocusPolicy::NotFocusable));
        assert!(!doc.focus(checkbox));
    }

    #[test]
    fn test_focus_events_drain() {
        let mut doc = Document::new();
        let select = doc.mount(Select::new(vec![SelectOption::new("A", "a")]));
        let checkbox = doc.mount(Checkbox::new());

        doc.click_part(select, Part::Trigger);
        doc.click_part(checkbox, Part::Trigger);
        assert_eq!(
            doc.pop_focus_events(),
            vec![
                FocusEvent::Gained(select.id()),
                FocusEvent::Lost(select.id()),
                FocusEvent::Gained(checkbox.id()),
            ]
        );
        assert!(doc.pop_focus_events().is_empty());

        for _ in 0..100 {
            doc.click_part(select, Part::Trigger);
            doc.click_part(checkbox, Part::Trigger);
        }
        assert_eq!(doc.pop_focus_events().len(), 400);
        assert!(doc.pop_focus_events().is_empty());

        // Re-focusing the focused widget records nothing.
        doc.click_part(checkbox, Part::Trigger);
        assert!(doc.pop_focus_events().is_empty());
    }

    #[test]
    fn test_dispatch_batch() {
        let mut doc = Document::new();
        let checkbox = doc.mount(Checkbox::new());
        let trigger = doc.part(checkbox, Part::Trigger).unwrap();
        let mut batch: EventBatch<UiInput> = [
            UiInput::Click { target: trigger },
            UiInput::KeyDown(KeyEvent::new(Key::Space)),
            UiInput::KeyDown(KeyEvent::new(Key::Character('x'))),
        ]
        .into_iter()
        .collect();
        doc.dispatch(&mut batch);
        // Click toggles on, Space toggles off.
        assert!(!doc.get(checkbox).unwrap().is_checked());
        assert_eq!(batch.len(), 1);
    }
}
