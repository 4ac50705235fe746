//! Keyboard focus for mounted widgets.
//!
//! Widgets are kept in mount order, which doubles as tab order. Disabled
//! widgets stay registered as [`FocusPolicy::NotFocusable`] so they keep
//! their slot and become reachable again once re-enabled.

use crate::widget_id::WidgetId;

/// Focus navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Move focus forward (Tab)
    Next,
    /// Move focus backward (Shift+Tab)
    Previous,
}

/// Focus event indicating a change in focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Gained(WidgetId),
    Lost(WidgetId),
}

/// Focus policy determining whether a widget can receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPolicy {
    /// Reachable by Tab/Shift+Tab and pointer
    Focusable,
    /// Never focused; rendered with `tabIndex = -1`
    #[default]
    NotFocusable,
}

impl FocusPolicy {
    /// DOM `tabIndex` for an element with this policy.
    pub fn tab_index(&self) -> i32 {
        match self {
            FocusPolicy::Focusable => 0,
            FocusPolicy::NotFocusable => -1,
        }
    }
}

#[derive(Debug, Clone)]
struct FocusEntry {
    widget_id: WidgetId,
    policy: FocusPolicy,
}

/// Manages keyboard focus across a document's widgets.
#[derive(Debug, Default)]
pub struct FocusManager {
    entries: Vec<FocusEntry>,
    focused: Option<usize>,
    events: Vec<FocusEvent>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget, or update its policy if already registered.
    ///
    /// A focused widget that becomes `NotFocusable` loses focus.
    pub fn register(&mut self, widget_id: WidgetId, policy: FocusPolicy) {
        if let Some(index) = self.position(widget_id) {
            self.entries[index].policy = policy;
            if policy == FocusPolicy::NotFocusable && self.focused == Some(index) {
                self.clear_focus();
            }
        } else {
            self.entries.push(FocusEntry { widget_id, policy });
        }
    }

    pub fn unregister(&mut self, widget_id: WidgetId) {
        let Some(index) = self.position(widget_id) else {
            return;
        };
        self.entries.remove(index);
        match self.focused {
            Some(focused) if focused == index => {
                self.focused = None;
                self.events.push(FocusEvent::Lost(widget_id));
            }
            Some(focused) if focused > index => self.focused = Some(focused - 1),
            _ => {}
        }
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
            .and_then(|idx| self.entries.get(idx))
            .map(|e| e.widget_id)
    }

    pub fn is_focused(&self, widget_id: WidgetId) -> bool {
        self.focused() == Some(widget_id)
    }

    /// Focus `widget_id`. Returns false if it is unknown or not focusable.
    pub fn set_focus(&mut self, widget_id: WidgetId) -> bool {
        let Some(index) = self.position(widget_id) else {
            return false;
        };
        if !self.can_focus(index) {
            return false;
        }
        if self.focused == Some(index) {
            return true;
        }
        if let Some(old) = self.focused() {
            self.events.push(FocusEvent::Lost(old));
        }
        self.focused = Some(index);
        self.events.push(FocusEvent::Gained(widget_id));
        tracing::trace!(%widget_id, "focus gained");
        true
    }

    pub fn clear_focus(&mut self) {
        if let Some(old) = self.focused() {
            self.focused = None;
            self.events.push(FocusEvent::Lost(old));
        }
    }

    /// Move focus in `direction`, wrapping around. Returns the new focus.
    pub fn navigate(&mut self, direction: FocusDirection) -> Option<WidgetId> {
        let count = self.entries.len();
        if count == 0 {
            return None;
        }
        let next = match (direction, self.focused) {
            (FocusDirection::Next, None) => (0..count).find(|&i| self.can_focus(i)),
            (FocusDirection::Previous, None) => (0..count).rev().find(|&i| self.can_focus(i)),
            (FocusDirection::Next, Some(current)) => (1..=count)
                .map(|step| (current + step) % count)
                .find(|&i| self.can_focus(i)),
            (FocusDirection::Previous, Some(current)) => (1..=count)
                .map(|step| (current + count - step) % count)
                .find(|&i| self.can_focus(i)),
        };
        if let Some(index) = next {
            let widget_id = self.entries[index].widget_id;
            self.set_focus(widget_id);
        }
        self.focused()
    }

    pub fn focus_next(&mut self) -> Option<WidgetId> {
        self.navigate(FocusDirection::Next)
    }

    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        self.navigate(FocusDirection::Previous)
    }

    /// Pop all pending focus events.
    pub fn pop_events(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn widget_count(&self) -> usize {
        self.entries.len()
    }

    pub fn focusable_count(&self) -> usize {
        (0..self.entries.len()).filter(|&i| self.can_focus(i)).count()
    }

    fn position(&self, widget_id: WidgetId) -> Option<usize> {
        self.entries.iter().position(|e| e.widget_id == widget_id)
    }

    fn can_focus(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(|e| e.policy == FocusPolicy::Focusable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(n: u64) -> FocusManager {
        let mut manager = FocusManager::new();
        for i in 1..=n {
            manager.register(WidgetId::from_raw(i), FocusPolicy::Focusable);
        }
        manager
    }

    #[test]
    fn test_focus_next_wraps() {
        let mut manager = manager_with(3);
        assert_eq!(manager.focus_next(), Some(WidgetId::from_raw(1)));
        assert_eq!(manager.focus_next(), Some(WidgetId::from_raw(2)));
        assert_eq!(manager.focus_next(), Some(WidgetId::from_raw(3)));
        assert_eq!(manager.focus_next(), Some(WidgetId::from_raw(1)));
    }

    #[test]
    fn test_focus_previous_wraps() {
        let mut manager = manager_with(3);
        assert_eq!(manager.focus_previous(), Some(WidgetId::from_raw(3)));
        manager.set_focus(WidgetId::from_raw(1));
        assert_eq!(manager.focus_previous(), Some(WidgetId::from_raw(3)));
    }

    #[test]
    fn test_skips_not_focusable() {
        let mut manager = manager_with(3);
        manager.register(WidgetId::from_raw(2), FocusPolicy::NotFocusable);
        manager.set_focus(WidgetId::from_raw(1));
        assert_eq!(manager.focus_next(), Some(WidgetId::from_raw(3)));
        assert!(!manager.set_focus(WidgetId::from_raw(2)));
        assert_eq!(manager.focusable_count(), 2);
    }

    #[test]
    fn test_disabling_focused_widget_clears_focus() {
        let mut manager = manager_with(2);
        manager.set_focus(WidgetId::from_raw(2));
        manager.register(WidgetId::from_raw(2), FocusPolicy::NotFocusable);
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn test_unregister_adjusts_focus() {
        let mut manager = manager_with(3);
        manager.set_focus(WidgetId::from_raw(3));
        manager.unregister(WidgetId::from_raw(1));
        assert_eq!(manager.focused(), Some(WidgetId::from_raw(3)));

        manager.unregister(WidgetId::from_raw(3));
        assert_eq!(manager.focused(), None);
        assert_eq!(manager.widget_count(), 1);
    }

    #[test]
    fn test_focus_events() {
        let mut manager = manager_with(2);
        manager.set_focus(WidgetId::from_raw(1));
        manager.set_focus(WidgetId::from_raw(2));
        let events = manager.pop_events();
        assert_eq!(
            events,
            vec![
                FocusEvent::Gained(WidgetId::from_raw(1)),
                FocusEvent::Lost(WidgetId::from_raw(1)),
                FocusEvent::Gained(WidgetId::from_raw(2)),
            ]
        );
        assert!(manager.pop_events().is_empty());
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(FocusPolicy::Focusable.tab_index(), 0);
        assert_eq!(FocusPolicy::NotFocusable.tab_index(), -1);
    }
}
