//! Open/close and hover state shared by the list dropdowns.
//!
//! The hover cursor is `None` whenever the panel is closed. While open it
//! stays inside `0..option_count`, or `None` for an empty list.

use formwork_input::{HandleStatus, Key, KeyEvent};

/// What a document-level key did to an open dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownAction {
    None,
    /// Hover cursor moved (or stayed clamped at an end).
    Moved,
    /// Commit the option at this index.
    Commit(usize),
    Closed,
}

impl DropdownAction {
    pub fn status(&self) -> HandleStatus {
        match self {
            DropdownAction::None => HandleStatus::ignored(),
            DropdownAction::Closed => HandleStatus::handled(),
            DropdownAction::Moved | DropdownAction::Commit(_) => HandleStatus::consumed(),
        }
    }
}

/// Dropdown interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
    hovered: Option<usize>,
    option_count: usize,
}

impl Dropdown {
    pub fn new(option_count: usize) -> Self {
        Self {
            open: false,
            hovered: None,
            option_count,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Hover cursor as an index, `-1` meaning none.
    pub fn hovered_index(&self) -> i32 {
        self.hovered.map_or(-1, |i| i as i32)
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// Update the number of options, clamping the hover cursor.
    pub fn set_option_count(&mut self, count: usize) {
        self.option_count = count;
        self.hovered = match self.hovered {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    /// Open the panel and hover the first option. Returns false if already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.hovered = (self.option_count > 0).then_some(0);
        tracing::debug!(options = self.option_count, "dropdown opened");
        true
    }

    /// Close the panel and clear hover. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        self.hovered = None;
        if !self.open {
            return false;
        }
        self.open = false;
        tracing::debug!("dropdown closed");
        true
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Pointer entered option `index`.
    pub fn hover(&mut self, index: usize) {
        if self.open && index < self.option_count {
            self.hovered = Some(index);
            tracing::trace!(index, "option hovered");
        }
    }

    /// Pointer left the hovered option.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Key pressed on the focused trigger. Opens a closed panel on an
    /// activation key; an open panel leaves keys to the document listener.
    pub fn handle_trigger_key(&mut self, event: &KeyEvent) -> HandleStatus {
        if !self.open && event.key.is_activation() {
            self.open();
            HandleStatus::consumed()
        } else {
            HandleStatus::ignored()
        }
    }

    /// Key pressed anywhere in the document.
    pub fn handle_document_key(&mut self, event: &KeyEvent) -> DropdownAction {
        if !self.open {
            return DropdownAction::None;
        }
        match event.key {
            Key::ArrowDown => {
                let last = self.option_count.checked_sub(1);
                self.hovered = match (self.hovered, last) {
                    (_, None) => None,
                    (None, Some(_)) => Some(0),
                    (Some(i), Some(last)) => Some((i + 1).min(last)),
                };
                tracing::trace!(hovered = self.hovered_index(), "hover moved down");
                DropdownAction::Moved
            }
            Key::ArrowUp => {
                self.hovered = if self.option_count == 0 {
                    None
                } else {
                    Some(self.hovered.map_or(0, |i| i.saturating_sub(1)))
                };
                tracing::trace!(hovered = self.hovered_index(), "hover moved up");
                DropdownAction::Moved
            }
            Key::Enter => match self.hovered {
                Some(i) if i < self.option_count => DropdownAction::Commit(i),
                _ => DropdownAction::None,
            },
            Key::Escape => {
                self.close();
                DropdownAction::Closed
            }
            _ => DropdownAction::None,
        }
    }

    /// Pointer went down somewhere. Closes on outside presses.
    pub fn handle_pointer_down(&mut self, outside: bool) -> bool {
        outside && self.close()
    }
}
