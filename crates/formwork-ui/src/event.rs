//! Events flowing from the host into a [`Document`](crate::Document).

use crate::tree::NodeId;
use formwork_input::KeyEvent;

/// Raw input as delivered by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiInput {
    /// Pointer pressed. `None` targets the bare document.
    PointerDown { target: Option<NodeId> },
    /// Pointer released on the node it was pressed on.
    Click { target: NodeId },
    PointerEnter { target: NodeId },
    PointerLeave { target: NodeId },
    KeyDown(KeyEvent),
}

/// Event delivered to the widget that owns the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEvent {
    Click,
    PointerEnter,
    PointerLeave,
    KeyDown(KeyEvent),
}

/// Event delivered to every document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// `outside` is true when the pointer went down outside the listener's
    /// root subtree.
    PointerDown { outside: bool },
    KeyDown(KeyEvent),
}
