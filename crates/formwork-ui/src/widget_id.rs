//! Identifiers for widget instances and for the elements they render.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique key of a mounted widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Issue a fresh id.
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a widget ID from raw u64 (for tests and generated IDs).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({})", self.0)
    }
}

/// String identifier of a rendered element, used for `label[for]`,
/// `aria-describedby` and `aria-activedescendant` wiring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a child id, e.g. `select-r3` + `option-2` -> `select-r3-option-2`.
    pub fn child(&self, suffix: impl fmt::Display) -> ElementId {
        ElementId(format!("{}-{}", self.0, suffix))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Issues element ids that are unique for the lifetime of the process.
///
/// Widgets allocate their ids once, on first build, and keep them; the same
/// logical element therefore keeps its id across rebuilds.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdProvider;

impl IdProvider {
    pub fn new() -> Self {
        Self
    }

    /// Allocate `"{prefix}-r{n}"`, or `"r{n}"` when `prefix` is empty.
    pub fn allocate(&self, prefix: &str) -> ElementId {
        let n = NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed);
        if prefix.is_empty() {
            ElementId(format!("r{n}"))
        } else {
            ElementId(format!("{prefix}-r{n}"))
        }
    }
}
