//! Value ownership between a widget and its owner.

/// Who owns a widget's value.
///
/// Resolved once at construction. In `Controlled` mode the owner's prop is
/// the only source of truth: interaction is reported through the callback
/// and the visible value moves only when the owner feeds a new value back.
/// In `Uncontrolled` mode the widget seeds from its default and applies
/// every committed value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueMode<T> {
    Controlled(T),
    Uncontrolled(T),
}

impl<T> ValueMode<T> {
    /// `Controlled(v)` when the owner supplies `controlled`, otherwise
    /// `Uncontrolled(default)`.
    pub fn new(controlled: Option<T>, default: T) -> Self {
        match controlled {
            Some(value) => ValueMode::Controlled(value),
            None => ValueMode::Uncontrolled(default),
        }
    }

    pub fn get(&self) -> &T {
        match self {
            ValueMode::Controlled(v) | ValueMode::Uncontrolled(v) => v,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ValueMode::Controlled(_))
    }

    /// Apply a value produced by interaction. Returns true if it was applied,
    /// which only happens in uncontrolled mode.
    pub fn commit(&mut self, next: T) -> bool {
        match self {
            ValueMode::Controlled(_) => false,
            ValueMode::Uncontrolled(v) => {
                *v = next;
                true
            }
        }
    }

    /// Absorb a new value from the owner. Always overrides the current
    /// value and never changes the mode.
    pub fn set(&mut self, value: T) {
        match self {
            ValueMode::Controlled(v) | ValueMode::Uncontrolled(v) => *v = value,
        }
    }
}

impl<T: Default> Default for ValueMode<T> {
    fn default() -> Self {
        ValueMode::Uncontrolled(T::default())
    }
}
