//! Document-level listener registry.
//!
//! Dropdown widgets observe pointer-down and key-down events anywhere in the
//! document so they can close on outside clicks and drive keyboard
//! navigation while open. Registration is scoped: a widget subscribes on
//! mount and releases on unmount, whatever its open state is at that point.

use crate::tree::{NodeId, UiTree};
use crate::widget_id::WidgetId;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Kind of document-level event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

/// Token returned by [`DocumentListeners::subscribe`].
///
/// Not `Clone`: a subscription is released exactly once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    owner: WidgetId,
}

impl Subscription {
    pub fn owner(&self) -> WidgetId {
        self.owner
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    subscription: u64,
    owner: WidgetId,
    kind: ListenerKind,
}

/// Registry of document-level listeners, in registration order.
#[derive(Debug, Default)]
pub struct DocumentListeners {
    listeners: Vec<Listener>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pointer-down and a key-down listener for `owner`.
    pub fn subscribe(&mut self, owner: WidgetId) -> Subscription {
        let id = NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed);
        for kind in [ListenerKind::PointerDown, ListenerKind::KeyDown] {
            self.listeners.push(Listener {
                subscription: id,
                owner,
                kind,
            });
        }
        tracing::trace!(%owner, subscription = id, "document listeners added");
        Subscription { id, owner }
    }

    /// Deregister every listener of `subscription`. Returns the number removed.
    pub fn release(&mut self, subscription: &Subscription) -> usize {
        let before = self.listeners.len();
        self.listeners
            .retain(|listener| listener.subscription != subscription.id);
        let removed = before - self.listeners.len();
        if removed == 0 {
            tracing::warn!(
                owner = %subscription.owner,
                subscription = subscription.id,
                "document listeners already released"
            );
        } else {
            tracing::trace!(owner = %subscription.owner, removed, "document listeners removed");
        }
        removed
    }

    /// Owners listening for `kind`, in registration order.
    pub fn subscribers(&self, kind: ListenerKind) -> Vec<WidgetId> {
        self.listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| listener.owner)
            .collect()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn count_for(&self, owner: WidgetId) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.owner == owner)
            .count()
    }
}

/// Outside-click predicate.
///
/// A pointer-down without a target (the bare document) or on a node outside
/// `root`'s subtree counts as outside.
pub fn is_outside(tree: &UiTree, target: Option<NodeId>, root: NodeId) -> bool {
    match target {
        Some(node) => !tree.is_descendant_or_self(node, root),
        None => true,
    }
}
