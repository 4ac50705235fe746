//! Element tree shared by all widgets of a document.
//!
//! Nodes stand in for DOM elements: they carry no layout, only ownership
//! (which widget rendered them), a [`Part`] tag telling the owner what was
//! hit, and parent/child links used by the outside-click test.

use crate::widget_id::WidgetId;
use formwork_core::alloc::HashMap;
use indexmap::IndexMap;

/// Node identifier in the UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Role of a node inside its owning widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Root,
    Label,
    Trigger,
    Listbox,
    Option(usize),
    Dialog,
    PrevYear,
    PrevMonth,
    MonthToggle,
    YearToggle,
    NextMonth,
    NextYear,
    MonthChoice(usize),
    YearChoice(usize),
    Day(usize),
}

/// A node in the UI tree.
#[derive(Debug, Clone)]
pub struct UiNode {
    pub owner: WidgetId,
    pub part: Part,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// UI tree holding every mounted widget's nodes.
#[derive(Debug, Default)]
pub struct UiTree {
    nodes: IndexMap<NodeId, UiNode>,
    parts: HashMap<(WidgetId, Part), NodeId>,
    next_id: usize,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root node of a widget.
    pub fn add_root(&mut self, owner: WidgetId) -> NodeId {
        self.insert(owner, Part::Root, None)
    }

    /// Add a node below `parent`, owned by the same widget as `parent`.
    ///
    /// Returns `None` when `parent` is not in the tree.
    pub fn add_child(&mut self, parent: NodeId, part: Part) -> Option<NodeId> {
        let owner = self.nodes.get(&parent)?.owner;
        let id = self.insert(owner, part, Some(parent));
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Some(id)
    }

    fn insert(&mut self, owner: WidgetId, part: Part, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            UiNode {
                owner,
                part,
                parent,
                children: Vec::new(),
            },
        );
        self.parts.insert((owner, part), id);
        id
    }

    /// Remove `node` and everything below it. Returns the number of removed nodes.
    pub fn remove_subtree(&mut self, node: NodeId) -> usize {
        let Some(parent) = self.nodes.get(&node).map(|n| n.parent) else {
            return 0;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != node);
        }
        self.remove_recursive(node)
    }

    /// Remove all descendants of `node`, keeping `node` itself.
    pub fn clear_children(&mut self, node: NodeId) -> usize {
        let children = match self.nodes.get_mut(&node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return 0,
        };
        children
            .into_iter()
            .map(|child| self.remove_recursive(child))
            .sum()
    }

    fn remove_recursive(&mut self, node: NodeId) -> usize {
        let Some(removed) = self.nodes.shift_remove(&node) else {
            return 0;
        };
        if self.parts.get(&(removed.owner, removed.part)) == Some(&node) {
            self.parts.remove(&(removed.owner, removed.part));
        }
        1 + removed
            .children
            .into_iter()
            .map(|child| self.remove_recursive(child))
            .sum::<usize>()
    }

    pub fn get(&self, node: NodeId) -> Option<&UiNode> {
        self.nodes.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn owner(&self, node: NodeId) -> Option<WidgetId> {
        self.nodes.get(&node).map(|n| n.owner)
    }

    pub fn part(&self, node: NodeId) -> Option<Part> {
        self.nodes.get(&node).map(|n| n.part)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Look up the node a widget rendered for `part`.
    pub fn find_part(&self, owner: WidgetId, part: Part) -> Option<NodeId> {
        self.parts.get(&(owner, part)).copied()
    }

    /// True when `node` is `ancestor` or lies in its subtree.
    pub fn is_descendant_or_self(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (UiTree, NodeId, NodeId, NodeId) {
        let mut tree = UiTree::new();
        let owner = WidgetId::from_raw(1);
        let root = tree.add_root(owner);
        let listbox = tree.add_child(root, Part::Listbox).unwrap();
        let option = tree.add_child(listbox, Part::Option(0)).unwrap();
        (tree, root, listbox, option)
    }

    #[test]
    fn test_descendant_check() {
        let (mut tree, root, listbox, option) = sample();
        let other = tree.add_root(WidgetId::from_raw(2));

        assert!(tree.is_descendant_or_self(option, root));
        assert!(tree.is_descendant_or_self(listbox, root));
        assert!(tree.is_descendant_or_self(root, root));
        assert!(!tree.is_descendant_or_self(root, option));
        assert!(!tree.is_descendant_or_self(other, root));
    }

    #[test]
    fn test_find_part() {
        let (tree, _, listbox, option) = sample();
        let owner = WidgetId::from_raw(1);
        assert_eq!(tree.find_part(owner, Part::Listbox), Some(listbox));
        assert_eq!(tree.find_part(owner, Part::Option(0)), Some(option));
        assert_eq!(tree.find_part(owner, Part::Option(1)), None);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, root, listbox, option) = sample();
        assert_eq!(tree.remove_subtree(listbox), 2);
        assert!(!tree.contains(option));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.find_part(WidgetId::from_raw(1), Part::Option(0)), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_clear_children_keeps_node() {
        let (mut tree, root, _, _) = sample();
        assert_eq!(tree.clear_children(root), 2);
        assert!(tree.contains(root));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_child_inherits_owner() {
        let (tree, _, _, option) = sample();
        assert_eq!(tree.owner(option), Some(WidgetId::from_raw(1)));
        assert_eq!(tree.part(option), Some(Part::Option(0)));
    }

    #[test]
    fn test_add_child_missing_parent() {
        let mut tree = UiTree::new();
        assert_eq!(tree.add_child(NodeId(99), Part::Trigger), None);
    }
}
