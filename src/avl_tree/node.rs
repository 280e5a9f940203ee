use crate::avl_tree::tree::Link;

/// A struct representing an internal node of an avl tree.
///
/// Nodes are stored in an arena and refer to each other by handle, so every
/// edge is non-owning. `parent` is the back-reference used for upward
/// traversal.
pub struct Node<T> {
    pub value: T,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
    pub height: usize,
    pub size: usize,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Link) -> Self {
        Node {
            value,
            left: None,
            right: None,
            parent,
            height: 1,
            size: 1,
        }
    }
}
