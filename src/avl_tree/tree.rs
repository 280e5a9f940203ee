use crate::arena::{Arena, Handle};
use crate::avl_tree::node::Node;
use std::cmp;
use std::cmp::Ordering;

pub type Link = Option<Handle>;
pub type NodeStore<T> = Arena<Node<T>>;

pub fn height<T>(store: &NodeStore<T>, link: Link) -> usize {
    match link {
        None => 0,
        Some(node) => store[node].height,
    }
}

pub fn size<T>(store: &NodeStore<T>, link: Link) -> usize {
    match link {
        None => 0,
        Some(node) => store[node].size,
    }
}

pub fn balance_factor<T>(store: &NodeStore<T>, node: Handle) -> i32 {
    (height(store, store[node].left) as i32) - (height(store, store[node].right) as i32)
}

pub fn update<T>(store: &mut NodeStore<T>, node: Handle) {
    let left = store[node].left;
    let right = store[node].right;
    let height = cmp::max(height(store, left), height(store, right)) + 1;
    let size = size(store, left) + size(store, right) + 1;
    store[node].height = height;
    store[node].size = size;
}

fn replace_child<T>(store: &mut NodeStore<T>, parent: Link, old_child: Handle, new_child: Handle) {
    if let Some(parent) = parent {
        if store[parent].left == Some(old_child) {
            store[parent].left = Some(new_child);
        } else {
            store[parent].right = Some(new_child);
        }
    }
}

fn rotate_left<T>(store: &mut NodeStore<T>, node: Handle) -> Handle {
    let child = match store[node].right {
        Some(child) => child,
        None => unreachable!(),
    };
    let parent = store[node].parent;
    store[child].parent = parent;
    replace_child(store, parent, node, child);
    let middle = store[child].left;
    store[node].right = middle;
    if let Some(middle) = middle {
        store[middle].parent = Some(node);
    }
    store[child].left = Some(node);
    store[node].parent = Some(child);
    update(store, node);
    update(store, child);
    if let Some(parent) = parent {
        update(store, parent);
    }
    child
}

fn rotate_right<T>(store: &mut NodeStore<T>, node: Handle) -> Handle {
    let child = match store[node].left {
        Some(child) => child,
        None => unreachable!(),
    };
    let parent = store[node].parent;
    store[child].parent = parent;
    replace_child(store, parent, node, child);
    let middle = store[child].right;
    store[node].left = middle;
    if let Some(middle) = middle {
        store[middle].parent = Some(node);
    }
    store[child].right = Some(node);
    store[node].parent = Some(child);
    update(store, node);
    update(store, child);
    if let Some(parent) = parent {
        update(store, parent);
    }
    child
}

// double rotation for a right-heavy node whose right child leans left
fn rotate_right_left<T>(store: &mut NodeStore<T>, node: Handle) -> Handle {
    let child = match store[node].right {
        Some(child) => child,
        None => unreachable!(),
    };
    let pivot = match store[child].left {
        Some(pivot) => pivot,
        None => unreachable!(),
    };
    let parent = store[node].parent;
    store[pivot].parent = parent;
    replace_child(store, parent, node, pivot);
    let pivot_left = store[pivot].left;
    store[node].right = pivot_left;
    if let Some(pivot_left) = pivot_left {
        store[pivot_left].parent = Some(node);
    }
    let pivot_right = store[pivot].right;
    store[child].left = pivot_right;
    if let Some(pivot_right) = pivot_right {
        store[pivot_right].parent = Some(child);
    }
    store[pivot].left = Some(node);
    store[pivot].right = Some(child);
    store[node].parent = Some(pivot);
    store[child].parent = Some(pivot);
    update(store, node);
    update(store, child);
    update(store, pivot);
    if let Some(parent) = parent {
        update(store, parent);
    }
    pivot
}

// double rotation for a left-heavy node whose left child leans right
fn rotate_left_right<T>(store: &mut NodeStore<T>, node: Handle) -> Handle {
    let child = match store[node].left {
        Some(child) => child,
        None => unreachable!(),
    };
    let pivot = match store[child].right {
        Some(pivot) => pivot,
        None => unreachable!(),
    };
    let parent = store[node].parent;
    store[pivot].parent = parent;
    replace_child(store, parent, node, pivot);
    let pivot_left = store[pivot].left;
    store[child].right = pivot_left;
    if let Some(pivot_left) = pivot_left {
        store[pivot_left].parent = Some(child);
    }
    let pivot_right = store[pivot].right;
    store[node].left = pivot_right;
    if let Some(pivot_right) = pivot_right {
        store[pivot_right].parent = Some(node);
    }
    store[pivot].left = Some(child);
    store[pivot].right = Some(node);
    store[child].parent = Some(pivot);
    store[node].parent = Some(pivot);
    update(store, child);
    update(store, node);
    update(store, pivot);
    if let Some(parent) = parent {
        update(store, parent);
    }
    pivot
}

// precondition: the balance factor at `node` is +2 or -2
pub fn rebalance<T>(store: &mut NodeStore<T>, node: Handle) -> Handle {
    if balance_factor(store, node) < 0 {
        let child = match store[node].right {
            Some(child) => child,
            None => unreachable!(),
        };
        if balance_factor(store, child) > 0 {
            rotate_right_left(store, node)
        } else {
            rotate_left(store, node)
        }
    } else {
        let child = match store[node].left {
            Some(child) => child,
            None => unreachable!(),
        };
        if balance_factor(store, child) < 0 {
            rotate_left_right(store, node)
        } else {
            rotate_right(store, node)
        }
    }
}

// returns the matching node and the last node visited, which is the
// prospective parent when the search fails
pub fn search<T>(store: &NodeStore<T>, root: Link, value: &T) -> (Link, Link)
where
    T: Ord,
{
    let mut current = root;
    let mut last = None;
    while let Some(node) = current {
        match value.cmp(&store[node].value) {
            Ordering::Equal => return (Some(node), last),
            Ordering::Less => {
                last = Some(node);
                current = store[node].left;
            }
            Ordering::Greater => {
                last = Some(node);
                current = store[node].right;
            }
        }
    }
    (None, last)
}

pub fn leftmost<T>(store: &NodeStore<T>, mut node: Handle) -> Handle {
    while let Some(left) = store[node].left {
        node = left;
    }
    node
}

pub fn rightmost<T>(store: &NodeStore<T>, mut node: Handle) -> Handle {
    while let Some(right) = store[node].right {
        node = right;
    }
    node
}

pub fn successor<T>(store: &NodeStore<T>, mut node: Handle) -> Link {
    if let Some(right) = store[node].right {
        return Some(leftmost(store, right));
    }
    while let Some(parent) = store[node].parent {
        if store[parent].right != Some(node) {
            return Some(parent);
        }
        node = parent;
    }
    None
}

pub fn predecessor<T>(store: &NodeStore<T>, mut node: Handle) -> Link {
    if let Some(left) = store[node].left {
        return Some(rightmost(store, left));
    }
    while let Some(parent) = store[node].parent {
        if store[parent].left != Some(node) {
            return Some(parent);
        }
        node = parent;
    }
    None
}

// in-order position of `node`, computed from cached subtree sizes
pub fn index_of<T>(store: &NodeStore<T>, node: Handle) -> usize {
    let mut index = size(store, store[node].left);
    let mut current = node;
    while let Some(parent) = store[current].parent {
        if store[parent].right == Some(current) {
            index += size(store, store[parent].left) + 1;
        }
        current = parent;
    }
    index
}

// number of values in the tree that are strictly less than `value`
pub fn rank<T>(store: &NodeStore<T>, root: Link, value: &T) -> usize
where
    T: Ord,
{
    let mut rank = 0;
    let mut current = root;
    while let Some(node) = current {
        match value.cmp(&store[node].value) {
            Ordering::Less => current = store[node].left,
            Ordering::Equal => return rank + size(store, store[node].left),
            Ordering::Greater => {
                rank += size(store, store[node].left) + 1;
                current = store[node].right;
            }
        }
    }
    rank
}

pub fn select<T>(store: &NodeStore<T>, root: Link, mut index: usize) -> Link {
    let mut current = root;
    while let Some(node) = current {
        let left_size = size(store, store[node].left);
        if index < left_size {
            current = store[node].left;
        } else if index == left_size {
            return Some(node);
        } else {
            index -= left_size + 1;
            current = store[node].right;
        }
    }
    None
}
