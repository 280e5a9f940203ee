use crate::arena::Handle;
use crate::avl_tree::node::Node;
use crate::avl_tree::tree::{self, Link, NodeStore};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the
/// invariant that the heights of the two child subtrees of any node differ by
/// at most one. Nodes live in an arena and link to each other with handles,
/// including a non-owning back-reference to the parent, so dropping the set
/// never recurses through tree edges. Every node caches the size of its
/// subtree, which answers rank queries in logarithmic time, and the set
/// caches its leftmost node so iteration starts in constant time.
///
/// # Examples
/// ```
/// use rank_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.rank(&3), 1);
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct AvlSet<T> {
    nodes: NodeStore<T>,
    root: Link,
    min: Link,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet {
            nodes: NodeStore::new(),
            root: None,
            min: None,
        }
    }

    /// Inserts a value into the set. If an equal value already exists in the
    /// set, the set is unchanged and `false` is returned.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let (found, last) = tree::search(&self.nodes, self.root, &value);
        if found.is_some() {
            return false;
        }
        match last {
            None => {
                let node = self.nodes.allocate(Node::new(value, None));
                self.root = Some(node);
                self.min = Some(node);
            }
            Some(parent) => {
                let goes_left = value < self.nodes[parent].value;
                let is_new_min = match self.min {
                    Some(min) => value < self.nodes[min].value,
                    None => true,
                };
                let node = self.nodes.allocate(Node::new(value, Some(parent)));
                if goes_left {
                    self.nodes[parent].left = Some(node);
                } else {
                    self.nodes[parent].right = Some(node);
                }
                if is_new_min {
                    self.min = Some(node);
                }
                self.repair_after_insert(parent);
            }
        }
        true
    }

    /// Removes a value from the set and returns it. Returns `None` if the
    /// value does not exist in the set.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let (found, _) = tree::search(&self.nodes, self.root, value);
        let mut node = found?;

        // A node with two children trades values with an adjacent node until
        // the doomed node has at most one child. Taking the predecessor when
        // the node leans left and the successor otherwise biases the tree
        // toward staying balanced.
        while self.nodes[node].left.is_some() && self.nodes[node].right.is_some() {
            let adjacent = if tree::balance_factor(&self.nodes, node) >= 0 {
                tree::predecessor(&self.nodes, node)
            } else {
                tree::successor(&self.nodes, node)
            };
            let adjacent = match adjacent {
                Some(adjacent) => adjacent,
                None => unreachable!(),
            };
            let (doomed, survivor) = self
                .nodes
                .get2_mut(&node, &adjacent)
                .expect("Expected two distinct occupied nodes.");
            mem::swap(&mut doomed.value, &mut survivor.value);
            node = adjacent;
        }

        let parent = self.nodes[node].parent;
        let child = self.nodes[node].left.or(self.nodes[node].right);
        if self.min == Some(node) {
            self.min = tree::successor(&self.nodes, node);
        }
        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                if self.nodes[parent].left == Some(node) {
                    self.nodes[parent].left = child;
                } else {
                    self.nodes[parent].right = child;
                }
            }
        }
        let removed = self.nodes.free(&node);
        if let Some(parent) = parent {
            self.repair_after_remove(parent);
        }
        Some(removed.value)
    }

    // After an insertion, a balance factor of 0 means the subtree height is
    // unchanged and no ancestor needs structural change; +-1 means the height
    // grew, so the walk continues; +-2 is repaired by a single or double
    // rotation, which restores the height that held before the insertion.
    fn repair_after_insert(&mut self, from: Handle) {
        tree::update(&mut self.nodes, from);
        let mut current = Some(from);
        while let Some(node) = current {
            match tree::balance_factor(&self.nodes, node) {
                0 => break,
                -1 | 1 => {
                    tree::update(&mut self.nodes, node);
                    current = self.nodes[node].parent;
                }
                _ => {
                    let subtree = tree::rebalance(&mut self.nodes, node);
                    if self.nodes[subtree].parent.is_none() {
                        self.root = Some(subtree);
                    }
                    current = Some(subtree);
                }
            }
        }
        // subtree sizes change on every remaining level even after heights settle
        while let Some(node) = current {
            tree::update(&mut self.nodes, node);
            current = self.nodes[node].parent;
        }
    }

    // Mirror of the insertion walk: +-1 means the subtree height is
    // unchanged, 0 means it shrank and the walk continues, and +-2 requires a
    // rotation, possibly again at every ancestor level.
    fn repair_after_remove(&mut self, from: Handle) {
        tree::update(&mut self.nodes, from);
        let mut current = Some(from);
        while let Some(node) = current {
            match tree::balance_factor(&self.nodes, node) {
                -1 | 1 => break,
                0 => {
                    tree::update(&mut self.nodes, node);
                    current = self.nodes[node].parent;
                }
                _ => {
                    let subtree = tree::rebalance(&mut self.nodes, node);
                    if self.nodes[subtree].parent.is_none() {
                        self.root = Some(subtree);
                    }
                    current = Some(subtree);
                }
            }
        }
        while let Some(node) = current {
            tree::update(&mut self.nodes, node);
            current = self.nodes[node].parent;
        }
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the set that is equal to a
    /// particular value. Returns `None` if such a value does not exist.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get(&1), Some(&1));
    /// assert_eq!(set.get(&2), None);
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        let (found, _) = tree::search(&self.nodes, self.root, value);
        found.map(|node| &self.nodes[node].value)
    }

    /// Returns an iterator starting at the first value that is not less than
    /// a particular value. The iterator is empty if no such value exists.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.lower_bound(&1).next(), Some(&1));
    /// assert_eq!(set.lower_bound(&2).next(), Some(&3));
    /// assert_eq!(set.lower_bound(&4).next(), None);
    /// ```
    pub fn lower_bound(&self, value: &T) -> AvlSetIter<'_, T> {
        let (found, last) = tree::search(&self.nodes, self.root, value);
        let start = found.or_else(|| {
            last.and_then(|parent| {
                if *value < self.nodes[parent].value {
                    Some(parent)
                } else {
                    tree::successor(&self.nodes, parent)
                }
            })
        });
        self.iter_from(start)
    }

    /// Returns the number of values in the set that are strictly less than a
    /// particular value, computed from the cached subtree sizes.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.rank(&3), 1);
    /// assert_eq!(set.rank(&4), 2);
    /// ```
    pub fn rank(&self, value: &T) -> usize {
        tree::rank(&self.nodes, self.root, value)
    }

    /// Returns a reference to the value at a particular in-order position.
    /// Returns `None` if the position is out of range.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.select(1), Some(&3));
    /// assert_eq!(set.select(2), None);
    /// ```
    pub fn select(&self, index: usize) -> Option<&T> {
        tree::select(&self.nodes, self.root, index).map(|node| &self.nodes[node].value)
    }

    /// Returns the number of values in the set, which is the cached size of
    /// the root's subtree.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        tree::size(&self.nodes, self.root)
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.min = None;
    }

    /// Returns the minimum value of the set in constant time, using the
    /// cached leftmost node. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.min.map(|node| &self.nodes[node].value)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.nodes[tree::rightmost(&self.nodes, root)].value)
    }

    /// Returns an iterator over the set. The iterator yields values in
    /// ascending order from the front and descending order from the back;
    /// the front starts at the cached leftmost node in constant time.
    ///
    /// Because the iterator borrows the set, the set cannot be mutated while
    /// one is live; there is no way to observe a node that an insertion or a
    /// removal has rebalanced or destroyed.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next_back(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
            nodes: &self.nodes,
            next: self.min,
            next_back: self.root.map(|root| tree::rightmost(&self.nodes, root)),
            len: self.len(),
        }
    }

    fn iter_from(&self, start: Link) -> AvlSetIter<'_, T> {
        let len = match start {
            Some(node) => self.len() - tree::index_of(&self.nodes, node),
            None => 0,
        };
        AvlSetIter {
            nodes: &self.nodes,
            next: start,
            next_back: self.root.map(|root| tree::rightmost(&self.nodes, root)),
            len,
        }
    }
}

impl<T> IntoIterator for AvlSet<T>
where
    T: Ord,
{
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let AvlSet { nodes, root, .. } = self;
        AvlSetIntoIter {
            nodes,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the set in-order, yields owned values, and frees
/// each node as it is yielded.
pub struct AvlSetIntoIter<T> {
    nodes: NodeStore<T>,
    current: Link,
    stack: Vec<Handle>,
}

impl<T> Iterator for AvlSetIntoIter<T>
where
    T: Ord,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = self.nodes[node].left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let node = self.nodes.free(&node);
            self.current = node.right;
            node.value
        })
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator holds handles to the next node at each end and walks to the
/// in-order successor or predecessor through the parent back-references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    nodes: &'a NodeStore<T>,
    next: Link,
    next_back: Link,
    len: usize,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a + Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.next?;
        self.len -= 1;
        self.next = tree::successor(self.nodes, node);
        Some(&self.nodes[node].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for AvlSetIter<'a, T>
where
    T: 'a + Ord,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.next_back?;
        self.len -= 1;
        self.next_back = tree::predecessor(self.nodes, node);
        Some(&self.nodes[node].value)
    }
}

impl<'a, T> ExactSizeIterator for AvlSetIter<'a, T> where T: 'a + Ord {}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Clone for AvlSet<T>
where
    T: Ord + Clone,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for AvlSet<T> where T: Ord {}

impl<T> Serialize for AvlSet<T>
where
    T: Ord + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct AvlSetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for AvlSetVisitor<T>
where
    T: Ord + Deserialize<'de>,
{
    type Value = AvlSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = AvlSet::new();
        while let Some(value) = seq.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::avl_tree::tree::{self, Link};
    use serde_test::{assert_tokens, Token};
    use std::cmp;

    fn check_invariants<T>(set: &AvlSet<T>)
    where
        T: Ord,
    {
        fn check_subtree<T>(set: &AvlSet<T>, link: Link, parent: Link) -> (usize, usize)
        where
            T: Ord,
        {
            let node = match link {
                Some(node) => node,
                None => return (0, 0),
            };
            assert_eq!(set.nodes[node].parent, parent);
            if let Some(left) = set.nodes[node].left {
                assert!(set.nodes[left].value < set.nodes[node].value);
            }
            if let Some(right) = set.nodes[node].right {
                assert!(set.nodes[node].value < set.nodes[right].value);
            }
            let (left_height, left_size) = check_subtree(set, set.nodes[node].left, Some(node));
            let (right_height, right_size) = check_subtree(set, set.nodes[node].right, Some(node));
            assert!((left_height as i32 - right_height as i32).abs() <= 1);
            let height = cmp::max(left_height, right_height) + 1;
            let size = left_size + right_size + 1;
            assert_eq!(set.nodes[node].height, height);
            assert_eq!(set.nodes[node].size, size);
            (height, size)
        }

        let (_, size) = check_subtree(set, set.root, None);
        assert_eq!(size, set.len());
        match set.root {
            Some(root) => assert_eq!(set.min, Some(tree::leftmost(&set.nodes, root))),
            None => assert_eq!(set.min, None),
        }
    }

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        check_invariants(&set);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        check_invariants(&set);
    }

    #[test]
    fn test_remove() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        check_invariants(&set);
    }

    #[test]
    fn test_remove_absent() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert_eq!(set.remove(&2), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_scenario() {
        let mut set: AvlSet<u32> = [5, 3, 8, 1, 4].iter().cloned().collect();
        assert_eq!(set.remove(&3), Some(3));
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &4, &5, &8]);
        assert_eq!(set.get(&3), None);
        check_invariants(&set);
    }

    #[test]
    fn test_round_trip() {
        let mut set: AvlSet<u32> = [2, 4, 6].iter().cloned().collect();
        let before = set.iter().cloned().collect::<Vec<u32>>();
        set.insert(5);
        set.remove(&5);
        assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), before);
        check_invariants(&set);
    }

    #[test]
    fn test_insert_ascending_stays_balanced() {
        let mut set = AvlSet::new();
        for value in 1..=7 {
            set.insert(value);
        }
        assert!(tree::height(&set.nodes, set.root) <= 3);
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.len(), 7);
        check_invariants(&set);
    }

    #[test]
    fn test_from_iter_duplicates() {
        let set: AvlSet<u32> = [2, 2, 2, 1].iter().cloned().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
    }

    #[test]
    fn test_min_max() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_min_after_remove() {
        let mut set: AvlSet<u32> = (0..16).collect();
        for value in 0..8 {
            set.remove(&value);
            assert_eq!(set.min(), Some(&(value + 1)));
            check_invariants(&set);
        }
    }

    #[test]
    fn test_get() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert_eq!(set.get(&1), Some(&1));
        assert_eq!(set.get(&0), None);
    }

    #[test]
    fn test_lower_bound() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.lower_bound(&0).next(), Some(&1));
        assert_eq!(set.lower_bound(&3).next(), Some(&3));
        assert_eq!(set.lower_bound(&4).next(), Some(&5));
        assert_eq!(set.lower_bound(&6).next(), None);

        let tail = set.lower_bound(&2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.collect::<Vec<&u32>>(), vec![&3, &5]);
    }

    #[test]
    fn test_rank_select() {
        let set: AvlSet<u32> = [10, 20, 30, 40].iter().cloned().collect();

        assert_eq!(set.rank(&10), 0);
        assert_eq!(set.rank(&25), 2);
        assert_eq!(set.rank(&50), 4);

        assert_eq!(set.select(0), Some(&10));
        assert_eq!(set.select(3), Some(&40));
        assert_eq!(set.select(4), None);
    }

    #[test]
    fn test_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_iter_rev() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }

    #[test]
    fn test_iter_double_ended_meets() {
        let set: AvlSet<u32> = (1..=3).collect();
        let mut iterator = set.iter();
        assert_eq!(iterator.next(), Some(&1));
        assert_eq!(iterator.next_back(), Some(&3));
        assert_eq!(iterator.next(), Some(&2));
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next_back(), None);
    }

    #[test]
    fn test_into_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_clear() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        check_invariants(&set);
    }

    #[test]
    fn test_clone_eq() {
        let set: AvlSet<u32> = [3, 1, 2].iter().cloned().collect();
        let clone = set.clone();
        assert_eq!(set, clone);

        let mut clone = clone;
        clone.remove(&2);
        assert_ne!(set, clone);
    }

    #[test]
    fn test_random_churn_preserves_invariants() {
        use rand::Rng;

        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut set = AvlSet::new();
        let mut expected = std::collections::BTreeSet::new();

        for _ in 0..2_000 {
            let value = rng.gen_range(0, 64u32);
            if rng.gen() {
                assert_eq!(set.insert(value), expected.insert(value));
            } else {
                assert_eq!(set.remove(&value), expected.take(&value));
            }
            check_invariants(&set);
        }

        assert_eq!(
            set.iter().collect::<Vec<&u32>>(),
            expected.iter().collect::<Vec<&u32>>(),
        );
    }

    #[test]
    fn test_serde() {
        let set: AvlSet<u32> = [2, 1, 3].iter().cloned().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }
}
