//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one. Nodes carry parent back-references and cached subtree sizes, so the
//! tree answers rank queries and supports ascending and descending in-order traversal.

mod node;
mod set;
mod tree;

pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
