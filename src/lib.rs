//! Associative containers mimicking standard-library semantics: an ordered
//! set backed by a parent-pointer AVL tree with cached subtree sizes for rank
//! queries, and a hash map with separately chained buckets and a doubling
//! rehash policy.

extern crate serde;

pub mod arena;
pub mod avl_tree;
pub mod chain_map;
