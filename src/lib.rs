//! keyed-containers: three interchangeable multiset containers over `i32`
//! keys and values, behind one capability trait, plus a small command
//! interpreter that drives them from a text file.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the same handful of operations (insert, lookup, delete,
//!   extremes, renderings) on three storage strategies with very
//!   different costs, so the strategies can be compared side by side.
//! - Backends:
//!   - OrderedTree: unbalanced binary search tree. Nodes live in a
//!     `slotmap::SlotMap` and link to each other by `NodeId`; the parent
//!     link is an index used for navigation, never for ownership.
//!   - ChainedHashTable: fixed number of buckets, `key mod table_size`,
//!     singly linked chains with newest entries at the head.
//!   - SortedArray: one contiguous buffer in non-decreasing key order,
//!     binary-search insertion, growth by a configurable multiplier.
//! - Capability trait: `Container`. Operations a backend cannot offer
//!   return `ContainerError::Unsupported` rather than being absent.
//!
//! Constraints
//! - Single-threaded and synchronous; every operation runs to completion.
//! - Multiset semantics: equal keys (and equal values) always coexist.
//! - No balancing: tree depth is O(n) on sorted input. Traversals are
//!   iterative, so depth never turns into call-stack depth.
//! - A failed operation leaves the container untouched.
//!
//! Outcomes
//! - A lookup miss is `None`, not an error.
//! - `delete`/`get_at` preconditions (missing key, bad index) are the
//!   "fail" variants of `ContainerError`; extremes of an empty container
//!   are `NotExists`.
//! - Broken structural invariants are bugs and are checked with debug
//!   assertions, not reported.
//!
//! Duplicate ordering
//! - Tree: equal keys go right, so in-order iteration yields them in
//!   insertion order and `find` returns the oldest.
//! - Hash table: chains are prepended, so `find` returns the newest.
//! - Sorted array: equal keys are inserted after existing ones; `find`
//!   returns some index in the run, not necessarily the first.
//!
//! Front end
//! - `interpreter` parses `new|add|del|find|at|min|max|data|datasimple|
//!   state|print` lines, echoes them and appends each response. Bad lines
//!   answer `ILLEGAL COMMAND` and do not stop the run.

pub mod chained_hash_table;
pub mod config;
pub mod container;
pub mod entry;
pub mod error;
pub mod interpreter;
pub mod logger;
pub mod ordered_tree;
mod ordered_tree_proptest;
pub mod sorted_array;
mod tree_diagram;

// Public surface
pub use chained_hash_table::ChainedHashTable;
pub use config::ContainerConfig;
pub use container::Container;
pub use entry::Entry;
pub use error::{CommandError, ContainerError, Error};
pub use interpreter::{Command, Interpreter};
pub use ordered_tree::OrderedTree;
pub use sorted_array::SortedArray;
pub use tree_diagram::MAX_DIAGRAM_LEVELS;
