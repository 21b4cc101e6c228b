//! Construction parameters and defaults.

use crate::chained_hash_table::{self, ChainedHashTable};
use crate::container::Container;
use crate::error::CommandError;
use crate::ordered_tree::OrderedTree;
use crate::sorted_array::SortedArray;

/// Smallest bucket count a hash table is built with.
pub const MIN_TABLE_SIZE: usize = 1;

/// Smallest initial capacity a sorted array is built with.
pub const MIN_INITIAL_CAPACITY: usize = 1;

/// Growth multiplier used when the requested one would not grow the array.
pub const DEFAULT_GROWTH_MULTIPLIER: f64 = 1.25;

pub const DEFAULT_INPUT_PATH: &str = "in.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "out.txt";

pub fn coerce_table_size(requested: i32) -> usize {
    usize::try_from(requested)
        .unwrap_or(MIN_TABLE_SIZE)
        .max(MIN_TABLE_SIZE)
}

pub fn coerce_initial_capacity(requested: i32) -> usize {
    usize::try_from(requested)
        .unwrap_or(MIN_INITIAL_CAPACITY)
        .max(MIN_INITIAL_CAPACITY)
}

pub fn coerce_growth_multiplier(requested: f64) -> f64 {
    // Written so NaN also falls through to the default.
    if requested > 1.0 && requested.is_finite() {
        requested
    } else {
        DEFAULT_GROWTH_MULTIPLIER
    }
}

/// Which container to build, with its sizing parameters as given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContainerConfig {
    HashTable {
        table_size: i32,
    },
    #[default]
    Tree,
    SortedArray {
        initial_capacity: i32,
        growth_multiplier: f64,
    },
}

impl ContainerConfig {
    /// Build an empty container. Only a hash table whose bucket array does
    /// not fit in memory can fail.
    pub fn build(&self) -> Result<Box<dyn Container>, CommandError> {
        Ok(match *self {
            ContainerConfig::HashTable { table_size } => {
                let table = ChainedHashTable::try_new(table_size).map_err(|source| {
                    CommandError::Allocation {
                        structure: chained_hash_table::STRUCT_TYPE,
                        requested: coerce_table_size(table_size),
                        source,
                    }
                })?;
                Box::new(table)
            }
            ContainerConfig::Tree => Box::new(OrderedTree::new()),
            ContainerConfig::SortedArray {
                initial_capacity,
                growth_multiplier,
            } => Box::new(SortedArray::new(initial_capacity, growth_multiplier)),
        })
    }
}
