//! SortedArray: contiguous buffer kept in non-decreasing key order.
//!
//! The array tracks its own logical `capacity` rather than trusting the
//! allocator's: growth happens exactly when `len == capacity`, and the new
//! capacity is `max(round(capacity * growth_multiplier), capacity + 1)`.
//! Growing and inserting are one pass over the old buffer. Physical
//! storage follows the stored entries, so a large requested capacity or
//! multiplier costs nothing until entries arrive.

use crate::config::{coerce_growth_multiplier, coerce_initial_capacity};
use crate::container::Container;
use crate::entry::Entry;
use crate::error::ContainerError;
use log::{debug, trace};

pub(crate) const STRUCT_TYPE: &str = "sorted array";
pub(crate) const EMPTY_ARRAY: &str = "array is empty";

#[derive(Debug, Clone)]
pub struct SortedArray {
    buffer: Vec<Entry>,
    capacity: usize,
    growth_multiplier: f64,
}

impl SortedArray {
    /// Capacities below 1 become 1; multipliers not above 1 become 1.25.
    pub fn new(initial_capacity: i32, growth_multiplier: f64) -> Self {
        let capacity = coerce_initial_capacity(initial_capacity);
        Self {
            buffer: Vec::new(),
            capacity,
            growth_multiplier: coerce_growth_multiplier(growth_multiplier),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_multiplier(&self) -> f64 {
        self.growth_multiplier
    }

    /// Stored entries in key order.
    pub fn as_slice(&self) -> &[Entry] {
        &self.buffer
    }

    /// Index just past every entry whose key is `<= key`, so equal keys
    /// land after the ones already stored.
    fn insertion_point(&self, key: i32) -> usize {
        let (mut low, mut high) = (0, self.buffer.len());
        while low < high {
            let mid = low + (high - low) / 2;
            if key < self.buffer[mid].key {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        low
    }

    /// Capacity after one growth step from `capacity`.
    pub fn grown_capacity(capacity: usize, growth_multiplier: f64) -> usize {
        // `as` saturates on overflow.
        let scaled = (capacity as f64 * growth_multiplier).round() as usize;
        scaled.max(capacity + 1)
    }

    pub fn add(&mut self, key: i32, value: i32) {
        let entry = Entry::new(key, value);
        let at = self.insertion_point(key);

        if self.buffer.len() < self.capacity {
            self.buffer.insert(at, entry);
            trace!("sorted array: key {} inserted at {}", key, at);
        } else {
            let grown = Self::grown_capacity(self.capacity, self.growth_multiplier);
            let mut buffer = Vec::with_capacity(self.buffer.len() + 1);
            buffer.extend_from_slice(&self.buffer[..at]);
            buffer.push(entry);
            buffer.extend_from_slice(&self.buffer[at..]);
            debug!(
                "sorted array: grew capacity {} -> {} inserting key {} at {}",
                self.capacity, grown, key, at
            );
            self.buffer = buffer;
            self.capacity = grown;
        }
        debug_assert!(self.is_sorted());
    }

    fn checked_index(&self, index: i32) -> Result<usize, ContainerError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.buffer.len())
            .ok_or(ContainerError::IndexOutOfBounds {
                index,
                len: self.buffer.len(),
            })
    }

    pub fn get_at(&self, index: i32) -> Result<Entry, ContainerError> {
        let i = self.checked_index(index)?;
        Ok(self.buffer[i])
    }

    /// Remove the entry at `index`, shifting the tail left. Capacity is
    /// never reduced.
    pub fn delete(&mut self, index: i32) -> Result<Entry, ContainerError> {
        let i = self.checked_index(index)?;
        Ok(self.buffer.remove(i))
    }

    /// Index of some entry with `key`; not necessarily the first of a run
    /// of equal keys.
    pub fn find_index(&self, key: i32) -> Option<usize> {
        let (mut low, mut high) = (0usize, self.buffer.len());
        while low < high {
            let mid = low + (high - low) / 2;
            let probe = self.buffer[mid].key;
            if key == probe {
                return Some(mid);
            }
            if key < probe {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        None
    }

    pub fn find(&self, key: i32) -> Option<Entry> {
        self.find_index(key).map(|i| self.buffer[i])
    }

    pub fn get_min(&self) -> Option<Entry> {
        self.buffer.first().copied()
    }

    pub fn get_max(&self) -> Option<Entry> {
        self.buffer.last().copied()
    }

    pub fn is_sorted(&self) -> bool {
        self.buffer.windows(2).all(|w| w[0].key <= w[1].key)
    }

    /// Keys in storage order, each followed by a space.
    pub fn render(&self) -> String {
        if self.buffer.is_empty() {
            return EMPTY_ARRAY.to_string();
        }
        self.buffer.iter().map(|e| format!("{} ", e.key)).collect()
    }

    pub fn state(&self) -> String {
        format!(
            "size = {}  capacity = {}  growth_multiplier = {}",
            self.buffer.len(),
            self.capacity,
            self.growth_multiplier
        )
    }
}

impl Container for SortedArray {
    fn get_struct_type(&self) -> &'static str {
        STRUCT_TYPE
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn find(&self, key: i32) -> Option<Entry> {
        SortedArray::find(self, key)
    }

    fn add(&mut self, key: i32, value: i32) {
        SortedArray::add(self, key, value)
    }

    fn delete(&mut self, index: i32) -> Result<Entry, ContainerError> {
        SortedArray::delete(self, index)
    }

    fn get_min(&self) -> Result<Entry, ContainerError> {
        SortedArray::get_min(self).ok_or(ContainerError::NotExists)
    }

    fn get_max(&self) -> Result<Entry, ContainerError> {
        SortedArray::get_max(self).ok_or(ContainerError::NotExists)
    }

    fn get_at(&self, index: i32) -> Result<Entry, ContainerError> {
        SortedArray::get_at(self, index)
    }

    fn get_data(&self) -> String {
        self.render()
    }

    fn get_data_simple(&self) -> String {
        self.render()
    }

    fn get_state(&self) -> Result<String, ContainerError> {
        Ok(self.state())
    }
}
