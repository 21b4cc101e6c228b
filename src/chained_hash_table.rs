//! ChainedHashTable: fixed bucket count, singly linked chain per bucket.
//!
//! `bucket_of(key) = key mod table_size`, shifted into `[0, table_size)`
//! for negative keys. New links are prepended, so a chain lists its
//! entries newest first and `find` returns the most recent insertion of a
//! key.

use crate::config::coerce_table_size;
use crate::container::Container;
use crate::entry::Entry;
use crate::error::ContainerError;
use core::fmt::Write as _;
use log::trace;
use std::collections::TryReserveError;

pub(crate) const STRUCT_TYPE: &str = "hash-table";

#[derive(Debug)]
struct Link {
    entry: Entry,
    next: Option<Box<Link>>,
}

#[derive(Debug)]
pub struct ChainedHashTable {
    buckets: Vec<Option<Box<Link>>>,
    len: usize,
}

impl ChainedHashTable {
    /// Table with `table_size` buckets; sizes below 1 become 1.
    ///
    /// Aborts if the bucket array cannot be allocated; see [`Self::try_new`].
    pub fn new(table_size: i32) -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None)
                .take(coerce_table_size(table_size))
                .collect(),
            len: 0,
        }
    }

    /// Like [`Self::new`], but reports a bucket array that cannot be
    /// allocated instead of aborting.
    pub fn try_new(table_size: i32) -> Result<Self, TryReserveError> {
        Self::with_buckets(coerce_table_size(table_size))
    }

    fn with_buckets(table_size: usize) -> Result<Self, TryReserveError> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(table_size)?;
        buckets.resize_with(table_size, || None);
        Ok(Self { buckets, len: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket index for `key`, always in `[0, table_size)`.
    pub fn bucket_of(&self, key: i32) -> usize {
        // i64 keeps table sizes above i32::MAX exact.
        i64::from(key).rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Entries of one bucket, head to tail.
    pub fn chain(&self, bucket: usize) -> impl Iterator<Item = &Entry> + '_ {
        std::iter::successors(self.buckets[bucket].as_deref(), |link| {
            link.next.as_deref()
        })
        .map(|link| &link.entry)
    }

    /// All entries, bucket 0 upward and each chain head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        (0..self.buckets.len()).flat_map(move |bucket| self.chain(bucket))
    }

    pub fn add(&mut self, key: i32, value: i32) {
        let bucket = self.bucket_of(key);
        let next = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Link {
            entry: Entry::new(key, value),
            next,
        }));
        self.len += 1;
        trace!("hash-table: key {} prepended to bucket {}", key, bucket);
    }

    pub fn find(&self, key: i32) -> Option<Entry> {
        self.chain(self.bucket_of(key))
            .find(|entry| entry.key == key)
            .copied()
    }

    /// Unlink the first link with `key` in its bucket.
    pub fn delete(&mut self, key: i32) -> Result<Entry, ContainerError> {
        let bucket = self.bucket_of(key);
        let mut slot = &mut self.buckets[bucket];
        while slot.as_ref().is_some_and(|link| link.entry.key != key) {
            if let Some(link) = slot {
                slot = &mut link.next;
            }
        }
        let mut removed = slot.take().ok_or(ContainerError::MissingKey(key))?;
        *slot = removed.next.take();
        self.len -= 1;
        Ok(removed.entry)
    }

    /// Smallest key; the first one met in scan order wins ties.
    pub fn get_min(&self) -> Option<Entry> {
        self.iter()
            .fold(None, |best: Option<&Entry>, entry| match best {
                Some(b) if b.key <= entry.key => Some(b),
                _ => Some(entry),
            })
            .copied()
    }

    /// Largest key; the first one met in scan order wins ties.
    pub fn get_max(&self) -> Option<Entry> {
        self.iter()
            .fold(None, |best: Option<&Entry>, entry| match best {
                Some(b) if b.key >= entry.key => Some(b),
                _ => Some(entry),
            })
            .copied()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for bucket in 0..self.buckets.len() {
            let _ = write!(out, "  [{}] -> ", bucket);
            for entry in self.chain(bucket) {
                let _ = write!(out, "{} -> ", entry.key);
            }
            out.push_str("NULL\n");
        }
        out
    }

    pub fn render_simple(&self) -> String {
        let mut out = String::new();
        for bucket in 0..self.buckets.len() {
            let _ = write!(out, "[{}]-", bucket);
            for entry in self.chain(bucket) {
                let _ = write!(out, "{}-", entry.key);
            }
            out.push_str("N ");
        }
        out
    }

    pub fn state(&self) -> String {
        format!(
            "num_of_items = {} || table_size = {}",
            self.len,
            self.buckets.len()
        )
    }
}

impl Drop for ChainedHashTable {
    fn drop(&mut self) {
        // Unlink iteratively so a long chain does not recurse through Box drops.
        for head in &mut self.buckets {
            let mut next = head.take();
            while let Some(mut link) = next {
                next = link.next.take();
            }
        }
    }
}

impl Container for ChainedHashTable {
    fn get_struct_type(&self) -> &'static str {
        STRUCT_TYPE
    }

    fn len(&self) -> usize {
        self.len
    }

    fn find(&self, key: i32) -> Option<Entry> {
        ChainedHashTable::find(self, key)
    }

    fn add(&mut self, key: i32, value: i32) {
        ChainedHashTable::add(self, key, value)
    }

    fn delete(&mut self, key: i32) -> Result<Entry, ContainerError> {
        ChainedHashTable::delete(self, key)
    }

    fn get_min(&self) -> Result<Entry, ContainerError> {
        ChainedHashTable::get_min(self).ok_or(ContainerError::NotExists)
    }

    fn get_max(&self) -> Result<Entry, ContainerError> {
        ChainedHashTable::get_max(self).ok_or(ContainerError::NotExists)
    }

    fn get_data(&self) -> String {
        self.render()
    }

    fn get_data_simple(&self) -> String {
        self.render_simple()
    }

    fn get_state(&self) -> Result<String, ContainerError> {
        Ok(self.state())
    }
}
