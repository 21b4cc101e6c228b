//! Entry: the key/value record every container stores.

use core::fmt;

/// A key/value pair of 32-bit integers. Containers hold these as a
/// multiset over `key`: equal keys and equal values may coexist.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Entry {
    pub key: i32,
    pub value: i32,
}

impl Entry {
    #[inline]
    pub const fn new(key: i32, value: i32) -> Self {
        Self { key, value }
    }
}

impl From<(i32, i32)> for Entry {
    fn from((key, value): (i32, i32)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key: {}, value: {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn display_matches_response_format() {
        assert_eq!(Entry::new(3, -30).to_string(), "key: 3, value: -30");
    }

    #[test]
    fn from_tuple() {
        assert_eq!(Entry::from((1, 2)), Entry { key: 1, value: 2 });
    }
}
