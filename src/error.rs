//! Error and outcome types.
//!
//! A lookup miss is not an error: `find` returns `Option`. Everything a
//! caller can observe besides success is one of the enums below.

use std::collections::TryReserveError;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Non-success outcomes of container operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// `delete(key)` on a key-addressed container found no entry.
    #[error("no entry with key {0}")]
    MissingKey(i32),

    /// Index-addressed access outside `[0, len)`.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i32, len: usize },

    /// `get_min`/`get_max` on an empty container.
    #[error("container is empty")]
    NotExists,

    /// The operation is not part of this container's capabilities.
    #[error("`{operation}` is not supported by {structure}")]
    Unsupported {
        operation: &'static str,
        structure: &'static str,
    },
}

impl ContainerError {
    /// True for the precondition failures of `delete`/`get_at`.
    pub fn is_fail(&self) -> bool {
        matches!(
            self,
            ContainerError::MissingKey(_) | ContainerError::IndexOutOfBounds { .. }
        )
    }
}

/// A line the interpreter could not turn into a command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{command}` expects an argument at position {position}")]
    MissingArgument {
        command: &'static str,
        position: usize,
    },

    #[error("`{command}`: `{raw}` is not a 32-bit integer")]
    InvalidInteger {
        command: &'static str,
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("`{command}`: `{raw}` is not a number")]
    InvalidFloat {
        command: &'static str,
        raw: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("unknown structure `{0}` (expected ht, bst or sa)")]
    UnknownStructure(String),

    /// The requested structure does not fit in memory.
    #[error("cannot allocate {structure} of size {requested}")]
    Allocation {
        structure: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Failures of the command-file runner.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_grouping() {
        assert!(ContainerError::MissingKey(1).is_fail());
        assert!(ContainerError::IndexOutOfBounds { index: -1, len: 0 }.is_fail());
        assert!(!ContainerError::NotExists.is_fail());
        assert!(!ContainerError::Unsupported {
            operation: "get_at",
            structure: "hash-table"
        }
        .is_fail());
    }

    #[test]
    fn messages_name_the_offender() {
        let e = ContainerError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(e.to_string(), "index 7 out of bounds for length 3");
        assert_eq!(
            CommandError::UnknownStructure("avl".into()).to_string(),
            "unknown structure `avl` (expected ht, bst or sa)"
        );
    }
}
