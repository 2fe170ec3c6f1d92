//! Error types for the burrow index.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants
//! mirror the conditions a caller can meaningfully branch on: a missing key
//! is not the same failure as an exhausted allocator or a malformed tree,
//! and callers routinely treat them differently (an insert loop stops on
//! `NoSpace`, a read path treats `NonExistent` as an ordinary miss).

use std::io;

use thiserror::Error;

/// Result type alias for burrow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating on the index.
#[derive(Error, Debug)]
pub enum Error {
    /// The key is not present in the tree.
    #[error("key not present in the tree")]
    NonExistent,

    /// An insert found the key already present. Duplicate keys are rejected.
    #[error("key already present in the tree")]
    Conflict,

    /// The free list is exhausted; no unallocated blocks remain.
    #[error("no unallocated blocks remain")]
    NoSpace,

    /// The operation is not implemented.
    #[error("operation not implemented")]
    Unimplemented,

    /// A structural invariant of the on-disk tree was violated.
    #[error("tree structure is not sane: {reason}")]
    Insane {
        /// Which invariant was violated.
        reason: &'static str,
    },

    /// A slot index was outside the valid range for its node.
    #[error("slot index {index} out of range (limit {limit})")]
    InvalidIndex {
        /// The requested slot.
        index: usize,
        /// One past the last valid slot.
        limit: usize,
    },

    /// A key did not match the width the tree was created with.
    #[error("key is {actual} bytes, tree is configured for {expected}")]
    KeyWidth {
        /// Configured key width.
        expected: usize,
        /// Width of the supplied key.
        actual: usize,
    },

    /// A value did not match the width the tree was created with.
    #[error("value is {actual} bytes, tree is configured for {expected}")]
    ValueWidth {
        /// Configured value width.
        expected: usize,
        /// Width of the supplied value.
        actual: usize,
    },

    /// A block number was outside the device.
    #[error("block {block} out of range (device has {limit} blocks)")]
    BadBlock {
        /// The requested block.
        block: u32,
        /// Number of blocks in the device.
        limit: u32,
    },

    /// I/O error from the underlying block device.
    #[error("block i/o failed: {0}")]
    Io(#[from] io::Error),
}
