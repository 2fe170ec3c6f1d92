//! # burrow: a disk-backed B-tree index
//!
//! burrow stores an ordered map from fixed-width binary keys to
//! fixed-width binary values inside a fixed-size block device. The device
//! is reached through the [`BufferCache`] trait; two implementations ship
//! with the crate (heap-backed and memory-mapped file), and any block
//! store can slot in behind the same contract.
//!
//! ## Quick Start
//!
//! ```
//! use burrow::{BTreeIndex, MemoryCache};
//!
//! let mut cache = MemoryCache::new(256, 64);
//! let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
//! tree.attach(0, true)?;
//!
//! tree.insert(b"aaaaaaaa", b"00000000")?;
//! assert_eq!(tree.lookup(b"aaaaaaaa")?, b"00000000".to_vec());
//!
//! tree.detach()?;
//! # Ok::<(), burrow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      BTreeIndex (tree engine)        │  descent, splits, root growth
//! ├─────────────────────────────────────┤
//! │   Node codec   │   Free-list alloc   │  block layout, slot access
//! ├─────────────────────────────────────┤
//! │        BufferCache (trait)           │  read/write/notify
//! ├─────────────────────────────────────┤
//! │   MemoryCache   │     MmapCache      │  devices
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Scope
//!
//! Single-threaded, run-to-completion operations; no journaling (writes
//! are durable at block granularity, an interrupted insert is not
//! crash-safe); fixed-width keys and values; duplicate keys rejected;
//! deletion not implemented. Between completed operations the device
//! always holds a well-formed tree plus a well-formed free list, which
//! [`BTreeIndex::sanity_check`] verifies.

pub mod btree;
pub mod error;
pub mod storage;

pub use btree::{BTreeIndex, DisplayMode, Node, NodeHeader, NodeType};
pub use error::{Error, Result};
pub use storage::{BufferCache, MemoryCache, MmapCache};
