//! # B-Tree Index
//!
//! A persistent ordered map from fixed-width binary keys to fixed-width
//! binary values, laid out in the blocks of a [`BufferCache`] device.
//!
//! ## Block Roles
//!
//! ```text
//! Block 0            Superblock: root pointer, free-list head, geometry
//! superblock.root    Root node (interior-shaped)
//! ...                Interior and leaf nodes
//! free chain         Unallocated blocks linked through their own headers
//! ```
//!
//! Every block starts with the same 28-byte header (see [`node`]); the
//! payload is keys + child pointers in interior nodes and key/value pairs
//! in leaves. Keys are strictly increasing within every node, a key `K[i]`
//! bounds its left subtree inclusively and its right subtree exclusively,
//! and every block is reachable either from the root or from the free
//! list.
//!
//! ## Module Organization
//!
//! - [`node`]: block layout, the node codec, and split mechanics
//! - `freelist`: the intrusive free-block allocator
//! - `tree`: the engine (attach/detach, lookup, update, insert, sanity)
//! - `display`: debug rendering
//!
//! [`BufferCache`]: crate::storage::BufferCache

pub mod node;

mod display;
mod freelist;
mod tree;

pub use display::DisplayMode;
pub use node::{Node, NodeHeader, NodeType, NODE_HEADER_SIZE, PTR_SIZE};
pub use tree::BTreeIndex;
