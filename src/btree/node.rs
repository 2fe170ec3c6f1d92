//! # Node Layout and Codec
//!
//! Every block in the device holds one node: a fixed 28-byte header
//! followed by a payload whose interpretation depends on the node type.
//! This module owns that byte layout and exposes typed, bounds-checked
//! accessors over it; nothing outside this file computes a slot offset.
//!
//! ## Header Layout (28 bytes, host byte order)
//!
//! ```text
//! Offset  Size  Field       Description
//! ------  ----  ----------  ----------------------------------------
//! 0       4     node_type   Unallocated/Superblock/Root/Interior/Leaf
//! 4       4     key_size    Key width in bytes
//! 8       4     value_size  Value width in bytes
//! 12      4     block_size  Device block size this node was built for
//! 16      4     root_block  Root block number (authoritative in the
//!                           superblock only)
//! 20      4     free_link   Next free block (superblock: list head;
//!                           unallocated node: next link; 0 = end)
//! 24      4     num_keys    Number of keys stored in the payload
//! ```
//!
//! Every node carries the full header; the fields that only matter in the
//! superblock are stored harmlessly elsewhere. The header is a `zerocopy`
//! struct, so serialization is a single bounded copy in each direction.
//!
//! ## Payload Layout
//!
//! Interior and root nodes interleave child pointers and keys so that a
//! key and the pointer to its right neighbour are one contiguous unit:
//!
//! ```text
//! P0 | K0 P1 | K1 P2 | ... | K(n-1) Pn
//! ```
//!
//! Pointer slot `i` lives at `i * (key_size + 4)`; key slot `i` at
//! `4 + i * (key_size + 4)`. A node with `n` keys has `n + 1` pointers.
//!
//! Leaf nodes pack key/value pairs:
//!
//! ```text
//! K0 V0 | K1 V1 | ... | K(n-1) V(n-1)
//! ```
//!
//! Keys are strictly increasing in both layouts. Unallocated nodes and the
//! superblock use only the header; their payload is dead space.
//!
//! ## Capacity
//!
//! With `B = block_size - 28`:
//!
//! - interior: `(B - 4) / (key_size + 4)` keys
//! - leaf: `B / (key_size + value_size)` pairs
//!
//! ## Bulk Moves
//!
//! Ordered insertion and node splits shift whole runs of slots. Slot units
//! are contiguous by construction, so both are bounded `copy_within` /
//! `copy_from_slice` calls over the payload; widths are runtime values, so
//! there is no fixed-size struct to transmute for payload entries.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{Error, Result};
use crate::storage::BufferCache;

/// Size of the packed node header at the start of every block.
pub const NODE_HEADER_SIZE: usize = size_of::<NodeHeader>();

/// Width of a child pointer slot (a block number).
pub const PTR_SIZE: usize = size_of::<u32>();

/// What a block is currently being used as.
///
/// The raw value 0 is deliberate for `Unallocated`: a zero-filled block
/// reads back as unallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// On the free list; `free_link` holds the next free block.
    Unallocated,
    /// Block 0: tree metadata.
    Superblock,
    /// The top node of the tree. Shaped like an interior node.
    Root,
    /// Internal routing node: keys and child pointers.
    Interior,
    /// Bottom-level node: key/value pairs.
    Leaf,
}

impl NodeType {
    /// Decodes a raw header value; `None` for anything out of range.
    pub fn from_raw(raw: u32) -> Option<NodeType> {
        match raw {
            0 => Some(NodeType::Unallocated),
            1 => Some(NodeType::Superblock),
            2 => Some(NodeType::Root),
            3 => Some(NodeType::Interior),
            4 => Some(NodeType::Leaf),
            _ => None,
        }
    }

    /// The value stored in the header.
    pub fn as_raw(self) -> u32 {
        match self {
            NodeType::Unallocated => 0,
            NodeType::Superblock => 1,
            NodeType::Root => 2,
            NodeType::Interior => 3,
            NodeType::Leaf => 4,
        }
    }

    /// True for the two node kinds that route by key: `Root` and
    /// `Interior`.
    pub fn is_interior(self) -> bool {
        matches!(self, NodeType::Root | NodeType::Interior)
    }
}

/// Packed header stored at the start of every block.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NodeHeader {
    node_type: u32,
    key_size: u32,
    value_size: u32,
    block_size: u32,
    root_block: u32,
    free_link: u32,
    num_keys: u32,
}

impl NodeHeader {
    fn new(node_type: NodeType, key_size: u32, value_size: u32, block_size: u32) -> Self {
        Self {
            node_type: node_type.as_raw(),
            key_size,
            value_size,
            block_size,
            root_block: 0,
            free_link: 0,
            num_keys: 0,
        }
    }
}

/// One decoded block: header plus payload.
#[derive(Debug, Clone)]
pub struct Node {
    header: NodeHeader,
    payload: Vec<u8>,
}

impl Node {
    /// Builds a fresh node with a zeroed payload.
    pub fn new(node_type: NodeType, key_size: u32, value_size: u32, block_size: u32) -> Node {
        assert!(
            block_size as usize > NODE_HEADER_SIZE,
            "block size {} cannot hold a node header",
            block_size
        );
        Node {
            header: NodeHeader::new(node_type, key_size, value_size, block_size),
            payload: vec![0u8; block_size as usize - NODE_HEADER_SIZE],
        }
    }

    /// Reads `block` from the device and decodes it.
    pub fn load<C: BufferCache>(cache: &C, block: u32) -> Result<Node> {
        let mut buf = vec![0u8; cache.block_size()];
        cache.read_block(block, &mut buf)?;

        let (header, payload) = NodeHeader::read_from_prefix(buf.as_slice()).map_err(|_| {
            Error::Insane {
                reason: "block too small for a node header",
            }
        })?;

        let node = Node {
            header,
            payload: payload.to_vec(),
        };
        node.validate(buf.len())?;
        Ok(node)
    }

    /// Writes the full block image back to the device.
    pub fn store<C: BufferCache>(&self, cache: &mut C, block: u32) -> Result<()> {
        let block_size = cache.block_size();
        if NODE_HEADER_SIZE + self.payload.len() != block_size {
            return Err(Error::Insane {
                reason: "node geometry does not match the device block size",
            });
        }

        let mut buf = vec![0u8; block_size];
        buf[..NODE_HEADER_SIZE].copy_from_slice(self.header.as_bytes());
        buf[NODE_HEADER_SIZE..].copy_from_slice(&self.payload);
        cache.write_block(block, &buf)
    }

    fn validate(&self, device_block_size: usize) -> Result<()> {
        let node_type = NodeType::from_raw(self.header.node_type).ok_or(Error::Insane {
            reason: "unknown node type on disk",
        })?;

        if node_type == NodeType::Unallocated {
            // Free blocks only use header fields; the payload is dead.
            return Ok(());
        }

        if self.header.block_size as usize != device_block_size {
            return Err(Error::Insane {
                reason: "header block size does not match the device",
            });
        }

        match node_type {
            NodeType::Leaf => {
                if self.key_size() == 0 || self.value_size() == 0 {
                    return Err(Error::Insane {
                        reason: "leaf node with zero-width slots",
                    });
                }
                if self.num_keys() > self.leaf_capacity() {
                    return Err(Error::Insane {
                        reason: "key count exceeds leaf capacity",
                    });
                }
            }
            NodeType::Root | NodeType::Interior => {
                if self.key_size() == 0 {
                    return Err(Error::Insane {
                        reason: "interior node with zero-width keys",
                    });
                }
                if self.num_keys() > self.interior_capacity() {
                    return Err(Error::Insane {
                        reason: "key count exceeds interior capacity",
                    });
                }
            }
            NodeType::Superblock | NodeType::Unallocated => {}
        }

        Ok(())
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::from_raw(self.header.node_type).expect("node type validated on construction")
    }

    pub fn set_node_type(&mut self, node_type: NodeType) {
        self.header.node_type = node_type.as_raw();
    }

    pub fn key_size(&self) -> usize {
        self.header.key_size as usize
    }

    pub fn value_size(&self) -> usize {
        self.header.value_size as usize
    }

    pub fn block_size(&self) -> usize {
        self.header.block_size as usize
    }

    pub fn root_block(&self) -> u32 {
        self.header.root_block
    }

    pub fn set_root_block(&mut self, block: u32) {
        self.header.root_block = block;
    }

    pub fn free_link(&self) -> u32 {
        self.header.free_link
    }

    pub fn set_free_link(&mut self, block: u32) {
        self.header.free_link = block;
    }

    pub fn num_keys(&self) -> usize {
        self.header.num_keys as usize
    }

    pub fn set_num_keys(&mut self, num_keys: usize) {
        self.header.num_keys = num_keys as u32;
    }

    /// Maximum keys this node can hold when used as an interior node.
    pub fn interior_capacity(&self) -> usize {
        self.payload.len().saturating_sub(PTR_SIZE) / (self.key_size() + PTR_SIZE)
    }

    /// Maximum key/value pairs this node can hold when used as a leaf.
    pub fn leaf_capacity(&self) -> usize {
        let unit = self.key_size() + self.value_size();
        if unit == 0 {
            return 0;
        }
        self.payload.len() / unit
    }

    fn interior_unit(&self) -> usize {
        self.key_size() + PTR_SIZE
    }

    fn leaf_unit(&self) -> usize {
        self.key_size() + self.value_size()
    }

    fn key_offset(&self, index: usize) -> Result<usize> {
        match self.node_type() {
            NodeType::Root | NodeType::Interior => Ok(PTR_SIZE + index * self.interior_unit()),
            NodeType::Leaf => Ok(index * self.leaf_unit()),
            _ => Err(Error::Insane {
                reason: "node has no key slots",
            }),
        }
    }

    fn check_key_index(&self, index: usize) -> Result<()> {
        if index >= self.num_keys() {
            return Err(Error::InvalidIndex {
                index,
                limit: self.num_keys(),
            });
        }
        Ok(())
    }

    /// Key in slot `index`, `0 <= index < num_keys`.
    pub fn key_at(&self, index: usize) -> Result<&[u8]> {
        self.check_key_index(index)?;
        let offset = self.key_offset(index)?;
        Ok(&self.payload[offset..offset + self.key_size()])
    }

    pub fn set_key(&mut self, index: usize, key: &[u8]) -> Result<()> {
        if key.len() != self.key_size() {
            return Err(Error::KeyWidth {
                expected: self.key_size(),
                actual: key.len(),
            });
        }
        self.check_key_index(index)?;
        let offset = self.key_offset(index)?;
        self.payload[offset..offset + key.len()].copy_from_slice(key);
        Ok(())
    }

    /// Value in slot `index` of a leaf.
    pub fn value_at(&self, index: usize) -> Result<&[u8]> {
        if self.node_type() != NodeType::Leaf {
            return Err(Error::Insane {
                reason: "node has no value slots",
            });
        }
        self.check_key_index(index)?;
        let offset = index * self.leaf_unit() + self.key_size();
        Ok(&self.payload[offset..offset + self.value_size()])
    }

    pub fn set_value(&mut self, index: usize, value: &[u8]) -> Result<()> {
        if self.node_type() != NodeType::Leaf {
            return Err(Error::Insane {
                reason: "node has no value slots",
            });
        }
        if value.len() != self.value_size() {
            return Err(Error::ValueWidth {
                expected: self.value_size(),
                actual: value.len(),
            });
        }
        self.check_key_index(index)?;
        let offset = index * self.leaf_unit() + self.key_size();
        self.payload[offset..offset + value.len()].copy_from_slice(value);
        Ok(())
    }

    fn check_ptr_index(&self, index: usize) -> Result<usize> {
        if !self.node_type().is_interior() {
            return Err(Error::Insane {
                reason: "node has no pointer slots",
            });
        }
        if index > self.num_keys() {
            return Err(Error::InvalidIndex {
                index,
                limit: self.num_keys() + 1,
            });
        }
        Ok(index * self.interior_unit())
    }

    /// Child pointer in slot `index`, `0 <= index <= num_keys`.
    pub fn ptr_at(&self, index: usize) -> Result<u32> {
        let offset = self.check_ptr_index(index)?;
        let raw: [u8; PTR_SIZE] = self.payload[offset..offset + PTR_SIZE]
            .try_into()
            .expect("pointer slot width");
        Ok(u32::from_ne_bytes(raw))
    }

    pub fn set_ptr(&mut self, index: usize, block: u32) -> Result<()> {
        let offset = self.check_ptr_index(index)?;
        self.payload[offset..offset + PTR_SIZE].copy_from_slice(&block.to_ne_bytes());
        Ok(())
    }

    /// Inserts a key/value pair into a leaf, keeping slots sorted.
    ///
    /// A leaf that is already at capacity reports `NoSpace`; the split
    /// policy keeps nodes below capacity between operations, so this is
    /// reachable only after a previous insert aborted on allocator
    /// exhaustion.
    pub fn insert_leaf_entry(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        if self.node_type() != NodeType::Leaf {
            return Err(Error::Insane {
                reason: "entry insert on a non-leaf node",
            });
        }
        let count = self.num_keys();
        if count >= self.leaf_capacity() {
            return Err(Error::NoSpace);
        }

        let mut slot = count;
        for i in 0..count {
            if key < self.key_at(i)? {
                slot = i;
                break;
            }
        }

        if slot < count {
            let unit = self.leaf_unit();
            let start = slot * unit;
            self.payload
                .copy_within(start..start + (count - slot) * unit, start + unit);
        }

        self.set_num_keys(count + 1);
        self.set_key(slot, key)?;
        self.set_value(slot, value)?;
        Ok(())
    }

    /// Inserts a separator key and its right child pointer into an
    /// interior node, keeping slots sorted.
    pub fn insert_separator(&mut self, key: &[u8], right_child: u32) -> Result<()> {
        if !self.node_type().is_interior() {
            return Err(Error::Insane {
                reason: "separator insert on a non-interior node",
            });
        }
        let count = self.num_keys();
        if count >= self.interior_capacity() {
            return Err(Error::NoSpace);
        }

        let mut slot = count;
        for i in 0..count {
            if key < self.key_at(i)? {
                slot = i;
                break;
            }
        }

        if slot < count {
            // Each unit is a key followed by the pointer to its right, so
            // this shifts (K[slot], P[slot+1]) .. (K[count-1], P[count]) one
            // unit toward the tail.
            let unit = self.interior_unit();
            let start = PTR_SIZE + slot * unit;
            self.payload
                .copy_within(start..start + (count - slot) * unit, start + unit);
        }

        self.set_num_keys(count + 1);
        self.set_key(slot, key)?;
        self.set_ptr(slot + 1, right_child)?;
        Ok(())
    }

    /// Splits a full node in two and returns the new right sibling plus
    /// the separator key for the parent.
    ///
    /// Leaf split keeps `(n + 2) / 2` pairs on the left and retains the
    /// separator (the last left key) in the leaf, which is copy-up
    /// discipline. Interior split
    /// keeps `n / 2` keys and promotes `K[n/2]`: the separator disappears
    /// from both halves, and the right sibling takes the pointer block
    /// starting at `P[n/2 + 1]`.
    pub fn split(&mut self) -> Result<(Node, Vec<u8>)> {
        let count = self.num_keys();
        let mut right = Node::new(
            self.node_type(),
            self.header.key_size,
            self.header.value_size,
            self.header.block_size,
        );
        right.header.root_block = self.header.root_block;

        let separator;
        match self.node_type() {
            NodeType::Leaf => {
                let left_keep = (count + 2) / 2;
                let right_take = count - left_keep;
                separator = self.key_at(left_keep - 1)?.to_vec();

                let unit = self.leaf_unit();
                let start = left_keep * unit;
                let len = right_take * unit;
                right.payload[..len].copy_from_slice(&self.payload[start..start + len]);

                self.set_num_keys(left_keep);
                right.set_num_keys(right_take);
            }
            NodeType::Root | NodeType::Interior => {
                let left_keep = count / 2;
                let right_take = count - left_keep - 1;
                separator = self.key_at(left_keep)?.to_vec();

                let unit = self.interior_unit();
                let start = (left_keep + 1) * unit;
                let len = right_take * unit + PTR_SIZE;
                right.payload[..len].copy_from_slice(&self.payload[start..start + len]);

                self.set_num_keys(left_keep);
                right.set_num_keys(right_take);
            }
            _ => {
                return Err(Error::Insane {
                    reason: "split of a node that is not in the tree",
                })
            }
        }

        Ok((right, separator))
    }
}
