//! # Tree Engine
//!
//! `BTreeIndex` owns the superblock and drives every tree operation:
//! attach/detach lifecycle, lookup and update by descent, and insert with
//! split propagation and root growth. It holds a mutable borrow of the
//! buffer cache for its whole life and is the only writer of block 0 while
//! attached.
//!
//! ## Descent
//!
//! Lookup, update, and insert all route the same way at an interior node:
//! the first key `K[i]` with `key <= K[i]` selects child `P[i]`; if no key
//! qualifies the rightmost pointer is taken. Equal keys route left, which
//! pairs with the leaf split discipline below: a separator stays in the
//! left leaf, so the left subtree may contain a key equal to it.
//!
//! ## Insert
//!
//! Splits happen on the way back up, after the leaf insert:
//!
//! ```text
//! 1. Reject duplicates (lookup first).
//! 2. Empty root: allocate two empty leaves, seed the root with the key.
//! 3. Descend to the leaf, recording the ancestor path.
//! 4. Insert into the leaf.
//! 5. Walk the path bottom-up; any child now at capacity is split and its
//!    separator added to the parent.
//! 6. If the root itself filled, split it and install a fresh root one
//!    level up.
//! ```
//!
//! A node is split the moment it reaches capacity, so between operations
//! every node has room for one more entry and step 5 can never overflow a
//! parent.
//!
//! ## Write Ordering
//!
//! Children are stored before their parents on the split path, and the
//! superblock is rewritten immediately whenever the free-list head or the
//! root pointer changes. Between completed operations the device always
//! holds a well-formed tree plus a well-formed free list; an interrupted
//! insert is not crash-safe (no journaling).

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::BufferCache;

use super::node::{Node, NodeType};

/// A disk-backed B-tree index over a block device.
///
/// Keys and values are opaque byte strings of the fixed widths the tree
/// was created with; keys compare lexicographically as unsigned bytes.
pub struct BTreeIndex<'a, C: BufferCache> {
    pub(super) cache: &'a mut C,
    pub(super) superblock_index: u32,
    pub(super) superblock: Node,
    unique: bool,
}

impl<'a, C: BufferCache> BTreeIndex<'a, C> {
    /// Creates an unattached index handle.
    ///
    /// `key_size` and `value_size` only matter when the subsequent
    /// [`attach`](Self::attach) creates the tree; attaching to an existing
    /// tree adopts the widths recorded in its superblock. The `unique`
    /// flag is accepted for forward compatibility and currently ignored:
    /// duplicate keys are always rejected.
    pub fn new(key_size: u32, value_size: u32, cache: &'a mut C, unique: bool) -> Self {
        let block_size = cache.block_size() as u32;
        let superblock = Node::new(NodeType::Superblock, key_size, value_size, block_size);
        Self {
            cache,
            superblock_index: 0,
            superblock,
            unique,
        }
    }

    /// Mounts the tree. With `create`, the whole device is rewritten
    /// first: superblock at block 0, an empty root at block 1, and all
    /// remaining blocks chained onto the free list.
    pub fn attach(&mut self, init_block: u32, create: bool) -> Result<()> {
        assert_eq!(init_block, 0, "the superblock must live at block 0");
        self.superblock_index = init_block;

        if create {
            self.format_device()?;
        }

        self.superblock = Node::load(&*self.cache, init_block)?;
        if self.superblock.node_type() != NodeType::Superblock {
            return Err(Error::Insane {
                reason: "block 0 does not hold a superblock",
            });
        }

        debug!(
            root = self.superblock.root_block(),
            free_head = self.superblock.free_link(),
            "attached tree"
        );
        Ok(())
    }

    /// Unmounts the tree by flushing the in-memory superblock.
    pub fn detach(&mut self) -> Result<()> {
        self.superblock.store(self.cache, self.superblock_index)
    }

    fn format_device(&mut self) -> Result<()> {
        let key_size = self.superblock.key_size() as u32;
        let value_size = self.superblock.value_size() as u32;
        if key_size == 0 || value_size == 0 {
            return Err(Error::Insane {
                reason: "key and value widths must be nonzero",
            });
        }
        // An interior split of n keys leaves n - n/2 - 1 on the right, so
        // splits below three keys would produce an empty sibling.
        if self.superblock.leaf_capacity() < 2 || self.superblock.interior_capacity() < 3 {
            return Err(Error::Insane {
                reason: "block size too small for the configured key/value widths",
            });
        }

        let num_blocks = self.cache.num_blocks();
        if num_blocks < 2 {
            return Err(Error::NoSpace);
        }
        let block_size = self.cache.block_size() as u32;
        let free_head = if num_blocks > 2 { 2 } else { 0 };

        let mut superblock = Node::new(NodeType::Superblock, key_size, value_size, block_size);
        superblock.set_root_block(1);
        superblock.set_free_link(free_head);
        self.cache.notify_allocate(0);
        superblock.store(self.cache, 0)?;

        let mut root = Node::new(NodeType::Root, key_size, value_size, block_size);
        root.set_root_block(1);
        root.set_free_link(free_head);
        self.cache.notify_allocate(1);
        root.store(self.cache, 1)?;

        for block in 2..num_blocks {
            let mut free = Node::new(NodeType::Unallocated, key_size, value_size, block_size);
            free.set_root_block(1);
            free.set_free_link(if block + 1 == num_blocks { 0 } else { block + 1 });
            free.store(self.cache, block)?;
        }

        debug!(
            blocks = num_blocks,
            block_size, "formatted device as an empty tree"
        );
        Ok(())
    }

    /// Key width the tree stores.
    pub fn key_size(&self) -> usize {
        self.superblock.key_size()
    }

    /// Value width the tree stores.
    pub fn value_size(&self) -> usize {
        self.superblock.value_size()
    }

    /// Current root block number.
    pub fn root_block(&self) -> u32 {
        self.superblock.root_block()
    }

    /// The uniqueness flag passed at construction. Currently ignored.
    pub fn unique(&self) -> bool {
        self.unique
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_size() {
            return Err(Error::KeyWidth {
                expected: self.key_size(),
                actual: key.len(),
            });
        }
        Ok(())
    }

    fn check_value(&self, value: &[u8]) -> Result<()> {
        if value.len() != self.value_size() {
            return Err(Error::ValueWidth {
                expected: self.value_size(),
                actual: value.len(),
            });
        }
        Ok(())
    }

    /// Routing rule shared by every descent: first key at or above `key`
    /// selects its left pointer, otherwise fall through to the rightmost.
    fn route(node: &Node, key: &[u8]) -> Result<u32> {
        for i in 0..node.num_keys() {
            if key <= node.key_at(i)? {
                return node.ptr_at(i);
            }
        }
        node.ptr_at(node.num_keys())
    }

    fn locate_leaf(&self, key: &[u8]) -> Result<(u32, Node)> {
        let mut current = self.superblock.root_block();
        let mut hops = 0u32;
        loop {
            if hops > self.cache.num_blocks() {
                return Err(Error::Insane {
                    reason: "descent did not terminate",
                });
            }
            hops += 1;

            let node = Node::load(&*self.cache, current)?;
            match node.node_type() {
                NodeType::Root | NodeType::Interior => {
                    if node.num_keys() == 0 {
                        return Err(Error::NonExistent);
                    }
                    current = Self::route(&node, key)?;
                }
                NodeType::Leaf => return Ok((current, node)),
                _ => {
                    return Err(Error::Insane {
                        reason: "descent reached a node outside the tree",
                    })
                }
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn lookup(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.check_key(key)?;
        let (_, leaf) = self.locate_leaf(key)?;
        for i in 0..leaf.num_keys() {
            if leaf.key_at(i)? == key {
                return Ok(leaf.value_at(i)?.to_vec());
            }
        }
        Err(Error::NonExistent)
    }

    /// Overwrites the value stored under an existing `key`.
    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_key(key)?;
        self.check_value(value)?;
        let (block, mut leaf) = self.locate_leaf(key)?;
        for i in 0..leaf.num_keys() {
            if leaf.key_at(i)? == key {
                leaf.set_value(i, value)?;
                return leaf.store(self.cache, block);
            }
        }
        Err(Error::NonExistent)
    }

    /// Inserts a new key/value pair. Duplicate keys are rejected with
    /// `Conflict`.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_key(key)?;
        self.check_value(value)?;

        match self.lookup(key) {
            Ok(_) => return Err(Error::Conflict),
            Err(Error::NonExistent) => {}
            Err(err) => return Err(err),
        }

        let root = Node::load(&*self.cache, self.superblock.root_block())?;
        if root.num_keys() == 0 {
            self.seed_root(key)?;
        }

        self.insert_descend(key, value)?;

        if self.is_full(self.superblock.root_block())? {
            self.grow_root()?;
        }
        Ok(())
    }

    /// First insert into an empty tree: hang two empty leaves off the root
    /// and let the descent place the pair in the left one.
    fn seed_root(&mut self, key: &[u8]) -> Result<()> {
        let leaf = Node::new(
            NodeType::Leaf,
            self.superblock.key_size() as u32,
            self.superblock.value_size() as u32,
            self.superblock.block_size() as u32,
        );

        let left = self.allocate_node()?;
        leaf.store(self.cache, left)?;
        let right = match self.allocate_node() {
            Ok(block) => block,
            Err(err) => {
                // Release the half-built pair so NoSpace leaves the free
                // list conserved.
                self.deallocate_node(left)?;
                return Err(err);
            }
        };
        leaf.store(self.cache, right)?;

        let root_block = self.superblock.root_block();
        let mut root = Node::load(&*self.cache, root_block)?;
        root.set_num_keys(1);
        root.set_key(0, key)?;
        root.set_ptr(0, left)?;
        root.set_ptr(1, right)?;
        root.store(self.cache, root_block)
    }

    fn insert_descend(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut path: SmallVec<[u32; 12]> = SmallVec::new();
        let mut current = self.superblock.root_block();
        loop {
            if path.len() > self.cache.num_blocks() as usize {
                return Err(Error::Insane {
                    reason: "descent did not terminate",
                });
            }

            let node = Node::load(&*self.cache, current)?;
            match node.node_type() {
                NodeType::Root | NodeType::Interior => {
                    if node.num_keys() == 0 {
                        return Err(Error::Insane {
                            reason: "empty interior node on the insert path",
                        });
                    }
                    path.push(current);
                    current = Self::route(&node, key)?;
                }
                NodeType::Leaf => break,
                _ => {
                    return Err(Error::Insane {
                        reason: "insert descended out of the tree",
                    })
                }
            }
        }

        let mut leaf = Node::load(&*self.cache, current)?;
        leaf.insert_leaf_entry(key, value)?;
        leaf.store(self.cache, current)?;

        // Walk back up, splitting any child the insert filled.
        let mut child = current;
        while let Some(parent) = path.pop() {
            if self.is_full(child)? {
                let (new_block, separator) = self.split_node(child)?;
                let mut parent_node = Node::load(&*self.cache, parent)?;
                parent_node.insert_separator(&separator, new_block)?;
                parent_node.store(self.cache, parent)?;
            }
            child = parent;
        }
        Ok(())
    }

    /// Whether `block`'s node has reached its slot capacity.
    fn is_full(&self, block: u32) -> Result<bool> {
        let node = Node::load(&*self.cache, block)?;
        let capacity = match node.node_type() {
            NodeType::Root | NodeType::Interior => node.interior_capacity(),
            NodeType::Leaf => node.leaf_capacity(),
            _ => {
                return Err(Error::Insane {
                    reason: "capacity check on a node outside the tree",
                })
            }
        };
        Ok(node.num_keys() >= capacity)
    }

    /// Splits the node at `block` onto a freshly allocated sibling and
    /// returns `(new_block, separator)`.
    fn split_node(&mut self, block: u32) -> Result<(u32, Vec<u8>)> {
        let mut left = Node::load(&*self.cache, block)?;
        let new_block = self.allocate_node()?;
        let (right, separator) = left.split()?;

        left.store(self.cache, block)?;
        right.store(self.cache, new_block)?;

        debug!(block, new_block, "split node");
        Ok((new_block, separator))
    }

    /// Splits a full root and installs a fresh root above the two halves,
    /// which are demoted to interior nodes.
    fn grow_root(&mut self) -> Result<()> {
        let old_root = self.superblock.root_block();

        let mut new_root = Node::new(
            NodeType::Root,
            self.superblock.key_size() as u32,
            self.superblock.value_size() as u32,
            self.superblock.block_size() as u32,
        );
        let new_root_block = self.allocate_node()?;
        new_root.set_root_block(new_root_block);
        // Written early so a failed split below can release the block.
        new_root.store(self.cache, new_root_block)?;

        let (new_sibling, separator) = match self.split_node(old_root) {
            Ok(split) => split,
            Err(err) => {
                self.deallocate_node(new_root_block)?;
                return Err(err);
            }
        };

        for block in [old_root, new_sibling] {
            let mut half = Node::load(&*self.cache, block)?;
            half.set_node_type(NodeType::Interior);
            half.store(self.cache, block)?;
        }

        new_root.set_num_keys(1);
        new_root.set_key(0, &separator)?;
        new_root.set_ptr(0, old_root)?;
        new_root.set_ptr(1, new_sibling)?;
        new_root.store(self.cache, new_root_block)?;

        self.superblock.set_root_block(new_root_block);
        self.superblock.store(self.cache, self.superblock_index)?;

        debug!(
            old_root,
            new_root = new_root_block,
            "root split; tree grew one level"
        );
        Ok(())
    }

    /// Deletion is a known non-goal; merge/redistribute on underflow is
    /// not implemented.
    pub fn delete(&mut self, _key: &[u8]) -> Result<()> {
        Err(Error::Unimplemented)
    }

    /// Number of node levels from the root down to a leaf.
    pub fn depth(&self) -> Result<usize> {
        let mut level = 1;
        let mut node = Node::load(&*self.cache, self.superblock.root_block())?;
        while node.node_type().is_interior() && node.num_keys() > 0 {
            if level > self.cache.num_blocks() as usize {
                return Err(Error::Insane {
                    reason: "depth walk did not terminate",
                });
            }
            node = Node::load(&*self.cache, node.ptr_at(0)?)?;
            level += 1;
        }
        Ok(level)
    }

    /// Verifies every structural invariant reachable from the superblock:
    /// node types, geometry, strict key order, separator bounds (left
    /// subtrees at or below, right subtrees strictly above), and a
    /// cycle-free free list of unallocated blocks.
    pub fn sanity_check(&self) -> Result<()> {
        let root_block = self.superblock.root_block();
        let root = Node::load(&*self.cache, root_block)?;
        if root.node_type() != NodeType::Root {
            return Err(Error::Insane {
                reason: "root block does not hold a root node",
            });
        }
        self.check_geometry(&root)?;

        let budget = self.cache.num_blocks() as usize;
        for i in 0..root.num_keys() {
            if i > 0 && root.key_at(i - 1)? >= root.key_at(i)? {
                return Err(Error::Insane {
                    reason: "root keys out of order",
                });
            }
            let bound = root.key_at(i)?;
            self.sanity_node(root.ptr_at(i)?, bound, true, budget)?;
            self.sanity_node(root.ptr_at(i + 1)?, bound, false, budget)?;
        }

        self.free_block_count()?;
        Ok(())
    }

    fn sanity_node(&self, block: u32, bound: &[u8], is_left: bool, budget: usize) -> Result<()> {
        if budget == 0 {
            return Err(Error::Insane {
                reason: "sanity descent did not terminate",
            });
        }

        let node = Node::load(&*self.cache, block)?;
        match node.node_type() {
            NodeType::Interior | NodeType::Leaf => {}
            NodeType::Root => {
                return Err(Error::Insane {
                    reason: "root node below the root block",
                })
            }
            _ => {
                return Err(Error::Insane {
                    reason: "tree points at an unallocated or superblock node",
                })
            }
        }
        self.check_geometry(&node)?;

        for i in 0..node.num_keys() {
            let key = node.key_at(i)?;
            if i > 0 && node.key_at(i - 1)? >= key {
                return Err(Error::Insane {
                    reason: "keys out of order",
                });
            }
            // Copy-up leaves the separator in the left leaf, so equality is
            // legal on the left and illegal on the right.
            if is_left {
                if bound < key {
                    return Err(Error::Insane {
                        reason: "left subtree key above its separator",
                    });
                }
            } else if key <= bound {
                return Err(Error::Insane {
                    reason: "right subtree key at or below its separator",
                });
            }
            if node.node_type().is_interior() {
                self.sanity_node(node.ptr_at(i)?, key, true, budget - 1)?;
                self.sanity_node(node.ptr_at(i + 1)?, key, false, budget - 1)?;
            }
        }
        Ok(())
    }

    fn check_geometry(&self, node: &Node) -> Result<()> {
        if node.key_size() != self.superblock.key_size()
            || node.value_size() != self.superblock.value_size()
        {
            return Err(Error::Insane {
                reason: "node geometry differs from the superblock",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;

    fn device() -> MemoryCache {
        MemoryCache::new(256, 64)
    }

    fn key(i: usize) -> Vec<u8> {
        format!("key{:05}", i).into_bytes()
    }

    fn val(i: usize) -> Vec<u8> {
        format!("val{:05}", i).into_bytes()
    }

    #[test]
    fn attach_create_formats_the_device() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert_eq!(tree.root_block(), 1);
        assert_eq!(tree.key_size(), 8);
        assert_eq!(tree.value_size(), 8);
        assert_eq!(tree.depth().unwrap(), 1);

        let superblock = Node::load(tree.cache, 0).unwrap();
        assert_eq!(superblock.node_type(), NodeType::Superblock);
        assert_eq!(superblock.free_link(), 2);

        let root = Node::load(tree.cache, 1).unwrap();
        assert_eq!(root.node_type(), NodeType::Root);
        assert_eq!(root.num_keys(), 0);

        let first_free = Node::load(tree.cache, 2).unwrap();
        assert_eq!(first_free.node_type(), NodeType::Unallocated);
        assert_eq!(first_free.free_link(), 3);
    }

    #[test]
    fn attach_adopts_geometry_from_disk() {
        let mut cache = device();
        {
            let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
            tree.attach(0, true).unwrap();
            tree.insert(&key(1), &val(1)).unwrap();
            tree.detach().unwrap();
        }

        // Widths passed here are placeholders; attach reads the real ones.
        let mut tree = BTreeIndex::new(0, 0, &mut cache, false);
        tree.attach(0, false).unwrap();
        assert_eq!(tree.key_size(), 8);
        assert_eq!(tree.value_size(), 8);
        assert_eq!(tree.lookup(&key(1)).unwrap(), val(1));
    }

    #[test]
    fn create_rejects_impossible_geometry() {
        let mut cache = MemoryCache::new(64, 8);
        let mut tree = BTreeIndex::new(16, 16, &mut cache, false);

        let err = tree.attach(0, true).unwrap_err();
        assert!(matches!(err, Error::Insane { .. }));
    }

    #[test]
    fn empty_tree_lookup_is_nonexistent() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert!(matches!(tree.lookup(&key(0)), Err(Error::NonExistent)));
    }

    #[test]
    fn insert_then_lookup_round_trips() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        tree.insert(b"aaaaaaaa", b"00000000").unwrap();

        assert_eq!(tree.lookup(b"aaaaaaaa").unwrap(), b"00000000".to_vec());
        assert!(matches!(tree.lookup(b"bbbbbbbb"), Err(Error::NonExistent)));
    }

    #[test]
    fn duplicate_insert_is_a_conflict() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        tree.insert(b"aaaaaaaa", b"00000000").unwrap();
        let err = tree.insert(b"aaaaaaaa", b"99999999").unwrap_err();

        assert!(matches!(err, Error::Conflict));
        assert_eq!(tree.lookup(b"aaaaaaaa").unwrap(), b"00000000".to_vec());
    }

    #[test]
    fn update_overwrites_and_misses_report() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        tree.insert(b"aaaaaaaa", b"00000000").unwrap();
        tree.update(b"aaaaaaaa", b"11111111").unwrap();

        assert_eq!(tree.lookup(b"aaaaaaaa").unwrap(), b"11111111".to_vec());
        assert!(matches!(
            tree.update(b"zzzzzzzz", b"22222222"),
            Err(Error::NonExistent)
        ));
    }

    #[test]
    fn key_and_value_widths_are_enforced() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert!(matches!(
            tree.lookup(b"short"),
            Err(Error::KeyWidth {
                expected: 8,
                actual: 5
            })
        ));
        assert!(matches!(
            tree.insert(b"aaaaaaaa", b"toolongvalue"),
            Err(Error::ValueWidth {
                expected: 8,
                actual: 12
            })
        ));
    }

    #[test]
    fn delete_is_unimplemented() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert!(matches!(tree.delete(b"aaaaaaaa"), Err(Error::Unimplemented)));
    }

    #[test]
    fn forty_inserts_split_leaves_and_stay_sane() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        for i in 0..40 {
            tree.insert(&key(i), &val(i)).unwrap();
            tree.sanity_check().unwrap();
        }

        for i in 0..40 {
            assert_eq!(tree.lookup(&key(i)).unwrap(), val(i), "key {}", i);
        }
        assert!(tree.depth().unwrap() >= 2);
    }

    #[test]
    fn descending_inserts_stay_sorted() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        for i in (0..40).rev() {
            tree.insert(&key(i), &val(i)).unwrap();
        }

        tree.sanity_check().unwrap();
        for i in 0..40 {
            assert_eq!(tree.lookup(&key(i)).unwrap(), val(i));
        }
    }

    #[test]
    fn strided_inserts_stay_sorted() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        // 37 is coprime with 200, so this visits every key once in a
        // scrambled order.
        for i in 0..200 {
            let k = (i * 37) % 200;
            tree.insert(&key(k), &val(k)).unwrap();
        }

        tree.sanity_check().unwrap();
        for i in 0..200 {
            assert_eq!(tree.lookup(&key(i)).unwrap(), val(i));
        }
    }

    #[test]
    fn root_split_grows_the_tree() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        for i in 0..300 {
            tree.insert(&key(i), &val(i)).unwrap();
            if i % 25 == 0 {
                tree.sanity_check().unwrap();
            }
        }

        tree.sanity_check().unwrap();
        assert!(tree.depth().unwrap() >= 3);
        assert!(tree.root_block() != 1, "root must have moved when it split");
        for i in 0..300 {
            assert_eq!(tree.lookup(&key(i)).unwrap(), val(i));
        }
    }

    #[test]
    fn unique_flag_is_recorded() {
        let mut cache = device();
        let tree = BTreeIndex::new(8, 8, &mut cache, true);
        assert!(tree.unique());
    }
}
