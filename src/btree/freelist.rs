//! # Free-Block Allocator
//!
//! Unallocated blocks form an intrusive singly-linked list: the
//! superblock's `free_link` is the head, each free block's own `free_link`
//! is the next pointer, and 0 terminates the chain (block 0 can never be
//! free). There is no side table: a block on the list carries its own
//! link, so tracking free space costs zero extra blocks.
//!
//! Allocation pops the head; deallocation pushes onto it. Both rewrite the
//! superblock immediately, so the on-device list is well formed between
//! any two operations. The buffer cache is notified of every transition so
//! it can keep its own allocated-set bookkeeping.
//!
//! The contents of a freshly allocated block are whatever the free-list
//! header left behind; the caller must rewrite and store it before linking
//! it into the tree.

use tracing::trace;

use crate::error::{Error, Result};
use crate::storage::BufferCache;

use super::node::{Node, NodeType};
use super::tree::BTreeIndex;

impl<'a, C: BufferCache> BTreeIndex<'a, C> {
    /// Takes one block off the free list.
    ///
    /// Returns `NoSpace` when the list is empty. Finding a head block that
    /// is not marked unallocated means the device lied to us; that is a
    /// structural impossibility and terminates the process.
    pub fn allocate_node(&mut self) -> Result<u32> {
        let head = self.superblock.free_link();
        if head == 0 {
            return Err(Error::NoSpace);
        }

        let node = Node::load(&*self.cache, head)?;
        assert!(
            node.node_type() == NodeType::Unallocated,
            "free-list head {} is not an unallocated block",
            head
        );

        self.superblock.set_free_link(node.free_link());
        self.superblock.store(self.cache, self.superblock_index)?;
        self.cache.notify_allocate(head);

        trace!(block = head, "allocated block");
        Ok(head)
    }

    /// Pushes `block` back onto the free list and retags it unallocated.
    pub fn deallocate_node(&mut self, block: u32) -> Result<()> {
        let mut node = Node::load(&*self.cache, block)?;
        assert!(
            node.node_type() != NodeType::Unallocated,
            "block {} is already on the free list",
            block
        );

        node.set_node_type(NodeType::Unallocated);
        node.set_free_link(self.superblock.free_link());
        node.store(self.cache, block)?;

        self.superblock.set_free_link(block);
        self.superblock.store(self.cache, self.superblock_index)?;
        self.cache.notify_deallocate(block);

        trace!(block, "released block");
        Ok(())
    }

    /// Walks the free list and returns its length, validating the chain
    /// on the way: every link must be an unallocated block and the walk
    /// must terminate within the device size.
    pub fn free_block_count(&self) -> Result<u32> {
        let mut count = 0u32;
        let mut cursor = self.superblock.free_link();
        while cursor != 0 {
            count += 1;
            if count > self.cache.num_blocks() {
                return Err(Error::Insane {
                    reason: "free list does not terminate",
                });
            }
            let node = Node::load(&*self.cache, cursor)?;
            if node.node_type() != NodeType::Unallocated {
                return Err(Error::Insane {
                    reason: "free list links through an allocated block",
                });
            }
            cursor = node.free_link();
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;

    fn device() -> MemoryCache {
        MemoryCache::new(256, 16)
    }

    #[test]
    fn fresh_tree_chains_all_spare_blocks() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        // 16 blocks minus superblock and root.
        assert_eq!(tree.free_block_count().unwrap(), 14);
    }

    #[test]
    fn allocate_pops_the_head_in_order() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert_eq!(tree.allocate_node().unwrap(), 2);
        assert_eq!(tree.allocate_node().unwrap(), 3);
        assert_eq!(tree.free_block_count().unwrap(), 12);
    }

    #[test]
    fn allocate_persists_the_new_head() {
        let mut cache = device();
        {
            let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
            tree.attach(0, true).unwrap();
            tree.allocate_node().unwrap();
        }

        let superblock = Node::load(&cache, 0).unwrap();
        assert_eq!(superblock.free_link(), 3);
    }

    #[test]
    fn deallocate_pushes_onto_the_head() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        let block = tree.allocate_node().unwrap();
        let leaf = Node::new(NodeType::Leaf, 8, 8, 256);
        leaf.store(tree.cache, block).unwrap();

        tree.deallocate_node(block).unwrap();

        assert_eq!(tree.free_block_count().unwrap(), 14);
        // The released block is the new head and will be handed out next.
        assert_eq!(tree.allocate_node().unwrap(), block);
    }

    #[test]
    fn allocator_notifies_the_cache() {
        let mut cache = device();
        {
            let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
            tree.attach(0, true).unwrap();
            let block = tree.allocate_node().unwrap();
            let leaf = Node::new(NodeType::Leaf, 8, 8, 256);
            leaf.store(tree.cache, block).unwrap();
            tree.deallocate_node(block).unwrap();
        }

        // Superblock and root stay allocated; the round-tripped block does
        // not.
        assert_eq!(cache.allocated_count(), 2);
        assert!(cache.allocated_blocks().contains(&0));
        assert!(cache.allocated_blocks().contains(&1));
    }

    #[test]
    fn exhausting_the_list_reports_no_space() {
        let mut cache = device();
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        for _ in 0..14 {
            tree.allocate_node().unwrap();
        }

        assert!(matches!(tree.allocate_node(), Err(Error::NoSpace)));
        assert_eq!(tree.free_block_count().unwrap(), 0);
    }

    #[test]
    #[should_panic(expected = "not an unallocated block")]
    fn allocating_a_corrupt_head_panics() {
        let mut cache = device();
        {
            let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
            tree.attach(0, true).unwrap();
        }

        // Stamp a leaf over the free-list head behind the tree's back.
        let leaf = Node::new(NodeType::Leaf, 8, 8, 256);
        leaf.store(&mut cache, 2).unwrap();

        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, false).unwrap();
        let _ = tree.allocate_node();
    }
}
