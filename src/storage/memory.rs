//! Heap-backed block device.
//!
//! `MemoryCache` keeps the whole device in one `Vec<u8>` and tracks which
//! blocks the tree has allocated. Reads and writes also bump counters, so
//! tests can assert on I/O traffic without instrumenting the engine.

use std::cell::Cell;

use hashbrown::HashSet;

use crate::error::{Error, Result};

use super::BufferCache;

/// An in-memory block device with allocation tracking.
#[derive(Debug)]
pub struct MemoryCache {
    block_size: usize,
    num_blocks: u32,
    blocks: Vec<u8>,
    allocated: HashSet<u32>,
    reads: Cell<u64>,
    writes: u64,
}

impl MemoryCache {
    /// Creates a zero-filled device of `num_blocks` blocks of `block_size`
    /// bytes each.
    pub fn new(block_size: usize, num_blocks: u32) -> Self {
        assert!(block_size > 0, "block size must be nonzero");
        Self {
            block_size,
            num_blocks,
            blocks: vec![0u8; block_size * num_blocks as usize],
            allocated: HashSet::new(),
            reads: Cell::new(0),
            writes: 0,
        }
    }

    /// Blocks the tree has allocated and not yet released.
    pub fn allocated_blocks(&self) -> &HashSet<u32> {
        &self.allocated
    }

    /// Number of currently allocated blocks.
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }

    /// Total block reads served.
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    /// Total block writes served.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn check_block(&self, block: u32) -> Result<usize> {
        if block >= self.num_blocks {
            return Err(Error::BadBlock {
                block,
                limit: self.num_blocks,
            });
        }
        Ok(block as usize * self.block_size)
    }
}

impl BufferCache for MemoryCache {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn num_blocks(&self) -> u32 {
        self.num_blocks
    }

    fn read_block(&self, block: u32, buf: &mut [u8]) -> Result<()> {
        assert_eq!(buf.len(), self.block_size, "read buffer is not one block");
        let offset = self.check_block(block)?;
        buf.copy_from_slice(&self.blocks[offset..offset + self.block_size]);
        self.reads.set(self.reads.get() + 1);
        Ok(())
    }

    fn write_block(&mut self, block: u32, buf: &[u8]) -> Result<()> {
        assert_eq!(buf.len(), self.block_size, "write buffer is not one block");
        let offset = self.check_block(block)?;
        self.blocks[offset..offset + self.block_size].copy_from_slice(buf);
        self.writes += 1;
        Ok(())
    }

    fn notify_allocate(&mut self, block: u32) {
        self.allocated.insert(block);
    }

    fn notify_deallocate(&mut self, block: u32) {
        self.allocated.remove(&block);
    }
}
