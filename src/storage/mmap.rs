//! # Memory-Mapped Block Device
//!
//! `MmapCache` maps a fixed-size file into the process address space and
//! serves block reads and writes as bounded slice copies. The file size is
//! decided at creation time and never changes: the tree's allocator works
//! over a fixed pool of blocks, so there is no grow path and no remapping.
//!
//! Durability is block-granular and best-effort: writes land in the
//! mapping immediately and reach the file on [`MmapCache::sync`] or when
//! the OS writes the dirty pages back. There is no journal underneath;
//! callers that need the superblock on disk call `sync` after detaching.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use hashbrown::HashSet;
use memmap2::MmapMut;

use crate::error::{Error, Result};

use super::BufferCache;

/// A fixed-size file-backed block device.
#[derive(Debug)]
pub struct MmapCache {
    mmap: MmapMut,
    block_size: usize,
    num_blocks: u32,
    allocated: HashSet<u32>,
}

impl MmapCache {
    /// Creates (or truncates) a device file of `num_blocks` blocks.
    pub fn create<P: AsRef<Path>>(path: P, block_size: usize, num_blocks: u32) -> Result<Self> {
        assert!(block_size > 0, "block size must be nonzero");

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(block_size as u64 * num_blocks as u64)?;

        // SAFETY: map_mut is unsafe because the mapping is undefined if the
        // file is modified externally. The file was just created with
        // read+write access and is not shared with other processes; the
        // mapping lives inside MmapCache and all access is bounds-checked
        // against block_size * num_blocks.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        Ok(Self {
            mmap,
            block_size,
            num_blocks,
            allocated: HashSet::new(),
        })
    }

    /// Opens an existing device file. The file length must be a nonzero
    /// multiple of `block_size`.
    pub fn open<P: AsRef<Path>>(path: P, block_size: usize) -> Result<Self> {
        assert!(block_size > 0, "block size must be nonzero");

        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let file_size = file.metadata()?.len();

        if file_size == 0 || file_size % block_size as u64 != 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "device file '{}' is {} bytes, not a nonzero multiple of block size {}",
                    path.display(),
                    file_size,
                    block_size
                ),
            )));
        }

        // SAFETY: same reasoning as in create(); the file is opened
        // read+write and the mapping is only accessed through
        // bounds-checked block offsets.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        Ok(Self {
            mmap,
            block_size,
            num_blocks: (file_size / block_size as u64) as u32,
            allocated: HashSet::new(),
        })
    }

    /// Flushes all dirty pages of the mapping to the file.
    pub fn sync(&self) -> Result<()> {
        self.mmap.flush()?;
        Ok(())
    }

    /// Blocks the tree has allocated since this device was opened.
    pub fn allocated_blocks(&self) -> &HashSet<u32> {
        &self.allocated
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

impl BufferCache for MmapCache {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn num_blocks(&self) -> u32 {
        self.num_blocks
    }

    fn read_block(&self, block: u32, buf: &mut [u8]) -> Result<()> {
        assert_eq!(buf.len(), self.block_size, "read buffer is not one block");
        let offset = self.check_block(block)?;
        buf.copy_from_slice(&self.mmap[offset..offset + self.block_size]);
        Ok(())
    }

    fn write_block(&mut self, block: u32, buf: &[u8]) -> Result<()> {
        assert_eq!(buf.len(), self.block_size, "write buffer is not one block");
        let offset = self.check_block(block)?;
        self.mmap[offset..offset + self.block_size].copy_from_slice(buf);
        Ok(())
    }

    fn notify_allocate(&mut self, block: u32) {
        self.allocated.insert(block);
    }

    fn notify_deallocate(&mut self, block: u32) {
        self.allocated.remove(&block);
    }
}
