use super::disk_blocks::{Inode, SuperBlock, INODE_BLOCKS, MAX_FILENAME_LENGTH, MAX_FILES};
use super::disk_handler::{ByteSink, ByteSource, DiskImage};
use crate::bitmap::BitMap;
use crate::{ByteSerializable, VdfsError, VdfsErrorConvertible};
use alloc::string::String;
use alloc::{vec, vec::Vec};

/// The caller's answer when `add_file` hits an existing file with the same
/// name. Supplied as a callback so the library never talks to a terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverwriteChoice {
    Overwrite,
    Cancel,
}

/// A handle to one virtual disk. Every operation loads nothing lazily: the
/// super-block, inode table and bitmap are read once by `create`/`open`,
/// mutated in memory and written back by the operation that changed them.
pub struct Disk<'a, E: VdfsErrorConvertible> {
    handler: &'a mut dyn DiskImage<E>,

    super_block: SuperBlock,
    bitmap: BitMap,

    // Always exactly MAX_FILES entries, in slot order.
    inodes: Vec<Inode>,
}

macro_rules! unwrap_image_error {
    ($v:expr) => {
        match $v {
            Ok(val) => val,
            Err(e) => return Err(e.into_vdfs_error()),
        }
    };
}

impl<'a, E: VdfsErrorConvertible> Disk<'a, E> {
    /// Formats a new virtual disk: writes the super-block, a zeroed inode
    /// table and a zeroed bitmap, and pre-sizes the backing extent to
    /// `disk_size` bytes by writing a sentinel byte at the last offset.
    pub fn create(
        handler: &'a mut dyn DiskImage<E>,
        name: &str,
        disk_size: u64,
        block_size: u64,
    ) -> Result<Self, VdfsError<E>> {
        if block_size == 0 || disk_size / block_size == 0 {
            return Err(VdfsError::InvalidBlockSize);
        }

        let super_block = SuperBlock::new(name, disk_size, block_size);

        unwrap_image_error!(handler.write_bytes(&super_block.to_bytes().to_vec(), 0));
        unwrap_image_error!(handler.zero_range(
            super_block.inode_area_offset(),
            super_block.bitmap_offset() + super_block.bitmap_size()
        ));

        // The metadata areas may already reach past disk_size on very small
        // disks; only then is the sentinel redundant.
        if disk_size > super_block.data_area_offset() {
            unwrap_image_error!(handler.write_bytes(&vec![0u8], disk_size - 1));
        }

        let bitmap = BitMap::new(super_block.block_count() as usize);
        let inodes = vec![Inode::empty(); MAX_FILES];

        return Ok(Self {
            handler,
            super_block,
            bitmap,
            inodes,
        });
    }

    /// Opens an existing virtual disk, loading the super-block, inode table
    /// and bitmap. The image is not validated beyond record lengths.
    pub fn open(handler: &'a mut dyn DiskImage<E>) -> Result<Self, VdfsError<E>> {
        let bytes = unwrap_image_error!(handler.read_bytes(0, SuperBlock::size()));
        let super_block = match SuperBlock::from_bytes(&bytes) {
            Some(s) => s,
            None => return Err(VdfsError::CorruptedSuperBlock),
        };

        let inode_bytes = unwrap_image_error!(
            handler.read_bytes(super_block.inode_area_offset(), super_block.inode_area_size())
        );

        let record = Inode::size() as usize;
        let mut inodes = Vec::with_capacity(MAX_FILES);

        for i in 0..MAX_FILES {
            let offset = i * record;

            if offset + record > inode_bytes.len() {
                return Err(VdfsError::CorruptedInode);
            }

            inodes.push(match Inode::from_bytes(&inode_bytes[offset..offset + record]) {
                Some(node) => node,
                None => return Err(VdfsError::CorruptedInode),
            });
        }

        let bitmap_bytes = unwrap_image_error!(
            handler.read_bytes(super_block.bitmap_offset(), super_block.bitmap_size())
        );
        let bitmap = BitMap::from_bytes(&bitmap_bytes, super_block.block_count() as usize);

        return Ok(Self {
            handler,
            super_block,
            bitmap,
            inodes,
        });
    }

    /// Creates a catalog entry for a file of `size` bytes, claiming
    /// `ceil(size / block_size)` blocks first-fit from index 0. On any
    /// failure nothing is persisted and the in-memory state is unchanged.
    ///
    /// If a used slot already carries `name`, `on_collision` decides between
    /// reusing that slot and cancelling. On overwrite the slot's previous
    /// allocation is released before the new one is made, so the old blocks
    /// are eligible for reuse by the same call.
    pub fn add_file(
        &mut self,
        name: &str,
        size: u64,
        on_collision: &mut dyn FnMut() -> OverwriteChoice,
    ) -> Result<usize, VdfsError<E>> {
        if name.len() >= MAX_FILENAME_LENGTH {
            return Err(VdfsError::NameTooLong);
        }

        let mut released: Vec<u32> = Vec::new();

        let slot = match self.file_index(name) {
            Some(index) => match on_collision() {
                OverwriteChoice::Overwrite => {
                    released = self.inodes[index].blocks().to_vec();
                    self.release_blocks(&released);
                    index
                }
                OverwriteChoice::Cancel => return Err(VdfsError::Cancelled),
            },
            None => match self.free_slot() {
                Some(index) => index,
                None => return Err(VdfsError::NoFreeInode),
            },
        };

        let required = Self::blocks_needed(size, self.super_block.block_size());

        if required > INODE_BLOCKS {
            self.reclaim_blocks(&released);
            return Err(VdfsError::FileTooLarge);
        }

        let blocks = match self.allocate_blocks(required) {
            Ok(blocks) => blocks,
            Err(e) => {
                self.reclaim_blocks(&released);
                return Err(e);
            }
        };

        self.inodes[slot] = Inode::new(name, size, &blocks);

        self.write_inode_table()?;
        self.write_bitmap()?;

        return Ok(slot);
    }

    /// Removes a file by name, releasing its blocks and clearing its slot.
    pub fn remove_file(&mut self, name: &str) -> Result<(), VdfsError<E>> {
        let index = match self.file_index(name) {
            Some(index) => index,
            None => return Err(VdfsError::FileNotFound(String::from(name))),
        };

        let blocks = self.inodes[index].blocks().to_vec();
        self.release_blocks(&blocks);
        self.inodes[index].clear();

        self.write_inode_table()?;
        self.write_bitmap()?;

        return Ok(());
    }

    /// Copies of the used inodes, in ascending slot order.
    pub fn list_files(&self) -> Vec<Inode> {
        let mut files = Vec::new();

        for inode in &self.inodes {
            if inode.is_used() {
                files.push(*inode);
            }
        }

        return files;
    }

    /// The slot index of the used inode carrying `name`, if any.
    pub fn file_index(&self, name: &str) -> Option<usize> {
        for (i, inode) in self.inodes.iter().enumerate() {
            if inode.is_used() && inode.matches_name(name) {
                return Some(i);
            }
        }

        return None;
    }

    /// A bit-for-bit snapshot of the free-block bitmap. Rendering it for
    /// display is the caller's concern.
    pub fn usage(&self) -> Vec<u8> {
        return self.bitmap.as_bytes().to_vec();
    }

    /// Streams the contents of the named file in from `source`, one block at
    /// a time. Only the bytes actually read are written; the final block of
    /// a file is usually partial. The catalog entry is untouched, it was
    /// committed by `add_file`, so a mid-transfer failure leaves already
    /// written blocks in place.
    pub fn copy_in(
        &mut self,
        name: &str,
        source: &mut dyn ByteSource<E>,
    ) -> Result<(), VdfsError<E>> {
        let index = match self.file_index(name) {
            Some(index) => index,
            None => return Err(VdfsError::FileNotFound(String::from(name))),
        };

        let block_size = self.super_block.block_size() as usize;
        let blocks = self.inodes[index].blocks().to_vec();
        let mut buffer = vec![0u8; block_size];

        for block in blocks {
            let mut filled = 0;

            while filled < block_size {
                let count = unwrap_image_error!(source.read(&mut buffer[filled..]));

                if count == 0 {
                    break;
                }

                filled += count;
            }

            if filled == 0 {
                break;
            }

            let location = self.block_location(block)?;
            unwrap_image_error!(self
                .handler
                .write_bytes(&buffer[..filled].to_vec(), location));
        }

        return Ok(());
    }

    /// Streams the contents of the named file out to `sink`, exactly
    /// `file_size` bytes, and returns the count written. A backing read or
    /// sink write that transfers fewer bytes than requested indicates image
    /// corruption and fails the operation outright.
    pub fn copy_out(&self, name: &str, sink: &mut dyn ByteSink<E>) -> Result<u64, VdfsError<E>> {
        let index = match self.file_index(name) {
            Some(index) => index,
            None => return Err(VdfsError::FileNotFound(String::from(name))),
        };

        let inode = &self.inodes[index];
        let block_size = self.super_block.block_size();

        let mut remaining = inode.file_size();
        let mut written: u64 = 0;

        for block in inode.blocks() {
            if remaining == 0 {
                break;
            }

            let amount = if remaining < block_size {
                remaining
            } else {
                block_size
            };

            let location = self.block_location(*block)?;
            let bytes = unwrap_image_error!(self.handler.read_bytes(location, amount));

            if (bytes.len() as u64) < amount {
                return Err(VdfsError::ShortRead);
            }

            let mut sent = 0;

            while sent < bytes.len() {
                let count = unwrap_image_error!(sink.write(&bytes[sent..]));

                if count == 0 {
                    return Err(VdfsError::ShortWrite);
                }

                sent += count;
            }

            remaining -= amount;
            written += amount;
        }

        return Ok(written);
    }

    /// Compacts the disk: after completion every allocated block's index
    /// equals its rank in the scan order (inodes by ascending slot, blocks in
    /// file order), so live blocks are packed into `[0, total_allocated)`
    /// with per-file ordering preserved.
    ///
    /// When the destination block still holds live data the two blocks are
    /// exchanged and both owners' references updated; otherwise the block is
    /// moved and the bitmap bits flipped in a pair. The count of set bits
    /// never changes.
    pub fn defragment(&mut self) -> Result<(), VdfsError<E>> {
        let mut next_free: u32 = 0;

        for i in 0..MAX_FILES {
            if !self.inodes[i].is_used() {
                continue;
            }

            for position in 0..self.inodes[i].blocks_allocated() {
                let current = self.inodes[i].block_at(position);

                if current != next_free {
                    if self.bitmap.bit_at(next_free as usize) == Some(true) {
                        // The destination holds live data; find its owner and
                        // swap. A set bit with no owner is a leaked block and
                        // is left where it is.
                        if let Some((owner, owner_position)) = self.block_owner(next_free) {
                            self.exchange_blocks(current, next_free)?;
                            self.inodes[owner].set_block(owner_position, current);
                            self.inodes[i].set_block(position, next_free);

                            self.write_inode_table()?;
                        }
                    } else {
                        let contents = self.read_block(current)?;
                        self.write_block(next_free, &contents)?;

                        self.inodes[i].set_block(position, next_free);
                        self.bitmap.set_bit(current as usize, false);
                        self.bitmap.set_bit(next_free as usize, true);

                        self.write_bitmap()?;
                        self.write_inode_table()?;
                    }
                }

                next_free += 1;
            }
        }

        return Ok(());
    }

    pub fn number_of_files(&self) -> usize {
        return self.list_files().len();
    }

    pub fn free_file_slots(&self) -> usize {
        return MAX_FILES - self.number_of_files();
    }

    #[inline]
    pub fn block_size(&self) -> u64 {
        return self.super_block.block_size();
    }

    #[inline]
    pub fn block_count(&self) -> u64 {
        return self.super_block.block_count();
    }

    pub fn free_block_count(&self) -> usize {
        return self.bitmap.count_zeros();
    }

    pub fn free_block_space(&self) -> u64 {
        return (self.free_block_count() as u64) * self.block_size();
    }

    #[inline]
    pub fn disk_name(&self) -> String {
        return self.super_block.name();
    }

    /// Claims `count` blocks, first-fit ascending, and returns their indices
    /// in file order. On `InsufficientSpace` the bitmap is left unmodified.
    fn allocate_blocks(&mut self, count: usize) -> Result<Vec<u32>, VdfsError<E>> {
        let indices = match self.bitmap.find_free_blocks(count) {
            Some(indices) => indices,
            None => return Err(VdfsError::InsufficientSpace),
        };

        for index in &indices {
            self.bitmap.set_bit(*index, true);
        }

        return Ok(indices.iter().map(|i| *i as u32).collect());
    }

    /// Clears each index's bit. Clearing an already-clear bit is a no-op.
    fn release_blocks(&mut self, indices: &[u32]) {
        for index in indices {
            self.bitmap.set_bit(*index as usize, false);
        }
    }

    /// Rolls a release back after a failed overwrite, restoring the bits of
    /// the allocation that was optimistically freed.
    fn reclaim_blocks(&mut self, indices: &[u32]) {
        for index in indices {
            self.bitmap.set_bit(*index as usize, true);
        }
    }

    fn free_slot(&self) -> Option<usize> {
        for (i, inode) in self.inodes.iter().enumerate() {
            if !inode.is_used() {
                return Some(i);
            }
        }

        return None;
    }

    /// Which used inode references `block`, as (slot, position in its list).
    /// A deliberate linear re-scan; the table is bounded at MAX_FILES slots.
    fn block_owner(&self, block: u32) -> Option<(usize, usize)> {
        for i in 0..MAX_FILES {
            if !self.inodes[i].is_used() {
                continue;
            }

            for position in 0..self.inodes[i].blocks_allocated() {
                if self.inodes[i].block_at(position) == block {
                    return Some((i, position));
                }
            }
        }

        return None;
    }

    fn block_location(&self, index: u32) -> Result<u64, VdfsError<E>> {
        if (index as u64) >= self.super_block.block_count() {
            return Err(VdfsError::BlockIndexOutOfRange);
        }

        return Ok(
            self.super_block.data_area_offset() + (index as u64) * self.super_block.block_size()
        );
    }

    fn read_block(&self, index: u32) -> Result<Vec<u8>, VdfsError<E>> {
        let location = self.block_location(index)?;
        let bytes =
            unwrap_image_error!(self.handler.read_bytes(location, self.super_block.block_size()));

        if (bytes.len() as u64) < self.super_block.block_size() {
            return Err(VdfsError::ShortRead);
        }

        return Ok(bytes);
    }

    fn write_block(&mut self, index: u32, contents: &[u8]) -> Result<(), VdfsError<E>> {
        let location = self.block_location(index)?;
        unwrap_image_error!(self.handler.write_bytes(&contents.to_vec(), location));

        return Ok(());
    }

    /// Exchanges the raw contents of two data blocks through two block-sized
    /// buffers, bounds-checked against the block count.
    fn exchange_blocks(&mut self, first: u32, second: u32) -> Result<(), VdfsError<E>> {
        let first_contents = self.read_block(first)?;
        let second_contents = self.read_block(second)?;

        self.write_block(first, &second_contents)?;
        self.write_block(second, &first_contents)?;

        return Ok(());
    }

    /// Writes the full inode table back to the image.
    fn write_inode_table(&mut self) -> Result<(), VdfsError<E>> {
        let mut bytes = Vec::with_capacity(self.super_block.inode_area_size() as usize);

        for inode in &self.inodes {
            bytes.extend_from_slice(&inode.to_bytes());
        }

        unwrap_image_error!(self
            .handler
            .write_bytes(&bytes, self.super_block.inode_area_offset()));

        return Ok(());
    }

    /// Writes the free-block bitmap back to the image.
    fn write_bitmap(&mut self) -> Result<(), VdfsError<E>> {
        unwrap_image_error!(self.handler.write_bytes(
            &self.bitmap.as_bytes().to_vec(),
            self.super_block.bitmap_offset()
        ));

        return Ok(());
    }

    fn blocks_needed(size: u64, block_size: u64) -> usize {
        return ((size + block_size - 1) / block_size) as usize;
    }
}
