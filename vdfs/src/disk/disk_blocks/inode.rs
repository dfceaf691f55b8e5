use crate::ByteSerializable;
use alloc::string::String;
use byteorder::{ByteOrder, LittleEndian};

/// The fixed number of catalog slots on every virtual disk.
pub const MAX_FILES: usize = 64;
/// The per-file block quota; a file never spans more than this many blocks.
pub const INODE_BLOCKS: usize = 16;
/// Width of the persisted name field, including the NUL terminator position.
pub const MAX_FILENAME_LENGTH: usize = 32;

/// One catalog entry: the file's name, size and the ordered list of data
/// blocks backing it. A record is 128 bytes on disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Inode {
    /// The file name, NUL padded. At most 31 bytes are significant.
    name: [u8; MAX_FILENAME_LENGTH],
    /// The file size in bytes.
    file_size: u64,
    /// Whether this slot holds a live file.
    used: bool,
    /// The allocated block indices, in file order. Entries past
    /// `blocks_allocated` are meaningless.
    block_index: [u32; INODE_BLOCKS],
    /// How many entries of `block_index` are valid. Always
    /// `ceil(file_size / block_size)`.
    blocks_allocated: u32,
}

impl Inode {
    pub fn new(str_name: &str, file_size: u64, blocks: &[u32]) -> Self {
        let mut name = [0u8; MAX_FILENAME_LENGTH];

        for (i, b) in str_name.as_bytes().iter().enumerate() {
            if i >= MAX_FILENAME_LENGTH - 1 {
                break;
            }

            name[i] = *b;
        }

        let mut block_index = [0u32; INODE_BLOCKS];
        block_index[..blocks.len()].copy_from_slice(blocks);

        return Self {
            name,
            file_size,
            used: true,
            block_index,
            blocks_allocated: blocks.len() as u32,
        };
    }

    /// An unused slot: size 0, no blocks, empty name.
    pub fn empty() -> Self {
        return Self {
            name: [0u8; MAX_FILENAME_LENGTH],
            file_size: 0,
            used: false,
            block_index: [0u32; INODE_BLOCKS],
            blocks_allocated: 0,
        };
    }

    /// Resets this slot to the unused state, destroying all block references.
    /// The caller must have already released those blocks in the bitmap.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(MAX_FILENAME_LENGTH);

        return String::from_utf8_lossy(&self.name[..end]).into_owned();
    }

    /// Exact, case-sensitive comparison against the stored name.
    pub fn matches_name(&self, other: &str) -> bool {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(MAX_FILENAME_LENGTH);

        return &self.name[..end] == other.as_bytes();
    }

    #[inline]
    pub fn file_size(&self) -> u64 {
        return self.file_size;
    }

    #[inline]
    pub fn is_used(&self) -> bool {
        return self.used;
    }

    #[inline]
    pub fn blocks_allocated(&self) -> usize {
        return self.blocks_allocated as usize;
    }

    /// The valid block indices, in file order.
    pub fn blocks(&self) -> &[u32] {
        return &self.block_index[..self.blocks_allocated as usize];
    }

    pub fn block_at(&self, position: usize) -> u32 {
        return self.block_index[position];
    }

    pub fn set_block(&mut self, position: usize, index: u32) {
        self.block_index[position] = index;
    }

    /// The size of an inode record.
    pub fn size() -> u64 {
        return 128; // 109 bytes of fields, padded to 128.
    }
}

impl ByteSerializable for Inode {
    type BytesArrayType = [u8; 128];

    fn to_bytes(&self) -> Self::BytesArrayType {
        let mut bytes = [0u8; 128];
        let mut offset = 0;

        bytes[..MAX_FILENAME_LENGTH].copy_from_slice(&self.name);
        offset += MAX_FILENAME_LENGTH;

        LittleEndian::write_u64(&mut bytes[offset..], self.file_size);
        offset += 8;

        bytes[offset] = self.used as u8;
        offset += 1;

        for index in self.block_index.iter() {
            LittleEndian::write_u32(&mut bytes[offset..], *index);
            offset += 4;
        }

        LittleEndian::write_u32(&mut bytes[offset..], self.blocks_allocated);
        //offset += 4; // Increment if in further revisions data is added beyond this point

        // bytes 109..128 are reserved

        return bytes;
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < 109 {
            return None;
        }

        let mut name = [0u8; MAX_FILENAME_LENGTH];
        name.copy_from_slice(&bytes[..MAX_FILENAME_LENGTH]);

        let mut offset = MAX_FILENAME_LENGTH;

        let file_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;

        let used = bytes[offset] != 0;
        offset += 1;

        let mut block_index = [0u32; INODE_BLOCKS];
        for index in block_index.iter_mut() {
            *index = LittleEndian::read_u32(&bytes[offset..]);
            offset += 4;
        }

        let blocks_allocated = LittleEndian::read_u32(&bytes[offset..]);

        if blocks_allocated as usize > INODE_BLOCKS {
            return None;
        }

        return Some(Self {
            name,
            file_size,
            used,
            block_index,
            blocks_allocated,
        });
    }
}
