use super::{Inode, MAX_FILES};
use crate::ByteSerializable;
use alloc::string::String;
use byteorder::{ByteOrder, LittleEndian};

const NAME_LENGTH: usize = 32;

/// Describes the geometry of a virtual disk. Written once at offset 0 when
/// the disk is created and never mutated afterwards. There is deliberately no
/// checksum; a foreign or corrupted image is not validated on load.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SuperBlock {
    /// The name of the virtual disk, NUL padded.
    name: [u8; NAME_LENGTH],

    /// The total size of the virtual disk in bytes.
    disk_size: u64,
    /// The size of a data block in bytes.
    block_size: u64,
    /// The number of data blocks, `disk_size / block_size`.
    block_count: u64,

    /// The size of the inode area, one fixed record per catalog slot.
    inode_area_size: u64,
    /// The byte offset of the inode area, immediately after this record.
    inode_area_offset: u64,
    /// The size of the free-block bitmap, one bit per data block.
    bitmap_size: u64,
    /// The byte offset of the free-block bitmap.
    bitmap_offset: u64,
    /// The byte offset of the data area.
    data_area_offset: u64,
}

impl SuperBlock {
    pub fn new(str_name: &str, disk_size: u64, block_size: u64) -> Self {
        let mut name = [0u8; NAME_LENGTH];

        for (i, b) in str_name.as_bytes().iter().enumerate() {
            if i >= NAME_LENGTH - 1 {
                break;
            }

            name[i] = *b;
        }

        let block_count = disk_size / block_size;
        let inode_area_size = (MAX_FILES as u64) * Inode::size();
        let inode_area_offset = Self::size();
        let bitmap_size = (block_count + 7) / 8;
        let bitmap_offset = inode_area_offset + inode_area_size;
        let data_area_offset = bitmap_offset + bitmap_size;

        return Self {
            name,
            disk_size,
            block_size,
            block_count,
            inode_area_size,
            inode_area_offset,
            bitmap_size,
            bitmap_offset,
            data_area_offset,
        };
    }

    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(NAME_LENGTH);

        return String::from_utf8_lossy(&self.name[..end]).into_owned();
    }

    #[inline]
    pub fn disk_size(&self) -> u64 {
        return self.disk_size;
    }

    #[inline]
    pub fn block_size(&self) -> u64 {
        return self.block_size;
    }

    #[inline]
    pub fn block_count(&self) -> u64 {
        return self.block_count;
    }

    #[inline]
    pub fn inode_area_size(&self) -> u64 {
        return self.inode_area_size;
    }

    #[inline]
    pub fn inode_area_offset(&self) -> u64 {
        return self.inode_area_offset;
    }

    #[inline]
    pub fn bitmap_size(&self) -> u64 {
        return self.bitmap_size;
    }

    #[inline]
    pub fn bitmap_offset(&self) -> u64 {
        return self.bitmap_offset;
    }

    #[inline]
    pub fn data_area_offset(&self) -> u64 {
        return self.data_area_offset;
    }

    /// The size of the super-block record.
    pub fn size() -> u64 {
        return 128; // 104 bytes of fields, padded to 128.
    }
}

impl ByteSerializable for SuperBlock {
    type BytesArrayType = [u8; 128];

    fn to_bytes(&self) -> Self::BytesArrayType {
        let mut bytes = [0u8; 128];
        let mut offset = 0;

        bytes[..NAME_LENGTH].copy_from_slice(&self.name);
        offset += NAME_LENGTH;

        LittleEndian::write_u64(&mut bytes[offset..], self.disk_size);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.block_size);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.block_count);
        offset += 8;

        LittleEndian::write_u64(&mut bytes[offset..], self.inode_area_size);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.inode_area_offset);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.bitmap_size);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.bitmap_offset);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.data_area_offset);
        //offset += 8; // Increment if in further revisions data is added beyond this point

        // bytes 104..128 are reserved

        return bytes;
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < 104 {
            return None;
        }

        let mut name = [0u8; NAME_LENGTH];
        name.copy_from_slice(&bytes[..NAME_LENGTH]);

        let mut offset = NAME_LENGTH;

        let disk_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let block_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let block_count = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;

        let inode_area_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let inode_area_offset = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let bitmap_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let bitmap_offset = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let data_area_offset = LittleEndian::read_u64(&bytes[offset..]);
        //offset += 8; // Increment if in further revisions data is added beyond this point

        return Some(Self {
            name,
            disk_size,
            block_size,
            block_count,
            inode_area_size,
            inode_area_offset,
            bitmap_size,
            bitmap_offset,
            data_area_offset,
        });
    }
}
