// Disk layout:
// super-block, 64 inode records, free-block bitmap, data blocks ...

mod disk;
mod disk_blocks;
mod disk_handler;
mod disk_info;

pub use disk::{Disk, OverwriteChoice};
pub use disk_blocks::{Inode, SuperBlock, INODE_BLOCKS, MAX_FILENAME_LENGTH, MAX_FILES};
pub use disk_handler::{ByteSink, ByteSource, DiskImage};
pub use disk_info::DiskInfo;
