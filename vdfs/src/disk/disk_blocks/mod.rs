mod inode;
mod super_block;

pub use inode::{Inode, INODE_BLOCKS, MAX_FILENAME_LENGTH, MAX_FILES};
pub use super_block::SuperBlock;
