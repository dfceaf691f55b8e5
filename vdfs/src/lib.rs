#![no_std]

extern crate alloc;

mod bitmap;
mod byte_serializable;
mod disk;
mod vdfs_error;

pub use byte_serializable::ByteSerializable;
pub use disk::*;
pub use vdfs_error::{VdfsError, VdfsErrorConvertible};
