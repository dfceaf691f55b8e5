use crate::VdfsErrorConvertible;
use alloc::vec::Vec;

/// Implementors can define an error struct if they wish but they must implement methods to read and write from an image file.
/// Locations and addresses should all be in bytes.
///
/// The data region of a virtual disk may extend past the nominal extent, so
/// a write past the current end must grow the image.
pub trait DiskImage<E: VdfsErrorConvertible> {
    /// Write a vector of bytes to a location.
    fn write_bytes(&mut self, bytes: &Vec<u8>, location: u64) -> Result<(), E>;

    /// Read an amount of bytes from a location. Exactly `amount` bytes must be
    /// returned; any range that was never written reads back as zeroes. If the
    /// resulting vector is shorter the calling function will return an error.
    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, E>;

    /// This method should zero a range between two locations. Start should be inclusive whilst end should be exclusive.
    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), E>;

    /// This should return the current raw image size.
    fn disk_size(&self) -> Result<u64, E>;
}

/// A sequential reader feeding copy-in. The caller has already measured the
/// total length when it sized the destination file.
pub trait ByteSource<E: VdfsErrorConvertible> {
    /// Reads up to `buffer.len()` bytes, returning the count read. 0 means the
    /// source is exhausted.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, E>;
}

/// A sequential writer receiving copy-out.
pub trait ByteSink<E: VdfsErrorConvertible> {
    /// Writes from `buffer`, returning the count written. 0 is treated as a
    /// short write by the caller.
    fn write(&mut self, buffer: &[u8]) -> Result<usize, E>;
}
