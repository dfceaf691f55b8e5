extern crate vdfs;
use vdfs::{ByteSink, Disk, DiskImage, OverwriteChoice, VdfsError};

mod common;
use common::*;

fn pattern(length: usize) -> Vec<u8> {
    return (0..length).map(|i| (i % 251) as u8).collect();
}

#[test]
fn test_copy_in_out_round_trip() {
    let mut handler = RamImage::new(4096);
    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    let contents = pattern(600);

    disk.add_file("a", contents.len() as u64, &mut || OverwriteChoice::Cancel)
        .unwrap();
    disk.copy_in("a", &mut VecSource::new(contents.clone()))
        .unwrap();

    let mut sink = VecSink::new();
    let written = disk.copy_out("a", &mut sink).unwrap();

    assert_eq!(written, 600);
    assert_eq!(sink.data, contents);
}

#[test]
fn test_copy_out_partial_final_block() {
    let mut handler = RamImage::new(4096);
    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    // 300 bytes: one full block plus 44 bytes of a second.
    let contents = pattern(300);

    disk.add_file("a", 300, &mut || OverwriteChoice::Cancel)
        .unwrap();
    disk.copy_in("a", &mut VecSource::new(contents.clone()))
        .unwrap();

    let mut sink = VecSink::new();
    assert_eq!(disk.copy_out("a", &mut sink).unwrap(), 300);
    assert_eq!(sink.data, contents);
}

#[test]
fn test_copy_out_zero_size_file() {
    let mut handler = RamImage::new(4096);
    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    disk.add_file("empty", 0, &mut || OverwriteChoice::Cancel)
        .unwrap();

    let mut sink = VecSink::new();
    assert_eq!(disk.copy_out("empty", &mut sink).unwrap(), 0);
    assert!(sink.data.is_empty());
}

#[test]
fn test_copy_in_unknown_file() {
    let mut handler = RamImage::new(4096);
    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    assert_eq!(
        disk.copy_in("ghost", &mut VecSource::new(vec![1, 2, 3])),
        Err(VdfsError::FileNotFound(String::from("ghost")))
    );
}

#[test]
fn test_copy_out_unknown_file() {
    let mut handler = RamImage::new(4096);
    let disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    let mut sink = VecSink::new();
    assert_eq!(
        disk.copy_out("ghost", &mut sink),
        Err(VdfsError::FileNotFound(String::from("ghost")))
    );
}

/// A sink that accepts nothing, forcing a short write.
struct FullSink {}

impl ByteSink<Error> for FullSink {
    fn write(&mut self, _buffer: &[u8]) -> Result<usize, Error> {
        return Ok(0);
    }
}

#[test]
fn test_copy_out_short_write() {
    let mut handler = RamImage::new(4096);
    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();

    disk.add_file("a", 300, &mut || OverwriteChoice::Cancel)
        .unwrap();
    disk.copy_in("a", &mut VecSource::new(pattern(300))).unwrap();

    assert_eq!(
        disk.copy_out("a", &mut FullSink {}),
        Err(VdfsError::ShortWrite)
    );
}

/// An image that silently truncates reads at or past a threshold location,
/// imitating a corrupted backing store.
struct TruncatingImage {
    inner: RamImage,
    truncate_from: u64,
}

impl DiskImage<Error> for TruncatingImage {
    fn write_bytes(&mut self, bytes: &Vec<u8>, location: u64) -> Result<(), Error> {
        return self.inner.write_bytes(bytes, location);
    }

    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, Error> {
        if location >= self.truncate_from && amount > 0 {
            return Ok(self.inner.read_bytes(location, amount - 1)?);
        }

        return self.inner.read_bytes(location, amount);
    }

    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), Error> {
        return self.inner.zero_range(start, end);
    }

    fn disk_size(&self) -> Result<u64, Error> {
        return self.inner.disk_size();
    }
}

#[test]
fn test_copy_out_short_read() {
    let data_area_offset = 128 + 64 * 128 + 2;
    let mut handler = TruncatingImage {
        inner: RamImage::new(4096),
        truncate_from: data_area_offset,
    };

    let mut disk = Disk::create(&mut handler, "test.img", 4096, 256).unwrap();
    disk.add_file("a", 300, &mut || OverwriteChoice::Cancel)
        .unwrap();

    let mut sink = VecSink::new();
    assert_eq!(disk.copy_out("a", &mut sink), Err(VdfsError::ShortRead));
}
