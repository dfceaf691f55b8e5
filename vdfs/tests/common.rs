extern crate vdfs;
use vdfs::{ByteSink, ByteSource, DiskImage, VdfsErrorConvertible};

#[derive(Debug, PartialEq, Eq)]
pub struct Error {}

impl VdfsErrorConvertible for Error {}

/// A growable in-memory image. Writes past the end extend it, reads past the
/// end come back zeroed, matching the DiskImage contract.
pub struct RamImage {
    pub disk: Vec<u8>,
}

#[allow(dead_code)]
impl RamImage {
    pub fn new(disk_size: usize) -> Self {
        return Self {
            disk: vec![0u8; disk_size],
        };
    }

    pub fn dump_disk(&self) -> Vec<u8> {
        return self.disk.clone();
    }
}

impl DiskImage<Error> for RamImage {
    fn write_bytes(&mut self, bytes: &Vec<u8>, location: u64) -> Result<(), Error> {
        let end = location as usize + bytes.len();

        if end > self.disk.len() {
            self.disk.resize(end, 0);
        }

        self.disk[location as usize..end].copy_from_slice(bytes);

        return Ok(());
    }

    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, Error> {
        let location = location as usize;
        let amount = amount as usize;
        let mut result = vec![0u8; amount];

        if location < self.disk.len() {
            let available = std::cmp::min(amount, self.disk.len() - location);
            result[..available].copy_from_slice(&self.disk[location..location + available]);
        }

        return Ok(result);
    }

    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), Error> {
        if end as usize > self.disk.len() {
            self.disk.resize(end as usize, 0);
        }

        for i in start..end {
            self.disk[i as usize] = 0;
        }

        return Ok(());
    }

    fn disk_size(&self) -> Result<u64, Error> {
        return Ok(self.disk.len() as u64);
    }
}

/// A sequential source over an owned buffer.
pub struct VecSource {
    data: Vec<u8>,
    position: usize,
}

#[allow(dead_code)]
impl VecSource {
    pub fn new(data: Vec<u8>) -> Self {
        return Self { data, position: 0 };
    }
}

impl ByteSource<Error> for VecSource {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        let available = std::cmp::min(buffer.len(), self.data.len() - self.position);

        buffer[..available].copy_from_slice(&self.data[self.position..self.position + available]);
        self.position += available;

        return Ok(available);
    }
}

/// A sequential sink collecting everything written to it.
pub struct VecSink {
    pub data: Vec<u8>,
}

#[allow(dead_code)]
impl VecSink {
    pub fn new() -> Self {
        return Self { data: Vec::new() };
    }
}

impl ByteSink<Error> for VecSink {
    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        self.data.extend_from_slice(buffer);

        return Ok(buffer.len());
    }
}
