use crate::error::ImageError;
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use vdfs::{ByteSink, ByteSource, DiskImage};

/// A virtual disk backed by a host file.
pub struct FileImage {
    file: RefCell<File>,
}

impl FileImage {
    /// Creates a new image file of the specified size, zero-filled.
    pub fn new_create(path: String, size: usize) -> Result<Self, ImageError> {
        let mut file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to create image {}. Error: {}",
                    path, e
                )))
            }
        };

        match file.write_all(&vec![0u8; size]) {
            Ok(_) => (),
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to write null bytes. Error: {}",
                    e
                )))
            }
        }

        return Ok(Self {
            file: RefCell::new(file),
        });
    }

    /// Opens an existing image file for reading and writing.
    pub fn new(path: String) -> Result<Self, ImageError> {
        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to open image {}. Error: {}",
                    path, e
                )))
            }
        };

        return Ok(Self {
            file: RefCell::new(file),
        });
    }
}

impl DiskImage<ImageError> for FileImage {
    fn write_bytes(&mut self, bytes: &Vec<u8>, location: u64) -> Result<(), ImageError> {
        let mut file = self.file.borrow_mut();

        match file.seek(SeekFrom::Start(location)) {
            Ok(_) => (),
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to seek to location: {}. Error: {}",
                    location, e
                )))
            }
        }

        match file.write_all(bytes) {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to write bytes. Error: {}", e))),
        }

        return Ok(());
    }

    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, ImageError> {
        let mut result = vec![0u8; amount as usize];
        let size = self.disk_size()?;

        // Anything past the written extent reads back as zeroes.
        if location >= size {
            return Ok(result);
        }

        let available = std::cmp::min(amount, size - location);
        let mut file = self.file.borrow_mut();

        match file.seek(SeekFrom::Start(location)) {
            Ok(_) => (),
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to seek to location: {}. Error: {}",
                    location, e
                )))
            }
        }

        match file.read_exact(&mut result[..available as usize]) {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to read bytes. Error: {}", e))),
        }

        return Ok(result);
    }

    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), ImageError> {
        if end <= start {
            return Ok(());
        }

        return self.write_bytes(&vec![0u8; (end - start) as usize], start);
    }

    fn disk_size(&self) -> Result<u64, ImageError> {
        let b = self.file.borrow();
        let metadata = match b.metadata() {
            Ok(m) => m,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Could not determine file size. Error: {}",
                    e
                )))
            }
        };

        return Ok(metadata.len());
    }
}

/// A host file feeding copy-in.
pub struct HostFileSource {
    file: File,
}

impl HostFileSource {
    pub fn new(path: &str) -> Result<Self, ImageError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to open file {}. Error: {}",
                    path, e
                )))
            }
        };

        return Ok(Self { file });
    }

    /// The total length of the host file in bytes.
    pub fn len(&self) -> Result<u64, ImageError> {
        return match self.file.metadata() {
            Ok(m) => Ok(m.len()),
            Err(e) => Err(ImageError::new(&format!(
                "Could not determine file size. Error: {}",
                e
            ))),
        };
    }
}

impl ByteSource<ImageError> for HostFileSource {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, ImageError> {
        return match self.file.read(buffer) {
            Ok(count) => Ok(count),
            Err(e) => Err(ImageError::new(&format!("Failed to read bytes. Error: {}", e))),
        };
    }
}

/// A host file receiving copy-out.
pub struct HostFileSink {
    file: File,
}

impl HostFileSink {
    pub fn create(path: &str) -> Result<Self, ImageError> {
        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to create file {}. Error: {}",
                    path, e
                )))
            }
        };

        return Ok(Self { file });
    }
}

impl ByteSink<ImageError> for HostFileSink {
    fn write(&mut self, buffer: &[u8]) -> Result<usize, ImageError> {
        return match self.file.write(buffer) {
            Ok(count) => Ok(count),
            Err(e) => Err(ImageError::new(&format!("Failed to write bytes. Error: {}", e))),
        };
    }
}
