use std::fmt::Formatter;
use vdfs::VdfsErrorConvertible;

#[derive(Debug, PartialEq, Clone)]
pub struct ImageError {
    message: String,
}

impl ImageError {
    pub fn new(message: &str) -> Self {
        return ImageError {
            message: String::from(message),
        };
    }
}

impl VdfsErrorConvertible for ImageError {}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.message);
    }
}
