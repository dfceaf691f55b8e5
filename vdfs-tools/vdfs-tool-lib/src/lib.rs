mod error;
mod handler;
mod usage;

pub use error::ImageError;
pub use handler::{FileImage, HostFileSink, HostFileSource};
pub use usage::format_usage;

use byte_unit::Byte;
use std::io::Write;

pub fn sized_string_to_u64(string: &str) -> Option<u64> {
    return match Byte::from_str(string) {
        Ok(b) => Some(b.get_bytes() as u64),
        Err(_) => None,
    };
}

pub fn u64_to_sized_string(n: u64) -> String {
    return Byte::from(n).get_appropriate_unit(false).to_string();
}

/// Asks a y/n question on the terminal. Anything other than "y" or "Y" is a
/// no, as is a failed read.
pub fn confirm(question: &str) -> bool {
    print!("{} (y/n) ", question);

    match std::io::stdout().flush() {
        Ok(_) => (),
        Err(_) => (),
    }

    let mut input = String::new();
    match std::io::stdin().read_line(&mut input) {
        Ok(_) => (),
        Err(_) => return false,
    }

    let input = input.trim_end();

    return input == "y" || input == "Y";
}

#[cfg(test)]
mod tests {
    use super::sized_string_to_u64;

    #[test]
    fn test_no_suffix() {
        assert_eq!(sized_string_to_u64("4096").unwrap(), 4096)
    }

    #[test]
    fn test_kib() {
        assert_eq!(sized_string_to_u64("64KiB").unwrap(), 65_536)
    }

    #[test]
    fn test_mib() {
        assert_eq!(sized_string_to_u64("2MiB").unwrap(), 2_097_152)
    }

    #[test]
    fn test_fail() {
        assert!(sized_string_to_u64("12AB").is_none())
    }

    #[test]
    fn test_fail_2() {
        assert!(sized_string_to_u64("KiB").is_none())
    }
}
