/// Renders a block usage bitmap as a string of 1s and 0s, least significant
/// bit first. Runs of more than 40 free blocks are abbreviated so that large
/// disks stay readable.
pub fn format_usage(bitmap: &[u8], block_count: usize) -> String {
    let mut result = String::new();
    let mut zero_count: usize = 0;

    for i in 0..block_count {
        if (bitmap[i / 8] >> (i % 8)) & 1 == 1 {
            flush_zeros(&mut result, zero_count);
            zero_count = 0;
            result.push('1');
        } else {
            zero_count += 1;
        }
    }

    flush_zeros(&mut result, zero_count);

    return result;
}

fn flush_zeros(result: &mut String, zero_count: usize) {
    if zero_count > 40 {
        result.push_str(&format!("...{} blocks left... ", zero_count));
    } else {
        for _ in 0..zero_count {
            result.push('0');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_usage;

    #[test]
    fn test_empty_bitmap() {
        assert_eq!(format_usage(&[0, 0], 16), "0000000000000000");
    }

    #[test]
    fn test_leading_run() {
        assert_eq!(format_usage(&[0b0000_0111, 0], 16), "1110000000000000");
    }

    #[test]
    fn test_gap_between_files() {
        assert_eq!(format_usage(&[0b0001_1001, 0], 16), "1001100000000000");
    }

    #[test]
    fn test_long_free_run_is_abbreviated() {
        let mut bitmap = vec![0u8; 16];
        bitmap[0] = 0b0000_0001;

        assert_eq!(format_usage(&bitmap, 128), "1...127 blocks left... ");
    }

    #[test]
    fn test_long_interior_run() {
        let mut bitmap = vec![0u8; 16];
        bitmap[0] = 0b0000_0001;
        bitmap[15] = 0b1000_0000;

        assert_eq!(format_usage(&bitmap, 128), "1...126 blocks left... 1");
    }

    #[test]
    fn test_forty_free_blocks_print_in_full() {
        let mut bitmap = vec![0u8; 6];
        bitmap[0] = 0b0000_0001;
        bitmap[5] = 0b0000_0010;

        // 40 zeros between the two set bits, just under the threshold.
        let expected = format!("1{}1", "0".repeat(40));
        assert_eq!(format_usage(&bitmap, 42), expected);
    }

    #[test]
    fn test_partial_final_byte() {
        assert_eq!(format_usage(&[0b0001_0101], 5), "10101");
    }
}
