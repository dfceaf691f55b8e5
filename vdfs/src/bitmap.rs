use alloc::{vec, vec::Vec};

/// One bit per data block, `1` meaning allocated. Bit `i` lives in byte
/// `i / 8` at position `i % 8`, which is also the persisted layout.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BitMap {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitMap {
    /// Constructs a new bitmap with every bit low.
    pub fn new(bit_count: usize) -> Self {
        return Self {
            bytes: vec![0; Self::byte_length(bit_count)],
            bit_count,
        };
    }

    /// Constructs a bitmap from its persisted byte form. Missing trailing
    /// bytes are treated as all-free, extra bytes are ignored.
    pub fn from_bytes(bytes: &[u8], bit_count: usize) -> Self {
        let mut m = Self::new(bit_count);

        for (i, byte) in bytes.iter().enumerate() {
            if i >= m.bytes.len() {
                break;
            }

            m.bytes[i] = *byte;
        }

        return m;
    }

    /// Tries to set a bit at index, returns false if the index is out of range.
    pub fn set_bit(&mut self, index: usize, value: bool) -> bool {
        if index >= self.bit_count {
            return false;
        }

        let (byte_index, bit) = (index / 8, index % 8);

        if value {
            self.bytes[byte_index] |= 1 << bit;
        } else {
            self.bytes[byte_index] &= !(1 << bit);
        }

        return true;
    }

    /// Returns whether a bit at a specified index is set.
    pub fn bit_at(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }

        let (byte_index, bit) = (index / 8, index % 8);

        return Some(((self.bytes[byte_index] >> bit) & 1) == 1);
    }

    /// The number of bits tracked.
    pub fn len(&self) -> usize {
        return self.bit_count;
    }

    /// The persisted byte form, exactly `ceil(len / 8)` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        return &self.bytes;
    }

    pub fn count_ones(&self) -> usize {
        let mut sum: usize = 0;

        for byte in &self.bytes {
            sum += byte.count_ones() as usize;
        }

        return sum;
    }

    pub fn count_zeros(&self) -> usize {
        return self.bit_count - self.count_ones();
    }

    /// Finds the first `count` free bits scanning upwards from index 0.
    /// The ascending order is relied upon by the allocator and the
    /// defragmenter's notion of a packed layout. Does not mutate any bits.
    pub fn find_free_blocks(&self, count: usize) -> Option<Vec<usize>> {
        let mut found = Vec::with_capacity(count);

        for i in 0..self.bit_count {
            if found.len() == count {
                break;
            }

            if !self.bit_at(i).unwrap() {
                found.push(i);
            }
        }

        if found.len() < count {
            return None;
        }

        return Some(found);
    }

    fn byte_length(bit_count: usize) -> usize {
        return (bit_count + 7) / 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_set() {
        let mut map = BitMap::new(1024);

        assert!(map.set_bit(3, true));
    }

    #[test]
    fn test_bit_set_out_of_range() {
        let mut map = BitMap::new(16);

        assert!(!map.set_bit(16, true));
        assert!(map.bit_at(16).is_none());
    }

    #[test]
    fn test_bit_get() {
        let mut map = BitMap::new(1024);

        assert!(map.set_bit(3, true));
        assert_eq!(map.bit_at(3).unwrap(), true);
    }

    #[test]
    fn test_bit_clear() {
        let mut map = BitMap::new(1024);

        assert!(map.set_bit(342, true));
        assert_eq!(map.bit_at(342).unwrap(), true);
        assert!(map.set_bit(342, false));
        assert_eq!(map.bit_at(342).unwrap(), false);
    }

    #[test]
    fn test_clear_already_clear() {
        let mut map = BitMap::new(64);

        assert!(map.set_bit(5, false));
        assert_eq!(map.bit_at(5).unwrap(), false);
    }

    #[test]
    fn test_as_bytes() {
        let mut map = BitMap::new(1024);

        assert!(map.set_bit(0, true));
        assert!(map.set_bit(1, true));
        assert!(map.set_bit(8, true));
        assert!(map.set_bit(9, true));

        let mut comp = vec![0u8; 1024 / 8];
        comp[0] = 0b11;
        comp[1] = 0b11;

        assert_eq!(map.as_bytes(), comp.as_slice());
    }

    #[test]
    fn test_as_bytes_partial_last_byte() {
        let mut map = BitMap::new(12);

        assert!(map.set_bit(11, true));

        assert_eq!(map.as_bytes(), &[0b0000_0000, 0b0000_1000]);
    }

    #[test]
    fn test_from_bytes() {
        let mut map = BitMap::new(16);

        assert!(map.set_bit(0, true));
        assert!(map.set_bit(9, true));

        assert_eq!(BitMap::from_bytes(&[0b1, 0b10], 16), map);
    }

    #[test]
    fn test_count_ones() {
        let mut map = BitMap::new(1024);

        for i in &[0, 1, 8, 9] {
            map.set_bit(*i, true);
        }

        assert_eq!(map.count_ones(), 4);
    }

    #[test]
    fn test_count_zeros() {
        let mut map = BitMap::new(12);

        map.set_bit(0, true);
        map.set_bit(11, true);

        assert_eq!(map.count_zeros(), 10);
    }

    #[test]
    fn test_find_free_blocks() {
        let map = BitMap::new(16);

        assert_eq!(map.find_free_blocks(3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_find_free_blocks_skips_allocated() {
        let mut map = BitMap::new(16);

        map.set_bit(0, true);
        map.set_bit(2, true);

        assert_eq!(map.find_free_blocks(3).unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn test_find_free_blocks_not_enough() {
        let mut map = BitMap::new(4);

        map.set_bit(1, true);
        map.set_bit(3, true);

        assert!(map.find_free_blocks(3).is_none());
    }

    #[test]
    fn test_find_free_blocks_does_not_mutate() {
        let map = BitMap::new(16);
        let before = map.clone();

        map.find_free_blocks(5).unwrap();

        assert_eq!(map, before);
    }

    #[test]
    fn test_find_free_blocks_zero() {
        let mut map = BitMap::new(4);
        map.set_bit(0, true);

        assert_eq!(map.find_free_blocks(0).unwrap(), Vec::<usize>::new());
    }
}
