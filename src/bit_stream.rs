//! Growable bit buffer packed most-significant-bit first.
//!
//! Storage always holds exactly `ceil(len / 8)` bytes and the unused low bits
//! of the final byte are zero, so the derived equality and hash over the
//! storage agree with equality over the bit sequence.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{CompressError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitStream {
    bytes: Vec<u8>,
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits in the stream.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit given as `0` or `1`.
    pub fn append(&mut self, bit: u8) -> Result<()> {
        match bit {
            0 => self.push(false),
            1 => self.push(true),
            value => return Err(CompressError::InvalidBit { value }),
        }
        Ok(())
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << (7 - offset);
        }
        self.len += 1;
    }

    /// Append every bit of `bits` in order, stopping at the first invalid value.
    pub fn extend<I>(&mut self, bits: I) -> Result<()>
    where
        I: IntoIterator<Item = u8>,
    {
        for bit in bits {
            self.append(bit)?;
        }
        Ok(())
    }

    pub fn extend_from(&mut self, other: &BitStream) {
        // Byte-aligned tails can be copied wholesale.
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit == 1);
        }
    }

    /// Bit at `index`, as `0` or `1`.
    pub fn get(&self, index: usize) -> Result<u8> {
        if index >= self.len {
            return Err(CompressError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.bit_unchecked(index))
    }

    fn bit_unchecked(&self, index: usize) -> u8 {
        (self.bytes[index / 8] >> (7 - index % 8)) & 1
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            stream: self,
            front: 0,
            back: self.len,
        }
    }

    /// Packed bytes; the final byte is zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Treat every bit of `bytes` as data.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }

    /// Take the first `bit_length` bits of `bytes`.
    ///
    /// Bytes past the last one needed are dropped and padding bits are cleared.
    pub fn from_bytes_with_len(mut bytes: Vec<u8>, bit_length: usize) -> Result<Self> {
        let needed = bit_length.div_ceil(8);
        if bytes.len() < needed {
            return Err(CompressError::corrupt_at_byte(
                bytes.len(),
                format!(
                    "{bit_length} bits need {needed} payload bytes, found {}",
                    bytes.len()
                ),
            ));
        }
        bytes.truncate(needed);
        let used = bit_length % 8;
        if used != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - used);
            }
        }
        Ok(Self {
            bytes,
            len: bit_length,
        })
    }
}

impl TryFrom<&str> for BitStream {
    type Error = CompressError;

    /// Parse a string of `'0'` and `'1'` characters.
    fn try_from(bits: &str) -> Result<Self> {
        let mut stream = BitStream::with_capacity(bits.len());
        for c in bits.chars() {
            match c {
                '0' => stream.push(false),
                '1' => stream.push(true),
                other => {
                    return Err(CompressError::InvalidBit {
                        value: u8::try_from(u32::from(other)).unwrap_or(u8::MAX),
                    })
                }
            }
        }
        Ok(stream)
    }
}

impl Extend<bool> for BitStream {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut stream = BitStream::new();
        Extend::extend(&mut stream, iter);
        stream
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a BitStream {
    type Item = u8;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bits of a [`BitStream`], yielding `0` or `1`.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    stream: &'a BitStream,
    front: usize,
    back: usize,
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.front == self.back {
            return None;
        }
        let bit = self.stream.bit_unchecked(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Bits<'_> {
    fn next_back(&mut self) -> Option<u8> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.stream.bit_unchecked(self.back))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bits(s: &str) -> BitStream {
        BitStream::try_from(s).unwrap()
    }

    #[test]
    fn test_append_packs_msb_first() {
        let mut stream = BitStream::new();
        stream.extend([1, 0, 1, 1, 0, 0, 0, 1, 1]).unwrap();
        assert_eq!(stream.len(), 9);
        assert_eq!(stream.as_bytes(), &[0b1011_0001, 0b1000_0000]);
    }

    #[test]
    fn test_append_grows_one_byte_per_eight_bits() {
        let mut stream = BitStream::new();
        for i in 0..17 {
            stream.append((i % 2) as u8).unwrap();
            assert_eq!(stream.as_bytes().len(), (i + 8) / 8);
        }
    }

    #[test]
    fn test_append_rejects_invalid_bit() {
        let mut stream = BitStream::new();
        let err = stream.append(2).unwrap_err();
        assert!(matches!(err, CompressError::InvalidBit { value: 2 }));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_extend_stops_at_invalid_bit() {
        let mut stream = BitStream::new();
        assert!(stream.extend([1, 1, 7, 0]).is_err());
        assert_eq!(stream.to_string(), "11");
    }

    #[test]
    fn test_get_and_out_of_range() {
        let stream = bits("0100000001");
        assert_eq!(stream.get(1).unwrap(), 1);
        assert_eq!(stream.get(9).unwrap(), 1);
        assert_eq!(stream.get(8).unwrap(), 0);
        let err = stream.get(10).unwrap_err();
        assert!(matches!(
            err,
            CompressError::IndexOutOfRange { index: 10, len: 10 }
        ));
    }

    #[test]
    fn test_extend_from_unaligned() {
        let mut stream = bits("101");
        stream.extend_from(&bits("0110011"));
        assert_eq!(stream, bits("1010110011"));

        let mut aligned = bits("11110000");
        aligned.extend_from(&bits("101"));
        assert_eq!(aligned, bits("11110000101"));
        assert_eq!(aligned.as_bytes(), &[0xF0, 0b1010_0000]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let stream = bits("1101");
        let first: Vec<u8> = stream.iter().collect();
        let second: Vec<u8> = stream.iter().collect();
        assert_eq!(first, vec![1, 1, 0, 1]);
        assert_eq!(first, second);
        assert_eq!(stream.iter().rev().collect::<Vec<_>>(), vec![1, 0, 1, 1]);
        assert_eq!(stream.iter().len(), 4);
    }

    #[test]
    fn test_from_bytes_assumes_full_bytes() {
        let stream = BitStream::from_bytes(vec![0xA5, 0x01]);
        assert_eq!(stream.len(), 16);
        assert_eq!(stream.to_string(), "1010010100000001");
    }

    #[test]
    fn test_from_bytes_with_len_clears_padding() {
        let stream = BitStream::from_bytes_with_len(vec![0b1011_1111], 3).unwrap();
        assert_eq!(stream, bits("101"));
        assert_eq!(stream.to_bytes(), vec![0b1010_0000]);
    }

    #[test]
    fn test_from_bytes_with_len_drops_surplus_bytes() {
        let stream = BitStream::from_bytes_with_len(vec![0xFF, 0xFF, 0xFF], 8).unwrap();
        assert_eq!(stream.to_bytes(), vec![0xFF]);
    }

    #[test]
    fn test_from_bytes_with_len_too_short() {
        let err = BitStream::from_bytes_with_len(vec![0xFF], 9).unwrap_err();
        assert!(matches!(err, CompressError::CorruptStream { .. }));
    }

    #[test]
    fn test_equality_and_hash_ignore_padding() {
        let packed = BitStream::from_bytes_with_len(vec![0b0110_1111], 4).unwrap();
        let pushed = bits("0110");
        assert_eq!(packed, pushed);
        assert_ne!(bits("0110"), bits("01100"));

        let set: HashSet<BitStream> = [packed, pushed].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_try_from_str_rejects_other_chars() {
        assert!(BitStream::try_from("01x").is_err());
        assert_eq!(bits("").len(), 0);
    }

    #[test]
    fn test_collect_from_bools() {
        let stream: BitStream = [true, false, true].into_iter().collect();
        assert_eq!(stream.to_string(), "101");
    }
}
