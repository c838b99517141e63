//! zipzap: lossless Huffman compression for text.
//!
//! Text is compressed into a `.zz` container that stores the symbol
//! frequency table in first-seen order followed by the packed code bits.
//! The decoder rebuilds the encoder's tree from the table alone:
//! - [`frequency`] counts symbols in first-appearance order
//! - [`tree`] merges them into a Huffman tree with stable tie-breaking
//! - [`codec`] derives the codebook and walks the tree to decode
//! - [`bit_stream`] packs code bits most-significant-bit first
//! - [`container`] reads and writes the `.zz` layout
//!
//! ```no_run
//! use zipzap::Compressor;
//!
//! let compressor = Compressor::default();
//! let stats = compressor.compress_to_file("abracadabra", "out.zz")?;
//! assert_eq!(stats.original_size, 11);
//! assert_eq!(compressor.decompress_file("out.zz")?, "abracadabra");
//! # Ok::<(), zipzap::error::CompressError>(())
//! ```

pub mod bit_stream;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod tree;

use std::path::Path;

use serde::Serialize;

pub use crate::bit_stream::BitStream;
pub use crate::codec::{decode, encode, Codebook, Decoder, Encoder};
use crate::config::CompressionConfig;
pub use crate::container::CompressedFile;
use crate::error::Result;
pub use crate::frequency::{FrequencyTable, SymbolFrequency};
pub use crate::tree::{HuffmanNode, HuffmanTree};

/// Sizes and ratios reported after compression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionStats {
    /// Bytes written to disk; zero for in-memory compression.
    pub bytes_written: usize,
    /// UTF-8 size of the source text.
    pub original_size: usize,
    /// Size of the `.zz` container.
    pub compressed_size: usize,
    pub symbol_count: usize,
    pub char_count: u64,
    pub bit_length: usize,
    /// `compressed_size / original_size`, 1.0 for empty input.
    pub ratio: f64,
    /// Shannon entropy of the text in bits per symbol.
    pub entropy_bits: f64,
    /// Average code length in bits per symbol.
    pub bits_per_symbol: f64,
}

/// Compressed container bytes plus what went into them.
#[derive(Debug, Clone)]
pub struct CompressedOutput {
    pub file: CompressedFile,
    pub data: Vec<u8>,
    pub stats: CompressionStats,
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `text` into `.zz` bytes.
    pub fn compress(&self, text: &str) -> Result<CompressedOutput> {
        let encoder = Encoder::new(text);
        let bits = encoder.encode(text)?;
        let (table, _) = encoder.into_parts();
        let file = CompressedFile::new(table, bits);
        let data = file.to_bytes()?;
        let stats = self.stats(text, &file, data.len());
        tracing::debug!(
            original = stats.original_size,
            compressed = stats.compressed_size,
            ratio = stats.ratio,
            "compressed"
        );
        Ok(CompressedOutput { file, data, stats })
    }

    /// Compress `text` and write the container to `path` in a single write.
    pub fn compress_to_file(&self, text: &str, path: impl AsRef<Path>) -> Result<CompressionStats> {
        let output = self.compress(text)?;
        std::fs::write(path.as_ref(), &output.data)?;
        tracing::debug!(path = %path.as_ref().display(), bytes = output.data.len(), "container written");
        Ok(CompressionStats {
            bytes_written: output.data.len(),
            ..output.stats
        })
    }

    pub fn decompress(&self, data: &[u8]) -> Result<String> {
        CompressedFile::from_bytes(data)?.decode()
    }

    pub fn decompress_file(&self, path: impl AsRef<Path>) -> Result<String> {
        CompressedFile::read(path)?.decode()
    }

    fn stats(&self, text: &str, file: &CompressedFile, compressed_size: usize) -> CompressionStats {
        let original_size = text.len();
        let char_count = file.table().total();
        let bit_length = file.bits().len();
        CompressionStats {
            bytes_written: 0,
            original_size,
            compressed_size,
            symbol_count: file.table().len(),
            char_count,
            bit_length,
            ratio: if original_size == 0 {
                1.0
            } else {
                compressed_size as f64 / original_size as f64
            },
            entropy_bits: compute_entropy(file.table()),
            bits_per_symbol: if char_count == 0 {
                0.0
            } else {
                bit_length as f64 / char_count as f64
            },
        }
    }
}

/// Shannon entropy of a frequency table, in bits per symbol.
pub fn compute_entropy(table: &FrequencyTable) -> f64 {
    let total = table.total();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    table
        .iter()
        .map(|entry| {
            let p = entry.count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_reports_sizes() {
        let compressor = Compressor::default();
        let text = "hello world hello world hello world";
        let output = compressor.compress(text).unwrap();
        assert_eq!(output.stats.original_size, text.len());
        assert_eq!(output.stats.compressed_size, output.data.len());
        assert_eq!(output.stats.char_count, 35);
        assert_eq!(output.stats.symbol_count, 8);
        assert_eq!(output.stats.bytes_written, 0);
    }

    #[test]
    fn test_roundtrip_in_memory() {
        let compressor = Compressor::default();
        let text = "the quick brown fox jumps over the lazy dog";
        let output = compressor.compress(text).unwrap();
        assert_eq!(compressor.decompress(&output.data).unwrap(), text);
    }

    #[test]
    fn test_compress_empty() {
        let compressor = Compressor::default();
        let output = compressor.compress("").unwrap();
        assert_eq!(output.stats.ratio, 1.0);
        assert_eq!(output.stats.bits_per_symbol, 0.0);
        assert_eq!(compressor.decompress(&output.data).unwrap(), "");
    }

    #[test]
    fn test_entropy_computation() {
        let uniform = FrequencyTable::count(&"a".repeat(100));
        assert!(compute_entropy(&uniform) < 0.01, "one symbol should have ~0 entropy");

        let two = FrequencyTable::count("abababab");
        assert!((compute_entropy(&two) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_code_length_not_below_entropy() {
        let compressor = Compressor::default();
        let output = compressor.compress(&"aaabbbccc".repeat(100)).unwrap();
        assert!(output.stats.bits_per_symbol + 1e-9 >= output.stats.entropy_bits);
        assert!(output.stats.ratio < 1.0, "repetitive text should compress well");
    }
}
