//! Configuration for zipzap

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Extension given to compressed files when no output path is supplied.
    pub extension: String,
    /// Appended to the input stem when no decompression output path is supplied.
    pub decoded_suffix: String,
    /// Inputs with fewer characters than this trigger a compression warning.
    pub small_input_threshold: usize,
    /// Drop a leading UTF-8 byte order mark from input text.
    pub strip_bom: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            extension: "zz".to_string(),
            decoded_suffix: "_decoded".to_string(),
            small_input_threshold: 50,
            strip_bom: true,
        }
    }
}

impl CompressionConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Decode raw input bytes into text, replacing invalid UTF-8 sequences.
    pub fn decode_input(&self, bytes: &[u8]) -> String {
        let bytes = if self.strip_bom {
            bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
        } else {
            bytes
        };
        String::from_utf8_lossy(bytes).into_owned()
    }
}
