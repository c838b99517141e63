//! The `.zz` container
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! [symbol_count:u16]
//! symbol_count x [symbol_len:u16][symbol:utf8][frequency:u32]
//! [bit_length:u32][payload...]
//! ```
//!
//! Entries are stored in frequency-table order, which the decoder needs to
//! rebuild the encoder's tree. No codebook is stored.

use std::fs;
use std::io;
use std::path::Path;

use bitstream_io::{BigEndian, ByteRead, ByteReader, ByteWrite, ByteWriter};

use crate::bit_stream::BitStream;
use crate::codec::Decoder;
use crate::error::{CompressError, Result};
use crate::frequency::{FrequencyTable, SymbolFrequency};

pub const SYMBOL_COUNT_SIZE: usize = 2;
pub const SYMBOL_LEN_SIZE: usize = 2;
pub const FREQUENCY_SIZE: usize = 4;
pub const BIT_LENGTH_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFile {
    table: FrequencyTable,
    bits: BitStream,
}

impl CompressedFile {
    pub fn new(table: FrequencyTable, bits: BitStream) -> Self {
        Self { table, bits }
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn bits(&self) -> &BitStream {
        &self.bits
    }

    pub fn into_parts(self) -> (FrequencyTable, BitStream) {
        (self.table, self.bits)
    }

    /// Rebuild the tree from the stored table and decode the payload.
    pub fn decode(&self) -> Result<String> {
        Decoder::new(&self.table).decode(&self.bits)
    }

    /// Size of the serialized container in bytes.
    pub fn encoded_len(&self) -> usize {
        let entries: usize = self
            .table
            .iter()
            .map(|e| SYMBOL_LEN_SIZE + e.symbol.len_utf8() + FREQUENCY_SIZE)
            .sum();
        SYMBOL_COUNT_SIZE + entries + BIT_LENGTH_SIZE + self.bits.as_bytes().len()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.encoded_len());
        let mut writer = ByteWriter::endian(&mut output, BigEndian);

        writer.write::<u16>(fits("symbol_count", self.table.len() as u64)?)?;
        let mut utf8 = [0u8; 4];
        for entry in &self.table {
            let symbol = entry.symbol.encode_utf8(&mut utf8).as_bytes();
            writer.write::<u16>(fits("symbol_byte_len", symbol.len() as u64)?)?;
            writer.write_bytes(symbol)?;
            writer.write::<u32>(fits("frequency", entry.count)?)?;
        }

        writer.write::<u32>(fits("bit_length", self.bits.len() as u64)?)?;
        writer.write_bytes(self.bits.as_bytes())?;
        Ok(output)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::endian(data, BigEndian);
        let mut offset = 0;

        let symbol_count: u16 = reader
            .read()
            .map_err(|e| short_read(e, offset, "symbol_count"))?;
        offset += SYMBOL_COUNT_SIZE;

        let mut entries = Vec::with_capacity(usize::from(symbol_count));
        for _ in 0..symbol_count {
            let symbol_len: u16 = reader
                .read()
                .map_err(|e| short_read(e, offset, "symbol_byte_len"))?;
            offset += SYMBOL_LEN_SIZE;

            let mut raw = vec![0u8; usize::from(symbol_len)];
            reader
                .read_bytes(&mut raw)
                .map_err(|e| short_read(e, offset, "symbol_bytes"))?;
            let symbol = single_char(&raw, offset)?;
            offset += raw.len();

            let count: u32 = reader
                .read()
                .map_err(|e| short_read(e, offset, "frequency"))?;
            offset += FREQUENCY_SIZE;

            entries.push(SymbolFrequency::new(symbol, u64::from(count)));
        }
        let table = FrequencyTable::from_entries(entries)?;

        let bit_length: u32 = reader
            .read()
            .map_err(|e| short_read(e, offset, "bit_length"))?;
        offset += BIT_LENGTH_SIZE;
        let bit_length = bit_length as usize;

        let payload = &data[offset..];
        let expected = bit_length.div_ceil(8);
        if payload.len() != expected {
            return Err(CompressError::corrupt_at_byte(
                offset,
                format!(
                    "payload of {bit_length} bits needs {expected} bytes, found {}",
                    payload.len()
                ),
            ));
        }
        let bits = BitStream::from_bytes_with_len(payload.to_vec(), bit_length)?;

        tracing::trace!(symbols = table.len(), bits = bits.len(), "container parsed");
        Ok(Self { table, bits })
    }

    /// Serialize and write the whole file at once. Returns the bytes written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "container written");
        Ok(bytes.len())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "container read");
        Self::from_bytes(&data)
    }
}

fn fits<T: TryFrom<u64>>(field: &'static str, value: u64) -> Result<T> {
    T::try_from(value).map_err(|_| CompressError::FieldOverflow {
        field,
        value,
        max: match field {
            "symbol_count" | "symbol_byte_len" => u64::from(u16::MAX),
            _ => u64::from(u32::MAX),
        },
    })
}

fn short_read(err: io::Error, offset: usize, field: &str) -> CompressError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        CompressError::corrupt_at_byte(offset, format!("truncated {field}"))
    } else {
        CompressError::Io(err)
    }
}

fn single_char(raw: &[u8], offset: usize) -> Result<char> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| CompressError::corrupt_at_byte(offset, format!("symbol is not UTF-8: {e}")))?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(CompressError::corrupt_at_byte(
            offset,
            format!("symbol field holds {} characters, expected 1", text.chars().count()),
        )),
    }
}
