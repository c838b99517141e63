//! Huffman encoding and decoding
//!
//! The encoder derives a prefix codebook from the tree; the decoder rebuilds
//! the identical tree from the frequency table alone and walks it bit by bit.

use std::collections::HashMap;

use crate::bit_stream::BitStream;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Symbol to code mapping. Left edges are `0`, right edges are `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    codes: HashMap<char, BitStream>,
}

impl Codebook {
    /// Trace every root-to-leaf path of `tree`.
    ///
    /// A tree that is a single leaf has no edges; its symbol gets the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = HashMap::new();
        match tree.root() {
            None => {}
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                codes.insert(*symbol, BitStream::from_iter([false]));
            }
            Some(root) => collect_codes(root, BitStream::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&BitStream> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &BitStream)> {
        self.codes.iter().map(|(symbol, code)| (*symbol, code))
    }
}

fn collect_codes(node: &HuffmanNode, path: BitStream, codes: &mut HashMap<char, BitStream>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_path = path.clone();
            left_path.push(false);
            collect_codes(left, left_path, codes);

            let mut right_path = path;
            right_path.push(true);
            collect_codes(right, right_path, codes);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Encoder {
    table: FrequencyTable,
    codebook: Codebook,
}

impl Encoder {
    /// Analyse `text` and derive its codebook.
    pub fn new(text: &str) -> Self {
        let table = FrequencyTable::count(text);
        let tree = HuffmanTree::build(&table);
        let codebook = Codebook::from_tree(&tree);
        tracing::debug!(
            symbols = table.len(),
            total = table.total(),
            height = tree.height(),
            "codebook derived"
        );
        Self { table, codebook }
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn into_parts(self) -> (FrequencyTable, Codebook) {
        (self.table, self.codebook)
    }

    /// Emit the code of each character of `text`, in order.
    pub fn encode(&self, text: &str) -> Result<BitStream> {
        let mut bits = BitStream::new();
        for (position, symbol) in text.chars().enumerate() {
            let code = self
                .codebook
                .get(symbol)
                .ok_or(CompressError::CodebookMiss { symbol, position })?;
            bits.extend_from(code);
        }
        tracing::debug!(bits = bits.len(), "text encoded");
        Ok(bits)
    }
}

/// Encode `text` with a codebook derived from its own frequencies.
pub fn encode(text: &str) -> Result<(Codebook, BitStream)> {
    let encoder = Encoder::new(text);
    let bits = encoder.encode(text)?;
    Ok((encoder.codebook, bits))
}

#[derive(Debug, Clone)]
pub struct Decoder {
    tree: HuffmanTree,
}

impl Decoder {
    /// Rebuild the encoder's tree from the ordered frequency table.
    pub fn new(table: &FrequencyTable) -> Self {
        Self {
            tree: HuffmanTree::build(table),
        }
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn decode(&self, bits: &BitStream) -> Result<String> {
        let root = match self.tree.root() {
            None => {
                if !bits.is_empty() {
                    tracing::warn!(bits = bits.len(), "ignoring payload of an empty table");
                }
                return Ok(String::new());
            }
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                return Ok(std::iter::repeat(*symbol).take(bits.len()).collect());
            }
            Some(root) => root,
        };

        let mut text = String::new();
        let mut current = root;
        let mut pending = 0;
        for (index, bit) in bits.iter().enumerate() {
            let (left, right) = current
                .children()
                .ok_or_else(|| CompressError::corrupt_at_bit(index, "code walks past a leaf"))?;
            current = if bit == 0 { left } else { right };
            pending += 1;
            if let Some(symbol) = current.symbol() {
                text.push(symbol);
                current = root;
                pending = 0;
            }
        }

        if pending != 0 {
            return Err(CompressError::TrailingBits {
                bit_length: bits.len(),
                pending,
            });
        }
        tracing::debug!(bits = bits.len(), chars = text.chars().count(), "text decoded");
        Ok(text)
    }
}

/// Decode `bits` using the tree rebuilt from `table`.
pub fn decode(table: &FrequencyTable, bits: &BitStream) -> Result<String> {
    Decoder::new(table).decode(bits)
}
