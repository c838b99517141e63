//! Symbol frequency analysis
//!
//! Entries keep the order in which symbols first appear. That order is
//! written to the container and drives tie-breaking in the tree builder, so
//! it must survive a write/read round trip unchanged.

use std::collections::HashMap;

use crate::error::{CompressError, Result};

/// One symbol and the number of times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolFrequency {
    pub symbol: char,
    pub count: u64,
}

impl SymbolFrequency {
    pub fn new(symbol: char, count: u64) -> Self {
        Self { symbol, count }
    }
}

impl From<(char, u64)> for SymbolFrequency {
    fn from((symbol, count): (char, u64)) -> Self {
        Self { symbol, count }
    }
}

/// Ordered symbol counts, first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<SymbolFrequency>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every character of `text` in a single left-to-right pass.
    pub fn count(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            table.record(symbol);
        }
        table
    }

    /// Rebuild a table from entries already in their load-bearing order.
    ///
    /// Duplicate symbols and zero counts cannot come out of [`count`](Self::count),
    /// so they are reported as a corrupt stream. The position is the index of
    /// the offending entry.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<SymbolFrequency>,
    {
        let mut table = Self::new();
        for (position, entry) in entries.into_iter().map(Into::into).enumerate() {
            if entry.count == 0 {
                return Err(CompressError::corrupt_at_entry(
                    position,
                    format!("symbol {:?} has zero frequency", entry.symbol),
                ));
            }
            if table.index.contains_key(&entry.symbol) {
                return Err(CompressError::corrupt_at_entry(
                    position,
                    format!("duplicate symbol {:?}", entry.symbol),
                ));
            }
            table.index.insert(entry.symbol, table.entries.len());
            table.entries.push(entry);
        }
        Ok(table)
    }

    fn record(&mut self, symbol: char) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push(SymbolFrequency::new(symbol, 1));
            }
        }
    }

    pub fn entries(&self) -> &[SymbolFrequency] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolFrequency> {
        self.entries.iter()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.index.get(&symbol).map(|&slot| self.entries[slot].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for FrequencyTable {}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a SymbolFrequency;
    type IntoIter = std::slice::Iter<'a, SymbolFrequency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
