//! Contains [`FrequencyTable`], the byte histogram every
//! Huffman tree is built from.
//!
//! Every byte of the input is counted, including whitespace
//! and control bytes.

use crate::common::MAX_SYMBOLS;

/// How often each byte value occurs in some input.
///
/// Built once (either in one go with [`FrequencyTable::count`] or chunk by chunk
/// with a [`FrequencyCounter`]) and immutable afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; MAX_SYMBOLS],
    distinct: usize,
}

/// Accumulates counts over several chunks of input, for when the data
/// is read piece by piece.
pub struct FrequencyCounter {
    counts: [u64; MAX_SYMBOLS],
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyCounter {
    pub fn new() -> Self {
        FrequencyCounter {
            counts: [0; MAX_SYMBOLS],
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        for byte in data {
            self.counts[*byte as usize] += 1;
        }
    }

    pub fn finish(self) -> FrequencyTable {
        let distinct = self.counts.iter().filter(|count| **count > 0).count();
        FrequencyTable {
            counts: self.counts,
            distinct,
        }
    }
}

impl FrequencyTable {
    /// Count every byte in `data`
    pub fn count(data: &[u8]) -> Self {
        let mut counter = FrequencyCounter::new();
        counter.update(data);
        counter.finish()
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct byte values that occurred at least once
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True iff the counted input was empty
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Total number of bytes counted, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.counts.iter().copied().fold(0, u64::saturating_add)
    }

    /// All symbols with a non-zero count, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Sums the counts of repeated symbols, saturating at `u64::MAX`
    fn from_iter<T: IntoIterator<Item = (u8, u64)>>(iter: T) -> Self {
        let mut counter = FrequencyCounter::new();
        for (symbol, count) in iter {
            let slot = &mut counter.counts[symbol as usize];
            *slot = slot.saturating_add(count);
        }
        counter.finish()
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
