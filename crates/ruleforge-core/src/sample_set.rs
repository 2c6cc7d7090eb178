//! Fixed-width sample bit-vectors.
//!
//! Every rule, label and prefix state is a set of sample indices over the
//! same universe `0..nsamples`. The engine only needs AND / AND-NOT / OR
//! and population counts, which `fixedbitset` provides word-at-a-time.

use std::fmt;

use fixedbitset::FixedBitSet;

/// A set of samples drawn from a universe of fixed size.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSet {
    bits: FixedBitSet,
}

impl SampleSet {
    /// Creates a set with no samples over a universe of `nsamples`.
    pub fn empty(nsamples: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(nsamples),
        }
    }

    /// Creates a set containing every sample of the universe.
    pub fn full(nsamples: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(nsamples);
        bits.insert_range(..);
        Self { bits }
    }

    /// Builds a set from one flag per sample.
    pub fn from_bools(flags: &[bool]) -> Self {
        let mut bits = FixedBitSet::with_capacity(flags.len());
        for (i, &flag) in flags.iter().enumerate() {
            bits.set(i, flag);
        }
        Self { bits }
    }

    /// Builds a set from the given sample indices.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside `0..nsamples`.
    pub fn from_indices(nsamples: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = FixedBitSet::with_capacity(nsamples);
        for i in indices {
            bits.insert(i);
        }
        Self { bits }
    }

    /// Parses a string of `0`/`1` characters, ignoring whitespace.
    ///
    /// Returns `None` on any other character.
    pub fn from_bit_str(s: &str) -> Option<Self> {
        let flags: Option<Vec<bool>> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect();
        flags.map(|f| Self::from_bools(&f))
    }

    /// Size of the universe this set is drawn from.
    #[inline]
    pub fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Number of samples in the set.
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    #[inline]
    pub fn contains(&self, sample: usize) -> bool {
        self.bits.contains(sample)
    }

    pub fn insert(&mut self, sample: usize) {
        self.bits.insert(sample);
    }

    /// `self & other`.
    pub fn and(&self, other: &SampleSet) -> SampleSet {
        let mut bits = self.bits.clone();
        bits.intersect_with(&other.bits);
        Self { bits }
    }

    /// `|self & other|` without allocating.
    #[inline]
    pub fn and_count(&self, other: &SampleSet) -> usize {
        self.bits.intersection_count(&other.bits)
    }

    /// `self & !other`.
    pub fn and_not(&self, other: &SampleSet) -> SampleSet {
        let mut bits = self.bits.clone();
        bits.difference_with(&other.bits);
        Self { bits }
    }

    /// `self |= other`.
    pub fn or_assign(&mut self, other: &SampleSet) {
        self.bits.union_with(&other.bits);
    }

    /// `self &= !other`.
    pub fn and_not_assign(&mut self, other: &SampleSet) {
        self.bits.difference_with(&other.bits);
    }

    /// Complement within the universe.
    pub fn complement(&self) -> SampleSet {
        let mut bits = self.bits.clone();
        bits.toggle_range(..);
        Self { bits }
    }

    /// Iterates over the contained sample indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.bits.len() {
            f.write_str(if self.bits.contains(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SampleSet({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_empty() {
        let full = SampleSet::full(70);
        assert_eq!(full.count(), 70);
        assert_eq!(full.universe(), 70);

        let empty = SampleSet::empty(70);
        assert!(empty.is_empty());
        assert_eq!(full.complement(), empty);
    }

    #[test]
    fn test_bit_operations() {
        let a = SampleSet::from_bit_str("1100").unwrap();
        let b = SampleSet::from_bit_str("1010").unwrap();

        assert_eq!(a.and(&b).to_string(), "1000");
        assert_eq!(a.and_count(&b), 1);
        assert_eq!(a.and_not(&b).to_string(), "0100");

        let mut c = a.clone();
        c.or_assign(&b);
        assert_eq!(c.to_string(), "1110");
        c.and_not_assign(&a);
        assert_eq!(c.to_string(), "0010");
    }

    #[test]
    fn test_from_bit_str_rejects_garbage() {
        assert!(SampleSet::from_bit_str("10x1").is_none());
        assert_eq!(SampleSet::from_bit_str("1 0 1").unwrap().count(), 2);
    }

    #[test]
    fn test_iter_ascending() {
        let s = SampleSet::from_indices(10, [7, 2, 5]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2, 5, 7]);
    }
}
