use crate::sequence::{Codon, codon_windows};
use crate::types::CodonFrequencyMap;

/// Counts codon occurrences in a nucleotide corpus.
///
/// The corpus is read with the same windowing as translation: consecutive
/// non-overlapping triplets, case-insensitive, trailing partial window
/// dropped. Windows that are not one of the 64 canonical codons (for
/// example `NNN`) are skipped. An empty corpus yields an empty map.
#[must_use]
pub fn compute_frequency(corpus: &str) -> CodonFrequencyMap {
    let mut frequencies = CodonFrequencyMap::new();
    for codon in codon_windows(corpus.as_bytes()).filter_map(Codon::from_bytes) {
        *frequencies.entry(codon).or_insert(0) += 1;
    }
    frequencies
}
