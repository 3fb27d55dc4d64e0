use std::collections::BTreeMap;

use log::debug;

use crate::frequency::compute_frequency;
use crate::table::{AminoAcidGroup, CodonEntry, CodonTable, GeneticCodeTable, WeightedCodon};
use crate::types::CodonFrequencyMap;

/// A genetic code table whose codons carry usage weights.
///
/// Weights are non-negative. A weight of zero marks a codon as unobserved;
/// it stays selectable when every codon of its amino acid is unobserved.
/// The per-amino-acid groups used for sampling are built once, at
/// construction, and the table is never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationTable {
    table: GeneticCodeTable,
    weights: Vec<f64>,
    groups: BTreeMap<u8, AminoAcidGroup>,
}

impl OptimizationTable {
    /// Pairs a table with one weight per entry, in entry order.
    pub(crate) fn from_parts(table: GeneticCodeTable, weights: Vec<f64>) -> Self {
        debug_assert_eq!(table.len(), weights.len());

        let mut members: BTreeMap<u8, Vec<WeightedCodon>> = BTreeMap::new();
        for (entry, &weight) in table.entries().iter().zip(weights.iter()) {
            members.entry(entry.amino_acid).or_default().push(WeightedCodon {
                codon: entry.codon,
                weight,
            });
        }
        let groups = members
            .into_iter()
            .map(|(amino_acid, codons)| (amino_acid, AminoAcidGroup::new(amino_acid, codons)))
            .collect();

        Self {
            table,
            weights,
            groups,
        }
    }

    /// Weights every codon of `base` by its count in `frequencies`.
    ///
    /// Codons missing from the map get weight 0.
    #[must_use]
    pub fn from_frequencies(base: &GeneticCodeTable, frequencies: &CodonFrequencyMap) -> Self {
        let weights = base
            .entries()
            .iter()
            .map(|entry| frequencies.get(&entry.codon).copied().unwrap_or(0) as f64)
            .collect();
        Self::from_parts(base.clone(), weights)
    }

    /// A table where every codon has weight 0, so synonymous codons are
    /// chosen uniformly.
    #[must_use]
    pub fn uniform(base: &GeneticCodeTable) -> Self {
        Self::from_parts(base.clone(), vec![0.0; base.len()])
    }

    /// Underlying codon to amino acid mapping
    #[must_use]
    pub const fn base(&self) -> &GeneticCodeTable {
        &self.table
    }

    /// NCBI table number of the underlying mapping, if any
    #[must_use]
    pub const fn id(&self) -> Option<u8> {
        self.table.id()
    }

    /// Display name of the underlying mapping, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.table.name()
    }

    /// Weight of a codon, if the table defines it
    #[must_use]
    pub fn weight(&self, codon: &crate::sequence::Codon) -> Option<f64> {
        self.entries()
            .binary_search_by(|entry| entry.codon.cmp(codon))
            .ok()
            .map(|index| self.weights[index])
    }

    /// Entries paired with their weights, in canonical codon order
    pub fn weighted_entries(&self) -> impl Iterator<Item = (&CodonEntry, f64)> {
        self.table
            .entries()
            .iter()
            .zip(self.weights.iter().copied())
    }

    /// Synonymous codon groups keyed by amino acid symbol
    #[must_use]
    pub const fn groups(&self) -> &BTreeMap<u8, AminoAcidGroup> {
        &self.groups
    }

    /// Synonymous codon group of one amino acid
    #[must_use]
    pub fn group(&self, amino_acid: u8) -> Option<&AminoAcidGroup> {
        self.groups.get(&amino_acid)
    }
}

impl CodonTable for OptimizationTable {
    fn entries(&self) -> &[CodonEntry] {
        self.table.entries()
    }
}

impl From<GeneticCodeTable> for OptimizationTable {
    fn from(table: GeneticCodeTable) -> Self {
        let weights = vec![0.0; table.len()];
        Self::from_parts(table, weights)
    }
}

/// Weights a genetic code by codon usage observed in a coding corpus.
///
/// The weight of every codon in `base` becomes the number of times it occurs
/// in `corpus` (read in-frame, 3 characters at a time), or 0 if it never
/// occurs. The codon to amino acid mapping is left untouched.
///
/// # Examples
///
/// ```rust
/// use synthon_core::table::{GeneticCodeTable, optimize_table};
///
/// let base = GeneticCodeTable::build(11)?;
/// let table = optimize_table(&base, "AAAAAAAAG");
///
/// assert_eq!(table.weight(&"AAA".parse()?), Some(2.0));
/// assert_eq!(table.weight(&"AAG".parse()?), Some(1.0));
/// assert_eq!(table.weight(&"GGG".parse()?), Some(0.0));
/// # Ok::<(), synthon_core::types::SynthonError>(())
/// ```
#[must_use]
pub fn optimize_table(base: &GeneticCodeTable, corpus: &str) -> OptimizationTable {
    let frequencies = compute_frequency(corpus);
    debug!(
        "Weighting table with {} codons ({} distinct) from a {} bp corpus",
        frequencies.values().sum::<u64>(),
        frequencies.len(),
        corpus.len()
    );
    OptimizationTable::from_frequencies(base, &frequencies)
}
