//! Genetic code tables.
//!
//! A [`GeneticCodeTable`] maps codons to the amino acid (or stop marker
//! `*`) they encode. Tables are immutable once built and may be shared
//! freely between threads.
//!
//! ## Modules
//!
//! - [`registry`]: memoized read-only lookup of the numbered NCBI codes
//! - [`weighted`]: codon usage tables ([`OptimizationTable`]) derived from a corpus
//!
//! ## Examples
//!
//! ```rust
//! use synthon_core::table::{CodonTable, GeneticCodeTable};
//!
//! let table = GeneticCodeTable::build(11)?;
//! assert_eq!(table.len(), 64);
//! assert_eq!(table.amino_acid(&"ATG".parse()?), Some(b'M'));
//! assert_eq!(table.stop_codons().len(), 3);
//! # Ok::<(), synthon_core::types::SynthonError>(())
//! ```

use std::collections::BTreeMap;

use crate::constants::{NCBI_BASE_ORDER, START_MARKER, genetic_code_definition};
use crate::sequence::Codon;
use crate::types::SynthonError;

pub mod registry;
pub mod weighted;

pub use weighted::{OptimizationTable, optimize_table};

/// One codon of a genetic code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodonEntry {
    /// The nucleotide triplet
    pub codon: Codon,
    /// Amino acid symbol encoded by the triplet (`*` for stop)
    pub amino_acid: u8,
    /// Whether the triplet can initiate translation
    pub is_start: bool,
}

/// Read access shared by every kind of codon table.
///
/// Implementors keep their entries sorted by codon, which lets lookups
/// binary search instead of scanning.
pub trait CodonTable {
    /// Codon entries in canonical codon order
    fn entries(&self) -> &[CodonEntry];

    /// Entry for a codon, if the table defines it
    fn entry(&self, codon: &Codon) -> Option<&CodonEntry> {
        let entries = self.entries();
        entries
            .binary_search_by(|entry| entry.codon.cmp(codon))
            .ok()
            .map(|index| &entries[index])
    }

    /// Amino acid encoded by a codon, if the table defines it
    fn amino_acid(&self, codon: &Codon) -> Option<u8> {
        self.entry(codon).map(|entry| entry.amino_acid)
    }

    /// Number of codon entries
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the table has no codon entries
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Codons flagged as translation starts
    fn start_codons(&self) -> Vec<Codon> {
        self.entries()
            .iter()
            .filter(|entry| entry.is_start)
            .map(|entry| entry.codon)
            .collect()
    }

    /// Codons encoding the stop marker
    fn stop_codons(&self) -> Vec<Codon> {
        self.entries()
            .iter()
            .filter(|entry| entry.amino_acid == crate::constants::STOP_MARKER)
            .map(|entry| entry.codon)
            .collect()
    }
}

/// Canonical codon to amino acid mapping of one genetic code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneticCodeTable {
    id: Option<u8>,
    name: Option<String>,
    entries: Vec<CodonEntry>,
}

impl GeneticCodeTable {
    /// Builds the canonical table for a numbered NCBI genetic code.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError::UnknownTableId`] for ids without a definition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use synthon_core::table::GeneticCodeTable;
    /// use synthon_core::types::SynthonError;
    ///
    /// let bacterial = GeneticCodeTable::build(11)?;
    /// assert_eq!(bacterial.id(), Some(11));
    ///
    /// assert!(matches!(
    ///     GeneticCodeTable::build(7),
    ///     Err(SynthonError::UnknownTableId(7))
    /// ));
    /// # Ok::<(), SynthonError>(())
    /// ```
    pub fn build(table_id: u8) -> Result<Self, SynthonError> {
        let definition =
            genetic_code_definition(table_id).ok_or(SynthonError::UnknownTableId(table_id))?;

        let mut entries = Vec::with_capacity(definition.amino_acids.len());
        for (index, (&amino_acid, &start)) in definition
            .amino_acids
            .iter()
            .zip(definition.starts.iter())
            .enumerate()
        {
            let triplet = [
                NCBI_BASE_ORDER[index / 16],
                NCBI_BASE_ORDER[(index / 4) % 4],
                NCBI_BASE_ORDER[index % 4],
            ];
            let codon = Codon::from_bytes(&triplet)
                .ok_or_else(|| SynthonError::UnknownCodon(crate::sequence::window_text(&triplet)))?;
            entries.push(CodonEntry {
                codon,
                amino_acid,
                is_start: start == START_MARKER,
            });
        }

        Self::from_entries(Some(table_id), Some(definition.name.to_string()), entries)
    }

    /// Builds a table from explicit entries.
    ///
    /// Entries are sorted into canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError::InvalidTableFile`] if a codon appears twice.
    pub fn from_entries(
        id: Option<u8>,
        name: Option<String>,
        mut entries: Vec<CodonEntry>,
    ) -> Result<Self, SynthonError> {
        entries.sort_by_key(|entry| entry.codon);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].codon == pair[1].codon) {
            return Err(SynthonError::InvalidTableFile(format!(
                "codon {} is defined more than once",
                pair[0].codon
            )));
        }
        Ok(Self { id, name, entries })
    }

    /// A table with no codon entries
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// NCBI table number this table was built from, if any
    #[must_use]
    pub const fn id(&self) -> Option<u8> {
        self.id
    }

    /// Display name of the genetic code, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Synonymous codons per amino acid, in canonical codon order
    #[must_use]
    pub fn degenerate_codons(&self) -> BTreeMap<u8, Vec<Codon>> {
        let mut groups: BTreeMap<u8, Vec<Codon>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.amino_acid).or_default().push(entry.codon);
        }
        groups
    }

    /// Weights this table by codon usage observed in `corpus`.
    ///
    /// See [`optimize_table`].
    #[must_use]
    pub fn optimize_table(&self, corpus: &str) -> OptimizationTable {
        optimize_table(self, corpus)
    }
}

impl CodonTable for GeneticCodeTable {
    fn entries(&self) -> &[CodonEntry] {
        &self.entries
    }
}

/// A codon together with its usage weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedCodon {
    /// Codon triplet
    pub codon: Codon,
    /// Relative weight, never negative
    pub weight: f64,
}

/// Synonymous codons of one amino acid with their weights.
///
/// The cumulative weight distribution is computed once when the group is
/// built so sampling needs a single uniform draw.
#[derive(Debug, Clone, PartialEq)]
pub struct AminoAcidGroup {
    amino_acid: u8,
    codons: Vec<WeightedCodon>,
    cumulative: Vec<f64>,
}

impl AminoAcidGroup {
    pub(crate) fn new(amino_acid: u8, codons: Vec<WeightedCodon>) -> Self {
        let cumulative = codons
            .iter()
            .scan(0.0, |running, codon| {
                *running += codon.weight;
                Some(*running)
            })
            .collect();
        Self {
            amino_acid,
            codons,
            cumulative,
        }
    }

    /// Amino acid symbol shared by every codon of the group
    #[must_use]
    pub const fn amino_acid(&self) -> u8 {
        self.amino_acid
    }

    /// Synonymous codons in canonical order
    #[must_use]
    pub fn codons(&self) -> &[WeightedCodon] {
        &self.codons
    }

    /// Running sums of the codon weights
    #[must_use]
    pub fn cumulative_weights(&self) -> &[f64] {
        &self.cumulative
    }

    /// Sum of the codon weights
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Number of synonymous codons
    #[must_use]
    pub fn len(&self) -> usize {
        self.codons.len()
    }

    /// Whether the group has no codons
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }
}
