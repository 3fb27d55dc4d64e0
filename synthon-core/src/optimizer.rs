//! Weighted back-translation of proteins into coding sequences.
//!
//! Every amino acid is replaced by one of its synonymous codons, drawn with
//! probability proportional to the codon weights of an [`OptimizationTable`].
//! An amino acid whose codons all weigh zero falls back to a uniform draw.
//!
//! ```rust
//! use synthon_core::optimizer::optimize;
//! use synthon_core::table::{GeneticCodeTable, optimize_table};
//! use synthon_core::translation::translate;
//!
//! let base = GeneticCodeTable::build(11)?;
//! let table = optimize_table(&base, "ATGAAAAAGGCTTAA");
//!
//! let dna = optimize("MKA*", &table, Some(7))?;
//! assert_eq!(dna.len(), 12);
//! assert_eq!(translate(&dna, &table)?, "MKA*");
//! # Ok::<(), synthon_core::types::SynthonError>(())
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::table::{AminoAcidGroup, CodonTable, OptimizationTable};
use crate::types::SynthonError;

/// Back-translates `protein` using the weights of `table`.
///
/// With `Some(seed)` the random source is seeded and the output depends only
/// on `(protein, table, seed)`. With `None` the source is seeded from the
/// operating system. Each call owns its own generator, so concurrent calls
/// never share random state.
///
/// # Errors
///
/// - [`SynthonError::EmptyCodonTable`] if `table` has no entries
/// - [`SynthonError::EmptyAminoAcidSequence`] if `protein` is empty
/// - [`SynthonError::InvalidAminoAcid`] for the first symbol the table cannot encode
pub fn optimize(
    protein: &str,
    table: &OptimizationTable,
    seed: Option<u64>,
) -> Result<String, SynthonError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    optimize_with_rng(protein, table, &mut rng)
}

/// Back-translates `protein`, drawing codons from a caller-supplied source.
///
/// Symbols are matched exactly: `*` is the stop symbol and lowercase letters
/// are not amino acids. The whole protein is validated before any codon is
/// drawn, so a failing call consumes nothing from `rng`.
///
/// # Errors
///
/// Same as [`optimize`].
pub fn optimize_with_rng<R: Rng + ?Sized>(
    protein: &str,
    table: &OptimizationTable,
    rng: &mut R,
) -> Result<String, SynthonError> {
    if table.is_empty() {
        return Err(SynthonError::EmptyCodonTable);
    }
    if protein.is_empty() {
        return Err(SynthonError::EmptyAminoAcidSequence);
    }

    let groups = protein
        .chars()
        .map(|symbol| resolve_group(table, symbol))
        .collect::<Result<Vec<_>, _>>()?;

    let mut dna = String::with_capacity(groups.len() * 3);
    for group in groups {
        let codon = sample_codon(group, rng);
        dna.extend(codon.as_bytes().iter().map(|&base| char::from(base)));
    }

    Ok(dna)
}

fn resolve_group(table: &OptimizationTable, symbol: char) -> Result<&AminoAcidGroup, SynthonError> {
    u8::try_from(symbol)
        .ok()
        .filter(u8::is_ascii)
        .and_then(|amino_acid| table.group(amino_acid))
        .filter(|group| !group.is_empty())
        .ok_or(SynthonError::InvalidAminoAcid(symbol))
}

/// Draws one codon from a non-empty group.
fn sample_codon<R: Rng + ?Sized>(group: &AminoAcidGroup, rng: &mut R) -> crate::sequence::Codon {
    let codons = group.codons();
    if codons.len() == 1 {
        return codons[0].codon;
    }

    let total = group.total_weight();
    if total <= 0.0 {
        return codons[rng.gen_range(0..codons.len())].codon;
    }

    // First codon whose cumulative weight exceeds the draw; zero-weight codons
    // share their predecessor's cumulative value and are never selected.
    let draw = rng.gen_range(0.0..total);
    let index = group
        .cumulative_weights()
        .partition_point(|&cumulative| cumulative <= draw)
        .min(codons.len() - 1);
    codons[index].codon
}
