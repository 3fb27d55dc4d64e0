//! Blending of two codon usage tables.

use std::collections::BTreeMap;

use log::debug;

use crate::sequence::Codon;
use crate::table::{CodonEntry, CodonTable, GeneticCodeTable, OptimizationTable};
use crate::types::SynthonError;

/// Blends the weights of two tables.
///
/// Each codon in either table gets weight `weight * w_b + (1 - weight) * w_a`,
/// where a codon missing from one side counts as 0 there. `weight` 0 yields
/// the weights of `a` and 1 yields those of `b`.
///
/// # Errors
///
/// - [`SynthonError::InvalidWeight`] unless `0 <= weight <= 1`
/// - [`SynthonError::TableMismatch`] if a shared codon encodes different amino acids
///
/// # Examples
///
/// ```rust
/// use synthon_core::compromise::compromise_codon_table;
/// use synthon_core::table::{GeneticCodeTable, optimize_table};
///
/// let base = GeneticCodeTable::build(11)?;
/// let a = optimize_table(&base, "AAAAAA");
/// let b = optimize_table(&base, "AAGAAG");
///
/// let blend = compromise_codon_table(&a, &b, 0.25)?;
/// assert_eq!(blend.weight(&"AAA".parse()?), Some(1.5));
/// assert_eq!(blend.weight(&"AAG".parse()?), Some(0.5));
/// # Ok::<(), synthon_core::types::SynthonError>(())
/// ```
pub fn compromise_codon_table(
    a: &OptimizationTable,
    b: &OptimizationTable,
    weight: f64,
) -> Result<OptimizationTable, SynthonError> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(SynthonError::InvalidWeight(weight));
    }
    debug!("Blending codon tables with weight {weight}");
    merge_tables(a, b, |left, right| weight * right + (1.0 - weight) * left)
}

/// Sums the weights of two tables codon by codon.
///
/// Uses the same codon domain and mismatch rule as [`compromise_codon_table`].
///
/// # Errors
///
/// Returns [`SynthonError::TableMismatch`] if a shared codon encodes
/// different amino acids.
pub fn add_codon_tables(
    a: &OptimizationTable,
    b: &OptimizationTable,
) -> Result<OptimizationTable, SynthonError> {
    merge_tables(a, b, |left, right| left + right)
}

fn merge_tables<F>(
    a: &OptimizationTable,
    b: &OptimizationTable,
    combine: F,
) -> Result<OptimizationTable, SynthonError>
where
    F: Fn(f64, f64) -> f64,
{
    let mut merged: BTreeMap<Codon, (CodonEntry, f64, f64)> = a
        .weighted_entries()
        .map(|(entry, weight)| (entry.codon, (*entry, weight, 0.0)))
        .collect();

    for (entry, weight) in b.weighted_entries() {
        match merged.get_mut(&entry.codon) {
            Some((existing, _, right)) => {
                if existing.amino_acid != entry.amino_acid {
                    return Err(SynthonError::TableMismatch {
                        codon: entry.codon,
                        left: char::from(existing.amino_acid),
                        right: char::from(entry.amino_acid),
                    });
                }
                existing.is_start |= entry.is_start;
                *right = weight;
            }
            None => {
                merged.insert(entry.codon, (*entry, 0.0, weight));
            }
        }
    }

    let (entries, weights): (Vec<CodonEntry>, Vec<f64>) = merged
        .into_values()
        .map(|(entry, left, right)| (entry, combine(left, right)))
        .unzip();

    let id = a.id().filter(|&id| b.id() == Some(id));
    let name = a
        .name()
        .filter(|&name| b.name() == Some(name))
        .map(str::to_string);
    let table = GeneticCodeTable::from_entries(id, name, entries)?;

    Ok(OptimizationTable::from_parts(table, weights))
}
