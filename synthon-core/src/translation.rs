//! Forward translation of nucleotide sequences.

use crate::sequence::{Codon, codon_windows, window_text};
use crate::table::CodonTable;
use crate::types::SynthonError;

/// Translates a nucleotide sequence into a protein.
///
/// The sequence is read in consecutive, non-overlapping triplets from the
/// left; a trailing partial triplet is dropped. Input is case-insensitive.
/// Stop codons emit `*` and translation carries on, so the output holds a
/// marker for every stop encountered.
///
/// # Errors
///
/// - [`SynthonError::EmptyCodonTable`] if `table` has no entries
/// - [`SynthonError::EmptySequence`] if `sequence` is empty
/// - [`SynthonError::UnknownCodon`] for the first triplet the table does not define
///
/// # Examples
///
/// ```rust
/// use synthon_core::table::GeneticCodeTable;
/// use synthon_core::translation::translate;
///
/// let table = GeneticCodeTable::build(11)?;
/// assert_eq!(translate("atgGCTtaaGG", &table)?, "MA*");
/// # Ok::<(), synthon_core::types::SynthonError>(())
/// ```
pub fn translate<T: CodonTable + ?Sized>(sequence: &str, table: &T) -> Result<String, SynthonError> {
    if table.is_empty() {
        return Err(SynthonError::EmptyCodonTable);
    }
    if sequence.is_empty() {
        return Err(SynthonError::EmptySequence);
    }

    let mut protein = String::with_capacity(sequence.len() / 3);
    for window in codon_windows(sequence.as_bytes()) {
        let amino_acid = Codon::from_bytes(window)
            .and_then(|codon| table.amino_acid(&codon))
            .ok_or_else(|| SynthonError::UnknownCodon(window_text(window)))?;
        protein.push(char::from(amino_acid));
    }

    Ok(protein)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{GeneticCodeTable, OptimizationTable};
    use crate::test_fixtures::{GFP_DNA, GFP_TRANSLATION};

    #[test]
    fn test_translate_gfp() {
        let table = GeneticCodeTable::build(11).unwrap();
        assert_eq!(translate(GFP_DNA, &table).unwrap(), GFP_TRANSLATION);
    }

    #[test]
    fn test_translate_is_case_insensitive() {
        let table = GeneticCodeTable::build(11).unwrap();
        let lower = GFP_DNA.to_lowercase();
        let mixed: String = GFP_DNA
            .chars()
            .enumerate()
            .map(|(i, c)| if i < 50 { c.to_ascii_lowercase() } else { c })
            .collect();

        assert_eq!(translate(&lower, &table).unwrap(), GFP_TRANSLATION);
        assert_eq!(translate(&mixed, &table).unwrap(), GFP_TRANSLATION);
    }

    #[test]
    fn test_every_codon_translates_to_table_symbol() {
        let table = GeneticCodeTable::build(11).unwrap();
        for entry in table.entries() {
            let protein = translate(&entry.codon.to_string(), &table).unwrap();
            assert_eq!(protein, char::from(entry.amino_acid).to_string());
        }
    }

    #[test]
    fn test_translate_continues_past_stop() {
        let table = GeneticCodeTable::build(1).unwrap();
        assert_eq!(translate("ATGTAAATGTGA", &table).unwrap(), "M*M*");
    }

    #[test]
    fn test_translate_drops_partial_tail() {
        let table = GeneticCodeTable::build(1).unwrap();
        assert_eq!(translate("ATGAA", &table).unwrap(), "M");
        assert_eq!(translate("AT", &table).unwrap(), "");
    }

    #[test]
    fn test_translate_rna_input() {
        let table = GeneticCodeTable::build(1).unwrap();
        assert_eq!(translate("AUGUUUUAG", &table).unwrap(), "MF*");
    }

    #[test]
    fn test_translate_errors_on_empty_codon_table() {
        let result = translate("A", &GeneticCodeTable::empty());
        assert!(matches!(result, Err(SynthonError::EmptyCodonTable)));
    }

    #[test]
    fn test_translate_errors_on_empty_sequence() {
        let table = GeneticCodeTable::build(1).unwrap();
        assert!(matches!(translate("", &table), Err(SynthonError::EmptySequence)));
    }

    #[test]
    fn test_translate_errors_on_unknown_codon() {
        let table = GeneticCodeTable::build(1).unwrap();
        match translate("ATGnnnTAA", &table) {
            Err(SynthonError::UnknownCodon(triplet)) => assert_eq!(triplet, "NNN"),
            other => panic!("Expected UnknownCodon, got {other:?}"),
        }
    }

    #[test]
    fn test_translate_with_optimization_table() {
        let base = GeneticCodeTable::build(11).unwrap();
        let table = OptimizationTable::uniform(&base);
        assert_eq!(translate(GFP_DNA, &table).unwrap(), GFP_TRANSLATION);
    }
}
