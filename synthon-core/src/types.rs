use std::collections::HashMap;

use thiserror::Error;

use crate::sequence::Codon;

/// Codon occurrence counts observed in a nucleotide corpus.
///
/// Only the 64 canonical codons can appear as keys.
pub type CodonFrequencyMap = HashMap<Codon, u64>;

/// Error types returned by table construction, translation and optimization
#[derive(Error, Debug)]
pub enum SynthonError {
    /// Operation received a table with no codon entries
    #[error("empty codon table")]
    EmptyCodonTable,
    /// Translation received a zero-length nucleotide sequence
    #[error("empty sequence string")]
    EmptySequence,
    /// Optimization received a zero-length amino acid sequence
    #[error("empty amino acid string")]
    EmptyAminoAcidSequence,
    /// Translation met a triplet the table does not define
    #[error("unknown codon: {0}")]
    UnknownCodon(String),
    /// Optimization met a residue with no synonymous codons in the table
    #[error("invalid amino acid found in amino acid sequence: {0}")]
    InvalidAminoAcid(char),
    /// Compromise blend factor outside of [0, 1]
    #[error("invalid compromise weight {0}: must be between 0 and 1")]
    InvalidWeight(f64),
    /// Requested genetic code is not supported
    #[error("unknown genetic code table id: {0}")]
    UnknownTableId(u8),
    /// Two tables disagree on the amino acid a codon encodes
    #[error("codon {codon} encodes {left} in one table and {right} in the other")]
    TableMismatch {
        codon: Codon,
        left: char,
        right: char,
    },
    /// Persisted table document is structurally invalid
    #[error("invalid table file: {0}")]
    InvalidTableFile(String),
    /// Optimized sequence did not translate back to its input protein
    #[error("optimized sequence for {0} does not translate back to its protein")]
    RoundTripMismatch(String),
    /// Error parsing input records
    #[error("parse error: {0}")]
    ParseError(String),
    /// Worker thread pool could not be created
    #[error("failed to configure thread pool: {0}")]
    ThreadPool(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Table document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amino_acid_message_names_symbol() {
        let err = SynthonError::InvalidAminoAcid('O');
        assert_eq!(
            err.to_string(),
            "invalid amino acid found in amino acid sequence: O"
        );
    }

    #[test]
    fn test_table_mismatch_message() {
        let codon: Codon = "TGA".parse().unwrap();
        let err = SynthonError::TableMismatch {
            codon,
            left: '*',
            right: 'W',
        };
        assert_eq!(
            err.to_string(),
            "codon TGA encodes * in one table and W in the other"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SynthonError = io.into();
        assert!(matches!(err, SynthonError::Io(_)));
    }
}
