//! Codon values and nucleotide sequence windowing.
//!
//! ## Overview
//!
//! Nucleotide input is read codon by codon in consecutive, non-overlapping
//! windows of three characters, left to right. A trailing window shorter
//! than three characters is dropped. Input is case-insensitive and `U` is
//! read as `T`, so DNA and RNA encodings of the same sequence are equivalent.
//!
//! ## Modules
//!
//! - [`io`]: FASTA and GFF3 readers producing training corpora
//!
//! ## Examples
//!
//! ```rust
//! use synthon_core::sequence::{Codon, codon_windows};
//!
//! let codons: Vec<Codon> = codon_windows(b"atgAAAuaG")
//!     .filter_map(Codon::from_bytes)
//!     .collect();
//!
//! assert_eq!(codons.len(), 3);
//! assert_eq!(codons[2].to_string(), "TAG");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::constants::{CODON_LENGTH, NUCLEOTIDE_LETTERS};
use crate::types::SynthonError;

pub mod io;

pub use io::*;

/// Normalizes a nucleotide character to its canonical upper-case DNA letter.
///
/// # Returns
///
/// `Some(b'A' | b'C' | b'G' | b'T')` for valid nucleotides (`U` maps to `T`),
/// `None` for anything else.
///
/// # Examples
///
/// ```rust
/// use synthon_core::sequence::normalize_nucleotide;
///
/// assert_eq!(normalize_nucleotide(b'a'), Some(b'A'));
/// assert_eq!(normalize_nucleotide(b'u'), Some(b'T'));
/// assert_eq!(normalize_nucleotide(b'N'), None);
/// ```
#[must_use]
pub const fn normalize_nucleotide(c: u8) -> Option<u8> {
    match c.to_ascii_uppercase() {
        b'A' => Some(b'A'),
        b'C' => Some(b'C'),
        b'G' => Some(b'G'),
        b'T' | b'U' => Some(b'T'),
        _ => None,
    }
}

/// A canonical nucleotide triplet over the `ACGT` alphabet.
///
/// Codons order lexicographically (`AAA` < `AAC` < ... < `TTT`), which is
/// the canonical order tables store their entries in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon([u8; 3]);

impl Codon {
    /// Builds a codon from a 3-character window.
    ///
    /// Returns `None` when the window is not exactly three characters long
    /// or holds anything other than `ACGTU` (in either case).
    #[must_use]
    pub fn from_bytes(window: &[u8]) -> Option<Self> {
        if window.len() != CODON_LENGTH {
            return None;
        }
        Some(Self([
            normalize_nucleotide(window[0])?,
            normalize_nucleotide(window[1])?,
            normalize_nucleotide(window[2])?,
        ]))
    }

    /// The upper-case nucleotide letters of this codon
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// Iterates over all 64 canonical codons in sort order.
    pub fn all() -> impl Iterator<Item = Self> {
        NUCLEOTIDE_LETTERS.into_iter().flat_map(|first| {
            NUCLEOTIDE_LETTERS.into_iter().flat_map(move |second| {
                NUCLEOTIDE_LETTERS
                    .into_iter()
                    .map(move |third| Self([first, second, third]))
            })
        })
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &base in &self.0 {
            write!(f, "{}", base as char)?;
        }
        Ok(())
    }
}

impl FromStr for Codon {
    type Err = SynthonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| SynthonError::UnknownCodon(s.to_uppercase()))
    }
}

/// Splits a nucleotide sequence into consecutive 3-character windows.
///
/// Windows do not overlap; a trailing partial window is dropped.
pub fn codon_windows(sequence: &[u8]) -> impl Iterator<Item = &[u8]> {
    sequence.chunks_exact(CODON_LENGTH)
}

/// Renders a raw window for error reporting
pub(crate) fn window_text(window: &[u8]) -> String {
    String::from_utf8_lossy(window).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codon_from_bytes_normalizes_case_and_rna() {
        let codon = Codon::from_bytes(b"auG").unwrap();
        assert_eq!(codon.as_bytes(), b"ATG");
        assert_eq!(codon.to_string(), "ATG");
    }

    #[test]
    fn test_codon_from_bytes_rejects_invalid() {
        assert!(Codon::from_bytes(b"NNN").is_none());
        assert!(Codon::from_bytes(b"AT").is_none());
        assert!(Codon::from_bytes(b"ATGA").is_none());
        assert!(Codon::from_bytes(b"A-G").is_none());
    }

    #[test]
    fn test_codon_from_str_error_carries_triplet() {
        let err = "atn".parse::<Codon>().unwrap_err();
        match err {
            SynthonError::UnknownCodon(triplet) => assert_eq!(triplet, "ATN"),
            other => panic!("Expected UnknownCodon, got {other:?}"),
        }
    }

    #[test]
    fn test_all_codons_sorted_and_unique() {
        let codons: Vec<Codon> = Codon::all().collect();
        assert_eq!(codons.len(), 64);
        assert_eq!(codons[0].to_string(), "AAA");
        assert_eq!(codons[63].to_string(), "TTT");
        assert!(codons.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_codon_windows_drops_partial_tail() {
        let windows: Vec<&[u8]> = codon_windows(b"ATGAAACG").collect();
        assert_eq!(windows, vec![&b"ATG"[..], &b"AAA"[..]]);
    }

    #[test]
    fn test_codon_windows_short_input() {
        assert_eq!(codon_windows(b"AT").count(), 0);
        assert_eq!(codon_windows(b"").count(), 0);
    }
}
