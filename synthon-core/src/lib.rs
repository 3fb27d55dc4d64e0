//! # Synthon - Codon Translation and Optimization
//!
//! A Rust library for moving between coding sequences and proteins under the
//! NCBI genetic codes, and for designing coding sequences that follow the
//! codon usage of a host organism.
//!
//! ## Overview
//!
//! Every amino acid except methionine and tryptophan is encoded by several
//! synonymous codons, and organisms favour some of them over others. Synthon
//! learns those preferences from a corpus of coding sequences and samples
//! codons in the same proportions when back-translating a protein.
//!
//! ## Features
//!
//! - **Translation**: 26 NCBI genetic codes, case-insensitive, stops kept as `*`
//! - **Codon Usage Tables**: trained from CDS FASTA files or GFF3 annotations
//! - **Weighted Back-translation**: reproducible with a seed, parallel over batches
//! - **Table Compromise**: blend or add the usage of two organisms
//! - **Table Files**: JSON persistence of trained tables
//!
//! ## Quick Start
//!
//! ```rust
//! use synthon_core::optimizer::optimize;
//! use synthon_core::table::{GeneticCodeTable, optimize_table};
//! use synthon_core::translation::translate;
//!
//! let base = GeneticCodeTable::build(11)?;
//! let table = optimize_table(&base, "ATGGCTGCAAAATAA");
//!
//! let protein = translate("ATGGCTGCAAAATAA", &base)?;
//! assert_eq!(protein, "MAAK*");
//!
//! let designed = optimize(&protein, &table, Some(42))?;
//! assert_eq!(translate(&designed, &base)?, protein);
//! # Ok::<(), synthon_core::types::SynthonError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Configuration options for design runs
//! - [`constants`]: NCBI genetic code definitions and format constants
//! - [`sequence`]: Codons, sequence windows and FASTA/GFF3 input
//! - [`table`]: Genetic code tables, the shared registry and weighted tables
//! - [`translation`]: Forward translation
//! - [`frequency`]: Codon usage counting
//! - [`optimizer`]: Weighted back-translation
//! - [`compromise`]: Blending and addition of weighted tables
//! - [`codec`]: JSON table files
//! - [`engine`]: High-level [`CodonDesigner`] driver
//! - [`output`]: FASTA and plain sequence output
//! - [`types`]: Error type and shared aliases
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, SynthonError>`](types::SynthonError),
//! covering:
//!
//! - Empty inputs and unknown codons or amino acids
//! - Unsupported genetic codes and incompatible tables
//! - Malformed table files, FASTA and GFF3 input
//! - I/O errors during file operations

pub mod codec;
pub mod compromise;
pub mod config;
pub mod constants;
pub mod engine;
pub mod frequency;
pub mod optimizer;
pub mod output;
pub mod sequence;
pub mod table;
pub mod translation;
pub mod types;

#[cfg(test)]
mod test_fixtures;

pub use engine::CodonDesigner;
pub use types::SynthonError;
