use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::SynthonConfig;
use crate::constants::CODING_FEATURE_TYPE;
use crate::optimizer::optimize;
use crate::sequence::{
    FeatureRecord, SequenceRecord, coding_corpus, read_fasta_records, read_gff_features,
    read_gff_with_sequence,
};
use crate::table::{GeneticCodeTable, OptimizationTable, optimize_table, registry};
use crate::translation::translate;
use crate::types::SynthonError;

/// High-level driver for table training, translation and codon design.
///
/// `CodonDesigner` wires the configured genetic code, the file readers and
/// the batch paths together. Every method takes `&self`; the designer holds
/// no state besides its configuration.
///
/// # Examples
///
/// ## Train a table and design sequences for it
///
/// ```rust,no_run
/// use synthon_core::{CodonDesigner, config::SynthonConfig};
/// use synthon_core::sequence::read_fasta_records;
///
/// let designer = CodonDesigner::new(SynthonConfig {
///     seed: Some(7),
///     verify_round_trip: true,
///     ..Default::default()
/// });
///
/// let table = designer.train_from_cds_fasta("ecoli_cds.fasta")?;
/// let proteins = read_fasta_records("proteins.fasta", "protein")?;
/// let designed = designer.optimize_records(&proteins, &table)?;
///
/// for record in &designed {
///     println!(">{}\n{}", record.id, record.sequence);
/// }
/// # Ok::<(), synthon_core::types::SynthonError>(())
/// ```
///
/// ## Translate records in memory
///
/// ```rust
/// use synthon_core::{CodonDesigner, config::SynthonConfig};
/// use synthon_core::sequence::SequenceRecord;
///
/// let designer = CodonDesigner::new(SynthonConfig::default());
/// let proteins = designer.translate_records(&[SequenceRecord::new("orf1", "ATGAAATAA")])?;
///
/// assert_eq!(proteins[0].id, "orf1");
/// assert_eq!(proteins[0].sequence, "MK*");
/// # Ok::<(), synthon_core::types::SynthonError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodonDesigner {
    /// Configuration options for translation and design
    pub config: SynthonConfig,
}

impl CodonDesigner {
    /// Creates a new designer with the specified configuration.
    pub const fn new(config: SynthonConfig) -> Self {
        Self { config }
    }

    /// Shared table for the configured genetic code.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError::UnknownTableId`] if the configured code is not
    /// supported.
    pub fn base_table(&self) -> Result<&'static GeneticCodeTable, SynthonError> {
        registry::lookup(self.config.translation_table)
    }

    /// Weights the configured genetic code by the codon usage of a set of
    /// feature records. Only records of type `CDS` contribute.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError::UnknownTableId`] if the configured code is not
    /// supported.
    pub fn train<R: FeatureRecord>(&self, records: &[R]) -> Result<OptimizationTable, SynthonError> {
        let base = self.base_table()?;
        let corpus = coding_corpus(records);
        let table = optimize_table(base, &corpus);
        if !self.config.quiet {
            info!(
                "Trained codon table {} on {} coding features ({} bp)",
                self.config.translation_table,
                records
                    .iter()
                    .filter(|record| record.feature_type() == CODING_FEATURE_TYPE)
                    .count(),
                corpus.len()
            );
        }
        Ok(table)
    }

    /// Trains a table on a FASTA file in which every record is a coding
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError`] if the file cannot be read or parsed, or if
    /// the configured code is not supported.
    pub fn train_from_cds_fasta<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<OptimizationTable, SynthonError> {
        let records = read_fasta_records(path, CODING_FEATURE_TYPE)?;
        self.train(&records)
    }

    /// Trains a table on the `CDS` features of a GFF3 annotation, resolved
    /// against the reference sequences they annotate.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError`] if either file cannot be read or parsed, if a
    /// feature falls outside its reference, or if the configured code is not
    /// supported.
    pub fn train_from_gff<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        gff_path: P,
        reference_path: Q,
    ) -> Result<OptimizationTable, SynthonError> {
        let features = read_gff_features(gff_path, reference_path)?;
        self.train(&features)
    }

    /// Trains a table on a GFF3 file whose reference sequences follow a
    /// `##FASTA` directive in the same file.
    ///
    /// # Errors
    ///
    /// Returns [`SynthonError`] if the file cannot be read or parsed, if a
    /// feature names a sequence the file does not carry, or if the configured
    /// code is not supported.
    pub fn train_from_gff_with_sequence<P: AsRef<Path>>(
        &self,
        gff_path: P,
    ) -> Result<OptimizationTable, SynthonError> {
        let features = read_gff_with_sequence(gff_path)?;
        self.train(&features)
    }

    /// Translates nucleotide records with the configured genetic code,
    /// keeping their identifiers and descriptions.
    ///
    /// # Errors
    ///
    /// Returns the first translation error encountered.
    pub fn translate_records(
        &self,
        records: &[SequenceRecord],
    ) -> Result<Vec<SequenceRecord>, SynthonError> {
        let table = self.base_table()?;
        let translated = records
            .iter()
            .map(|record| {
                translate(&record.sequence, table).map(|protein| derived_record(record, protein))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Translated {} records", translated.len());
        Ok(translated)
    }

    /// Designs a coding sequence for every protein record.
    ///
    /// Records are processed in parallel and returned in input order. With a
    /// configured seed, record `i` is sampled with seed `seed + i`
    /// (wrapping), so the batch output does not depend on thread scheduling.
    ///
    /// # Errors
    ///
    /// Returns the first optimization error, a
    /// [`SynthonError::RoundTripMismatch`] naming the record when
    /// verification is enabled and fails, or [`SynthonError::ThreadPool`] if
    /// the configured thread pool cannot be built.
    pub fn optimize_records(
        &self,
        records: &[SequenceRecord],
        table: &OptimizationTable,
    ) -> Result<Vec<SequenceRecord>, SynthonError> {
        let designed = match self.config.num_threads {
            Some(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| {
                    SynthonError::ThreadPool(format!("Failed to configure thread pool: {e}"))
                })?
                .install(|| self.optimize_parallel(records, table)),
            None => self.optimize_parallel(records, table),
        }?;

        if !self.config.quiet {
            info!("Designed {} coding sequences", designed.len());
        }
        Ok(designed)
    }

    fn optimize_parallel(
        &self,
        records: &[SequenceRecord],
        table: &OptimizationTable,
    ) -> Result<Vec<SequenceRecord>, SynthonError> {
        records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.optimize_record(index, record, table))
            .collect()
    }

    fn optimize_record(
        &self,
        index: usize,
        record: &SequenceRecord,
        table: &OptimizationTable,
    ) -> Result<SequenceRecord, SynthonError> {
        let seed = self.config.seed.map(|seed| seed.wrapping_add(index as u64));
        let dna = optimize(&record.sequence, table, seed)?;

        if self.config.verify_round_trip && translate(&dna, table)? != record.sequence {
            return Err(SynthonError::RoundTripMismatch(record.id.clone()));
        }

        Ok(derived_record(record, dna))
    }
}

fn derived_record(source: &SequenceRecord, sequence: String) -> SequenceRecord {
    SequenceRecord {
        id: source.id.clone(),
        description: source.description.clone(),
        sequence,
        feature_type: source.feature_type.clone(),
    }
}
