//! JSON persistence of codon usage tables.
//!
//! A table is stored as one document listing, per amino acid, its codons and
//! their weights. Start codons are stored alongside; stop codons are written
//! for readability and derived from the `*` amino acid record on read.
//!
//! ```json
//! {
//!   "version": 1,
//!   "table_id": 11,
//!   "name": "Bacterial, Archaeal and Plant Plastid",
//!   "start_codons": ["ATG", "GTG"],
//!   "stop_codons": ["TAA", "TAG", "TGA"],
//!   "amino_acids": [
//!     { "letter": "A", "codons": [{ "triplet": "GCA", "weight": 12.0 }] }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::TABLE_FORMAT_VERSION;
use crate::sequence::Codon;
use crate::table::{CodonEntry, CodonTable, GeneticCodeTable, OptimizationTable};
use crate::types::SynthonError;

#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_id: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    start_codons: Vec<String>,
    #[serde(default)]
    stop_codons: Vec<String>,
    amino_acids: Vec<AminoAcidRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AminoAcidRecord {
    letter: String,
    codons: Vec<CodonRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CodonRecord {
    triplet: String,
    weight: f64,
}

impl From<&OptimizationTable> for TableDocument {
    fn from(table: &OptimizationTable) -> Self {
        let amino_acids = table
            .groups()
            .values()
            .map(|group| AminoAcidRecord {
                letter: char::from(group.amino_acid()).to_string(),
                codons: group
                    .codons()
                    .iter()
                    .map(|weighted| CodonRecord {
                        triplet: weighted.codon.to_string(),
                        weight: weighted.weight,
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: TABLE_FORMAT_VERSION,
            table_id: table.id(),
            name: table.name().map(str::to_string),
            start_codons: codon_strings(table.start_codons()),
            stop_codons: codon_strings(table.stop_codons()),
            amino_acids,
        }
    }
}

impl TableDocument {
    fn into_table(self) -> Result<OptimizationTable, SynthonError> {
        if self.version != TABLE_FORMAT_VERSION {
            return Err(invalid(format!(
                "unsupported table format version {} (expected {TABLE_FORMAT_VERSION})",
                self.version
            )));
        }

        let starts = self
            .start_codons
            .iter()
            .map(|text| parse_triplet(text))
            .collect::<Result<HashSet<_>, _>>()?;

        let mut weighted: BTreeMap<Codon, (CodonEntry, f64)> = BTreeMap::new();
        for record in &self.amino_acids {
            let amino_acid = parse_letter(&record.letter)?;
            for codon_record in &record.codons {
                let codon = parse_triplet(&codon_record.triplet)?;
                let weight = codon_record.weight;
                if !weight.is_finite() || weight < 0.0 {
                    return Err(invalid(format!("codon {codon} has invalid weight {weight}")));
                }
                let entry = CodonEntry {
                    codon,
                    amino_acid,
                    is_start: starts.contains(&codon),
                };
                if weighted.insert(codon, (entry, weight)).is_some() {
                    return Err(invalid(format!("codon {codon} is defined more than once")));
                }
            }
        }

        if let Some(orphan) = starts.iter().find(|codon| !weighted.contains_key(*codon)) {
            return Err(invalid(format!("start codon {orphan} has no amino acid")));
        }

        let (entries, weights): (Vec<CodonEntry>, Vec<f64>) = weighted.into_values().unzip();
        let table = GeneticCodeTable::from_entries(self.table_id, self.name, entries)?;
        Ok(OptimizationTable::from_parts(table, weights))
    }
}

fn codon_strings(codons: Vec<Codon>) -> Vec<String> {
    codons.iter().map(Codon::to_string).collect()
}

fn invalid(message: String) -> SynthonError {
    SynthonError::InvalidTableFile(message)
}

fn parse_triplet(text: &str) -> Result<Codon, SynthonError> {
    text.parse()
        .map_err(|_| invalid(format!("invalid codon triplet {text:?}")))
}

fn parse_letter(text: &str) -> Result<u8, SynthonError> {
    match text.as_bytes() {
        [letter] if letter.is_ascii_graphic() => Ok(*letter),
        _ => Err(invalid(format!(
            "amino acid letter must be a single character, got {text:?}"
        ))),
    }
}

/// Serializes a table as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SynthonError::Json`] or [`SynthonError::Io`] if writing fails.
pub fn to_writer<W: Write>(table: &OptimizationTable, writer: W) -> Result<(), SynthonError> {
    serde_json::to_writer_pretty(writer, &TableDocument::from(table))?;
    Ok(())
}

/// Deserializes and validates a table document.
///
/// # Errors
///
/// Returns [`SynthonError::InvalidTableFile`] for syntactically or
/// semantically malformed documents.
pub fn from_reader<R: Read>(reader: R) -> Result<OptimizationTable, SynthonError> {
    let document: TableDocument = serde_json::from_reader(reader)
        .map_err(|e| invalid(format!("malformed table document: {e}")))?;
    document.into_table()
}

/// Writes a table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`SynthonError::Io`] if the file cannot be created or written.
pub fn write_table<P: AsRef<Path>>(table: &OptimizationTable, path: P) -> Result<(), SynthonError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    to_writer(table, &mut writer)?;
    writeln!(writer)?;
    writer.flush()?;
    debug!("Wrote codon table with {} codons to {}", table.len(), path.display());
    Ok(())
}

/// Reads a table previously written by [`write_table`].
///
/// # Errors
///
/// Returns [`SynthonError::Io`] if the file cannot be opened and
/// [`SynthonError::InvalidTableFile`] if its contents are malformed.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<OptimizationTable, SynthonError> {
    let path = path.as_ref();
    let table = from_reader(BufReader::new(File::open(path)?))?;
    debug!("Read codon table with {} codons from {}", table.len(), path.display());
    Ok(table)
}
