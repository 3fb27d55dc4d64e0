//! Output formatting for sequence records.
//!
//! Records keep the identifier and description of the input they were
//! derived from, so translated or designed sequences can be traced back.
//!
//! ## Supported Formats
//!
//! - **FASTA**: one record per sequence, sequence on a single line
//! - **Plain**: one bare sequence per line
//!
//! ## Examples
//!
//! ```rust
//! use synthon_core::config::OutputFormat;
//! use synthon_core::output::write_records;
//! use synthon_core::sequence::SequenceRecord;
//!
//! let records = vec![SequenceRecord::new("gfp", "MASK*")];
//! let mut buffer = Vec::new();
//! write_records(&mut buffer, &records, OutputFormat::Fasta)?;
//!
//! assert_eq!(String::from_utf8(buffer)?, ">gfp\nMASK*\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use bio::io::fasta;

use crate::config::OutputFormat;
use crate::sequence::SequenceRecord;
use crate::types::SynthonError;

/// Writes records in the specified format.
///
/// # Errors
///
/// Returns [`SynthonError::Io`] if writing fails.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[SequenceRecord],
    format: OutputFormat,
) -> Result<(), SynthonError> {
    match format {
        OutputFormat::Fasta => write_fasta(writer, records),
        OutputFormat::Plain => write_plain(writer, records),
    }
}

/// Writes records as FASTA using rust-bio
pub fn write_fasta<W: Write>(writer: &mut W, records: &[SequenceRecord]) -> Result<(), SynthonError> {
    let mut fasta_writer = fasta::Writer::new(writer);
    for record in records {
        fasta_writer.write(
            &record.id,
            record.description.as_deref(),
            record.sequence.as_bytes(),
        )?;
    }
    fasta_writer.flush()?;
    Ok(())
}

/// Writes each sequence on its own line
pub fn write_plain<W: Write>(writer: &mut W, records: &[SequenceRecord]) -> Result<(), SynthonError> {
    for record in records {
        writeln!(writer, "{}", record.sequence)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_records() -> Vec<SequenceRecord> {
        let mut described = SequenceRecord::new("seq2", "ATGAAATAA");
        described.description = Some("designed for E. coli".to_string());
        vec![SequenceRecord::new("seq1", "MK*"), described]
    }

    #[test]
    fn test_write_records_fasta_format() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &create_test_records(), OutputFormat::Fasta).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, ">seq1\nMK*\n>seq2 designed for E. coli\nATGAAATAA\n");
    }

    #[test]
    fn test_write_records_plain_format() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &create_test_records(), OutputFormat::Plain).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "MK*\nATGAAATAA\n");
    }

    #[test]
    fn test_write_records_empty() {
        for format in [OutputFormat::Fasta, OutputFormat::Plain] {
            let mut buffer = Vec::new();
            let result = write_records(&mut buffer, &[], format);
            assert!(result.is_ok(), "Failed to write empty records for format: {format:?}");
            assert!(buffer.is_empty());
        }
    }

    #[test]
    fn test_fasta_output_reads_back() {
        let records = create_test_records();
        let mut buffer = Vec::new();
        write_fasta(&mut buffer, &records).unwrap();

        let parsed = crate::sequence::read_fasta_from(buffer.as_slice(), "CDS").unwrap();
        assert_eq!(parsed, records);
    }
}
