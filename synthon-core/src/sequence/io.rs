use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::alphabets::dna;
use bio::bio_types::strand::Strand;
use bio::io::{fasta, gff};
use log::debug;

use crate::constants::CODING_FEATURE_TYPE;
use crate::types::SynthonError;

/// A record produced by an upstream sequence or annotation parser.
///
/// This is the only contract the codon core relies on: a type classifier
/// and the nucleotide (or protein) sequence of the feature.
pub trait FeatureRecord {
    /// Feature classifier, e.g. `CDS` or `gene`
    fn feature_type(&self) -> &str;

    /// Sequence of the feature
    fn sequence(&self) -> &str;
}

/// A FASTA record tagged with the feature type it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Record identifier (first word of the header)
    pub id: String,
    /// Remainder of the header line, if any
    pub description: Option<String>,
    /// Sequence letters as read
    pub sequence: String,
    /// Feature type this record is treated as
    pub feature_type: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            sequence: sequence.into(),
            feature_type: CODING_FEATURE_TYPE.to_string(),
        }
    }
}

impl FeatureRecord for SequenceRecord {
    fn feature_type(&self) -> &str {
        &self.feature_type
    }

    fn sequence(&self) -> &str {
        &self.sequence
    }
}

/// A GFF3 feature joined with the slice of its reference sequence
#[derive(Debug, Clone, PartialEq)]
pub struct GffFeature {
    /// Reference sequence name (GFF column 1)
    pub seqname: String,
    /// Feature type (GFF column 3)
    pub feature_type: String,
    /// 1-based inclusive start
    pub start: u64,
    /// 1-based inclusive end
    pub end: u64,
    /// Feature strand
    pub strand: Strand,
    /// Feature sequence, reverse-complemented for minus-strand features
    pub sequence: String,
}

impl FeatureRecord for GffFeature {
    fn feature_type(&self) -> &str {
        &self.feature_type
    }

    fn sequence(&self) -> &str {
        &self.sequence
    }
}

/// Concatenates the sequences of every coding (`CDS`) record into a corpus.
///
/// Records of any other type are skipped.
pub fn coding_corpus<R: FeatureRecord>(records: &[R]) -> String {
    records
        .iter()
        .filter(|record| record.feature_type() == CODING_FEATURE_TYPE)
        .map(FeatureRecord::sequence)
        .collect()
}

fn bytes_to_string(bytes: Vec<u8>, id: &str) -> Result<String, SynthonError> {
    String::from_utf8(bytes)
        .map_err(|_| SynthonError::ParseError(format!("record {id} is not valid UTF-8")))
}

/// Read FASTA records from any reader, tagging each with `feature_type`
pub fn read_fasta_from<R: Read>(
    reader: R,
    feature_type: &str,
) -> Result<Vec<SequenceRecord>, SynthonError> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| SynthonError::ParseError(e.to_string()))?;
        let id = record.id().to_string();
        let sequence = bytes_to_string(record.seq().to_vec(), &id)?;
        records.push(SequenceRecord {
            description: record.desc().map(String::from),
            sequence,
            feature_type: feature_type.to_string(),
            id,
        });
    }

    Ok(records)
}

/// Read sequences from a FASTA file using rust-bio
pub fn read_fasta_records<P: AsRef<Path>>(
    path: P,
    feature_type: &str,
) -> Result<Vec<SequenceRecord>, SynthonError> {
    let file = File::open(path.as_ref())?;
    let records = read_fasta_from(file, feature_type)?;
    debug!(
        "Read {} FASTA records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Directive after which a GFF3 file carries its reference sequences
const FASTA_DIRECTIVE: &str = "##FASTA";

/// Splits GFF3 text into its annotation part and the FASTA section that
/// follows a `##FASTA` line, if there is one.
fn split_embedded_fasta(text: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == FASTA_DIRECTIVE {
            return (&text[..offset], Some(&text[offset + line.len()..]));
        }
        offset += line.len();
    }
    (text, None)
}

/// Read GFF3 features and resolve their sequences against reference records.
///
/// Coordinates are 1-based and inclusive. Features on the reverse strand are
/// reverse-complemented so every feature reads 5' to 3'. Sequences embedded
/// after a `##FASTA` directive are used as references too, and take
/// precedence over `references` with the same name.
///
/// # Errors
///
/// Returns [`SynthonError::ParseError`] if a feature names an unknown
/// reference or its coordinates fall outside the reference.
pub fn read_gff_features_from<R: Read>(
    mut reader: R,
    references: &[SequenceRecord],
) -> Result<Vec<GffFeature>, SynthonError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let (annotation, embedded) = split_embedded_fasta(&text);

    let embedded = match embedded {
        Some(fasta_text) => read_fasta_from(fasta_text.as_bytes(), "region")?,
        None => Vec::new(),
    };
    if !embedded.is_empty() {
        debug!("Found {} sequences after {FASTA_DIRECTIVE}", embedded.len());
    }

    let by_name: HashMap<&str, &[u8]> = references
        .iter()
        .chain(&embedded)
        .map(|record| (record.id.as_str(), record.sequence.as_bytes()))
        .collect();

    let mut reader = gff::Reader::new(annotation.as_bytes(), gff::GffType::GFF3);
    let mut features = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| SynthonError::ParseError(e.to_string()))?;
        let seqname = record.seqname().to_string();
        let reference = by_name.get(seqname.as_str()).ok_or_else(|| {
            SynthonError::ParseError(format!("reference sequence {seqname} not found"))
        })?;

        let start = *record.start();
        let end = *record.end();
        if start == 0 || start > end || end as usize > reference.len() {
            return Err(SynthonError::ParseError(format!(
                "feature {}..{} lies outside {} ({} bp)",
                start,
                end,
                seqname,
                reference.len()
            )));
        }

        let slice = &reference[start as usize - 1..end as usize];
        let strand = record.strand().unwrap_or(Strand::Unknown);
        let bytes = match strand {
            Strand::Reverse => dna::revcomp(slice),
            _ => slice.to_vec(),
        };

        features.push(GffFeature {
            feature_type: record.feature_type().to_string(),
            sequence: bytes_to_string(bytes, &seqname)?,
            seqname,
            start,
            end,
            strand,
        });
    }

    Ok(features)
}

/// Read a GFF3 annotation file together with its reference FASTA
pub fn read_gff_features<P: AsRef<Path>, Q: AsRef<Path>>(
    gff_path: P,
    reference_path: Q,
) -> Result<Vec<GffFeature>, SynthonError> {
    let references = read_fasta_records(reference_path, "region")?;
    let file = File::open(gff_path.as_ref())?;
    let features = read_gff_features_from(file, &references)?;
    debug!(
        "Read {} GFF features from {}",
        features.len(),
        gff_path.as_ref().display()
    );
    Ok(features)
}

/// Read a GFF3 file that carries its own sequences after `##FASTA`
pub fn read_gff_with_sequence<P: AsRef<Path>>(gff_path: P) -> Result<Vec<GffFeature>, SynthonError> {
    let file = File::open(gff_path.as_ref())?;
    let features = read_gff_features_from(file, &[])?;
    debug!(
        "Read {} GFF features from {}",
        features.len(),
        gff_path.as_ref().display()
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    const REFERENCE: &str = ">chr1\nAAATGGCTTAACCCGGGTTTCATAAA\n";

    fn reference_records() -> Vec<SequenceRecord> {
        read_fasta_from(REFERENCE.as_bytes(), "region").unwrap()
    }

    #[test]
    fn test_read_fasta_records_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), ">cds1 first gene\nATGGCT\nTAA\n>cds2\nATGTGA\n").unwrap();

        let records = read_fasta_records(temp_file.path(), CODING_FEATURE_TYPE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "cds1");
        assert_eq!(records[0].description, Some("first gene".to_string()));
        assert_eq!(records[0].sequence, "ATGGCTTAA");
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].feature_type(), "CDS");
    }

    #[test]
    fn test_read_fasta_records_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "").unwrap();

        let records = read_fasta_records(temp_file.path(), CODING_FEATURE_TYPE).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_fasta_records_file_not_found() {
        let result = read_fasta_records("nonexistent_file.fa", CODING_FEATURE_TYPE);
        match result {
            Err(SynthonError::Io(_)) => {}
            _ => panic!("Expected Io error for missing file"),
        }
    }

    #[test]
    fn test_coding_corpus_selects_cds_only() {
        let mut gene = SequenceRecord::new("g1", "NNNNNN");
        gene.feature_type = "gene".to_string();
        let records = vec![
            SequenceRecord::new("c1", "ATGAAA"),
            gene,
            SequenceRecord::new("c2", "TTTTAA"),
        ];

        assert_eq!(coding_corpus(&records), "ATGAAATTTTAA");
    }

    #[test]
    fn test_coding_corpus_empty() {
        let records: Vec<SequenceRecord> = Vec::new();
        assert_eq!(coding_corpus(&records), "");
    }

    #[test]
    fn test_read_gff_features_forward_and_reverse() {
        let gff_text = "##gff-version 3\n\
            chr1\ttest\tCDS\t3\t11\t.\t+\t0\tID=cds1\n\
            chr1\ttest\tgene\t3\t11\t.\t+\t.\tID=gene1\n\
            chr1\ttest\tCDS\t18\t26\t.\t-\t0\tID=cds2\n";

        let features = read_gff_features_from(gff_text.as_bytes(), &reference_records()).unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0].sequence, "ATGGCTTAA");
        assert_eq!(features[0].strand, Strand::Forward);
        // TTTCATAAA on the plus strand reads TTTATGAAA on the minus strand
        assert_eq!(features[2].sequence, "TTTATGAAA");
        assert_eq!(features[2].strand, Strand::Reverse);

        assert_eq!(coding_corpus(&features), "ATGGCTTAATTTATGAAA");
    }

    #[test]
    fn test_read_gff_features_unknown_reference() {
        let gff_text = "##gff-version 3\nchr2\ttest\tCDS\t1\t3\t.\t+\t0\tID=x\n";
        let result = read_gff_features_from(gff_text.as_bytes(), &reference_records());
        assert!(matches!(result, Err(SynthonError::ParseError(_))));
    }

    #[test]
    fn test_read_gff_features_out_of_bounds() {
        let gff_text = "##gff-version 3\nchr1\ttest\tCDS\t20\t40\t.\t+\t0\tID=x\n";
        let result = read_gff_features_from(gff_text.as_bytes(), &reference_records());
        assert!(matches!(result, Err(SynthonError::ParseError(_))));
    }

    #[test]
    fn test_read_gff_features_from_files() {
        let reference = NamedTempFile::new().unwrap();
        fs::write(reference.path(), REFERENCE).unwrap();
        let annotation = NamedTempFile::new().unwrap();
        fs::write(
            annotation.path(),
            "##gff-version 3\nchr1\ttest\tCDS\t3\t11\t.\t+\t0\tID=cds1\n",
        )
        .unwrap();

        let features = read_gff_features(annotation.path(), reference.path()).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].start, 3);
        assert_eq!(features[0].end, 11);
    }

    #[test]
    fn test_read_gff_features_embedded_fasta() {
        let gff_text = "##gff-version 3\n\
            chr1\ttest\tCDS\t3\t11\t.\t+\t0\tID=cds1\n\
            chr1\ttest\tCDS\t18\t26\t.\t-\t0\tID=cds2\n\
            ##FASTA\n\
            >chr1\n\
            AAATGGCTTAACC\n\
            CGGGTTTCATAAA\n";

        let features = read_gff_features_from(gff_text.as_bytes(), &[]).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].sequence, "ATGGCTTAA");
        assert_eq!(features[1].sequence, "TTTATGAAA");
    }

    #[test]
    fn test_read_gff_features_embedded_fasta_overrides_references() {
        let gff_text = "##gff-version 3\n\
            chr1\ttest\tCDS\t1\t3\t.\t+\t0\tID=cds1\n\
            ##FASTA\n\
            >chr1\n\
            GGGAAA\n";

        let features = read_gff_features_from(gff_text.as_bytes(), &reference_records()).unwrap();
        assert_eq!(features[0].sequence, "GGG");
    }

    #[test]
    fn test_split_embedded_fasta() {
        let (annotation, fasta) = split_embedded_fasta("##gff-version 3\n##FASTA\n>c\nACGT\n");
        assert_eq!(annotation, "##gff-version 3\n");
        assert_eq!(fasta, Some(">c\nACGT\n"));

        let (annotation, fasta) = split_embedded_fasta("##gff-version 3\n");
        assert_eq!(annotation, "##gff-version 3\n");
        assert_eq!(fasta, None);
    }

    #[test]
    fn test_read_gff_with_sequence_from_file() {
        let annotation = NamedTempFile::new().unwrap();
        fs::write(
            annotation.path(),
            format!("##gff-version 3\nchr1\ttest\tCDS\t3\t11\t.\t+\t0\tID=cds1\n##FASTA\n{REFERENCE}"),
        )
        .unwrap();

        let features = read_gff_with_sequence(annotation.path()).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].sequence, "ATGGCTTAA");
    }

    #[test]
    fn test_read_gff_with_sequence_missing_section() {
        let annotation = NamedTempFile::new().unwrap();
        fs::write(
            annotation.path(),
            "##gff-version 3\nchr1\ttest\tCDS\t3\t11\t.\t+\t0\tID=cds1\n",
        )
        .unwrap();

        let result = read_gff_with_sequence(annotation.path());
        assert!(matches!(result, Err(SynthonError::ParseError(_))));
    }
}
