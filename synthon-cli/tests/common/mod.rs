#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Path of a fixture under `tests/data`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The synthon binary built for this test run
pub fn synthon() -> Command {
    Command::cargo_bin("synthon").unwrap()
}

/// Runs `synthon train --cds` on a fixture, writing the table to `output`
pub fn train_table(cds_fixture: &str, output: &Path) {
    synthon()
        .args(["-q", "train", "--cds"])
        .arg(fixture(cds_fixture))
        .arg("-o")
        .arg(output)
        .assert()
        .success();
}

/// Runs `synthon optimize` with a seed and returns stdout
pub fn optimize_with_seed(table: &Path, input_fixture: &str, seed: u64, extra: &[&str]) -> String {
    let output = synthon()
        .args(["-q", "optimize", "-i"])
        .arg(fixture(input_fixture))
        .arg("-t")
        .arg(table)
        .arg("-s")
        .arg(seed.to_string())
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

/// Sequence lines of FASTA text, one entry per record
pub fn fasta_sequences(text: &str) -> Vec<String> {
    let mut sequences: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.starts_with('>') {
            sequences.push(String::new());
        } else if let Some(last) = sequences.last_mut() {
            last.push_str(line.trim());
        }
    }
    sequences
}
