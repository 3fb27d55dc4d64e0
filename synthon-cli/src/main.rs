//! # Synthon CLI - Codon Translation and Optimization
//!
//! A command-line interface for translating coding sequences, training codon
//! usage tables and designing coding sequences for a host organism.
//!
//! ## Usage
//!
//! ```bash
//! # Translate coding sequences with the bacterial code
//! synthon translate -i genes.fasta -o proteins.fasta
//!
//! # Train a codon usage table from E. coli coding sequences
//! synthon train --cds ecoli_cds.fasta -o ecoli.json
//!
//! # Train from a GFF3 annotation and its reference genome
//! synthon train --gff ecoli.gff --reference ecoli.fasta -o ecoli.json
//!
//! # Train from a GFF3 file that carries its sequence after ##FASTA
//! synthon train --gff ecoli_with_sequence.gff -o ecoli.json
//!
//! # Design coding sequences, reproducibly, on four threads
//! synthon optimize -i proteins.fasta -t ecoli.json -s 42 -j 4 --verify -o designed.fasta
//!
//! # Blend two usage tables
//! synthon compromise -a ecoli.json -b yeast.json -w 0.3 -o blend.json
//! ```
//!
//! ## Global Options
//!
//! - `-q, --quiet`: Only log warnings and errors
//! - `-v, --verbose`: Log debug messages
//!
//! `RUST_LOG` overrides both.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, value_parser};
use env_logger::Env;
use log::{error, info};
use synthon_core::codec::{read_table, write_table};
use synthon_core::compromise::compromise_codon_table;
use synthon_core::config::{OutputFormat, SynthonConfig};
use synthon_core::output::write_records;
use synthon_core::sequence::{SequenceRecord, read_fasta_from, read_fasta_records};
use synthon_core::table::registry::supported_tables;
use synthon_core::{CodonDesigner, constants};

const PROTEIN_FEATURE_TYPE: &str = "protein";

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("FILE")
        .help(help)
}

fn output_arg(help: &'static str) -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help(help)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_name("FORMAT")
        .help("Output format: fasta, plain")
        .value_parser(["fasta", "plain"])
        .default_value("fasta")
}

fn translation_table_arg() -> Arg {
    Arg::new("translation-table")
        .short('g')
        .long("translation-table")
        .value_name("TABLE")
        .help("NCBI genetic code (see `synthon tables`)")
        .value_parser(value_parser!(u8))
        .default_value("11")
}

fn cli() -> Command {
    Command::new("synthon")
        .version(constants::VERSION)
        .about("Codon translation and codon usage optimization")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log warnings and errors"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages"),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate coding sequences into proteins")
                .arg(input_arg("Input nucleotide FASTA file (default: stdin)"))
                .arg(output_arg("Output file (default: stdout)"))
                .arg(format_arg())
                .arg(translation_table_arg()),
        )
        .subcommand(
            Command::new("train")
                .about("Train a codon usage table from coding sequences")
                .arg(
                    Arg::new("cds")
                        .long("cds")
                        .value_name("FASTA")
                        .help("FASTA file of coding sequences"),
                )
                .arg(
                    Arg::new("gff")
                        .long("gff")
                        .value_name("GFF")
                        .help("GFF3 annotation whose CDS features are used"),
                )
                .arg(
                    Arg::new("reference")
                        .long("reference")
                        .value_name("FASTA")
                        .requires("gff")
                        .help("Reference FASTA for the annotation (default: its ##FASTA section)"),
                )
                .group(
                    ArgGroup::new("corpus")
                        .args(["cds", "gff"])
                        .required(true),
                )
                .arg(output_arg("Output table file (JSON)").required(true))
                .arg(translation_table_arg()),
        )
        .subcommand(
            Command::new("optimize")
                .about("Design coding sequences for proteins from a codon usage table")
                .arg(input_arg("Input protein FASTA file (default: stdin)"))
                .arg(
                    Arg::new("table")
                        .short('t')
                        .long("table")
                        .value_name("JSON")
                        .required(true)
                        .help("Codon usage table written by `synthon train`"),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .value_parser(value_parser!(u64))
                        .help("Seed for reproducible output"),
                )
                .arg(
                    Arg::new("threads")
                        .short('j')
                        .long("threads")
                        .value_name("THREADS")
                        .value_parser(value_parser!(usize))
                        .help("Number of worker threads (default: all cores)"),
                )
                .arg(
                    Arg::new("verify")
                        .long("verify")
                        .action(ArgAction::SetTrue)
                        .help("Check that every designed sequence translates back"),
                )
                .arg(output_arg("Output file (default: stdout)"))
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("compromise")
                .about("Blend two codon usage tables")
                .arg(
                    Arg::new("table-a")
                        .short('a')
                        .value_name("JSON")
                        .required(true)
                        .help("First table (weight 0)"),
                )
                .arg(
                    Arg::new("table-b")
                        .short('b')
                        .value_name("JSON")
                        .required(true)
                        .help("Second table (weight 1)"),
                )
                .arg(
                    Arg::new("weight")
                        .short('w')
                        .long("weight")
                        .value_name("WEIGHT")
                        .value_parser(value_parser!(f64))
                        .required(true)
                        .help("Share of the second table, between 0 and 1"),
                )
                .arg(output_arg("Output table file (JSON)").required(true)),
        )
        .subcommand(Command::new("tables").about("List supported genetic codes"))
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        "warn"
    } else if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn output_format(matches: &ArgMatches) -> OutputFormat {
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("plain") => OutputFormat::Plain,
        _ => OutputFormat::Fasta,
    }
}

fn read_input(
    matches: &ArgMatches,
    feature_type: &str,
) -> Result<Vec<SequenceRecord>, Box<dyn Error>> {
    let records = match matches.get_one::<String>("input") {
        Some(path) => read_fasta_records(path, feature_type)?,
        None => read_fasta_from(io::stdin().lock(), feature_type)?,
    };
    Ok(records)
}

fn open_output(matches: &ArgMatches) -> Result<Box<dyn Write>, Box<dyn Error>> {
    let writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(writer)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String, Box<dyn Error>> {
    matches
        .get_one::<String>(id)
        .ok_or_else(|| format!("missing required argument --{id}").into())
}

fn run_translate(matches: &ArgMatches, config: SynthonConfig) -> Result<(), Box<dyn Error>> {
    let designer = CodonDesigner::new(SynthonConfig {
        translation_table: matches
            .get_one::<u8>("translation-table")
            .copied()
            .unwrap_or(constants::DEFAULT_TRANSLATION_TABLE),
        output_format: output_format(matches),
        ..config
    });

    let records = read_input(matches, constants::CODING_FEATURE_TYPE)?;
    let proteins = designer.translate_records(&records)?;

    let mut writer = open_output(matches)?;
    write_records(&mut writer, &proteins, designer.config.output_format)?;
    writer.flush()?;

    info!("Translated {} sequences", proteins.len());
    Ok(())
}

fn run_train(matches: &ArgMatches, config: SynthonConfig) -> Result<(), Box<dyn Error>> {
    let designer = CodonDesigner::new(SynthonConfig {
        translation_table: matches
            .get_one::<u8>("translation-table")
            .copied()
            .unwrap_or(constants::DEFAULT_TRANSLATION_TABLE),
        ..config
    });

    let table = match (
        matches.get_one::<String>("cds"),
        matches.get_one::<String>("reference"),
    ) {
        (Some(cds), _) => designer.train_from_cds_fasta(cds)?,
        (None, Some(reference)) => designer.train_from_gff(required(matches, "gff")?, reference)?,
        (None, None) => designer.train_from_gff_with_sequence(required(matches, "gff")?)?,
    };

    let output = required(matches, "output")?;
    write_table(&table, output)?;
    info!("Wrote codon usage table to {output}");
    Ok(())
}

fn run_optimize(matches: &ArgMatches, config: SynthonConfig) -> Result<(), Box<dyn Error>> {
    let designer = CodonDesigner::new(SynthonConfig {
        seed: matches.get_one::<u64>("seed").copied(),
        num_threads: matches.get_one::<usize>("threads").copied(),
        verify_round_trip: matches.get_flag("verify"),
        output_format: output_format(matches),
        ..config
    });

    let table = read_table(required(matches, "table")?)?;
    let proteins = read_input(matches, PROTEIN_FEATURE_TYPE)?;
    let designed = designer.optimize_records(&proteins, &table)?;

    let mut writer = open_output(matches)?;
    write_records(&mut writer, &designed, designer.config.output_format)?;
    writer.flush()?;
    Ok(())
}

fn run_compromise(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let a = read_table(required(matches, "table-a")?)?;
    let b = read_table(required(matches, "table-b")?)?;
    let weight = matches
        .get_one::<f64>("weight")
        .copied()
        .ok_or("missing required argument -w")?;

    let blend = compromise_codon_table(&a, &b, weight)?;
    let output = required(matches, "output")?;
    write_table(&blend, output)?;
    info!("Wrote compromise table (weight {weight}) to {output}");
    Ok(())
}

fn run_tables() -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    for (id, name) in supported_tables() {
        writeln!(stdout, "{id}\t{name}")?;
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    // `-q` is applied through the log filter in `init_logging`.
    let config = SynthonConfig::default();

    match matches.subcommand() {
        Some(("translate", sub)) => run_translate(sub, config),
        Some(("train", sub)) => run_train(sub, config),
        Some(("optimize", sub)) => run_optimize(sub, config),
        Some(("compromise", sub)) => run_compromise(sub),
        Some(("tables", _)) => run_tables(),
        _ => Err("no subcommand given".into()),
    }
}

/// Main entry point for the Synthon CLI application.
///
/// Parses command-line arguments, configures logging and dispatches to the
/// requested subcommand. Failures are logged and turn into a non-zero exit.
fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
