use crate::constants::DEFAULT_TRANSLATION_TABLE;

/// Output format for designed or translated sequences.
///
/// # Examples
///
/// ```rust
/// use synthon_core::config::{OutputFormat, SynthonConfig};
///
/// let config = SynthonConfig {
///     output_format: OutputFormat::Plain,
///     ..Default::default()
/// };
/// assert_eq!(config.output_format, OutputFormat::Plain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// FASTA records keeping the input identifiers and descriptions.
    #[default]
    Fasta,

    /// One bare sequence per line, in input order.
    Plain,
}

/// Configuration settings for translation and codon design runs.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use synthon_core::config::SynthonConfig;
///
/// let config = SynthonConfig::default();
/// assert_eq!(config.translation_table, 11);
/// assert!(config.seed.is_none());
/// ```
///
/// ## Reproducible batch design on four threads
///
/// ```rust
/// use synthon_core::config::SynthonConfig;
///
/// let config = SynthonConfig {
///     seed: Some(42),
///     num_threads: Some(4),
///     verify_round_trip: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SynthonConfig {
    /// NCBI genetic code used for translation and training.
    ///
    /// - `11`: Bacterial, Archaeal and Plant Plastid
    /// - `1`: Standard
    /// - Others: see [`crate::table::registry::supported_tables`]
    ///
    /// **Default**: `11`
    pub translation_table: u8,

    /// Base seed for codon sampling.
    ///
    /// Record `i` of a batch is optimized with seed `seed + i`, so a batch
    /// is reproducible however its records are scheduled across threads.
    ///
    /// **Default**: `None` (seeded from the operating system)
    pub seed: Option<u64>,

    /// Number of threads to use for batch optimization.
    ///
    /// **Default**: `None` (use the global Rayon pool)
    pub num_threads: Option<usize>,

    /// Translate every designed sequence back and compare it to its input.
    ///
    /// **Default**: `false`
    pub verify_round_trip: bool,

    /// Suppress informational log messages from the engine.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Output format for sequence records.
    ///
    /// **Default**: [`OutputFormat::Fasta`]
    pub output_format: OutputFormat,
}

impl Default for SynthonConfig {
    fn default() -> Self {
        Self {
            translation_table: DEFAULT_TRANSLATION_TABLE,
            seed: None,
            num_threads: None,
            verify_round_trip: false,
            quiet: false,
            output_format: OutputFormat::Fasta,
        }
    }
}
