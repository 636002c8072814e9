//! Starter genome bootstrapping.
//!
//! A seed genome file starts with a whitespace-separated header
//! line, whose second token is the genome id:
//!
//! ```text
//! genomestart 7
//! <engine-defined genome body>
//! ```
use crate::engine::{Engine, Genome, GenomeId};
use crate::errors::{HeaderError, TrainingError};
use crate::storage;

use log::{error, info};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a seed genome header line. The first token is
/// ignored and the second is the genome id.
///
/// # Examples
/// ```
/// use oxineat_trainer::genome_loader::parse_header;
///
/// assert_eq!(parse_header("genomestart 42").unwrap(), 42);
/// assert!(parse_header("genomestart").is_err());
/// assert!(parse_header("genomestart -1").is_err());
/// ```
pub fn parse_header(line: &str) -> Result<GenomeId, HeaderError> {
    let mut tokens = line.split_whitespace();
    tokens.next().ok_or(HeaderError::Empty)?;
    let token = tokens.next().ok_or(HeaderError::MissingId)?;
    token.parse().map_err(|source| HeaderError::InvalidId {
        token: token.to_string(),
        source,
    })
}

/// Reads and parses the header line from `reader`, leaving
/// the reader positioned at the start of the genome body.
pub fn read_header(reader: &mut impl BufRead) -> Result<GenomeId, HeaderError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(HeaderError::Empty);
    }
    parse_header(&line)
}

/// Loads the starter genome from `genome_file` and writes
/// a backup of it to `backup_file`.
///
/// The seed file is closed on every exit path. The backup is
/// written before this function returns, so before any population
/// derived from the genome can exist; failing to write it is
/// reported but does not abort loading.
///
/// # Errors
/// Returns an error if the seed file cannot be opened, its header
/// is malformed, or the engine rejects the genome body.
pub fn load_starter_genome<E: Engine>(
    engine: &E,
    parameters: &E::Parameters,
    genome_file: &Path,
    backup_file: &Path,
) -> Result<E::Genome, TrainingError> {
    let file = File::open(genome_file).map_err(|source| {
        error!("error while opening {}: {}", genome_file.display(), source);
        TrainingError::ResourceOpen {
            path: genome_file.to_path_buf(),
            source,
        }
    })?;
    let mut reader = BufReader::new(file);

    info!("reading starter genome from {}", genome_file.display());
    let id = read_header(&mut reader).map_err(|source| TrainingError::GenomeHeader {
        path: genome_file.to_path_buf(),
        source,
    })?;

    info!("creating genome id {}", id);
    let genome = engine
        .read_genome(id, &mut reader, parameters)
        .map_err(|source| TrainingError::GenomeRead {
            path: genome_file.to_path_buf(),
            id,
            source,
        })?;

    if let Err(e) = storage::persist(backup_file, |out| genome.write(out)) {
        error!(
            "failed to back up genome {} to {}: {}",
            id,
            backup_file.display(),
            e
        );
    }
    Ok(genome)
}
