use crate::engine::{EngineError, GenomeId};

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Errors that abort a training invocation.
///
/// All of them are terminal: the first failing stage
/// short-circuits every later one.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("failed to import hyperparameters from {}: {source}", .path.display())]
    HyperparameterImport { path: PathBuf, source: EngineError },
    #[error("failed to open seed genome {}: {source}", .path.display())]
    ResourceOpen { path: PathBuf, source: io::Error },
    #[error("malformed seed genome header in {}: {source}", .path.display())]
    GenomeHeader { path: PathBuf, source: HeaderError },
    #[error("failed to build genome {id} from {}: {source}", .path.display())]
    GenomeRead {
        path: PathBuf,
        id: GenomeId,
        source: EngineError,
    },
}

/// Configuration validation and loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),
    #[error("generation budget must be positive")]
    NoGenerations,
    #[error("no evaluator attached")]
    MissingEvaluator,
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Seed genome header parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("missing header line")]
    Empty,
    #[error("header has no genome id")]
    MissingId,
    #[error("invalid genome id `{token}`: {source}")]
    InvalidId {
        token: String,
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
