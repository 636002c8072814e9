use crate::errors::ConfigError;

use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};

/// Configuration data for a training invocation.
///
/// Every path-like field and the experiment name must be
/// non-empty, and the generation budget must be positive;
/// see [`ExperimentConfig::validate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Hyperparameter file imported by the engine.
    pub parameter_file: PathBuf,
    /// Where the imported hyperparameters are written back,
    /// for debugging.
    pub debug_parameter_file: PathBuf,
    /// Seed genome file.
    pub genome_file: PathBuf,
    /// Backup copy of the starter genome.
    pub genome_backup_file: PathBuf,
    /// Final population dump, overwritten by every run.
    pub last_population_file: PathBuf,
    /// Folder receiving per-generation population snapshots.
    pub generation_info_folder: PathBuf,
    /// Folder receiving winner genomes.
    pub winner_folder: PathBuf,
    /// Label used when naming exported winners.
    pub experiment_name: String,
    /// Maximum number of generations per run.
    pub generations: usize,
    /// Whether a run ends after the first generation
    /// in which a winner is found.
    pub stop_on_first_winner: bool,
}

impl ExperimentConfig {
    /// Returns an "empty" configuration: all paths and the name
    /// are empty, the generation budget is 0 and runs never stop early.
    ///
    /// # Note
    /// This value does not pass validation. It is meant as a way
    /// to abbreviate configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use oxineat_trainer::ExperimentConfig;
    ///
    /// let config = ExperimentConfig {
    ///     experiment_name: "xor".into(),
    ///     generations: 100,
    ///     ..ExperimentConfig::empty()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn empty() -> ExperimentConfig {
        ExperimentConfig {
            parameter_file: PathBuf::new(),
            debug_parameter_file: PathBuf::new(),
            genome_file: PathBuf::new(),
            genome_backup_file: PathBuf::new(),
            last_population_file: PathBuf::new(),
            generation_info_folder: PathBuf::new(),
            winner_folder: PathBuf::new(),
            experiment_name: String::new(),
            generations: 0,
            stop_on_first_winner: false,
        }
    }

    /// Loads a configuration from a file. Files with a `.json`
    /// extension are read as JSON, anything else as RON.
    ///
    /// The loaded configuration is not validated.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<ExperimentConfig, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            _ => ron::from_str(&contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Checks that the configuration is complete.
    ///
    /// Has no side effects.
    ///
    /// # Errors
    /// Returns the first missing field found, or
    /// [`ConfigError::NoGenerations`] for a zero generation budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("parameter_file", &self.parameter_file),
            ("debug_parameter_file", &self.debug_parameter_file),
            ("genome_file", &self.genome_file),
            ("genome_backup_file", &self.genome_backup_file),
            ("last_population_file", &self.last_population_file),
            ("generation_info_folder", &self.generation_info_folder),
            ("winner_folder", &self.winner_folder),
        ];
        if let Some((name, _)) = paths.iter().find(|(_, p)| p.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyField(*name));
        }
        if self.experiment_name.is_empty() {
            return Err(ConfigError::EmptyField("experiment_name"));
        }
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        Ok(())
    }
}
