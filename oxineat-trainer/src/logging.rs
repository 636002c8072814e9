//! Records of what happened during training.
//!
//! Every generation leaves a [`GenerationRecord`], every run a
//! [`RunReport`], and a training session a [`SessionReport`].
use crate::engine::GenomeId;

use serde::Serialize;

use std::fmt;
use std::path::PathBuf;

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use oxineat_trainer::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied()).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert!(Stats::from(std::iter::empty::<f64>()).is_none());
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Option<Stats> {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return None;
        }
        data.sort_unstable_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        })
    }
}

/// Average and maximum fitness of a species,
/// as recomputed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpeciesFitness {
    pub average: f64,
    pub maximum: f64,
}

/// A snapshot of a single generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub species: Vec<SpeciesFitness>,
    pub fitness: Option<Stats>,
    /// Ids of the genomes exported as winners, in export order.
    pub winners: Vec<GenomeId>,
    /// Whether any organism satisfied the evaluator.
    pub champion_found: bool,
    /// Population snapshot written for this generation, if any.
    pub snapshot: Option<PathBuf>,
}

impl fmt::Display for GenerationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GenerationRecord {{\n\
            \tgeneration: {:?}\n\
            \tspecies_count: {:?}\n\
            \tfitness: {:?}\n\
            \twinners: {:?}\n\
            }}",
            &self.generation,
            &self.species.len(),
            &self.fitness,
            &self.winners,
        )
    }
}

/// Why a run stopped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Termination {
    /// Every generation in the budget was executed.
    BudgetExhausted,
    /// A winner was found and runs stop on the first winner.
    WinnerFound { generation: usize },
    /// The engine could not reproduce the population.
    Degenerate { generation: usize, reason: String },
}

/// The outcome of a single run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub run: usize,
    pub termination: Termination,
    pub generations: Vec<GenerationRecord>,
    pub innovation_number: u64,
    pub node_id_counter: u64,
}

impl RunReport {
    /// Returns the first generation in which a winner was found.
    pub fn first_champion_generation(&self) -> Option<usize> {
        self.generations
            .iter()
            .find(|r| r.champion_found)
            .map(|r| r.generation)
    }
}

/// The outcome of a training session.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub runs: Vec<RunReport>,
}

impl SessionReport {
    /// Returns the number of runs in which a winner was found.
    pub fn successful_runs(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.first_champion_generation().is_some())
            .count()
    }
}

/// A log of the generations of a single run.
#[derive(Clone, Debug, Default)]
pub struct EvolutionLogger {
    records: Vec<GenerationRecord>,
}

impl EvolutionLogger {
    pub fn new() -> EvolutionLogger {
        EvolutionLogger::default()
    }

    /// Store a generation record.
    pub fn log(&mut self, record: GenerationRecord) {
        log::debug!("{}", record);
        self.records.push(record);
    }

    /// Iterate over all logged records.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationRecord> {
        self.records.iter()
    }

    /// Returns all logged records.
    pub fn into_records(self) -> Vec<GenerationRecord> {
        self.records
    }
}
