//! Capabilities the trainer consumes from an evolutionary engine.
//!
//! The trainer never looks inside genomes, species or populations;
//! it only sequences calls to the traits below. Any engine implementing
//! them can be driven without changes to the control loop.
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Numeric genome identifier, as found in seed genome headers.
pub type GenomeId = u64;

/// Error type returned by fallible engine operations.
pub type EngineError = Box<dyn Error + Send + Sync>;

/// Engine hyperparameters, materialized once by import and
/// shared read-only with every subsequent engine call.
pub trait Hyperparameters {
    /// Number of organisms in a freshly spawned population.
    fn population_size(&self) -> usize;

    /// Number of independent runs per training session.
    fn runs(&self) -> usize;

    /// Interval (in generations) between population snapshots.
    /// An interval of 0 disables interval-triggered snapshots.
    fn print_every(&self) -> usize;
}

/// An interface for genomes produced by the engine.
pub trait Genome {
    /// Returns the genome's identifier.
    fn id(&self) -> GenomeId;

    /// Writes the genome in the engine's own format.
    fn write(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// A genome instance paired with a fitness value
/// and a winner marker.
pub trait Organism {
    type Genome: Genome;

    fn genome(&self) -> &Self::Genome;

    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);

    /// Returns whether the evaluator marked this organism as a winner.
    fn is_winner(&self) -> bool;

    fn set_winner(&mut self, winner: bool);
}

/// A grouping of organisms within a population.
pub trait Species {
    /// Recomputes and returns the species' average fitness.
    fn compute_average_fitness(&mut self) -> f64;

    /// Recomputes and returns the species' maximum fitness.
    fn compute_max_fitness(&mut self) -> f64;
}

/// An evolving collection of organisms and species.
pub trait Population {
    type Genome: Genome;
    type Organism: Organism<Genome = Self::Genome>;
    type Species: Species;

    fn organisms(&self) -> &[Self::Organism];

    fn organisms_mut(&mut self) -> &mut [Self::Organism];

    fn species(&self) -> &[Self::Species];

    fn species_mut(&mut self) -> &mut [Self::Species];

    /// Checks the population's internal consistency.
    fn verify(&self) -> bool;

    /// Produces the next generation's organisms and
    /// species from the current ones.
    ///
    /// # Errors
    /// Returns an error if the population has become degenerate
    /// and cannot reproduce.
    fn epoch(&mut self, generation: usize) -> Result<(), EngineError>;

    /// Current innovation number.
    fn innovation_number(&self) -> u64;

    /// Current node identifier counter.
    fn node_id_counter(&self) -> u64;

    /// Writes the population grouped by species.
    fn write_by_species(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Writes the whole population.
    fn write(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Entry points into an evolutionary engine.
///
/// The type of [`Engine::Parameters`] is effectively opaque to
/// the trainer, which only reads the values exposed by
/// [`Hyperparameters`].
pub trait Engine {
    type Parameters: Hyperparameters;
    type Genome: Genome;
    type Population: Population<Genome = Self::Genome>;

    /// Reads hyperparameters from a file.
    fn read_parameters(&self, path: &Path) -> Result<Self::Parameters, EngineError>;

    /// Writes hyperparameters to a file.
    fn write_parameters(&self, parameters: &Self::Parameters, path: &Path)
        -> Result<(), EngineError>;

    /// Builds a genome with the passed identifier from the
    /// remaining content of a seed genome file.
    fn read_genome(
        &self,
        id: GenomeId,
        body: &mut dyn BufRead,
        parameters: &Self::Parameters,
    ) -> Result<Self::Genome, EngineError>;

    /// Spawns a new population derived from `starter`.
    /// The starter genome itself is left untouched.
    fn spawn_population(
        &mut self,
        starter: &Self::Genome,
        parameters: &Self::Parameters,
    ) -> Self::Population;
}

/// Success criterion used to evaluate organisms.
///
/// Returns whether the organism satisfies the criterion,
/// and may set the organism's fitness and winner flag
/// as a side effect.
///
/// Implemented for all `FnMut(&mut O) -> bool` closures.
///
/// # Examples
/// ```
/// use oxineat_trainer::Evaluator;
///
/// struct Score(f64);
///
/// let mut evaluator = |s: &mut Score| {
///     s.0 += 1.0;
///     s.0 > 1.5
/// };
/// let mut score = Score(0.0);
/// assert!(!evaluator.evaluate(&mut score));
/// assert!(evaluator.evaluate(&mut score));
/// ```
pub trait Evaluator<O> {
    fn evaluate(&mut self, organism: &mut O) -> bool;
}

impl<O, F> Evaluator<O> for F
where
    F: FnMut(&mut O) -> bool,
{
    fn evaluate(&mut self, organism: &mut O) -> bool {
        self(organism)
    }
}
