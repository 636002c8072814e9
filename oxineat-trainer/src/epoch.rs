//! The generation-by-generation control loop of a single run.
//!
//! A run starts from a freshly spawned population and executes
//! generations `1..=budget`. Each generation performs, in order:
//!
//! 1. an evaluation pass over every organism;
//! 2. a statistics pass over every species;
//! 3. a population snapshot, if a winner was found or the
//!    generation is a multiple of the print interval;
//! 4. the export of every winner, if a winner was found;
//! 5. reproduction, which always runs;
//! 6. the stop check, if runs stop on the first winner.
//!
//! After the last generation the population's counters are
//! reported and its final state is written out.
use crate::config::ExperimentConfig;
use crate::engine::{Evaluator, Genome, GenomeId, Organism, Population, Species};
use crate::logging::{
    EvolutionLogger, GenerationRecord, RunReport, SpeciesFitness, Stats, Termination,
};
use crate::storage;

use log::{debug, error, info};

use std::path::{Path, PathBuf};

/// Returns the file name of the snapshot for a generation.
///
/// # Examples
/// ```
/// use oxineat_trainer::epoch::snapshot_file_name;
///
/// assert_eq!(snapshot_file_name(7), "g_000007");
/// assert_eq!(snapshot_file_name(123456), "g_123456");
/// ```
pub fn snapshot_file_name(generation: usize) -> String {
    format!("g_{:06}", generation)
}

/// Returns the file name of the `counter`-th winner
/// exported in a generation.
///
/// # Examples
/// ```
/// use oxineat_trainer::epoch::winner_file_name;
///
/// assert_eq!(winner_file_name("xor", 0), "xor_win 0");
/// ```
pub fn winner_file_name(experiment_name: &str, counter: usize) -> String {
    format!("{}_win {}", experiment_name, counter)
}

/// Drives a population through the generations of one run.
pub struct EpochDriver<'a, V> {
    config: &'a ExperimentConfig,
    evaluator: &'a mut V,
    print_every: usize,
    logger: EvolutionLogger,
}

impl<'a, V> EpochDriver<'a, V> {
    /// Creates a driver for one run. A `print_every` of 0
    /// disables interval snapshots.
    pub fn new(config: &'a ExperimentConfig, evaluator: &'a mut V, print_every: usize) -> Self {
        EpochDriver {
            config,
            evaluator,
            print_every,
            logger: EvolutionLogger::new(),
        }
    }

    /// Runs generations until the budget is exhausted, a winner
    /// is found (if runs stop on the first winner), or the
    /// population fails to reproduce. Then reports the population's
    /// counters and writes it to the last-population file.
    pub fn run<P>(mut self, run: usize, population: &mut P) -> RunReport
    where
        P: Population,
        V: Evaluator<P::Organism>,
    {
        info!("starting evolution");
        let mut termination = Termination::BudgetExhausted;
        for generation in 1..=self.config.generations {
            info!("---------------- E P O C H < {} > --------------", generation);
            match self.epoch(population, generation) {
                Ok(champion_found) => {
                    if self.config.stop_on_first_winner && champion_found {
                        termination = Termination::WinnerFound { generation };
                        break;
                    }
                }
                Err(reason) => {
                    error!("run {} ended in generation {}: {}", run, generation, reason);
                    termination = Termination::Degenerate { generation, reason };
                    break;
                }
            }
        }

        let innovation_number = population.innovation_number();
        let node_id_counter = population.node_id_counter();
        info!("population: innovation number = {}", innovation_number);
        info!("            current node id   = {}", node_id_counter);

        let last_population = &self.config.last_population_file;
        if let Err(e) = storage::persist(last_population, |out| population.write(out)) {
            error!(
                "failed to write last population to {}: {}",
                last_population.display(),
                e
            );
        }

        RunReport {
            run,
            termination,
            generations: self.logger.into_records(),
            innovation_number,
            node_id_counter,
        }
    }

    /// Executes one generation and returns whether any organism
    /// satisfied the evaluator.
    ///
    /// The generation's record is logged before reproduction, so it
    /// survives a failed reproduction.
    ///
    /// # Errors
    /// Returns the engine's message if reproduction fails.
    pub fn epoch<P>(&mut self, population: &mut P, generation: usize) -> Result<bool, String>
    where
        P: Population,
        V: Evaluator<P::Organism>,
    {
        let mut champion_found = false;
        for organism in population.organisms_mut() {
            let is_winner = self.evaluator.evaluate(organism);
            if is_winner {
                champion_found = true;
            }
        }

        let species: Vec<SpeciesFitness> = population
            .species_mut()
            .iter_mut()
            .map(|s| SpeciesFitness {
                average: s.compute_average_fitness(),
                maximum: s.compute_max_fitness(),
            })
            .collect();

        let snapshot = if champion_found || self.on_print_interval(generation) {
            self.write_snapshot(population, generation)
        } else {
            None
        };

        let winners = if champion_found {
            self.export_winners(population)
        } else {
            vec![]
        };

        self.logger.log(GenerationRecord {
            generation,
            fitness: Stats::from(population.organisms().iter().map(|o| o.fitness())),
            species,
            winners,
            champion_found,
            snapshot,
        });

        population.epoch(generation).map_err(|e| e.to_string())?;
        if champion_found {
            info!("** champion found in generation {} **", generation);
        }
        Ok(champion_found)
    }

    fn on_print_interval(&self, generation: usize) -> bool {
        self.print_every != 0 && generation % self.print_every == 0
    }

    /// Writes the population by species into the generation info
    /// folder. Returns the snapshot's path if it was written.
    fn write_snapshot<P: Population>(&self, population: &P, generation: usize) -> Option<PathBuf> {
        let path = self
            .config
            .generation_info_folder
            .join(snapshot_file_name(generation));
        match storage::persist(&path, |out| population.write_by_species(out)) {
            Ok(()) => Some(path),
            Err(e) => {
                error!("failed to write snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Writes every winner's genome into the winner folder,
    /// numbering them from 0 within this generation.
    fn export_winners<P: Population>(&self, population: &P) -> Vec<GenomeId> {
        let mut exported = vec![];
        for organism in population.organisms().iter().filter(|o| o.is_winner()) {
            let genome = organism.genome();
            info!("winner is #{}", genome.id());
            let path = self
                .config
                .winner_folder
                .join(winner_file_name(&self.config.experiment_name, exported.len()));
            write_genome(genome, &path);
            exported.push(genome.id());
        }
        debug!("exported {} winners", exported.len());
        exported
    }
}

fn write_genome<G: Genome>(genome: &G, path: &Path) {
    if let Err(e) = storage::persist(path, |out| genome.write(out)) {
        error!("failed to write genome {} to {}: {}", genome.id(), path.display(), e);
    }
}
