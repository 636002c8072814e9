use crate::config::ExperimentConfig;
use crate::engine::{Engine, Evaluator, Hyperparameters, Population};
use crate::epoch::EpochDriver;
use crate::errors::TrainingError;
use crate::genome_loader::load_starter_genome;
use crate::logging::SessionReport;

use log::{info, warn};

/// Repeats independent runs from a shared starter genome.
///
/// Every run spawns a brand-new population from the unmutated
/// starter genome and drives it to completion.
pub struct SessionRunner<'a, E: Engine, V> {
    config: &'a ExperimentConfig,
    engine: &'a mut E,
    evaluator: &'a mut V,
    parameters: &'a E::Parameters,
}

impl<'a, E, V> SessionRunner<'a, E, V>
where
    E: Engine,
    V: Evaluator<<E::Population as Population>::Organism>,
{
    pub fn new(
        config: &'a ExperimentConfig,
        engine: &'a mut E,
        evaluator: &'a mut V,
        parameters: &'a E::Parameters,
    ) -> Self {
        SessionRunner {
            config,
            engine,
            evaluator,
            parameters,
        }
    }

    /// Loads the starter genome once, then executes the configured
    /// number of runs.
    ///
    /// Individual run outcomes are collected in the returned report;
    /// they do not affect the result.
    ///
    /// # Errors
    /// Returns an error if the starter genome cannot be loaded,
    /// in which case no run is executed.
    pub fn run(&mut self) -> Result<SessionReport, TrainingError> {
        let starter = load_starter_genome(
            &*self.engine,
            self.parameters,
            &self.config.genome_file,
            &self.config.genome_backup_file,
        )?;

        let mut report = SessionReport::default();
        for run in 0..self.parameters.runs() {
            info!("spawning population from starter genome (run {})", run);
            let mut population = self.engine.spawn_population(&starter, self.parameters);

            info!("verifying spawned population");
            if !population.verify() {
                warn!("spawned population failed verification");
            }

            let driver = EpochDriver::new(
                self.config,
                &mut *self.evaluator,
                self.parameters.print_every(),
            );
            report.runs.push(driver.run(run, &mut population));
        }
        Ok(report)
    }
}
