//! An experiment harness for NeuroEvolution of Augmenting Topologies.
//!
//! The trainer drives an evolutionary engine toward a goal defined by
//! an [`Evaluator`]: it validates the experiment configuration, imports
//! the engine's hyperparameters, loads a starter genome from a seed file,
//! and then evolves a fresh population from that genome once per
//! configured run, snapshotting populations and exporting winners
//! along the way.
//!
//! The engine is consumed through the [`Engine`], [`Population`],
//! [`Species`], [`Organism`] and [`Genome`] traits, so any engine
//! implementing them can be plugged in without changes to the
//! training loop.
//!
//! # Output files
//! - `<generation_info_folder>/g_<generation:06>`: population snapshot,
//!   written every `print_every` generations and in every generation
//!   with a winner.
//! - `<winner_folder>/<experiment_name>_win <n>`: the `n`-th winner of a
//!   generation, counting from 0 in every generation.
//! - `<last_population_file>`: the final population of the last run.
//!
//! # Example usage
//! ```
//! use oxineat_trainer::{
//!     Engine, ExperimentConfig, Genome, Organism, Population, SessionReport, Trainer,
//!     TrainingError,
//! };
//!
//! // Allowed error margin for network answers.
//! const ERROR_MARGIN: f64 = 0.3;
//!
//! # fn xor_error<G: Genome>(_genome: &G) -> f64 { 0.0 }
//! // With `E` a suitable type implementing `Engine`...
//! fn train_xor<E: Engine>(engine: E) -> Result<SessionReport, TrainingError> {
//!     let config = ExperimentConfig {
//!         parameter_file: "parameters/p2nv.ne".into(),
//!         debug_parameter_file: "debug/parameters.ne".into(),
//!         genome_file: "genomes/xorstartgenes".into(),
//!         genome_backup_file: "debug/xorstartgenes.bak".into(),
//!         last_population_file: "debug/last_population".into(),
//!         generation_info_folder: "generations".into(),
//!         winner_folder: "winners".into(),
//!         experiment_name: "xor".into(),
//!         generations: 100,
//!         stop_on_first_winner: true,
//!     };
//!
//!     let mut trainer = Trainer::new(config, engine).with_evaluator(
//!         |organism: &mut <E::Population as Population>::Organism| {
//!             let error = xor_error(organism.genome());
//!             organism.set_fitness((4.0 - error).powi(2));
//!             let winner = error < ERROR_MARGIN;
//!             organism.set_winner(winner);
//!             winner
//!         },
//!     );
//!
//!     let report = trainer.train()?;
//!     println!("{} of {} runs found a winner", report.successful_runs(), report.runs.len());
//!     Ok(report)
//! }
//! ```

mod config;
mod engine;
pub mod epoch;
mod errors;
pub mod genome_loader;
pub mod logging;
mod session;
mod storage;
mod trainer;

#[cfg(test)]
mod mock;

pub use config::ExperimentConfig;
pub use engine::*;
pub use epoch::EpochDriver;
pub use errors::*;
pub use logging::{GenerationRecord, RunReport, SessionReport, Termination};
pub use session::SessionRunner;
pub use trainer::Trainer;
