use crate::config::ExperimentConfig;
use crate::engine::{Engine, Evaluator, Population};
use crate::errors::{ConfigError, TrainingError};
use crate::logging::SessionReport;
use crate::session::SessionRunner;

use log::{error, info, warn};

type OrganismOf<E> = <<E as Engine>::Population as Population>::Organism;

/// Top-level entry point of a training invocation.
///
/// A `Trainer` owns the experiment configuration, the engine and
/// the evaluator, and sequences validation, hyperparameter import,
/// the debug export of the hyperparameters, and the training session.
pub struct Trainer<E, V> {
    config: ExperimentConfig,
    engine: E,
    evaluator: Option<V>,
}

impl<E: Engine, V> Trainer<E, V> {
    /// Creates a trainer without an evaluator.
    /// One must be attached before training.
    pub fn new(config: ExperimentConfig, engine: E) -> Trainer<E, V> {
        Trainer {
            config,
            engine,
            evaluator: None,
        }
    }

    /// Attaches an evaluator.
    pub fn with_evaluator(mut self, evaluator: V) -> Trainer<E, V> {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn set_evaluator(&mut self, evaluator: V) {
        self.evaluator = Some(evaluator);
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ExperimentConfig {
        &mut self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Checks the configuration and that an evaluator is attached.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        if self.evaluator.is_none() {
            return Err(ConfigError::MissingEvaluator);
        }
        Ok(())
    }

    /// Runs a full training session.
    ///
    /// Nothing is read or written if validation fails, and no genome
    /// is loaded if the hyperparameters cannot be imported. Failing to
    /// write the debug copy of the hyperparameters is only reported.
    ///
    /// # Errors
    /// Returns the first failing stage's error.
    pub fn train(&mut self) -> Result<SessionReport, TrainingError>
    where
        V: Evaluator<OrganismOf<E>>,
    {
        if let Err(e) = self.validate() {
            error!("not all variables set, training will not commence: {}", e);
            return Err(e.into());
        }
        let evaluator = self
            .evaluator
            .as_mut()
            .ok_or(ConfigError::MissingEvaluator)?;

        let parameters = match self.engine.read_parameters(&self.config.parameter_file) {
            Ok(parameters) => {
                info!("parameters read okay");
                parameters
            }
            Err(source) => {
                error!("error in parameter read: {}", source);
                return Err(TrainingError::HyperparameterImport {
                    path: self.config.parameter_file.clone(),
                    source,
                });
            }
        };

        if let Err(e) = self
            .engine
            .write_parameters(&parameters, &self.config.debug_parameter_file)
        {
            warn!(
                "failed to write debug parameters to {}: {}",
                self.config.debug_parameter_file.display(),
                e
            );
        }

        info!("start experiment {}", self.config.experiment_name);
        SessionRunner::new(&self.config, &mut self.engine, evaluator, &parameters).run()
    }
}
