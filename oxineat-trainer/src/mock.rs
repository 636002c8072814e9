//! A scripted engine used by the crate's tests.
use crate::engine::{
    Engine, EngineError, Genome, GenomeId, Hyperparameters, Organism, Population, Species,
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use std::cell::RefCell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockParameters {
    pub population_size: usize,
    pub runs: usize,
    pub print_every: usize,
}

impl Hyperparameters for MockParameters {
    fn population_size(&self) -> usize {
        self.population_size
    }

    fn runs(&self) -> usize {
        self.runs
    }

    fn print_every(&self) -> usize {
        self.print_every
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MockGenome {
    pub id: GenomeId,
    pub body: Vec<String>,
}

impl Genome for MockGenome {
    fn id(&self) -> GenomeId {
        self.id
    }

    fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "genomestart {}", self.id)?;
        for line in &self.body {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "genomeend {}", self.id)
    }
}

#[derive(Clone, Debug)]
pub struct MockOrganism {
    pub genome: MockGenome,
    /// Position of the organism in the population.
    pub index: usize,
    /// Generation the organism belongs to, starting at 1.
    pub generation: usize,
    pub fitness: f64,
    pub winner: bool,
}

impl Organism for MockOrganism {
    type Genome = MockGenome;

    fn genome(&self) -> &MockGenome {
        &self.genome
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn is_winner(&self) -> bool {
        self.winner
    }

    fn set_winner(&mut self, winner: bool) {
        self.winner = winner;
    }
}

/// Species grouping organisms by index modulo the species count.
#[derive(Clone, Debug)]
pub struct MockSpecies {
    pub members: Vec<usize>,
    pub fitnesses: Vec<f64>,
    pub average_fitness: f64,
    pub max_fitness: f64,
}

impl Species for MockSpecies {
    fn compute_average_fitness(&mut self) -> f64 {
        self.average_fitness =
            self.fitnesses.iter().sum::<f64>() / self.fitnesses.len().max(1) as f64;
        self.average_fitness
    }

    fn compute_max_fitness(&mut self) -> f64 {
        self.max_fitness = self.fitnesses.iter().copied().fold(0.0, f64::max);
        self.max_fitness
    }
}

/// Calls observed by the engine and its populations.
#[derive(Debug, Default)]
pub struct Trace {
    pub parameter_reads: usize,
    pub parameter_writes: usize,
    pub genome_reads: usize,
    /// Population size and species count of every spawned population.
    pub spawned: Vec<(usize, usize)>,
    /// Whether the watched file existed at each spawn.
    pub watched_at_spawn: Vec<bool>,
    /// `(run, generation)` of every reproduction call.
    pub epochs: Vec<(usize, usize)>,
}

pub struct MockPopulation {
    run: usize,
    organisms: Vec<MockOrganism>,
    species: Vec<MockSpecies>,
    generation: usize,
    innovation_number: u64,
    node_id: u64,
    degenerate_at: Option<usize>,
    trace: Rc<RefCell<Trace>>,
}

impl MockPopulation {
    fn refresh_species(&mut self) {
        let organisms = &self.organisms;
        for species in &mut self.species {
            species.fitnesses = species
                .members
                .iter()
                .map(|&i| organisms[i].fitness)
                .collect();
        }
    }
}

impl Population for MockPopulation {
    type Genome = MockGenome;
    type Organism = MockOrganism;
    type Species = MockSpecies;

    fn organisms(&self) -> &[MockOrganism] {
        &self.organisms
    }

    fn organisms_mut(&mut self) -> &mut [MockOrganism] {
        &mut self.organisms
    }

    fn species(&self) -> &[MockSpecies] {
        &self.species
    }

    fn species_mut(&mut self) -> &mut [MockSpecies] {
        self.refresh_species();
        &mut self.species
    }

    fn verify(&self) -> bool {
        self.species.iter().map(|s| s.members.len()).sum::<usize>() == self.organisms.len()
    }

    fn epoch(&mut self, generation: usize) -> Result<(), EngineError> {
        self.trace.borrow_mut().epochs.push((self.run, generation));
        if self.degenerate_at == Some(generation) {
            return Err("attempted evolution on degenerate population".into());
        }
        self.generation = generation;
        for organism in &mut self.organisms {
            organism.generation = generation + 1;
            organism.winner = false;
            organism.fitness = 0.0;
            organism
                .genome
                .body
                .push(format!("mutation {}", generation));
        }
        self.innovation_number += 2;
        self.node_id += 1;
        Ok(())
    }

    fn innovation_number(&self) -> u64 {
        self.innovation_number
    }

    fn node_id_counter(&self) -> u64 {
        self.node_id
    }

    fn write_by_species(&self, out: &mut dyn Write) -> io::Result<()> {
        for (i, species) in self.species.iter().enumerate() {
            writeln!(out, "species {} max {}", i, species.max_fitness)?;
            for &member in &species.members {
                writeln!(out, "organism {}", member)?;
            }
        }
        Ok(())
    }

    fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "run {}", self.run)?;
        writeln!(out, "generation {}", self.generation)?;
        writeln!(out, "organisms {}", self.organisms.len())
    }
}

/// Engine whose parameter files are RON-encoded [`MockParameters`],
/// and whose genome bodies are plain lines.
pub struct MockEngine {
    rng: StdRng,
    runs_spawned: usize,
    pub degenerate_at: Option<usize>,
    pub watch: Option<PathBuf>,
    pub trace: Rc<RefCell<Trace>>,
}

impl MockEngine {
    pub fn seeded(seed: u64) -> MockEngine {
        MockEngine {
            rng: StdRng::seed_from_u64(seed),
            runs_spawned: 0,
            degenerate_at: None,
            watch: None,
            trace: Rc::default(),
        }
    }
}

impl Engine for MockEngine {
    type Parameters = MockParameters;
    type Genome = MockGenome;
    type Population = MockPopulation;

    fn read_parameters(&self, path: &Path) -> Result<MockParameters, EngineError> {
        self.trace.borrow_mut().parameter_reads += 1;
        Ok(ron::from_str(&fs::read_to_string(path)?)?)
    }

    fn write_parameters(&self, parameters: &MockParameters, path: &Path) -> Result<(), EngineError> {
        self.trace.borrow_mut().parameter_writes += 1;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, ron::to_string(parameters)?)?;
        Ok(())
    }

    fn read_genome(
        &self,
        id: GenomeId,
        body: &mut dyn BufRead,
        _parameters: &MockParameters,
    ) -> Result<MockGenome, EngineError> {
        self.trace.borrow_mut().genome_reads += 1;
        let mut lines = vec![];
        for line in body.lines() {
            let line = line?;
            if line.starts_with("genomeend") {
                return Ok(MockGenome { id, body: lines });
            }
            lines.push(line);
        }
        Err(format!("genome {} has no end marker", id).into())
    }

    fn spawn_population(
        &mut self,
        starter: &MockGenome,
        parameters: &MockParameters,
    ) -> MockPopulation {
        let size = parameters.population_size;
        let species_count = self.rng.gen_range(1..=size.clamp(1, 4));
        let organisms: Vec<MockOrganism> = (0..size)
            .map(|index| MockOrganism {
                genome: MockGenome {
                    id: starter.id + index as GenomeId,
                    body: starter.body.clone(),
                },
                index,
                generation: 1,
                fitness: 0.0,
                winner: false,
            })
            .collect();
        let species = (0..species_count)
            .map(|s| MockSpecies {
                members: (0..size).filter(|i| i % species_count == s).collect(),
                fitnesses: vec![],
                average_fitness: 0.0,
                max_fitness: 0.0,
            })
            .collect();
        {
            let mut trace = self.trace.borrow_mut();
            trace.spawned.push((size, species_count));
            let watched = self.watch.as_ref().map_or(false, |p| p.exists());
            trace.watched_at_spawn.push(watched);
        }
        let run = self.runs_spawned;
        self.runs_spawned += 1;
        MockPopulation {
            run,
            organisms,
            species,
            generation: 0,
            innovation_number: starter.body.len() as u64,
            node_id: 0,
            degenerate_at: self.degenerate_at,
            trace: Rc::clone(&self.trace),
        }
    }
}

/// Writes a seed genome file and a parameter file into `dir`,
/// and returns a complete configuration pointing inside `dir`.
pub fn experiment_in(
    dir: &Path,
    parameters: &MockParameters,
    generations: usize,
    stop_on_first_winner: bool,
) -> crate::ExperimentConfig {
    let parameter_file = dir.join("params.ron");
    fs::write(&parameter_file, ron::to_string(parameters).unwrap()).unwrap();
    let genome_file = dir.join("startgenes");
    fs::write(
        &genome_file,
        "genomestart 7\ntrait 1 0.1\nnode 1 0 1 1\nnode 2 0 0 2\ngene 1 1 2 0.0\ngenomeend 7\n",
    )
    .unwrap();
    crate::ExperimentConfig {
        parameter_file,
        debug_parameter_file: dir.join("debug").join("params.ron"),
        genome_file,
        genome_backup_file: dir.join("debug").join("startgenes.bak"),
        last_population_file: dir.join("debug").join("last_population"),
        generation_info_folder: dir.join("generations"),
        winner_folder: dir.join("winners"),
        experiment_name: "xor".into(),
        generations,
        stop_on_first_winner,
    }
}

/// Installs a test logger once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
