use serde::{Deserialize, Serialize};

use crate::repair::Repairer;

/// Parameters of a search run.
///
/// Two probabilities apply to crossover: `crossover_prob` decides whether a pair of
/// offspring is recombined at all, and `gene_exchange_prob` decides, inside the
/// operator, whether genes are actually exchanged (the pair is repaired either
/// way). Mutation is split the same way between `mutation_prob` (per individual)
/// and the per-gene and per-group rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Number of individuals per generation
    pub population_size: usize,
    /// Number of generations after the initial population
    pub generations: usize,
    /// Probability that a consecutive pair of offspring is passed to crossover
    pub crossover_prob: f64,
    /// Probability that crossover exchanges genes between the pair
    pub gene_exchange_prob: f64,
    /// Probability that an offspring is passed to mutation
    pub mutation_prob: f64,
    /// Probability of reassigning each ungrouped player during mutation
    pub gene_mutation_rate: f64,
    /// Probability of moving one whole co-assignment group during mutation
    pub group_mutation_rate: f64,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Maximum number of corrective moves per repair pass
    pub repair_iterations: usize,
    /// Seed for a reproducible run; drawn from the OS when absent
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 300,
            generations: 500,
            crossover_prob: 0.7,
            gene_exchange_prob: 0.7,
            mutation_prob: 0.2,
            gene_mutation_rate: 0.1,
            group_mutation_rate: 0.1,
            tournament_size: 3,
            repair_iterations: Repairer::DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("tournament size must be at least 1")]
    EmptyTournament,
    #[display("{name} must be within [0, 1] (got {value})")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if self.population_size == 0 {
            return Err(InvalidParamsError::EmptyPopulation);
        }
        if self.tournament_size == 0 {
            return Err(InvalidParamsError::EmptyTournament);
        }
        let probabilities = [
            ("crossover_prob", self.crossover_prob),
            ("gene_exchange_prob", self.gene_exchange_prob),
            ("mutation_prob", self.mutation_prob),
            ("gene_mutation_rate", self.gene_mutation_rate),
            ("group_mutation_rate", self.group_mutation_rate),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidParamsError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
