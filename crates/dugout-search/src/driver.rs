//! Generational search loop.
//!
//! [`Optimizer`] runs a simple generational scheme with a size-1 elitism archive:
//!
//! 1. **Initialize** - a random population, evaluated once
//! 2. **Select** - a full offspring population by tournament selection
//! 3. **Recombine** - consecutive pairs `(0, 1), (2, 3), ...` go through crossover
//!    with probability `crossover_prob`
//! 4. **Mutate** - each offspring goes through mutation with probability
//!    `mutation_prob`
//! 5. **Evaluate** - only offspring changed by steps 3 and 4 are re-scored
//! 6. **Archive** - the best individual ever seen is kept if strictly improved
//!
//! Steps 2 to 6 repeat for the configured number of generations; offspring fully
//! replace the population. The result is the archive's best individual, which need
//! not be a member of the final population.

use dugout_evaluator::AssignmentEvaluator;
use dugout_model::{Assignment, Roster, Team};
use log::{debug, info};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::{
    InvalidParamsError, SearchParams,
    genetic::{EliteArchive, Individual, Population},
    operators::{GeneticOperators, RosterOperators},
};

/// Population statistics recorded after each generation.
///
/// Generation 0 is the initial population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Fitness evaluations performed in this generation
    pub evaluations: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Fitness of the best individual seen so far
    pub best_fitness: f64,
}

/// Result of a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    best: Assignment,
    fitness: f64,
    history: Vec<GenerationStats>,
}

impl SearchOutcome {
    #[must_use]
    pub fn best_assignment(&self) -> &Assignment {
        &self.best
    }

    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Decodes the best assignment into teams.
    #[must_use]
    pub fn teams<'a>(&self, roster: &'a Roster) -> Vec<Team<'a>> {
        roster.decode(&self.best)
    }
}

/// Genetic search over assignments of one roster.
#[derive(Debug)]
pub struct Optimizer<'a, O, E: ?Sized> {
    roster: &'a Roster,
    operators: O,
    evaluator: &'a E,
    params: SearchParams,
}

impl<'a, E> Optimizer<'a, RosterOperators<'a>, E>
where
    E: AssignmentEvaluator + ?Sized,
{
    /// Creates an optimizer using the group-preserving [`RosterOperators`].
    pub fn new(
        roster: &'a Roster,
        evaluator: &'a E,
        params: SearchParams,
    ) -> Result<Self, InvalidParamsError> {
        let operators = RosterOperators::new(roster, &params);
        Self::with_operators(roster, operators, evaluator, params)
    }
}

impl<'a, O, E> Optimizer<'a, O, E>
where
    O: GeneticOperators,
    E: AssignmentEvaluator + ?Sized,
{
    pub fn with_operators(
        roster: &'a Roster,
        operators: O,
        evaluator: &'a E,
        params: SearchParams,
    ) -> Result<Self, InvalidParamsError> {
        params.validate()?;
        Ok(Self {
            roster,
            operators,
            evaluator,
            params,
        })
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Runs the search to completion.
    #[must_use]
    pub fn run(&self) -> SearchOutcome {
        self.run_with(|_, _| {})
    }

    /// Runs the search, calling `observer` after every generation with its
    /// statistics and the best individual seen so far.
    pub fn run_with<F>(&self, mut observer: F) -> SearchOutcome
    where
        F: FnMut(&GenerationStats, &Individual),
    {
        let mut rng = match self.params.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_os_rng(),
        };
        info!(
            "optimizing {} players into {} teams (population {}, generations {})",
            self.roster.num_players(),
            self.roster.num_teams(),
            self.params.population_size,
            self.params.generations,
        );

        let mut population =
            Population::random(&self.operators, self.params.population_size, &mut rng);
        let mut archive = EliteArchive::new();
        let mut history = Vec::with_capacity(self.params.generations + 1);

        let evaluations = population.evaluate(self.roster, self.evaluator);
        archive.update(&population);
        self.record(0, evaluations, &population, &archive, &mut history, &mut observer);

        for generation in 1..=self.params.generations {
            population = self.next_generation(&population, &mut rng);
            let evaluations = population.evaluate(self.roster, self.evaluator);
            if archive.update(&population) {
                debug!("generation {generation}: new best");
            }
            self.record(
                generation,
                evaluations,
                &population,
                &archive,
                &mut history,
                &mut observer,
            );
        }

        let best = archive
            .into_best()
            .expect("non-empty population always yields a best individual");
        let fitness = best.fitness().unwrap_or(f64::INFINITY);
        info!("search finished: best fitness {fitness:.3}");
        SearchOutcome {
            best: best.into_assignment(),
            fitness,
            history,
        }
    }

    fn next_generation<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let mut offspring =
            population.select(population.len(), self.params.tournament_size, rng);

        for i in (1..offspring.len()).step_by(2) {
            if rng.random_bool(self.params.crossover_prob) {
                let (left, right) = offspring.split_at_mut(i);
                self.operators
                    .crossover(left[i - 1].assignment_mut(), right[0].assignment_mut(), rng);
            }
        }
        for ind in &mut offspring {
            if rng.random_bool(self.params.mutation_prob) {
                self.operators.mutate(ind.assignment_mut(), rng);
            }
        }

        Population::from_individuals(offspring)
    }

    fn record<F>(
        &self,
        generation: usize,
        evaluations: usize,
        population: &Population,
        archive: &EliteArchive,
        history: &mut Vec<GenerationStats>,
        observer: &mut F,
    ) where
        F: FnMut(&GenerationStats, &Individual),
    {
        let Some(best) = archive.best() else {
            return;
        };
        let Some(fitness) = population.fitness_stats() else {
            return;
        };
        let stats = GenerationStats {
            generation,
            evaluations,
            min: fitness.min,
            mean: fitness.mean,
            max: fitness.max,
            std_dev: fitness.std_dev,
            best_fitness: best.fitness().unwrap_or(f64::INFINITY),
        };
        debug!(
            "generation {generation}: best {:.3}, min {:.3}, mean {:.3}, max {:.3}, {evaluations} evaluations",
            stats.best_fitness, stats.min, stats.mean, stats.max,
        );
        observer(&stats, best);
        history.push(stats);
    }
}
