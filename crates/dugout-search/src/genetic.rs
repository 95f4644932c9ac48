//! Population bookkeeping for the genetic search.
//!
//! - [`Individual`] - an assignment and its cached fitness (lower is better)
//! - [`Population`] - one generation, with parallel evaluation and tournament
//!   selection
//! - [`EliteArchive`] - the best individual seen across all generations
//!
//! # Parallelization
//!
//! Fitness evaluation splits the pending individuals into one chunk per available
//! core and evaluates the chunks on scoped threads. Only individuals whose
//! assignment changed since their last evaluation are scored.

use std::{num::NonZeroUsize, thread};

use dugout_evaluator::AssignmentEvaluator;
use dugout_model::{Assignment, Roster};
use dugout_stats::descriptive::DescriptiveStats;
use rand::{Rng, seq::IndexedRandom as _};

use crate::operators::GeneticOperators;

/// A candidate assignment and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    assignment: Assignment,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an individual that still needs evaluation.
    #[must_use]
    pub fn new(assignment: Assignment) -> Self {
        Self {
            assignment,
            fitness: None,
        }
    }

    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Mutable access to the assignment; invalidates the cached fitness.
    pub fn assignment_mut(&mut self) -> &mut Assignment {
        self.fitness = None;
        &mut self.assignment
    }

    #[must_use]
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Returns the fitness, or `None` if the individual has not been evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness used for ranking; unevaluated individuals rank last.
    fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }
}

/// One generation of individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` unevaluated individuals from the operators' initializer.
    #[must_use]
    pub fn random<O, R>(operators: &O, count: usize, rng: &mut R) -> Self
    where
        O: GeneticOperators,
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::new(operators.initialize(rng)))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every individual without a cached fitness, in parallel.
    ///
    /// Returns the number of evaluations performed.
    pub fn evaluate<E>(&mut self, roster: &Roster, evaluator: &E) -> usize
    where
        E: AssignmentEvaluator + ?Sized,
    {
        let mut pending = self
            .individuals
            .iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .collect::<Vec<_>>();
        let count = pending.len();
        if count == 0 {
            return 0;
        }

        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = count.div_ceil(workers);
        thread::scope(|s| {
            for chunk in pending.chunks_mut(chunk_size) {
                s.spawn(move || {
                    for ind in chunk {
                        ind.fitness = Some(evaluator.evaluate(roster, &ind.assignment));
                    }
                });
            }
        });
        count
    }

    /// Selects `count` individuals by tournament selection, cloning the winners.
    #[must_use]
    pub fn select<R>(&self, count: usize, tournament_size: usize, rng: &mut R) -> Vec<Individual>
    where
        R: Rng + ?Sized,
    {
        (0..count)
            .map(|_| tournament_select(&self.individuals, tournament_size, rng).clone())
            .collect()
    }

    /// Returns the individual with the lowest fitness.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|ind| ind.is_evaluated())
            .min_by(|a, b| a.rank_key().total_cmp(&b.rank_key()))
    }

    /// Descriptive statistics over the evaluated individuals' fitness.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().filter_map(Individual::fitness))
    }
}

/// Selects an individual using tournament selection.
///
/// Draws `tournament_size` contestants with replacement and returns the one with
/// the lowest fitness. The same individual may enter a tournament more than once.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    (0..tournament_size)
        .map(|_| {
            population
                .choose(rng)
                .expect("population must not be empty")
        })
        .min_by(|a, b| a.rank_key().total_cmp(&b.rank_key()))
        .expect("tournament must have contestants")
}

/// Best individual seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EliteArchive {
    best: Option<Individual>,
}

impl EliteArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn into_best(self) -> Option<Individual> {
        self.best
    }

    /// Records the best individual of `population` if it is strictly better than
    /// the current one.
    ///
    /// Returns `true` if the archive changed.
    pub fn update(&mut self, population: &Population) -> bool {
        let Some(candidate) = population.best() else {
            return false;
        };
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.rank_key() < best.rank_key());
        if improved {
            self.best = Some(candidate.clone());
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use dugout_model::{Player, Position};
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    /// Scores an assignment by how many players sit on team 0.
    struct TeamZeroCount;

    impl AssignmentEvaluator for TeamZeroCount {
        #[expect(clippy::cast_precision_loss)]
        fn evaluate(&self, _roster: &Roster, assignment: &Assignment) -> f64 {
            assignment.members_of(0).count() as f64
        }
    }

    fn roster() -> Roster {
        let players = (0..4)
            .map(|i| Player::new(format!("p{i}"), Position::Catcher, 50.0, 1.0))
            .collect();
        Roster::new(players, 2).unwrap()
    }

    fn evaluated(fitness: f64) -> Individual {
        Individual {
            assignment: Assignment::new(vec![0, 1, 0, 1]),
            fitness: Some(fitness),
        }
    }

    #[test]
    fn test_assignment_mut_invalidates_fitness() {
        let mut ind = evaluated(3.0);
        assert_eq!(ind.fitness(), Some(3.0));
        ind.assignment_mut().assign(0, 1);
        assert_eq!(ind.fitness(), None);
    }

    #[test]
    fn test_evaluate_only_pending() {
        let roster = roster();
        let mut population = Population::from_individuals(vec![
            Individual::new(Assignment::new(vec![0, 0, 0, 1])),
            evaluated(42.0),
            Individual::new(Assignment::new(vec![1, 1, 1, 1])),
        ]);

        assert_eq!(population.evaluate(&roster, &TeamZeroCount), 2);
        let fitness = population
            .individuals()
            .iter()
            .map(Individual::fitness)
            .collect::<Vec<_>>();
        assert_eq!(fitness, vec![Some(3.0), Some(42.0), Some(0.0)]);

        assert_eq!(population.evaluate(&roster, &TeamZeroCount), 0);
    }

    #[test]
    fn test_evaluate_many_individuals() {
        let roster = roster();
        let individuals = (0..100)
            .map(|i| Individual::new(Assignment::new(vec![i % 2, 1, 1, 1])))
            .collect();
        let mut population = Population::from_individuals(individuals);
        assert_eq!(population.evaluate(&roster, &TeamZeroCount), 100);
        for (i, ind) in population.individuals().iter().enumerate() {
            let expected = if i % 2 == 0 { 1.0 } else { 0.0 };
            assert_eq!(ind.fitness(), Some(expected), "individual {i}");
        }
    }

    #[test]
    fn test_best_and_stats() {
        let population = Population::from_individuals(vec![
            evaluated(5.0),
            evaluated(1.0),
            Individual::new(Assignment::new(vec![0, 0, 0, 0])),
            evaluated(3.0),
        ]);
        assert_eq!(population.best().and_then(Individual::fitness), Some(1.0));
        let stats = population.fitness_stats().unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_tournament_draws_with_replacement() {
        let population = vec![evaluated(4.0), evaluated(2.0), evaluated(9.0)];
        let mut rng = StdRng::seed_from_u64(7);
        let rounds = 10_000;
        let non_best = (0..rounds)
            .filter(|_| tournament_select(&population, 3, &mut rng).fitness() != Some(2.0))
            .count();
        // the best is missed by all three draws with probability (2/3)^3
        assert!((2_500..3_400).contains(&non_best), "{non_best}/{rounds}");
    }

    #[test]
    fn test_tournament_worst_wins_only_alone() {
        let population = vec![evaluated(4.0), evaluated(2.0), evaluated(9.0)];
        let mut rng = StdRng::seed_from_u64(2);
        let worst = (0..9_000)
            .filter(|_| tournament_select(&population, 2, &mut rng).fitness() == Some(9.0))
            .count();
        // both draws must hit the worst: (1/3)^2
        assert!((800..1_200).contains(&worst), "{worst}");
    }

    #[test]
    fn test_tournament_of_one_is_uniform_draw() {
        let population = vec![evaluated(4.0), evaluated(2.0), evaluated(9.0)];
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let winner = tournament_select(&population, 1, &mut rng);
            let index = population.iter().position(|ind| ind == winner).unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_select_returns_requested_count() {
        let population = Population::from_individuals(vec![evaluated(1.0), evaluated(2.0)]);
        let selected = population.select(7, 3, &mut StdRng::seed_from_u64(3));
        assert_eq!(selected.len(), 7);
        assert!(selected.iter().all(Individual::is_evaluated));
    }

    #[test]
    fn test_single_individual_always_wins() {
        let population = Population::from_individuals(vec![evaluated(6.0)]);
        let selected = population.select(5, 3, &mut StdRng::seed_from_u64(4));
        assert!(selected.iter().all(|ind| ind.fitness() == Some(6.0)));
    }

    #[test]
    fn test_archive_keeps_strictly_better() {
        let mut archive = EliteArchive::new();
        assert!(archive.best().is_none());

        let first = Population::from_individuals(vec![evaluated(5.0), evaluated(3.0)]);
        assert!(archive.update(&first));
        assert_eq!(archive.best().and_then(Individual::fitness), Some(3.0));

        let mut tie = evaluated(3.0);
        tie.assignment = Assignment::new(vec![1, 1, 0, 0]);
        assert!(!archive.update(&Population::from_individuals(vec![tie])));
        assert_eq!(
            archive.best().map(|ind| ind.assignment().as_slice()),
            Some([0, 1, 0, 1].as_slice())
        );

        assert!(!archive.update(&Population::from_individuals(vec![evaluated(7.0)])));
        assert!(archive.update(&Population::from_individuals(vec![evaluated(0.5)])));
        assert_eq!(archive.into_best().and_then(|ind| ind.fitness()), Some(0.5));
    }
}
