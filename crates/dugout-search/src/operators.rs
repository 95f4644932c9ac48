//! Variation operators over assignment vectors.
//!
//! Every operator keeps co-assignment groups whole: groups are placed and moved as
//! a unit, and gene-level operations only touch ungrouped players. Crossover and
//! mutation finish with a [`Repairer`] pass, so offspring come back balanced in
//! size and, where the roster allows it, fully covered.
//!
//! # Operations
//!
//! - **Initialization**: [`random_assignment`] places each group, then each
//!   ungrouped player, on a uniformly random team
//! - **Crossover**: [`exchange_segment`] swaps the team of a contiguous run of
//!   ungrouped players between two parents (two-point crossover over the ungrouped
//!   index list)
//! - **Mutation**: [`mutate_genes`] reassigns each ungrouped player with a fixed
//!   rate, and [`move_random_group`] relocates one whole group

use dugout_model::{Assignment, Roster};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{SearchParams, repair::Repairer};

/// Initialization and variation operators used by the search driver.
pub trait GeneticOperators {
    /// Creates a random assignment.
    fn initialize<R>(&self, rng: &mut R) -> Assignment
    where
        R: Rng + ?Sized;

    /// Recombines two assignments in place.
    fn crossover<R>(&self, a: &mut Assignment, b: &mut Assignment, rng: &mut R)
    where
        R: Rng + ?Sized;

    /// Perturbs an assignment in place.
    fn mutate<R>(&self, assignment: &mut Assignment, rng: &mut R)
    where
        R: Rng + ?Sized;
}

/// Group-preserving operators for a roster, with repair after every variation.
#[derive(Debug, Clone)]
pub struct RosterOperators<'a> {
    roster: &'a Roster,
    repairer: Repairer,
    /// Probability that crossover actually exchanges genes
    pub gene_exchange_prob: f64,
    /// Probability of reassigning each ungrouped player
    pub gene_mutation_rate: f64,
    /// Probability of moving one whole group
    pub group_mutation_rate: f64,
}

impl<'a> RosterOperators<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, params: &SearchParams) -> Self {
        Self {
            roster,
            repairer: Repairer::new(params.repair_iterations),
            gene_exchange_prob: params.gene_exchange_prob,
            gene_mutation_rate: params.gene_mutation_rate,
            group_mutation_rate: params.group_mutation_rate,
        }
    }

    #[must_use]
    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    #[must_use]
    pub fn repairer(&self) -> &Repairer {
        &self.repairer
    }

    fn repair<R>(&self, assignment: &mut Assignment, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.repairer.repair(self.roster, assignment, rng);
    }
}

impl GeneticOperators for RosterOperators<'_> {
    fn initialize<R>(&self, rng: &mut R) -> Assignment
    where
        R: Rng + ?Sized,
    {
        random_assignment(self.roster, rng)
    }

    fn crossover<R>(&self, a: &mut Assignment, b: &mut Assignment, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(self.gene_exchange_prob) {
            exchange_segment(self.roster, a, b, rng);
        }
        self.repair(a, rng);
        self.repair(b, rng);
    }

    fn mutate<R>(&self, assignment: &mut Assignment, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        mutate_genes(self.roster, assignment, self.gene_mutation_rate, rng);
        if rng.random_bool(self.group_mutation_rate) {
            move_random_group(self.roster, assignment, rng);
        }
        self.repair(assignment, rng);
    }
}

/// Creates an assignment placing every group, then every ungrouped player, on a
/// random team.
///
/// The result is not repaired.
pub fn random_assignment<R>(roster: &Roster, rng: &mut R) -> Assignment
where
    R: Rng + ?Sized,
{
    let num_teams = roster.num_teams();
    let mut assignment = Assignment::new(vec![0; roster.num_players()]);
    for group in roster.groups().iter() {
        assignment.assign_all(group.members(), rng.random_range(0..num_teams));
    }
    for &player in roster.groups().ungrouped() {
        assignment.assign(player, rng.random_range(0..num_teams));
    }
    assignment
}

/// Swaps the teams of a contiguous run of ungrouped players between `a` and `b`.
///
/// The run is `ungrouped[p1..p2]` with `p1 <= p2` drawn uniformly, so it may be
/// empty. Rosters with two or fewer ungrouped players are left unchanged.
pub fn exchange_segment<R>(roster: &Roster, a: &mut Assignment, b: &mut Assignment, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let ungrouped = roster.groups().ungrouped();
    if ungrouped.len() <= 2 {
        return;
    }
    let p1 = rng.random_range(0..ungrouped.len());
    let p2 = rng.random_range(p1..ungrouped.len());
    for &player in &ungrouped[p1..p2] {
        a.swap_with(b, player);
    }
}

/// Reassigns each ungrouped player to a random team with probability `rate`.
pub fn mutate_genes<R>(roster: &Roster, assignment: &mut Assignment, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let num_teams = roster.num_teams();
    for &player in roster.groups().ungrouped() {
        if rng.random_bool(rate) {
            assignment.assign(player, rng.random_range(0..num_teams));
        }
    }
}

/// Moves one randomly chosen group to a random team.
///
/// Does nothing if the roster has no groups.
pub fn move_random_group<R>(roster: &Roster, assignment: &mut Assignment, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let groups = roster.groups().iter().collect::<Vec<_>>();
    if let Some(group) = groups.choose(rng) {
        assignment.assign_all(group.members(), rng.random_range(0..roster.num_teams()));
    }
}
