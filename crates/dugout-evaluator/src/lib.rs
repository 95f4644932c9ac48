//! Feasibility rules and the fitness function for team assignments.
//!
//! # Modules
//!
//! - [`requirements`] - position coverage and pitcher rules, reported as ordered
//!   [`CoverageGap`]s; shared by the repair engine and the fitness function
//! - [`fitness`] - [`BalanceEvaluator`], which maps an assignment to a scalar
//!   (lower is better) combining hard-constraint penalties and balance objectives
//!
//! # Example
//!
//! ```
//! use dugout_evaluator::{AssignmentEvaluator, BalanceEvaluator};
//! use dugout_model::{Assignment, Player, Position, Roster};
//!
//! let players = vec![
//!     Player::new("a", Position::Pitcher, 50.0, 1.0),
//!     Player::new("b", Position::Pitcher, 50.0, 1.0),
//! ];
//! let roster = Roster::new(players, 2).unwrap();
//! let evaluator = BalanceEvaluator::default();
//!
//! // each one-player team misses six singletons, three outfielders and eight players
//! let fitness = evaluator.evaluate(&roster, &Assignment::new(vec![0, 1]));
//! assert_eq!(fitness, 2.0 * (6.0 * 10_000.0 + 3.0 * 5_000.0 + 8.0 * 2_000.0));
//! ```

pub use self::{
    fitness::{AssignmentEvaluator, BalanceEvaluator, FitnessBreakdown, FitnessWeights},
    requirements::CoverageGap,
};

pub mod fitness;
pub mod requirements;
