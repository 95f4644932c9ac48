//! Genetic search for balanced team assignments.
//!
//! The search manipulates [`Assignment`](dugout_model::Assignment) vectors directly
//! and scores them with any [`AssignmentEvaluator`](dugout_evaluator::AssignmentEvaluator).
//!
//! # Modules
//!
//! - [`params`] - [`SearchParams`] with validation
//! - [`repair`] - bounded constraint repair for size balance and position coverage
//! - [`operators`] - group-preserving initialization, crossover and mutation
//! - [`genetic`] - individuals, populations, tournament selection, elitism archive
//! - [`driver`] - the generational loop, [`Optimizer`]
//!
//! # Example
//!
//! ```
//! use dugout_evaluator::BalanceEvaluator;
//! use dugout_model::{Player, Position, Roster};
//! use dugout_search::{Optimizer, SearchParams};
//!
//! let players = (0..8)
//!     .map(|i| Player::new(format!("p{i}"), Position::Outfield, 50.0, 1.0))
//!     .collect();
//! let roster = Roster::new(players, 2).unwrap();
//! let evaluator = BalanceEvaluator::default();
//! let params = SearchParams {
//!     population_size: 10,
//!     generations: 5,
//!     seed: Some(42),
//!     ..SearchParams::default()
//! };
//!
//! let outcome = Optimizer::new(&roster, &evaluator, params).unwrap().run();
//! assert_eq!(outcome.history().len(), 6);
//! assert_eq!(outcome.teams(&roster).len(), 2);
//! ```

pub use self::{
    driver::{GenerationStats, Optimizer, SearchOutcome},
    params::{InvalidParamsError, SearchParams},
    repair::{RepairOutcome, RepairStatus, Repairer},
};

pub mod driver;
pub mod genetic;
pub mod operators;
pub mod params;
pub mod repair;
