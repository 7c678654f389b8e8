//! Advent of Code solver framework
//!
//! Every day of the archive plugs into the same small set of traits:
//!
//! - [`AocParser`] turns puzzle text into the day's shared data
//! - [`PartSolver`] answers one numbered part
//! - [`Solver`] ties a parser and its parts together (usually derived)
//! - [`DynSolver`] erases the concrete type so the runner can treat every day alike
//! - [`SolverRegistry`] maps year/day to a factory producing a [`DynSolver`]
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(aoc_solver::AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Floors;
//!
//! impl AocParser for Floors {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .chars()
//!             .map(|c| match c {
//!                 '(' => Ok(1),
//!                 ')' => Ok(-1),
//!                 other => Err(ParseError::InvalidFormat(format!("unexpected {other:?}"))),
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.len().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Floors>(2015, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2015, 1, "(()").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "1");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```
//!
//! # Plugins
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] through
//! `inventory`, so linking a solutions crate is enough for the runner to
//! find its days:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2015, day = 1, tags = ["parsing"])]
//! pub struct Solver;
//! ```
//!
//! # Sharing work between parts
//!
//! `SharedData` is passed mutably to every part, so a part may stash an
//! intermediate result for a later part. Parts must still work when solved
//! on their own, in any order.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-exported for the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
