//! # tpt-algo: Transportation Problem Algorithms
//!
//! Solves the classical transportation problem in four pure steps:
//!
//! | Step | Module | Description |
//! |------|--------|-------------|
//! | Balance | [`balance`] | Add a zero-cost fictitious supplier when demand exceeds supply |
//! | Formulate | [`formulation`] | Build the LP: `≤` supply rows, `=` demand rows |
//! | Solve | [`backends`] | Minimize through a [`TransportBackend`] |
//! | Project | [`project`] | Split genuine shipments from the shortage row |
//!
//! ### Backends
//!
//! - `transport-simplex`: Vogel's approximation + MODI pivots, deterministic,
//!   always returns a vertex (at most `M' + N - 1` nonzero flows)
//! - `clarabel` (feature `solver-clarabel`): interior-point LP via `good_lp`
//! - `highs` (feature `solver-highs`): dual simplex LP via `good_lp`
//!
//! The [`BackendRegistry`] selects `transport-simplex` unless told otherwise.
//!
//! ## Example
//!
//! ```
//! use tpt_algo::TransportSolver;
//! use tpt_core::ProblemInstance;
//!
//! let instance = ProblemInstance::new(
//!     vec![20.0, 30.0],
//!     vec![25.0, 25.0],
//!     vec![vec![8.0, 6.0], vec![9.0, 5.0]],
//! )?;
//! let report = TransportSolver::new().solve(&instance)?;
//! assert_eq!(report.total_cost, 330.0);
//! # Ok::<(), tpt_core::TransportError>(())
//! ```

pub mod backends;
pub mod balance;
pub mod formulation;
pub mod project;
pub mod registry;
pub mod solver;

pub use backends::{LpOutcome, LpStatus, SolverConfig, TransportBackend, TransportSimplexBackend};
pub use balance::{balance, rebalance, BALANCE_EPSILON};
pub use formulation::{LinearConstraint, Sense, TransportLp};
pub use project::{cross_check_cost, project};
pub use registry::{BackendRegistry, PREFERRED_BACKENDS};
pub use solver::{solve_transportation, TransportSolver};

#[cfg(feature = "solver-clarabel")]
pub use backends::ClarabelBackend;

#[cfg(feature = "solver-highs")]
pub use backends::HighsBackend;
