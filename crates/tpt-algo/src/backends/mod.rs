//! Built-in transportation LP backends.
//!
//! Each backend exposes the same narrow `minimize` interface through
//! [`TransportBackend`].

mod traits;
mod transport_simplex;
mod vogel;

#[cfg(any(feature = "solver-clarabel", feature = "solver-highs"))]
mod lp_library;

pub use traits::{LpOutcome, LpStatus, SolverConfig, TransportBackend};
pub use transport_simplex::TransportSimplexBackend;

#[cfg(feature = "solver-clarabel")]
pub use lp_library::ClarabelBackend;

#[cfg(feature = "solver-highs")]
pub use lp_library::HighsBackend;
