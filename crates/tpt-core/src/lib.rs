//! # tpt-core: Transportation Problem Core Types
//!
//! Value types shared by the solver and its front ends:
//!
//! - [`ProblemInstance`] - validated supply, demand and cost inputs
//! - [`BalancedInstance`] - instance after the fictitious supplier step
//! - [`ShipmentPlan`] - dense flow matrix returned by solver backends
//! - [`SolutionReport`] - projected result for the caller
//!
//! Errors are unified under [`TransportError`].
//!
//! ```
//! use tpt_core::ProblemInstance;
//!
//! let instance = ProblemInstance::new(
//!     vec![20.0, 30.0],
//!     vec![25.0, 25.0],
//!     vec![vec![8.0, 6.0], vec![9.0, 5.0]],
//! )?;
//! assert_eq!(instance.total_demand(), 50.0);
//! # Ok::<(), tpt_core::TransportError>(())
//! ```

pub mod error;
pub mod model;
pub mod validation;

pub use error::{TransportError, TransportResult};
pub use model::{
    round_to, BalancedInstance, ProblemInstance, ShipmentPlan, SolutionReport,
    QUANTITY_TOLERANCE,
};
pub use validation::validate_inputs;
