//! Direct solver backends and the factory that selects them by name.
//!
//! Every backend implements [`DirectSolver`] as a thin adapter over an
//! external factorization library and is looked up through
//! [`SolverFactory`] with a case-insensitive key.
//!
//! # Backends
//!
//! - **sparse-lu** (default): faer sparse LU with its fill-reducing
//!   ordering.
//! - **dense-lu**: nalgebra dense LU. Small systems only.
//! - **cholesky**: nalgebra-sparse Cholesky for symmetric positive definite
//!   matrices.
//!
//! # Architecture
//!
//! ```text
//! CrsMatrix + Vectors
//!         │
//!         ▼
//! LinearProblem ──► SolverFactory::create(name)
//!                          │
//!                          ▼
//!                    SolverHandle (params, timings, RAII release)
//!                          │
//!              ┌───────────┼───────────┐
//!              ▼           ▼           ▼
//!          SparseLu     DenseLu     Cholesky
//!           (faer)    (nalgebra) (nalgebra-sparse)
//! ```

pub mod cholesky;
pub mod dense_lu;
pub mod factory;
pub mod sparse_lu;
pub mod traits;

pub use cholesky::Cholesky;
pub use dense_lu::DenseLu;
pub use factory::{SolverFactory, SolverKind};
pub use sparse_lu::SparseLu;
pub use traits::*;
