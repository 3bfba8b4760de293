//! Direct sparse linear solvers behind a name-based factory.
//!
//! The crate provides a row-distributed sparse matrix (`CrsMatrix`) and
//! vector type, a `LinearProblem` binding them, and several direct solver
//! backends selected by key through [`SolverFactory`]. The [`demo`] module
//! assembles the 1-D Laplacian, manufactures a right-hand side from a known
//! solution and reports `‖x - x_ex‖₁` for the selected solver.
//!
//! # Example
//!
//! ```no_run
//! use dls_solver::demo::{self, DemoConfig};
//!
//! let mut stdout = std::io::stdout();
//! let outcome = demo::run("sparse-lu", &DemoConfig::default(), &mut stdout)?;
//! assert!(outcome.is_supported());
//! # Ok::<(), dls_solver::DlsError>(())
//! ```

pub mod backend;
pub mod demo;
pub mod error;
pub mod gallery;
pub mod handle;
pub mod map;
pub mod matrix;
pub mod params;
pub mod problem;
pub mod report;
pub mod vector;
pub mod verify;

pub use backend::{
    Analysis, DirectSolver, Factorization, PhaseCalls, PhaseTimings, SolveInfo, SolverFactory,
    SolverKind, Symbolic,
};
pub use demo::{DemoConfig, DemoOutcome, DemoRun};
pub use error::{DlsError, Result};
pub use handle::SolverHandle;
pub use map::RowMap;
pub use matrix::{CrsMatrix, CrsMatrixBuilder};
pub use params::{SolverParams, SolverParamsBuilder};
pub use problem::{LinearProblem, manufacture};
pub use report::{RunReport, format_sci};
pub use vector::Vector;
