//! End-to-end demo: assemble the 1-D Laplacian, manufacture a right-hand side
//! from a known solution, solve with a named backend and report the error.

use std::io::Write;

use crate::backend::{SolveInfo, SolverFactory};
use crate::error::Result;
use crate::gallery::{laplace_1d, ramp};
use crate::map::RowMap;
use crate::params::SolverParams;
use crate::problem::{LinearProblem, manufacture};
use crate::report::format_sci;
use crate::verify;

/// Problem size and solver parameters for [`run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoConfig {
    pub n: usize,
    pub params: SolverParams,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            n: 10,
            params: SolverParams::verbose(),
        }
    }
}

/// A completed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoRun {
    /// Solver name as the caller spelled it
    pub solver: String,
    pub n: usize,
    /// `‖x - x_ex‖₁`
    pub residual_l1: f64,
    pub info: SolveInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DemoOutcome {
    /// The factory does not know the requested name. Nothing was solved.
    Unsupported { solver: String },
    Solved(DemoRun),
}

impl DemoOutcome {
    pub fn is_supported(&self) -> bool {
        matches!(self, DemoOutcome::Solved(_))
    }

    pub fn residual_l1(&self) -> Option<f64> {
        match self {
            DemoOutcome::Solved(run) => Some(run.residual_l1),
            DemoOutcome::Unsupported { .. } => None,
        }
    }
}

/// Runs the demo with solver `name`, writing the console lines to `out`.
///
/// An unknown name is not an error: the notice is written and
/// [`DemoOutcome::Unsupported`] returned. Any failure after the solver has
/// been acquired is propagated.
pub fn run(name: &str, config: &DemoConfig, out: &mut dyn Write) -> Result<DemoOutcome> {
    let map = RowMap::serial(config.n);
    let matrix = laplace_1d(&map)?;
    let exact = ramp(&map);
    let (mut lhs, rhs) = manufacture(&matrix, &exact)?;

    let factory = SolverFactory::new();
    if !factory.query(name) {
        writeln!(out, "Selected solver ({name}) not supported")?;
        log::info!("solver {name:?} is not available");
        return Ok(DemoOutcome::Unsupported {
            solver: name.to_string(),
        });
    }

    // The handle borrows lhs mutably and must be released before it is read.
    let info = {
        let problem = LinearProblem::new(&matrix, &mut lhs, &rhs);
        let mut solver = factory.create(name, problem)?;
        solver.set_parameters(config.params)?;
        solver.solve()?
    };

    if config.params.print_status {
        writeln!(out, "{}", info.status_report())?;
    }
    if config.params.print_timing {
        writeln!(out, "{}", info.timing_report())?;
    }

    let residual_l1 = verify::l1_error(&lhs, &exact)?;
    writeln!(out, "Using {name}, ||x - x_ex||_1 = {}", format_sci(residual_l1))?;
    log::info!("{name}: ||x - x_ex||_1 = {residual_l1:e}");

    Ok(DemoOutcome::Solved(DemoRun {
        solver: name.to_string(),
        n: config.n,
        residual_l1,
        info,
    }))
}
