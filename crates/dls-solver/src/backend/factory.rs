//! Name-based solver lookup.

use std::fmt;
use std::str::FromStr;

use super::traits::DirectSolver;
use super::{Cholesky, DenseLu, SparseLu};
use crate::error::{DlsError, Result};
use crate::handle::SolverHandle;
use crate::problem::LinearProblem;

/// Built-in direct solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverKind {
    /// faer sparse LU with partial pivoting
    #[default]
    SparseLu,
    /// nalgebra dense LU
    DenseLu,
    /// nalgebra-sparse Cholesky (SPD only)
    Cholesky,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [
        SolverKind::SparseLu,
        SolverKind::DenseLu,
        SolverKind::Cholesky,
    ];

    /// Factory key.
    pub fn key(&self) -> &'static str {
        match self {
            SolverKind::SparseLu => "sparse-lu",
            SolverKind::DenseLu => "dense-lu",
            SolverKind::Cholesky => "cholesky",
        }
    }

    /// Case-insensitive key lookup; surrounding whitespace is ignored.
    pub fn from_key(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(name))
    }

    pub(crate) fn backend(&self) -> Box<dyn DirectSolver> {
        match self {
            SolverKind::SparseLu => Box::new(SparseLu),
            SolverKind::DenseLu => Box::new(DenseLu),
            SolverKind::Cholesky => Box::new(Cholesky),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SolverKind {
    type Err = DlsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s).ok_or_else(|| DlsError::UnsupportedSolver(s.to_string()))
    }
}

/// Creates solver handles by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverFactory;

impl SolverFactory {
    pub fn new() -> Self {
        Self
    }

    /// Whether `name` selects an available solver.
    pub fn query(&self, name: &str) -> bool {
        SolverKind::from_key(name).is_some()
    }

    /// Keys of every available solver, default first.
    pub fn available(&self) -> Vec<&'static str> {
        SolverKind::ALL.iter().map(SolverKind::key).collect()
    }

    /// Binds the named solver to `problem`.
    pub fn create<'a>(&self, name: &str, problem: LinearProblem<'a>) -> Result<SolverHandle<'a>> {
        let kind: SolverKind = name.parse()?;
        SolverHandle::new(kind, problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for kind in SolverKind::ALL {
            assert_eq!(SolverKind::from_key(kind.key()), Some(kind));
            assert_eq!(kind.backend().name(), kind.key());
        }
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(SolverKind::from_key(" Sparse-LU "), Some(SolverKind::SparseLu));
        assert_eq!(SolverKind::from_key("CHOLESKY"), Some(SolverKind::Cholesky));
    }

    #[test]
    fn query_reports_unknown_names() {
        let factory = SolverFactory::new();
        assert!(factory.query("sparse-lu"));
        assert!(!factory.query("superlu"));
        assert!(!factory.query(""));
    }

    #[test]
    fn available_lists_default_first() {
        let names = SolverFactory::new().available();
        assert_eq!(names, vec!["sparse-lu", "dense-lu", "cholesky"]);
        assert_eq!(SolverKind::default().key(), names[0]);
    }

    #[test]
    fn parse_unknown_name_is_unsupported() {
        let err = "mumps".parse::<SolverKind>().unwrap_err();
        assert!(matches!(err, DlsError::UnsupportedSolver(name) if name == "mumps"));
    }
}
