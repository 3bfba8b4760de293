//! Error types for dls-solver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DlsError>;

#[derive(Error, Debug)]
pub enum DlsError {
    #[error("Column {col} in row {row} is outside [0, {num_cols})")]
    ColumnOutOfRange {
        row: usize,
        col: usize,
        num_cols: usize,
    },

    #[error("Row {row} is not owned by this row map")]
    RowNotOwned { row: usize },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Row map mismatch: {0}")]
    MapMismatch(&'static str),

    #[error("Matrix is not square ({rows} x {cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("Direct solvers require a serial row map")]
    DistributedUnsupported,

    #[error("Selected solver ({0}) not supported")]
    UnsupportedSolver(String),

    #[error("Singular matrix: no acceptable pivot in column {column}")]
    SingularMatrix { column: usize },

    #[error("Singular matrix: factors do not yield a finite solution")]
    Singular,

    #[error("Matrix is not positive definite")]
    NotPositiveDefinite,

    #[error("{solver} cannot factor this matrix: {reason}")]
    UnsupportedStructure {
        solver: &'static str,
        reason: String,
    },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Sparse format error: {0}")]
    Sparse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
