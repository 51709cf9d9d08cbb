//! Sparse linear algebra for the implicit operators.

mod csr;
mod pcg;

pub use csr::{CsrBuilder, CsrMatrix};
pub use pcg::{PcgConfig, PcgSolver, PreconditionerType};

use crate::error::MeshResult;
use nalgebra::DVector;

/// Outcome of a converged linear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    pub iterations: usize,
    pub initial_residual: f64,
    pub final_residual: f64,
}

/// Solver for symmetric positive definite systems `A x = b`.
///
/// `x` holds the initial guess on entry and the solution on success. A solve
/// that does not reach its tolerance is an error, never a silent result.
pub trait LinearSolver: Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, a: &CsrMatrix, b: &DVector<f64>, x: &mut DVector<f64>)
    -> MeshResult<SolveStats>;
}
