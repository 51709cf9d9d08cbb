//! Preconditioned conjugate gradient.

use super::{CsrMatrix, LinearSolver, SolveStats};
use crate::error::{MeshError, MeshResult};
use nalgebra::DVector;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct PcgConfig {
    /// Tolerance relative to `||b||`
    pub rtol: f64,
    pub atol: f64,
    pub max_iter: usize,
    pub preconditioner: PreconditionerType,
}

impl Default for PcgConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-10,
            atol: 1e-14,
            max_iter: 1000,
            preconditioner: PreconditionerType::Jacobi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionerType {
    None,
    /// Inverse diagonal
    Jacobi,
}

#[derive(Debug, Clone, Default)]
pub struct PcgSolver {
    pub config: PcgConfig,
}

impl PcgSolver {
    pub fn new(config: PcgConfig) -> Self {
        Self { config }
    }

    fn inverse_diagonal(&self, a: &CsrMatrix) -> MeshResult<DVector<f64>> {
        let n = a.n_rows();
        match self.config.preconditioner {
            PreconditionerType::None => Ok(DVector::from_element(n, 1.0)),
            PreconditionerType::Jacobi => {
                let diag = a.diagonal();
                if let Some(i) = diag.iter().position(|d| !(d.is_finite() && *d > 0.0)) {
                    return Err(MeshError::Breakdown {
                        what: format!("non-positive diagonal {} in row {i}", diag[i]),
                    });
                }
                Ok(diag.map(|d| 1.0 / d))
            }
        }
    }
}

impl LinearSolver for PcgSolver {
    fn name(&self) -> &str {
        "PCG"
    }

    fn solve(
        &self,
        a: &CsrMatrix,
        b: &DVector<f64>,
        x: &mut DVector<f64>,
    ) -> MeshResult<SolveStats> {
        let n = a.n_rows();
        MeshError::check_len("right-hand side", n, b.len())?;
        MeshError::check_len("solution", n, x.len())?;

        let m_inv = self.inverse_diagonal(a)?;
        let b_norm = b.norm();
        let tol = (self.config.rtol * b_norm).max(self.config.atol);

        let mut ap = DVector::zeros(n);
        a.mul_vec(x, &mut ap)?;
        let mut r = b - &ap;
        let initial_residual = r.norm();
        if !initial_residual.is_finite() {
            return Err(MeshError::Breakdown {
                what: "non-finite initial residual".to_string(),
            });
        }
        if initial_residual <= tol {
            return Ok(SolveStats {
                iterations: 0,
                initial_residual,
                final_residual: initial_residual,
            });
        }

        let mut z = r.component_mul(&m_inv);
        let mut p = z.clone();
        let mut rz = r.dot(&z);
        let mut residual = initial_residual;

        for iter in 1..=self.config.max_iter {
            a.mul_vec(&p, &mut ap)?;
            let pap = p.dot(&ap);
            if !(pap.is_finite() && pap > 0.0) {
                return Err(MeshError::Breakdown {
                    what: format!("p'Ap = {pap:e} at iteration {iter}"),
                });
            }

            let step = rz / pap;
            x.axpy(step, &p, 1.0);
            r.axpy(-step, &ap, 1.0);
            residual = r.norm();
            trace!(iter, residual, "pcg");

            if !residual.is_finite() {
                return Err(MeshError::Breakdown {
                    what: format!("non-finite residual at iteration {iter}"),
                });
            }
            if residual <= tol {
                return Ok(SolveStats {
                    iterations: iter,
                    initial_residual,
                    final_residual: residual,
                });
            }

            z = r.component_mul(&m_inv);
            let rz_new = r.dot(&z);
            let beta = rz_new / rz;
            rz = rz_new;
            p.axpy(1.0, &z, beta);
        }

        Err(MeshError::ConvergenceFailed {
            iterations: self.config.max_iter,
            residual,
        })
    }
}
