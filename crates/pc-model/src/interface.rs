//! Derived interface quantities shared by the closures and the spreader.

use crate::error::PhaseChangeResult;
use pc_core::clamp_unit;
use pc_mesh::{FvMesh, ScalarField, fvc};

/// Cell classification by limited liquid fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// `alpha > 1 - cutoff`
    Liquid,
    /// `alpha < cutoff`
    Vapor,
    Interface,
}

/// Limited liquid fraction and the magnitude of its gradient.
///
/// Recomputed once per correction and lent to every consumer.
#[derive(Clone, Debug)]
pub struct InterfaceCache {
    limited_alpha: ScalarField,
    mag_grad_alpha: ScalarField,
}

impl InterfaceCache {
    pub fn new(n_cells: usize) -> Self {
        Self {
            limited_alpha: ScalarField::zeros("limitedAlpha1", n_cells),
            mag_grad_alpha: ScalarField::zeros("magGradLimitedAlpha1", n_cells),
        }
    }

    pub fn update(&mut self, mesh: &dyn FvMesh, alpha1: &ScalarField) -> PhaseChangeResult<()> {
        alpha1.check_len(self.limited_alpha.len())?;
        for (lim, &raw) in self.limited_alpha.values_mut().iter_mut().zip(alpha1.iter()) {
            *lim = clamp_unit(raw);
        }
        self.mag_grad_alpha = fvc::mag_grad(mesh, &self.limited_alpha, "magGradLimitedAlpha1")?;
        Ok(())
    }

    pub fn limited_alpha(&self) -> &ScalarField {
        &self.limited_alpha
    }

    pub fn mag_grad_alpha(&self) -> &ScalarField {
        &self.mag_grad_alpha
    }

    pub fn region(&self, cell: usize, cutoff: f64) -> Region {
        let a = self.limited_alpha[cell];
        if a < cutoff {
            Region::Vapor
        } else if a > 1.0 - cutoff {
            Region::Liquid
        } else {
            Region::Interface
        }
    }
}
