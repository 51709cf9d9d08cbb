//! Read-only views of the flow solver's fields.

use crate::error::{PhaseChangeError, PhaseChangeResult};
use pc_mesh::{FvMesh, ScalarField, VectorField};

/// Fields supplied by the outer solver for one correction.
///
/// Velocity and face flux are accepted for closures that need them; none of
/// the built-in closures read them.
#[derive(Clone, Copy, Debug)]
pub struct FlowFields<'a> {
    pub alpha1: &'a ScalarField,
    pub p: &'a ScalarField,
    pub t: &'a ScalarField,
    pub u: Option<&'a VectorField>,
    /// Volumetric flux per internal face
    pub phi: Option<&'a [f64]>,
}

impl<'a> FlowFields<'a> {
    pub fn new(alpha1: &'a ScalarField, p: &'a ScalarField, t: &'a ScalarField) -> Self {
        Self {
            alpha1,
            p,
            t,
            u: None,
            phi: None,
        }
    }

    pub fn with_velocity(mut self, u: &'a VectorField) -> Self {
        self.u = Some(u);
        self
    }

    pub fn with_flux(mut self, phi: &'a [f64]) -> Self {
        self.phi = Some(phi);
        self
    }

    pub fn check(&self, mesh: &dyn FvMesh) -> PhaseChangeResult<()> {
        let n = mesh.n_cells();
        self.alpha1.check_len(n)?;
        self.p.check_len(n)?;
        self.t.check_len(n)?;
        if let Some(u) = self.u {
            u.check_len(n)?;
        }
        if let Some(phi) = self.phi {
            if phi.len() != mesh.n_internal_faces() {
                return Err(PhaseChangeError::SizeMismatch {
                    what: "phi".to_string(),
                    expected: mesh.n_internal_faces(),
                    found: phi.len(),
                });
            }
        }
        for field in [self.alpha1, self.p, self.t] {
            if !field.all_finite() {
                return Err(PhaseChangeError::NonFinite {
                    what: field.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
