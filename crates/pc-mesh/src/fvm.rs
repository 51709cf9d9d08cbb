//! Implicit finite-volume assembly.

use crate::error::{MeshError, MeshResult};
use crate::field::ScalarField;
use crate::linalg::{CsrBuilder, CsrMatrix};
use crate::mesh::{FvMesh, norm};
use nalgebra::DVector;

/// Assembled linear system `A x = b`.
#[derive(Debug, Clone)]
pub struct FvSystem {
    pub matrix: CsrMatrix,
    pub rhs: DVector<f64>,
}

/// Discretize `psi - D lap(psi) = source` with zero-gradient boundaries.
///
/// Rows are volume-integrated: `V_P psi_P + sum_f D |S_f| delta_f (psi_P - psi_N)
/// = V_P source_P`. The matrix is symmetric positive definite for `D >= 0`.
pub fn helmholtz<M: FvMesh + ?Sized>(
    mesh: &M,
    diffusivity: f64,
    source: &ScalarField,
) -> MeshResult<FvSystem> {
    let n = mesh.n_cells();
    source.check_len(n)?;
    if !(diffusivity.is_finite() && diffusivity >= 0.0) {
        return Err(MeshError::Breakdown {
            what: format!("diffusivity {diffusivity} is not a non-negative number"),
        });
    }

    let mut builder = CsrBuilder::new(n);
    let mut rhs = DVector::zeros(n);
    for c in 0..n {
        let v = mesh.cell_volume(c);
        builder.add(c, c, v);
        rhs[c] = v * source[c];
    }

    for f in 0..mesh.n_internal_faces() {
        let o = mesh.face_owner(f);
        let nb = mesh.face_neighbour(f);
        let coeff = diffusivity * norm(mesh.face_area_vector(f)) * mesh.non_orth_delta_coeff(f);
        builder.add(o, o, coeff);
        builder.add(nb, nb, coeff);
        builder.add(o, nb, -coeff);
        builder.add(nb, o, -coeff);
    }

    Ok(FvSystem {
        matrix: builder.build(),
        rhs,
    })
}
