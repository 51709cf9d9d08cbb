//! Explicit finite-volume calculus: gradients and volume integrals.

use crate::error::MeshResult;
use crate::field::{ScalarField, VectorField};
use crate::mesh::{FvMesh, dot, sub};
use crate::reduce::Reduction;

/// Owner-side linear interpolation weight of an internal face.
///
/// Falls back to 0.5 when the face is degenerate with respect to the
/// owner-neighbour direction.
pub fn interpolation_weight<M: FvMesh + ?Sized>(mesh: &M, face: usize) -> f64 {
    let s = mesh.face_area_vector(face);
    let cf = mesh.face_center(face);
    let cp = mesh.cell_center(mesh.face_owner(face));
    let cn = mesh.cell_center(mesh.face_neighbour(face));

    let to_neighbour = dot(s, sub(cn, cf)).abs();
    let to_owner = dot(s, sub(cf, cp)).abs();
    let total = to_owner + to_neighbour;
    if total > 0.0 { to_neighbour / total } else { 0.5 }
}

/// Green-Gauss cell gradient.
///
/// Boundary faces take the owner value (zero normal gradient).
pub fn grad<M: FvMesh + ?Sized>(
    mesh: &M,
    field: &ScalarField,
    name: impl Into<String>,
) -> MeshResult<VectorField> {
    let n = mesh.n_cells();
    field.check_len(n)?;
    let phi = field.values();
    let mut g = vec![[0.0; 3]; n];

    for f in 0..mesh.n_internal_faces() {
        let o = mesh.face_owner(f);
        let nb = mesh.face_neighbour(f);
        let w = interpolation_weight(mesh, f);
        let phi_f = w * phi[o] + (1.0 - w) * phi[nb];
        let s = mesh.face_area_vector(f);
        for d in 0..3 {
            g[o][d] += s[d] * phi_f;
            g[nb][d] -= s[d] * phi_f;
        }
    }

    for f in 0..mesh.n_boundary_faces() {
        let o = mesh.boundary_face_owner(f);
        let s = mesh.boundary_face_area_vector(f);
        for d in 0..3 {
            g[o][d] += s[d] * phi[o];
        }
    }

    for (c, gc) in g.iter_mut().enumerate() {
        let inv_v = 1.0 / mesh.cell_volume(c);
        for v in gc.iter_mut() {
            *v *= inv_v;
        }
    }

    Ok(VectorField::new(name, g))
}

/// Magnitude of the Green-Gauss gradient.
pub fn mag_grad<M: FvMesh + ?Sized>(
    mesh: &M,
    field: &ScalarField,
    name: impl Into<String>,
) -> MeshResult<ScalarField> {
    let name = name.into();
    Ok(grad(mesh, field, format!("grad({})", field.name()))?.mag(name))
}

/// Sum of `field * V` over this partition.
pub fn local_integrate<M: FvMesh + ?Sized>(mesh: &M, field: &ScalarField) -> MeshResult<f64> {
    field.check_len(mesh.n_cells())?;
    Ok(field
        .iter()
        .enumerate()
        .map(|(c, v)| v * mesh.cell_volume(c))
        .sum())
}

/// Global volume integral of `field`.
pub fn domain_integrate<M: FvMesh + ?Sized>(
    mesh: &M,
    reduction: &dyn Reduction,
    field: &ScalarField,
) -> MeshResult<f64> {
    Ok(reduction.sum(local_integrate(mesh, field)?))
}

/// Global mean of the non-orthogonal delta coefficient over internal faces.
pub fn average_delta_coeff<M: FvMesh + ?Sized>(mesh: &M, reduction: &dyn Reduction) -> f64 {
    let coeffs: Vec<f64> = (0..mesh.n_internal_faces())
        .map(|f| mesh.non_orth_delta_coeff(f))
        .collect();
    reduction.average(&coeffs)
}
