//! Finite-volume mesh connectivity and geometry.
//!
//! Internal faces are stored once with an owner and a neighbour cell. The face
//! area vector points from owner to neighbour. Boundary faces have an owner
//! only and point out of the domain.

use crate::error::{MeshError, MeshResult};
use pc_core::{PcError, ensure_finite};

pub type Vec3 = [f64; 3];

/// Read-only view of a finite-volume mesh partition.
pub trait FvMesh: Send + Sync {
    fn n_cells(&self) -> usize;
    fn cell_volume(&self, cell: usize) -> f64;
    fn cell_center(&self, cell: usize) -> Vec3;

    fn n_internal_faces(&self) -> usize;
    fn face_owner(&self, face: usize) -> usize;
    fn face_neighbour(&self, face: usize) -> usize;
    fn face_area_vector(&self, face: usize) -> Vec3;
    fn face_center(&self, face: usize) -> Vec3;

    fn n_boundary_faces(&self) -> usize;
    fn boundary_face_owner(&self, face: usize) -> usize;
    fn boundary_face_area_vector(&self, face: usize) -> Vec3;

    fn cell_volumes(&self) -> Vec<f64> {
        (0..self.n_cells()).map(|c| self.cell_volume(c)).collect()
    }

    /// Non-orthogonality corrected inverse distance between the cell centers
    /// either side of an internal face.
    fn non_orth_delta_coeff(&self, face: usize) -> f64 {
        let d = sub(
            self.cell_center(self.face_neighbour(face)),
            self.cell_center(self.face_owner(face)),
        );
        let s = self.face_area_vector(face);
        let n = scale(s, 1.0 / norm(s));
        1.0 / dot(n, d).max(0.05 * norm(d))
    }
}

/// Owned arrays describing a polyhedral mesh.
#[derive(Clone, Debug, Default)]
pub struct PolyMeshParts {
    pub cell_volumes: Vec<f64>,
    pub cell_centers: Vec<Vec3>,
    pub owner: Vec<usize>,
    pub neighbour: Vec<usize>,
    pub face_areas: Vec<Vec3>,
    pub face_centers: Vec<Vec3>,
    pub boundary_owner: Vec<usize>,
    pub boundary_areas: Vec<Vec3>,
}

/// Unstructured mesh held as flat connectivity arrays.
#[derive(Clone, Debug)]
pub struct PolyMesh {
    parts: PolyMeshParts,
}

impl PolyMesh {
    pub fn new(parts: PolyMeshParts) -> MeshResult<Self> {
        let n_cells = parts.cell_volumes.len();
        if n_cells == 0 {
            return Err(invalid("mesh has no cells"));
        }
        MeshError::check_len("cell_centers", n_cells, parts.cell_centers.len())?;

        let n_faces = parts.owner.len();
        MeshError::check_len("neighbour", n_faces, parts.neighbour.len())?;
        MeshError::check_len("face_areas", n_faces, parts.face_areas.len())?;
        MeshError::check_len("face_centers", n_faces, parts.face_centers.len())?;
        MeshError::check_len(
            "boundary_areas",
            parts.boundary_owner.len(),
            parts.boundary_areas.len(),
        )?;

        for &v in &parts.cell_volumes {
            if ensure_finite(v, "cell volume")? <= 0.0 {
                return Err(invalid(&format!("cell volume {v} is not positive")));
            }
        }
        for (f, (&o, &n)) in parts.owner.iter().zip(&parts.neighbour).enumerate() {
            PcError::check_index("owner cell", o, n_cells)?;
            PcError::check_index("neighbour cell", n, n_cells)?;
            if o == n {
                return Err(invalid(&format!(
                    "internal face {f} connects cells {o} and {n}"
                )));
            }
            if norm(parts.face_areas[f]) <= 0.0 {
                return Err(invalid(&format!("internal face {f} has zero area")));
            }
        }
        for &o in &parts.boundary_owner {
            PcError::check_index("boundary face owner", o, n_cells)?;
        }

        Ok(Self { parts })
    }

    /// Uniform 1-D mesh of `n` cells along x with unit cross-section.
    pub fn line(n: usize, length: f64) -> MeshResult<Self> {
        Self::structured([n, 1, 1], [length, 1.0, 1.0])
    }

    /// Uniform Cartesian box of `counts` cells spanning `lengths`.
    ///
    /// Cells are numbered x fastest. Both ends of every axis are boundary.
    pub fn structured(counts: [usize; 3], lengths: [f64; 3]) -> MeshResult<Self> {
        if counts.contains(&0) {
            return Err(invalid("structured mesh needs at least one cell per axis"));
        }
        if lengths.iter().any(|l| !(l.is_finite() && *l > 0.0)) {
            return Err(invalid("structured mesh lengths must be positive"));
        }

        let [nx, ny, nz] = counts;
        let h = [
            lengths[0] / nx as f64,
            lengths[1] / ny as f64,
            lengths[2] / nz as f64,
        ];
        let volume = h[0] * h[1] * h[2];
        let index = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

        let mut parts = PolyMeshParts::default();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    parts.cell_volumes.push(volume);
                    parts.cell_centers.push([
                        (i as f64 + 0.5) * h[0],
                        (j as f64 + 0.5) * h[1],
                        (k as f64 + 0.5) * h[2],
                    ]);
                }
            }
        }

        for axis in 0..3 {
            let area = volume / h[axis];
            let mut normal = [0.0; 3];
            normal[axis] = area;
            let step = |ijk: [usize; 3]| {
                let mut next = ijk;
                next[axis] += 1;
                next
            };

            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        let ijk = [i, j, k];
                        let cell = index(i, j, k);
                        if ijk[axis] == 0 {
                            parts.boundary_owner.push(cell);
                            parts.boundary_areas.push(scale(normal, -1.0));
                        }
                        if ijk[axis] + 1 == counts[axis] {
                            parts.boundary_owner.push(cell);
                            parts.boundary_areas.push(normal);
                        } else {
                            let [ni, nj, nk] = step(ijk);
                            let mut center = parts.cell_centers[cell];
                            center[axis] += 0.5 * h[axis];
                            parts.owner.push(cell);
                            parts.neighbour.push(index(ni, nj, nk));
                            parts.face_areas.push(normal);
                            parts.face_centers.push(center);
                        }
                    }
                }
            }
        }

        Self::new(parts)
    }
}

impl FvMesh for PolyMesh {
    fn n_cells(&self) -> usize {
        self.parts.cell_volumes.len()
    }

    fn cell_volume(&self, cell: usize) -> f64 {
        self.parts.cell_volumes[cell]
    }

    fn cell_center(&self, cell: usize) -> Vec3 {
        self.parts.cell_centers[cell]
    }

    fn n_internal_faces(&self) -> usize {
        self.parts.owner.len()
    }

    fn face_owner(&self, face: usize) -> usize {
        self.parts.owner[face]
    }

    fn face_neighbour(&self, face: usize) -> usize {
        self.parts.neighbour[face]
    }

    fn face_area_vector(&self, face: usize) -> Vec3 {
        self.parts.face_areas[face]
    }

    fn face_center(&self, face: usize) -> Vec3 {
        self.parts.face_centers[face]
    }

    fn n_boundary_faces(&self) -> usize {
        self.parts.boundary_owner.len()
    }

    fn boundary_face_owner(&self, face: usize) -> usize {
        self.parts.boundary_owner[face]
    }

    fn boundary_face_area_vector(&self, face: usize) -> Vec3 {
        self.parts.boundary_areas[face]
    }

    fn cell_volumes(&self) -> Vec<f64> {
        self.parts.cell_volumes.clone()
    }
}

fn invalid(what: &str) -> MeshError {
    MeshError::InvalidMesh {
        what: what.to_string(),
    }
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}
