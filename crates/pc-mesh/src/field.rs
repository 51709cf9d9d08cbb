//! Cell-centred field storage.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Vec3, norm};
use std::ops::{Index, IndexMut};

/// Named scalar with one value per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    name: String,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn uniform(name: impl Into<String>, n_cells: usize, value: f64) -> Self {
        Self::new(name, vec![value; n_cells])
    }

    pub fn zeros(name: impl Into<String>, n_cells: usize) -> Self {
        Self::uniform(name, n_cells, 0.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }

    /// New field with `f` applied cell by cell.
    pub fn map(&self, name: impl Into<String>, f: impl Fn(f64) -> f64) -> ScalarField {
        ScalarField::new(name, self.values.iter().map(|&v| f(v)).collect())
    }

    pub fn clamped(&self, name: impl Into<String>, lo: f64, hi: f64) -> ScalarField {
        self.map(name, |v| v.clamp(lo, hi))
    }

    /// Overwrite values from a field of the same size.
    pub fn assign(&mut self, other: &ScalarField) -> MeshResult<()> {
        MeshError::check_len(&self.name, self.len(), other.len())?;
        self.values.copy_from_slice(&other.values);
        Ok(())
    }

    pub fn check_len(&self, expected: usize) -> MeshResult<()> {
        MeshError::check_len(&self.name, expected, self.len())
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl Index<usize> for ScalarField {
    type Output = f64;

    fn index(&self, cell: usize) -> &f64 {
        &self.values[cell]
    }
}

impl IndexMut<usize> for ScalarField {
    fn index_mut(&mut self, cell: usize) -> &mut f64 {
        &mut self.values[cell]
    }
}

/// Named 3-vector with one value per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    name: String,
    values: Vec<Vec3>,
}

impl VectorField {
    pub fn new(name: impl Into<String>, values: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn zeros(name: impl Into<String>, n_cells: usize) -> Self {
        Self::new(name, vec![[0.0; 3]; n_cells])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Vec3] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Vec3] {
        &mut self.values
    }

    /// Euclidean magnitude per cell.
    pub fn mag(&self, name: impl Into<String>) -> ScalarField {
        ScalarField::new(name, self.values.iter().map(|&v| norm(v)).collect())
    }

    pub fn check_len(&self, expected: usize) -> MeshResult<()> {
        MeshError::check_len(&self.name, expected, self.len())
    }
}

impl Index<usize> for VectorField {
    type Output = Vec3;

    fn index(&self, cell: usize) -> &Vec3 {
        &self.values[cell]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_basics() {
        let mut f = ScalarField::new("alpha1", vec![-0.2, 0.5, 1.3]);
        assert_eq!(f.name(), "alpha1");
        assert_eq!(f.min(), -0.2);
        assert_eq!(f.max(), 1.3);

        let lim = f.clamped("limitedAlpha1", 0.0, 1.0);
        assert_eq!(lim.values(), &[0.0, 0.5, 1.0]);

        f.scale(2.0);
        assert_eq!(f[1], 1.0);
        f.fill(3.0);
        assert!(f.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn assign_checks_size() {
        let mut a = ScalarField::zeros("a", 3);
        let b = ScalarField::uniform("b", 3, 2.0);
        a.assign(&b).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.name(), "a");

        let c = ScalarField::zeros("c", 4);
        assert!(matches!(
            a.assign(&c),
            Err(MeshError::SizeMismatch { expected: 3, found: 4, .. })
        ));
    }

    #[test]
    fn vector_magnitude() {
        let v = VectorField::new("g", vec![[3.0, 4.0, 0.0], [0.0, 0.0, -2.0]]);
        let m = v.mag("magG");
        assert_eq!(m.values(), &[5.0, 2.0]);
        assert!(v.check_len(3).is_err());
    }
}
