//! Finite-volume services consumed by the phase-change core.
//!
//! The core treats the mesh, field storage, global reductions and the linear
//! solve as collaborators behind narrow interfaces. This crate provides those
//! interfaces and one concrete implementation of each:
//! - [`FvMesh`] with [`PolyMesh`] (arbitrary polyhedral connectivity)
//! - [`ScalarField`] / [`VectorField`] cell storage
//! - [`Reduction`] with [`SerialReduction`]
//! - explicit operators in [`fvc`] and implicit assembly in [`fvm`]
//! - [`LinearSolver`] with a Jacobi-preconditioned conjugate gradient

pub mod error;
pub mod field;
pub mod fvc;
pub mod fvm;
pub mod linalg;
pub mod mesh;
pub mod reduce;

pub use error::{MeshError, MeshResult};
pub use field::{ScalarField, VectorField};
pub use linalg::{
    CsrBuilder, CsrMatrix, LinearSolver, PcgConfig, PcgSolver, PreconditionerType, SolveStats,
};
pub use fvm::FvSystem;
pub use mesh::{FvMesh, PolyMesh, PolyMeshParts, Vec3};
pub use reduce::{Reduction, SerialReduction};
