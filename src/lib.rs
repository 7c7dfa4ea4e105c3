//! Rommesh generates the structured meshes used by reduced-order-model (ROM)
//! solvers of 2D periodic test problems. It builds a cell-centered grid and
//! its four-neighbor periodic connectivity, optionally relabels the cells with
//! a bandwidth-reducing reverse Cuthill-McKee ordering, and extracts a _sample
//! mesh_: the smallest set of cells needed to evaluate a stencil operator at a
//! chosen subset of residual points, reindexed densely. The result is written
//! as plain-text mesh files read by the solver executables.

pub mod batch;
pub mod connectivity;
pub mod error;
pub mod generator;
pub mod grid;
pub mod mesh_file;
pub mod reorder;
pub mod sample_mesh;
pub mod sampling;
pub mod sparsity;

pub use error::{Error, Result};
