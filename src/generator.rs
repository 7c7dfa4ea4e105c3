use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use crate::connectivity::FullGraph;
use crate::error::{Error, Result};
use crate::grid::{Coordinates, Grid};
use crate::mesh_file;
use crate::reorder::{self, Permutation};
use crate::sample_mesh::SampleMesh;
use crate::sampling::{Sampling, SamplingKind, DEFAULT_SEED};
use crate::sparsity::SparsityPattern;




pub const MESH_FILE_NAME: &str = "mesh.dat";
pub const GID_MAPPING_FILE_NAME: &str = "sm_to_fm_gid_mapping.dat";
pub const SUMMARY_FILE_NAME: &str = "mesh_summary.cbor";




/**
 * Labeling of the full-mesh cells.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    /// Row-major order, as generated.
    Natural,
    /// Reverse Cuthill-McKee, to reduce the bandwidth of the full graph.
    Rcm,
}

impl FromStr for Ordering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "natural" => Ok(Ordering::Natural),
            "rcm" => Ok(Ordering::Rcm),
            _ => Err(Error::UnknownOrdering(s.to_string())),
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordering::Natural => f.pad("natural"),
            Ordering::Rcm => f.pad("rcm"),
        }
    }
}




/**
 * What to do with mesh plots. Plots are not produced by this crate; the
 * setting is accepted so that existing run scripts keep working.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plotting {
    None,
    Show,
    Print,
}

impl FromStr for Plotting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Plotting::None),
            "show" => Ok(Plotting::Show),
            "print" => Ok(Plotting::Print),
            _ => Err(Error::UnknownPlotting(s.to_string())),
        }
    }
}




/**
 * Parameters of a single mesh generation run.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct MeshConfig {
    pub nx: usize,
    /// Defaults to `nx` when absent.
    pub ny: Option<usize>,
    pub sampling: Sampling,
    pub ordering: Ordering,
    pub seed: u64,
}




// ============================================================================
impl MeshConfig {


    /**
     * A full, naturally ordered mesh of `n x n` cells.
     */
    pub fn full(n: usize) -> Self {
        Self {
            nx: n,
            ny: None,
            sampling: Sampling::Full,
            ordering: Ordering::Natural,
            seed: DEFAULT_SEED,
        }
    }


    pub fn with_sampling(self, sampling: Sampling) -> Self {
        Self { sampling, ..self }
    }


    pub fn with_ordering(self, ordering: Ordering) -> Self {
        Self { ordering, ..self }
    }


    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }


    /**
     * Return the grid size, with `ny` defaulted to `nx`.
     */
    pub fn dim(&self) -> (usize, usize) {
        (self.nx, self.ny.unwrap_or(self.nx))
    }


    /**
     * Check the configuration before any work is done: the grid must be
     * square and non-empty, and a random sample size must fit in it.
     */
    pub fn validate(&self) -> Result<()> {
        let (nx, ny) = self.dim();

        if nx == 0 || ny == 0 {
            return Err(Error::InvalidGridSize { nx, ny })
        }
        if nx != ny {
            return Err(Error::NonSquareGrid { nx, ny })
        }
        if let Sampling::Random(target) = self.sampling {
            target.resolve(nx * ny)?;
        }
        if nx < 3 {
            warn!("grids smaller than 3x3 have repeated stencil neighbors");
        }
        Ok(())
    }
}




/**
 * Key figures of a generated mesh.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub nx: usize,
    pub ny: usize,
    pub ordering: Ordering,
    pub sampling: SamplingKind,
    pub seed: u64,
    pub num_residual_pts: usize,
    pub num_state_pts: usize,
    pub bandwidth: usize,
}




/**
 * Everything produced by one generation run.
 */
#[derive(Clone, Debug)]
pub struct MeshArtifact {
    pub config: MeshConfig,
    pub grid: Grid,
    pub graph: FullGraph,
    pub coordinates: Coordinates,
    pub permutation: Option<Permutation>,
    pub sample_mesh: SampleMesh,
    pub bandwidth: usize,
}




/**
 * Generate a mesh: build the periodic grid and its graph, reorder it if
 * requested, select the residual points, and extract the sample mesh.
 */
pub fn generate(config: &MeshConfig) -> Result<MeshArtifact> {
    config.validate()?;

    let (nx, ny) = config.dim();
    let grid = Grid::new(nx, ny)?;
    let mut graph = FullGraph::periodic(&grid);
    let mut coordinates = grid.coordinates();
    let mut pattern = SparsityPattern::from_graph(&graph);

    info!("ordering type = {}", config.ordering);
    info!("natural order bandwidth = {}", pattern.bandwidth());

    let permutation = match config.ordering {
        Ordering::Natural => None,
        Ordering::Rcm => {
            let permutation = reorder::reverse_cuthill_mckee(&pattern)?;
            graph = graph.relabel(&permutation);
            coordinates = coordinates.permuted(&permutation);
            pattern = pattern.permuted(&permutation);
            info!("reordered bandwidth = {}", pattern.bandwidth());
            Some(permutation)
        }
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let targets = config.sampling.select(grid.len(), &mut rng)?;
    let sample_mesh = SampleMesh::build(&graph, &targets)?;

    let num_cells = grid.len() as f64;
    info!(
        "numResidualPts = {} which is {:.2}% of full mesh",
        sample_mesh.num_residual_pts(),
        sample_mesh.num_residual_pts() as f64 / num_cells * 100.0);
    info!(
        "numStatePts = {} which is {:.2}% of full mesh",
        sample_mesh.num_state_pts(),
        sample_mesh.num_state_pts() as f64 / num_cells * 100.0);

    Ok(MeshArtifact {
        config: config.clone(),
        grid,
        graph,
        coordinates,
        permutation,
        sample_mesh,
        bandwidth: pattern.bandwidth(),
    })
}




// ============================================================================
impl MeshArtifact {


    pub fn summary(&self) -> MeshSummary {
        let (nx, ny) = self.grid.dim();
        MeshSummary {
            nx,
            ny,
            ordering: self.config.ordering,
            sampling: self.config.sampling.kind(),
            seed: self.config.seed,
            num_residual_pts: self.sample_mesh.num_residual_pts(),
            num_state_pts: self.sample_mesh.num_state_pts(),
            bandwidth: self.bandwidth,
        }
    }


    /**
     * Write the mesh description into the given writer.
     */
    pub fn write_mesh<W: Write>(&self, out: &mut W) -> Result<()> {
        mesh_file::write_mesh(out, self.grid.cell_spacing(), &self.sample_mesh, &self.coordinates)
    }


    /**
     * Write all output files into a directory, creating it if needed: the
     * mesh file, the GID mapping for random samples, and the summary.
     * Existing files are overwritten.
     */
    pub fn write_to_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;

        let mut out = BufWriter::new(File::create(dir.join(MESH_FILE_NAME))?);
        self.write_mesh(&mut out)?;
        out.flush()?;

        if self.config.sampling.kind() == SamplingKind::Random {
            let mut out = BufWriter::new(File::create(dir.join(GID_MAPPING_FILE_NAME))?);
            mesh_file::write_gid_mapping(&mut out, &self.sample_mesh)?;
            out.flush()?;
        }

        let mut out = BufWriter::new(File::create(dir.join(SUMMARY_FILE_NAME))?);
        ciborium::ser::into_writer(&self.summary(), &mut out).map_err(|e| Error::Encoding(e.to_string()))?;
        out.flush()?;

        info!("wrote mesh files to {}", dir.display());
        Ok(())
    }
}




/**
 * Read a summary written by `MeshArtifact::write_to_dir`.
 */
pub fn read_summary(path: &Path) -> Result<MeshSummary> {
    let file = File::open(path)?;
    ciborium::de::from_reader(std::io::BufReader::new(file)).map_err(|e| Error::Encoding(e.to_string()))
}
