use std::path::{Path, PathBuf};
use log::info;
use rayon::prelude::*;
use crate::error::Result;
use crate::generator::{self, MeshConfig, MeshSummary, Ordering};
use crate::sampling::{Sampling, TargetSize, DEFAULT_SEED};




/**
 * A set of meshes to generate together: for every full-mesh size, one full
 * mesh plus one random sample mesh per requested percentage. All meshes share
 * an ordering and a seed.
 *
 * Output goes to `<root>/meshes_<ordering>/<n>x<n>/full` and
 * `<root>/meshes_<ordering>/<n>x<n>/sample_pct<p>`.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct BatchPlan {
    pub sizes: Vec<usize>,
    pub percentages: Vec<f64>,
    pub ordering: Ordering,
    pub seed: u64,
    pub root: PathBuf,
}




/**
 * One mesh of a batch, with the directory it is written to.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct BatchCase {
    pub config: MeshConfig,
    pub dir: PathBuf,
}




// ============================================================================
impl BatchCase {

    pub fn run(&self) -> Result<MeshSummary> {
        let artifact = generator::generate(&self.config)?;
        artifact.write_to_dir(&self.dir)?;
        Ok(artifact.summary())
    }
}




// ============================================================================
impl BatchPlan {


    /**
     * The default plan: sizes 128 through 1024 in powers of two, sampled at
     * 1, 5, 10, 25 and 50 percent.
     */
    pub fn new(root: &Path, ordering: Ordering) -> Self {
        Self {
            sizes: (7..=10).map(|p| 1 << p).collect(),
            percentages: vec![1.0, 5.0, 10.0, 25.0, 50.0],
            ordering,
            seed: DEFAULT_SEED,
            root: root.to_path_buf(),
        }
    }


    /**
     * Return the directory holding all meshes of the given size.
     */
    pub fn size_dir(&self, n: usize) -> PathBuf {
        self.root
            .join(format!("meshes_{}", self.ordering))
            .join(format!("{}x{}", n, n))
    }


    /**
     * Expand the plan into its individual cases, size by size, full mesh
     * first.
     */
    pub fn cases(&self) -> Vec<BatchCase> {
        let mut cases = Vec::new();

        for &n in &self.sizes {
            let base = MeshConfig::full(n)
                .with_ordering(self.ordering)
                .with_seed(self.seed);

            cases.push(BatchCase {
                config: base.clone(),
                dir: self.size_dir(n).join("full"),
            });

            for &pct in &self.percentages {
                cases.push(BatchCase {
                    config: base.clone().with_sampling(Sampling::Random(TargetSize::Percent(pct))),
                    dir: self.size_dir(n).join(format!("sample_pct{}", pct)),
                });
            }
        }
        cases
    }


    /**
     * Generate every case of the plan. Cases are independent and run in the
     * current rayon thread pool. Every case is validated before any is run.
     */
    pub fn run(&self) -> Result<Vec<MeshSummary>> {
        let cases = self.cases();

        for case in &cases {
            case.config.validate()?;
        }
        info!("generating {} meshes under {}", cases.len(), self.root.display());

        cases.par_iter().map(|case| case.run()).collect()
    }
}
