use std::path::PathBuf;
use clap::{Parser, Subcommand};
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use rommesh::batch::BatchPlan;
use rommesh::generator::{self, MeshConfig, Ordering, Plotting};
use rommesh::sampling::{Sampling, SamplingKind, DEFAULT_SEED};
use rommesh::Result;




#[derive(Debug, Parser)]
#[clap(version, author, about = "Periodic full and sample mesh generator for ROM solvers")]
struct Opts {
    #[clap(long, default_value = "info", global = true)]
    log_level: LevelFilter,

    #[clap(subcommand)]
    command: Command,
}




#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one full or sample mesh
    Single(SingleOpts),
    /// Generate full and sample meshes for a range of grid sizes
    All(AllOpts),
}




#[derive(Debug, clap::Args)]
struct SingleOpts {
    #[clap(long)]
    nx: usize,

    /// Must equal nx when given
    #[clap(long)]
    ny: Option<usize>,

    /// full or random
    #[clap(long, default_value = "full")]
    sampling_type: SamplingKind,

    /// Number of residual points of a random sample mesh
    #[clap(long, conflicts_with = "pct")]
    target_size: Option<usize>,

    /// Percentage of the full mesh used as residual points of a random sample mesh
    #[clap(long)]
    pct: Option<f64>,

    /// natural or rcm
    #[clap(long, default_value = "natural")]
    ordering: Ordering,

    /// none, show or print
    #[clap(long, default_value = "none")]
    plotting: Plotting,

    #[clap(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,
}




#[derive(Debug, clap::Args)]
struct AllOpts {
    /// natural or rcm
    #[clap(long, default_value = "natural")]
    ordering: Ordering,

    /// Full-mesh sizes (cells per side)
    #[clap(long, use_value_delimiter = true)]
    sizes: Option<Vec<usize>>,

    /// Sample mesh percentages
    #[clap(long, use_value_delimiter = true)]
    pcts: Option<Vec<f64>>,

    #[clap(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[clap(short, long, default_value = ".")]
    root: PathBuf,

    #[clap(short = 't', long)]
    num_threads: Option<usize>,
}




// ============================================================================
fn run_single(opts: SingleOpts) -> Result<()> {
    let config = MeshConfig {
        nx: opts.nx,
        ny: opts.ny,
        sampling: Sampling::from_parts(opts.sampling_type, opts.target_size, opts.pct)?,
        ordering: opts.ordering,
        seed: opts.seed,
    };
    config.validate()?;

    if opts.plotting != Plotting::None {
        warn!("plotting is not supported, no figures will be produced");
    }

    let artifact = generator::generate(&config)?;
    artifact.write_to_dir(&opts.output_dir)
}




// ============================================================================
fn run_all(opts: AllOpts) -> Result<()> {
    let mut plan = BatchPlan::new(&opts.root, opts.ordering);
    plan.seed = opts.seed;

    if let Some(sizes) = opts.sizes {
        plan.sizes = sizes;
    }
    if let Some(pcts) = opts.pcts {
        plan.percentages = pcts;
    }

    let summaries = match opts.num_threads {
        Some(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            pool.install(|| plan.run())?
        }
        None => plan.run()?,
    };

    for s in &summaries {
        info!(
            "{}x{} {:<6} residual={:<8} state={:<8} bandwidth={}",
            s.nx, s.ny, s.sampling, s.num_residual_pts, s.num_state_pts, s.bandwidth);
    }
    Ok(())
}




// ============================================================================
fn main() {
    let opts = Opts::parse();

    SimpleLogger::new().with_level(opts.log_level).init().unwrap();

    let result = match opts.command {
        Command::Single(single) => run_single(single),
        Command::All(all) => run_all(all),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
