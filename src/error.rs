use thiserror::Error;




/**
 * Errors raised while configuring, building, or writing a mesh.
 */
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid size must be positive, got nx={nx} ny={ny}")]
    InvalidGridSize { nx: usize, ny: usize },

    #[error("only square grids are supported, got nx={nx} ny={ny}")]
    NonSquareGrid { nx: usize, ny: usize },

    #[error("unknown sampling type '{0}' (use full or random)")]
    UnknownSampling(String),

    #[error("unknown ordering '{0}' (use natural or rcm)")]
    UnknownOrdering(String),

    #[error("unknown plotting mode '{0}' (use none, show or print)")]
    UnknownPlotting(String),

    #[error("random sampling needs --target-size or --pct")]
    MissingTargetSize,

    #[error("target size must be non-negative, got {0}")]
    NegativeTargetSize(f64),

    #[error("requested {requested} sample cells but the grid has only {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("target cell {id} is outside a grid of {len} cells")]
    TargetOutOfRange { id: usize, len: usize },

    #[error("ordering of length {0} is not a permutation")]
    InvalidPermutation(usize),

    #[error("bandwidth reduction requires a symmetric graph")]
    AsymmetricGraph,

    #[error("malformed mesh file at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("summary encoding failed: {0}")]
    Encoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
