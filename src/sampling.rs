use std::fmt;
use std::str::FromStr;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};




/// Seed used for random sample meshes unless another one is given.
pub const DEFAULT_SEED: u64 = 1474543;




/**
 * How the residual points of a mesh are chosen.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingKind {
    /// Every cell of the grid is a residual point.
    Full,
    /// A fixed-size random subset of the cells are residual points.
    Random,
}

impl FromStr for SamplingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(SamplingKind::Full),
            "random" => Ok(SamplingKind::Random),
            _ => Err(Error::UnknownSampling(s.to_string())),
        }
    }
}

impl fmt::Display for SamplingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingKind::Full => f.pad("full"),
            SamplingKind::Random => f.pad("random"),
        }
    }
}




/**
 * The requested size of a random sample, either as a number of cells or as a
 * percentage of the full mesh.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetSize {
    Count(usize),
    Percent(f64),
}




// ============================================================================
impl TargetSize {

    /**
     * Convert to a number of cells out of `num_cells`. Percentages are
     * rounded down.
     */
    pub fn resolve(&self, num_cells: usize) -> Result<usize> {
        let count = match *self {
            TargetSize::Count(count) => count,
            TargetSize::Percent(pct) => {
                if !pct.is_finite() || pct < 0.0 {
                    return Err(Error::NegativeTargetSize(pct))
                }
                (pct * 1e-2 * num_cells as f64).floor() as usize
            }
        };
        if count > num_cells {
            return Err(Error::SampleTooLarge { requested: count, available: num_cells })
        }
        Ok(count)
    }
}




/**
 * A complete sampling request.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sampling {
    Full,
    Random(TargetSize),
}




// ============================================================================
impl Sampling {


    /**
     * Assemble a sampling request from its command line parts. Random
     * sampling needs exactly one of a count or a percentage.
     */
    pub fn from_parts(kind: SamplingKind, count: Option<usize>, pct: Option<f64>) -> Result<Self> {
        match (kind, count, pct) {
            (SamplingKind::Full, _, _) => Ok(Sampling::Full),
            (SamplingKind::Random, Some(count), None) => Ok(Sampling::Random(TargetSize::Count(count))),
            (SamplingKind::Random, None, Some(pct)) => {
                if !pct.is_finite() || pct < 0.0 {
                    return Err(Error::NegativeTargetSize(pct))
                }
                Ok(Sampling::Random(TargetSize::Percent(pct)))
            }
            (SamplingKind::Random, _, _) => Err(Error::MissingTargetSize),
        }
    }


    pub fn kind(&self) -> SamplingKind {
        match self {
            Sampling::Full => SamplingKind::Full,
            Sampling::Random(_) => SamplingKind::Random,
        }
    }


    /**
     * Choose the residual points among `num_cells` cells. Full sampling
     * yields every id in ascending order and leaves the generator untouched;
     * random sampling draws without replacement, in draw order.
     */
    pub fn select<R: Rng + ?Sized>(&self, num_cells: usize, rng: &mut R) -> Result<Vec<usize>> {
        match self {
            Sampling::Full => Ok((0..num_cells).collect()),
            Sampling::Random(target) => {
                let count = target.resolve(num_cells)?;
                info!("drawing {} of {} cells at random", count, num_cells);
                Ok(rand::seq::index::sample(rng, num_cells, count).into_vec())
            }
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use super::{Sampling, SamplingKind, TargetSize, DEFAULT_SEED};

    #[test]
    fn sampling_kind_parses_known_names_only() {
        assert_eq!("full".parse::<SamplingKind>().unwrap(), SamplingKind::Full);
        assert_eq!("random".parse::<SamplingKind>().unwrap(), SamplingKind::Random);
        assert!("Random".parse::<SamplingKind>().is_err());
    }

    #[test]
    fn percentages_round_down() {
        assert_eq!(TargetSize::Percent(10.0).resolve(16).unwrap(), 1);
        assert_eq!(TargetSize::Percent(50.0).resolve(16).unwrap(), 8);
        assert_eq!(TargetSize::Percent(5.0).resolve(16384).unwrap(), 819);
        assert!(TargetSize::Percent(-1.0).resolve(16).is_err());
        assert!(TargetSize::Percent(150.0).resolve(16).is_err());
        assert!(TargetSize::Count(17).resolve(16).is_err());
    }

    #[test]
    fn random_sampling_requires_a_size() {
        assert!(Sampling::from_parts(SamplingKind::Random, None, None).is_err());
        assert!(Sampling::from_parts(SamplingKind::Random, Some(3), Some(5.0)).is_err());
        assert!(Sampling::from_parts(SamplingKind::Random, None, Some(-5.0)).is_err());
        assert_eq!(Sampling::from_parts(SamplingKind::Full, None, None).unwrap(), Sampling::Full);
    }

    #[test]
    fn full_sampling_selects_every_cell() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        assert_eq!(Sampling::Full.select(9, &mut rng).unwrap(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn random_sampling_draws_distinct_cells() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let mut ids = Sampling::Random(TargetSize::Count(40)).select(100, &mut rng).unwrap();
        assert_eq!(ids.len(), 40);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 40);
        assert!(ids.iter().all(|&id| id < 100));
    }

    #[test]
    fn random_sampling_is_reproducible_for_a_fixed_seed() {
        let sampling = Sampling::Random(TargetSize::Percent(25.0));
        let a = sampling.select(64, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = sampling.select(64, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }
}
