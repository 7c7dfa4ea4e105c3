use log::debug;
use crate::connectivity::{FullGraph, Stencil};
use crate::error::{Error, Result};
use crate::sparsity::SparsityPattern;




/**
 * A residual point of a sample mesh, with its own id and its stencil both in
 * sample-mesh indexing.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResidualPoint {
    pub id: usize,
    pub stencil: Stencil,
}




/**
 * The cells needed to evaluate a stencil operator on a subset of the full
 * mesh, reindexed densely.
 *
 * The cells of the sample mesh are the target (residual) cells together with
 * their one-hop neighbors. They receive sample ids `0..M` in ascending order
 * of their full-mesh id, so `sm_to_fm` is sorted and `fm_to_sm` is its
 * inverse on the sample cells. Only residual points carry a stencil; the
 * remaining cells hold state needed by those stencils.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct SampleMesh {
    sm_to_fm: Vec<usize>,
    fm_to_sm: Vec<Option<usize>>,
    residual_points: Vec<ResidualPoint>,
}




// ============================================================================
impl SampleMesh {


    /**
     * Build the sample mesh of the given target cells. Target ids must lie
     * in the graph; repeated targets count once.
     */
    pub fn build(graph: &FullGraph, targets: &[usize]) -> Result<Self> {
        let len = graph.len();

        if let Some(&id) = targets.iter().find(|&&id| id >= len) {
            return Err(Error::TargetOutOfRange { id, len })
        }

        let mut targets = targets.to_vec();
        targets.sort_unstable();
        targets.dedup();

        let mut sm_to_fm: Vec<_> = targets
            .iter()
            .flat_map(|&id| std::iter::once(id).chain(graph.stencil(id).as_array()))
            .collect();
        sm_to_fm.sort_unstable();
        sm_to_fm.dedup();

        let mut fm_to_sm = vec![None; len];

        for (sm, &fm) in sm_to_fm.iter().enumerate() {
            fm_to_sm[fm] = Some(sm);
        }

        // every neighbor of a target was enumerated above
        let local = |fm: usize| fm_to_sm[fm].expect("stencil cell missing from sample mesh");

        let residual_points = targets
            .iter()
            .map(|&fm| ResidualPoint {
                id: local(fm),
                stencil: graph.stencil(fm).map(local),
            })
            .collect();

        debug!("sample mesh has {} residual and {} state points", targets.len(), sm_to_fm.len());

        Ok(Self { sm_to_fm, fm_to_sm, residual_points })
    }


    /**
     * Return the number of cells where the residual is evaluated.
     */
    pub fn num_residual_pts(&self) -> usize {
        self.residual_points.len()
    }


    /**
     * Return the total number of cells in the sample mesh.
     */
    pub fn num_state_pts(&self) -> usize {
        self.sm_to_fm.len()
    }


    /**
     * Return the number of cells in the full mesh this sample was taken from.
     */
    pub fn full_mesh_len(&self) -> usize {
        self.fm_to_sm.len()
    }


    /**
     * Return the sample id of a full-mesh cell, if the cell belongs to the
     * sample mesh.
     */
    pub fn fm_to_sm(&self, fm: usize) -> Option<usize> {
        self.fm_to_sm.get(fm).copied().flatten()
    }


    /**
     * Return the full-mesh id of a sample cell.
     */
    pub fn sm_to_fm(&self, sm: usize) -> usize {
        self.sm_to_fm[sm]
    }


    /**
     * Return the full-mesh ids of all sample cells, indexed by sample id.
     */
    pub fn full_mesh_ids(&self) -> &[usize] {
        &self.sm_to_fm
    }


    /**
     * Return the residual points in ascending sample id.
     */
    pub fn residual_points(&self) -> &[ResidualPoint] {
        &self.residual_points
    }


    /**
     * Return `(sample id, full-mesh id)` pairs in ascending sample id.
     */
    pub fn gid_mapping(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sm_to_fm.iter().copied().enumerate()
    }


    /**
     * Return the `M x M` pattern of the sample graph. Only residual rows are
     * populated, so the pattern is asymmetric whenever the sample mesh has
     * cells that are not residual points.
     */
    pub fn sparsity_pattern(&self) -> SparsityPattern {
        SparsityPattern::from_stencils(
            self.num_state_pts(),
            self.residual_points.iter().map(|p| (p.id, &p.stencil)))
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::connectivity::{FullGraph, Stencil};
    use crate::grid::Grid;
    use crate::reorder::reverse_cuthill_mckee;
    use super::SampleMesh;

    fn graph(n: usize) -> FullGraph {
        FullGraph::periodic(&Grid::new(n, n).unwrap())
    }

    #[test]
    fn full_sample_mesh_is_the_full_mesh() {
        let g = graph(4);
        let targets: Vec<_> = (0..16).collect();
        let sm = SampleMesh::build(&g, &targets).unwrap();
        assert_eq!(sm.num_residual_pts(), 16);
        assert_eq!(sm.num_state_pts(), 16);
        assert_eq!(sm.residual_points()[0].stencil, Stencil { west: 3, north: 4, east: 1, south: 12 });
        assert!(sm.sparsity_pattern().is_symmetric());
    }

    #[test]
    fn single_target_pulls_in_its_stencil() {
        let g = graph(5);
        let sm = SampleMesh::build(&g, &[12]).unwrap();
        assert_eq!(sm.full_mesh_ids(), &[7, 11, 12, 13, 17]);
        assert_eq!(sm.num_residual_pts(), 1);
        assert_eq!(sm.num_state_pts(), 5);

        let point = sm.residual_points()[0];
        assert_eq!(point.id, 2);
        assert_eq!(point.stencil, Stencil { west: 1, north: 4, east: 3, south: 0 });
    }

    #[test]
    fn mappings_are_mutual_inverses() {
        let g = graph(6);
        let sm = SampleMesh::build(&g, &[0, 8, 20, 35]).unwrap();

        for s in 0..sm.num_state_pts() {
            assert_eq!(sm.fm_to_sm(sm.sm_to_fm(s)), Some(s));
        }
        for f in 0..sm.full_mesh_len() {
            if let Some(s) = sm.fm_to_sm(f) {
                assert_eq!(sm.sm_to_fm(s), f);
            }
        }
        assert!(sm.full_mesh_ids().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sm.fm_to_sm(1000), None);
    }

    #[test]
    fn residual_points_are_sorted_and_stencils_translate_back() {
        let g = graph(7);
        let targets = [40, 3, 17, 22];
        let sm = SampleMesh::build(&g, &targets).unwrap();

        assert!(sm.residual_points().windows(2).all(|w| w[0].id < w[1].id));

        for point in sm.residual_points() {
            let fm = sm.sm_to_fm(point.id);
            assert_eq!(point.stencil.map(|s| sm.sm_to_fm(s)), *g.stencil(fm));
        }
    }

    #[test]
    fn repeated_targets_count_once() {
        let g = graph(4);
        let sm = SampleMesh::build(&g, &[5, 5, 5]).unwrap();
        assert_eq!(sm.num_residual_pts(), 1);
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        assert!(SampleMesh::build(&graph(3), &[9]).is_err());
    }

    #[test]
    fn sample_pattern_cannot_be_reordered() {
        let sm = SampleMesh::build(&graph(8), &[10, 30]).unwrap();
        let pattern = sm.sparsity_pattern();
        assert!(!pattern.is_symmetric());
        assert!(reverse_cuthill_mckee(&pattern).is_err());
    }
}
