use crate::connectivity::{FullGraph, Stencil};
use crate::reorder::Permutation;




/**
 * The nonzero pattern of a square sparse matrix in compressed-row form. Each
 * row of a connectivity pattern holds its diagonal entry plus one entry per
 * neighbor; column indices within a row are sorted and unique. Rows may be
 * empty.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparsityPattern {
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
}




// ============================================================================
impl SparsityPattern {


    /**
     * Build an `n x n` pattern from `(row, column)` entries. Duplicate
     * entries are merged. Panics if an entry is out of range.
     */
    pub fn from_entries<I>(n: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut rows = vec![Vec::new(); n];

        for (r, c) in entries {
            assert!(r < n && c < n, "entry ({}, {}) outside a {} x {} pattern", r, c, n, n);
            rows[r].push(c);
        }

        let mut row_offsets = Vec::with_capacity(n + 1);
        let mut columns = Vec::new();
        row_offsets.push(0);

        for mut row in rows {
            row.sort_unstable();
            row.dedup();
            columns.extend(row);
            row_offsets.push(columns.len());
        }
        Self { row_offsets, columns }
    }


    /**
     * Build an `n x n` pattern from a set of stencil rows. Every listed row
     * gets its diagonal entry plus its four neighbors; unlisted rows stay
     * empty.
     */
    pub fn from_stencils<'a, I>(n: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a Stencil)>,
    {
        Self::from_entries(n, rows.into_iter().flat_map(|(r, stencil)| {
            std::iter::once((r, r)).chain(stencil.as_array().into_iter().map(move |c| (r, c)))
        }))
    }


    /**
     * Build the pattern of a full-mesh graph.
     */
    pub fn from_graph(graph: &FullGraph) -> Self {
        Self::from_stencils(graph.len(), graph.iter())
    }


    /**
     * Return the number of rows (and columns).
     */
    pub fn len(&self) -> usize {
        self.row_offsets.len() - 1
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the number of stored entries.
     */
    pub fn nnz(&self) -> usize {
        self.columns.len()
    }


    /**
     * Return the sorted column indexes of the given row.
     */
    pub fn row(&self, r: usize) -> &[usize] {
        &self.columns[self.row_offsets[r]..self.row_offsets[r + 1]]
    }


    /**
     * Return the number of off-diagonal entries in a row.
     */
    pub fn degree(&self, r: usize) -> usize {
        self.row(r).iter().filter(|&&c| c != r).count()
    }


    /**
     * Determine whether the given entry is stored.
     */
    pub fn contains(&self, r: usize, c: usize) -> bool {
        self.row(r).binary_search(&c).is_ok()
    }


    /**
     * Return an iterator over all stored `(row, column)` entries.
     */
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).flat_map(move |r| self.row(r).iter().map(move |&c| (r, c)))
    }


    /**
     * Determine whether the pattern is structurally symmetric.
     */
    pub fn is_symmetric(&self) -> bool {
        self.entries().all(|(r, c)| self.contains(c, r))
    }


    /**
     * Return the largest distance of a stored entry from the diagonal.
     */
    pub fn bandwidth(&self) -> usize {
        self.entries().map(|(r, c)| r.abs_diff(c)).max().unwrap_or(0)
    }


    /**
     * Return the pattern with rows and columns both relabeled: entry `(r, c)`
     * moves to `(new_id(r), new_id(c))`.
     */
    pub fn permuted(&self, permutation: &Permutation) -> Self {
        assert_eq!(permutation.len(), self.len(), "permutation and pattern differ in length");
        Self::from_entries(
            self.len(),
            self.entries().map(|(r, c)| (permutation.new_id(r), permutation.new_id(c))))
    }
}
