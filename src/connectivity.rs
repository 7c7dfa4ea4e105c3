use crate::grid::Grid;
use crate::reorder::Permutation;




/**
 * One of the four stencil directions of a cell.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    North,
    East,
    South,
}




// ============================================================================
impl Direction {

    /// All directions, in the order the stencil is written to mesh files.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
        }
    }
}




/**
 * The four neighbors of a cell. Ids are plain integers, and may refer to
 * either the full-mesh or the sample-mesh indexing depending on context.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stencil {
    pub west: usize,
    pub north: usize,
    pub east: usize,
    pub south: usize,
}




// ============================================================================
impl Stencil {

    pub fn get(&self, direction: Direction) -> usize {
        match direction {
            Direction::West => self.west,
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
        }
    }

    /// Neighbor ids ordered west, north, east, south.
    pub fn as_array(&self) -> [usize; 4] {
        [self.west, self.north, self.east, self.south]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Return a stencil with every neighbor id passed through `f`.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize) -> usize,
    {
        Self {
            west: f(self.west),
            north: f(self.north),
            east: f(self.east),
            south: f(self.south),
        }
    }
}




/**
 * The connectivity of every cell of a periodic grid: an arena of stencils,
 * indexed by full-mesh global id.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct FullGraph {
    stencils: Vec<Stencil>,
}




// ============================================================================
impl FullGraph {


    /**
     * Build the four-neighbor graph of the given grid, with periodic
     * wraparound on both axes.
     */
    pub fn periodic(grid: &Grid) -> Self {
        let (nx, ny) = grid.dim();

        let stencils = (0..grid.len()).map(|id| {
            let (i, j) = grid.cell_index(id);
            Stencil {
                west:  if i > 0      { id - 1 } else { id + nx - 1 },
                north: if j < ny - 1 { id + nx } else { id - nx * (ny - 1) },
                east:  if i < nx - 1 { id + 1 } else { id + 1 - nx },
                south: if j > 0      { id - nx } else { id + nx * (ny - 1) },
            }
        }).collect();

        Self { stencils }
    }


    /**
     * Return the number of cells in the graph.
     */
    pub fn len(&self) -> usize {
        self.stencils.len()
    }


    pub fn is_empty(&self) -> bool {
        self.stencils.is_empty()
    }


    /**
     * Return the stencil of the given cell.
     */
    pub fn stencil(&self, id: usize) -> &Stencil {
        &self.stencils[id]
    }


    pub fn stencils(&self) -> &[Stencil] {
        &self.stencils
    }


    /**
     * Return an iterator over `(id, stencil)` pairs in ascending id order.
     */
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Stencil)> {
        self.stencils.iter().enumerate()
    }


    /**
     * Determine whether every edge has a matching edge in the opposite
     * direction: if `b` is the `d`-neighbor of `a`, then `a` is the
     * `opposite(d)`-neighbor of `b`.
     */
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(a, stencil)| {
            stencil.iter().all(|(d, b)| {
                b < self.len() && self.stencil(b).get(d.opposite()) == a
            })
        })
    }


    /**
     * Determine whether every cell has four distinct neighbors, none of which
     * is the cell itself.
     */
    pub fn is_regular(&self) -> bool {
        self.iter().all(|(a, stencil)| {
            let mut n = stencil.as_array();
            n.sort_unstable();
            n.windows(2).all(|w| w[0] != w[1]) && !n.contains(&a)
        })
    }


    /**
     * Return the undirected edges of the graph as sorted `(min, max)` pairs,
     * one per directed edge, so that each undirected edge of a symmetric
     * graph appears twice. The list is sorted.
     */
    pub fn undirected_edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self
            .iter()
            .flat_map(|(a, stencil)| stencil.as_array().into_iter().map(move |b| (a.min(b), a.max(b))))
            .collect();
        edges.sort_unstable();
        edges
    }


    /**
     * Relabel every cell by a permutation: cell `g` becomes cell
     * `permutation.new_id(g)`, and all neighbor references are rewritten
     * accordingly.
     */
    pub fn relabel(&self, permutation: &Permutation) -> Self {
        assert_eq!(permutation.len(), self.len(), "permutation and graph differ in length");

        let stencils = permutation
            .order()
            .iter()
            .map(|&old| self.stencils[old].map(|n| permutation.new_id(n)))
            .collect();

        Self { stencils }
    }
}
