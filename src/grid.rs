use core::ops::Range;
use crate::error::{Error, Result};
use crate::reorder::Permutation;




/// Type alias for a 2d physical extent
pub type Area = (Range<f64>, Range<f64>);




/**
 * Identifier for a Cartesian axis
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    I,
    J,
}




/**
 * A cell-centered, periodic structured grid of `nx * ny` cells covering a
 * rectangular area. Cells are enumerated in natural row order: the global id
 * of cell `(i, j)` is `j * nx + i`, so that `i` increases fastest and the
 * lower-left cell has id zero.
 *
 * ```text
 *  ...
 *  10 11 12 13 14
 *   5  6  7  8  9
 *   0  1  2  3  4
 * ```
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    area: Area,
    size: (usize, usize),
}




// ============================================================================
impl Grid {


    /**
     * Create a grid over the unit square. Both sizes must be positive.
     */
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        Self::with_area(nx, ny, (0.0..1.0, 0.0..1.0))
    }


    /**
     * Create a grid over an arbitrary rectangular area.
     */
    pub fn with_area(nx: usize, ny: usize, area: Area) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(Error::InvalidGridSize { nx, ny })
        }
        Ok(Self { area, size: (nx, ny) })
    }


    /**
     * Return the number of cells on each axis.
     */
    pub fn dim(&self) -> (usize, usize) {
        self.size
    }


    /**
     * Return the number of cells on the given axis.
     */
    pub fn cells_on(&self, axis: Axis) -> usize {
        match axis {
            Axis::I => self.size.0,
            Axis::J => self.size.1,
        }
    }


    /**
     * Return the total number of cells.
     */
    pub fn len(&self) -> usize {
        self.size.0 * self.size.1
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the cell spacing `(dx, dy)`.
     */
    pub fn cell_spacing(&self) -> (f64, f64) {
        let d0 = (self.area.0.end - self.area.0.start) / self.size.0 as f64;
        let d1 = (self.area.1.end - self.area.1.start) / self.size.1 as f64;
        (d0, d1)
    }


    /**
     * Return the `(i, j)` index of the cell with the given global id.
     */
    pub fn cell_index(&self, id: usize) -> (usize, usize) {
        (id % self.size.0, id / self.size.0)
    }


    /**
     * Return the global id of the cell at index `(i, j)`.
     */
    pub fn global_id(&self, index: (usize, usize)) -> usize {
        index.1 * self.size.0 + index.0
    }


    /**
     * Return the coordinates of the center of the cell with the given global
     * id.
     */
    pub fn cell_center(&self, id: usize) -> (f64, f64) {
        let (d0, d1) = self.cell_spacing();
        let (i, j) = self.cell_index(id);
        let x0 = self.area.0.start + d0 * (i as f64 + 0.5);
        let x1 = self.area.1.start + d1 * (j as f64 + 0.5);
        (x0, x1)
    }


    /**
     * Return an iterator over the cell indexes, in global id order.
     */
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).map(move |id| self.cell_index(id))
    }


    /**
     * Return the cell-center coordinates of every cell, indexed by global id.
     */
    pub fn coordinates(&self) -> Coordinates {
        let (x, y) = (0..self.len()).map(|id| self.cell_center(id)).unzip();
        Coordinates { x, y }
    }
}




/**
 * Cell-center coordinate arrays, indexed by cell id.
 */
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}




// ============================================================================
impl Coordinates {

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, id: usize) -> (f64, f64) {
        (self.x[id], self.y[id])
    }

    /**
     * Return the coordinates relabeled by a permutation: the entry at new
     * index `k` is the entry previously at `permutation.old_id(k)`.
     */
    pub fn permuted(&self, permutation: &Permutation) -> Self {
        assert_eq!(permutation.len(), self.len(), "permutation and coordinates differ in length");
        Self {
            x: permutation.order().iter().map(|&old| self.x[old]).collect(),
            y: permutation.order().iter().map(|&old| self.y[old]).collect(),
        }
    }
}
