//! Plain-text mesh description and GID mapping files, as read by the solver
//! executables.
//!
//! A mesh file starts with four header lines
//!
//! ```text
//! dx 0.25000000000000
//! dy 0.25000000000000
//! numResidualPts       16
//! numStatePts       16
//! ```
//!
//! followed by one line per residual point, in ascending sample id: the point
//! id and coordinates, then the id and coordinates of its west, north, east
//! and south neighbors. All ids are sample-mesh ids. The GID mapping file has
//! one `sampleId fullMeshId` pair per line.

use std::io::{BufRead, Write};
use crate::connectivity::Stencil;
use crate::error::{Error, Result};
use crate::grid::Coordinates;
use crate::sample_mesh::SampleMesh;




/**
 * A row of a mesh file: a residual point and its four neighbors, each with
 * its coordinates.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshRow {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub neighbors: [(usize, f64, f64); 4],
}




// ============================================================================
impl MeshRow {
    pub fn stencil(&self) -> Stencil {
        let [w, n, e, s] = self.neighbors;
        Stencil { west: w.0, north: n.0, east: e.0, south: s.0 }
    }
}




/**
 * The contents of a mesh file.
 */
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshFile {
    pub dx: f64,
    pub dy: f64,
    pub num_residual_pts: usize,
    pub num_state_pts: usize,
    pub rows: Vec<MeshRow>,
}




/**
 * Write the mesh description of a sample mesh. Coordinates are indexed by
 * full-mesh id (after any reordering).
 */
pub fn write_mesh<W: Write>(
    out: &mut W,
    spacing: (f64, f64),
    mesh: &SampleMesh,
    coordinates: &Coordinates) -> Result<()>
{
    writeln!(out, "dx {:.14}", spacing.0)?;
    writeln!(out, "dy {:.14}", spacing.1)?;
    writeln!(out, "numResidualPts {:8}", mesh.num_residual_pts())?;
    writeln!(out, "numStatePts {:8}", mesh.num_state_pts())?;

    for point in mesh.residual_points() {
        write_point(out, mesh, coordinates, point.id)?;

        for neighbor in point.stencil.as_array() {
            write_point(out, mesh, coordinates, neighbor)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_point<W: Write>(out: &mut W, mesh: &SampleMesh, coordinates: &Coordinates, sm: usize) -> Result<()> {
    let (x, y) = coordinates.get(mesh.sm_to_fm(sm));
    write!(out, "{:8} {:.14} {:.14} ", sm, x, y)?;
    Ok(())
}




/**
 * Write the sample-to-full GID mapping, one pair per line in ascending
 * sample id.
 */
pub fn write_gid_mapping<W: Write>(out: &mut W, mesh: &SampleMesh) -> Result<()> {
    for (sm, fm) in mesh.gid_mapping() {
        writeln!(out, "{:8} {:8}", sm, fm)?;
    }
    Ok(())
}




fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse { line, message: message.into() }
}

fn parse_token<T: std::str::FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| parse_error(line, format!("missing {}", what)))?;
    token.parse().map_err(|_| parse_error(line, format!("invalid {} '{}'", what, token)))
}




/**
 * Read a mesh file. Lines are tokenized on whitespace; a line starting with
 * one of the header keys sets that header value, blank lines are skipped,
 * and every other line is a residual point row. The row count must match
 * `numResidualPts` when that header is present.
 */
pub fn read_mesh<R: BufRead>(input: R) -> Result<MeshFile> {
    let mut file = MeshFile::default();
    let mut seen_residual_header = false;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        let mut tokens = line.split_whitespace();

        let first = match tokens.next() {
            Some(first) => first,
            None => continue,
        };

        match first {
            "dx" => file.dx = parse_token(tokens.next(), lineno, "dx")?,
            "dy" => file.dy = parse_token(tokens.next(), lineno, "dy")?,
            "numResidualPts" => {
                file.num_residual_pts = parse_token(tokens.next(), lineno, "numResidualPts")?;
                seen_residual_header = true;
            }
            "numStatePts" => file.num_state_pts = parse_token(tokens.next(), lineno, "numStatePts")?,
            _ => {
                let id = parse_token(Some(first), lineno, "cell id")?;
                let x = parse_token(tokens.next(), lineno, "x coordinate")?;
                let y = parse_token(tokens.next(), lineno, "y coordinate")?;
                let mut neighbors = [(0, 0.0, 0.0); 4];

                for neighbor in &mut neighbors {
                    *neighbor = (
                        parse_token(tokens.next(), lineno, "neighbor id")?,
                        parse_token(tokens.next(), lineno, "neighbor x coordinate")?,
                        parse_token(tokens.next(), lineno, "neighbor y coordinate")?,
                    );
                }
                if tokens.next().is_some() {
                    return Err(parse_error(lineno, "trailing tokens after the fourth neighbor"))
                }
                file.rows.push(MeshRow { id, x, y, neighbors });
            }
        }
    }

    if seen_residual_header && file.rows.len() != file.num_residual_pts {
        return Err(parse_error(0, format!(
            "expected {} residual points, found {}",
            file.num_residual_pts,
            file.rows.len())))
    }
    Ok(file)
}




/**
 * Read a GID mapping file into `(sample id, full-mesh id)` pairs.
 */
pub fn read_gid_mapping<R: BufRead>(input: R) -> Result<Vec<(usize, usize)>> {
    let mut pairs = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        let mut tokens = line.split_whitespace();

        if let Some(first) = tokens.next() {
            let sm = parse_token(Some(first), lineno, "sample id")?;
            let fm = parse_token(tokens.next(), lineno, "full-mesh id")?;
            pairs.push((sm, fm));
        }
    }
    Ok(pairs)
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::connectivity::FullGraph;
    use crate::grid::Grid;
    use crate::sample_mesh::SampleMesh;
    use super::*;

    fn full_mesh_bytes(n: usize) -> Vec<u8> {
        let grid = Grid::new(n, n).unwrap();
        let graph = FullGraph::periodic(&grid);
        let targets: Vec<_> = (0..grid.len()).collect();
        let mesh = SampleMesh::build(&graph, &targets).unwrap();
        let mut out = Vec::new();
        write_mesh(&mut out, grid.cell_spacing(), &mesh, &grid.coordinates()).unwrap();
        out
    }

    #[test]
    fn mesh_file_header_and_first_row_are_formatted() {
        let text = String::from_utf8(full_mesh_bytes(4)).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "dx 0.25000000000000");
        assert_eq!(lines[1], "dy 0.25000000000000");
        assert_eq!(lines[2], "numResidualPts       16");
        assert_eq!(lines[3], "numStatePts       16");
        assert_eq!(lines.len(), 20);
        assert_eq!(
            lines[4],
            concat!(
                "       0 0.12500000000000 0.12500000000000 ",
                "       3 0.87500000000000 0.12500000000000 ",
                "       4 0.12500000000000 0.37500000000000 ",
                "       1 0.37500000000000 0.12500000000000 ",
                "      12 0.12500000000000 0.87500000000000 "));
    }

    #[test]
    fn written_mesh_reads_back() {
        let bytes = full_mesh_bytes(5);
        let file = read_mesh(&bytes[..]).unwrap();
        assert_eq!(file.dx, 0.2);
        assert_eq!(file.num_residual_pts, 25);
        assert_eq!(file.num_state_pts, 25);
        assert_eq!(file.rows[12].stencil().as_array(), [11, 17, 13, 7]);
        assert!((file.rows[12].x - 0.5).abs() < 1e-14);
    }

    #[test]
    fn gid_mapping_lists_sample_then_full_id() {
        let graph = FullGraph::periodic(&Grid::new(5, 5).unwrap());
        let mesh = SampleMesh::build(&graph, &[12]).unwrap();
        let mut out = Vec::new();
        write_gid_mapping(&mut out, &mesh).unwrap();

        assert_eq!(String::from_utf8(out.clone()).unwrap().lines().next(), Some("       0        7"));
        assert_eq!(read_gid_mapping(&out[..]).unwrap(), vec![(0, 7), (1, 11), (2, 12), (3, 13), (4, 17)]);
    }

    #[test]
    fn short_rows_are_reported_with_their_line() {
        let text = "dx 0.5\ndy 0.5\n0 0.25 0.25 1 0.75\n";
        match read_mesh(text.as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn residual_count_must_match_header() {
        let text = "numResidualPts 2\n0 0 0 1 0 0 2 0 0 3 0 0 4 0 0\n";
        assert!(read_mesh(text.as_bytes()).is_err());
    }
}
