//! Chain generator: a four-connected path with a tracked head cell
//!
//! An endpoint is a foreground cell with exactly one same-valued neighbour,
//! or the only foreground cell of the raster. Extension grows every endpoint
//! by one cell in each free direction, enlarging the canvas at the border.
//! Trimming removes one endpoint at a time and crops any border rows or
//! columns left empty.

use crate::io::configuration::{BACKGROUND, FOREGROUND};
use crate::raster::grid::Raster;

/// Initial chain: two adjacent cells in one row, head on the left
pub fn initial_chain() -> (Raster, [usize; 2]) {
    (Raster::filled(1, 2, FOREGROUND), [0, 0])
}

/// Current endpoints in row-major order
pub fn endpoints(raster: &Raster) -> Vec<[usize; 2]> {
    let lone = raster.foreground_count() == 1;
    raster
        .cells()
        .indexed_iter()
        .filter(|&((row, col), _)| {
            raster.is_foreground(row, col) && (lone || raster.count_neighbors(row, col) == 1)
        })
        .map(|((row, col), _)| [row, col])
        .collect()
}

/// Every one-cell extension of every endpoint
///
/// Each child's head is the newly drawn cell. Directions that land on a cell
/// already in the path are skipped.
pub fn extend_endpoints(raster: &Raster) -> Vec<(Raster, [usize; 2])> {
    let mut children = Vec::new();
    for [row, col] in endpoints(raster) {
        for direction in Direction::ALL {
            if let Some(child) = extend(raster, [row, col], direction) {
                children.push(child);
            }
        }
    }
    children
}

/// Every one-cell trim of a multi-cell path
///
/// If the removed cell was the head, the head moves to its remaining
/// neighbour. Children whose head cannot be re-identified, or whose raster
/// would be empty, are omitted.
pub fn trim_endpoints(raster: &Raster, head: [usize; 2]) -> Vec<(Raster, [usize; 2])> {
    if raster.foreground_count() < 2 {
        return Vec::new();
    }
    endpoints(raster)
        .into_iter()
        .filter_map(|endpoint| trim(raster, head, endpoint))
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];
}

fn extend(raster: &Raster, [row, col]: [usize; 2], direction: Direction) -> Option<(Raster, [usize; 2])> {
    let (mut grown, target) = match direction {
        Direction::Up if row == 0 => (raster.add_top_row(), [0, col]),
        Direction::Up => (raster.clone(), [row - 1, col]),
        Direction::Down if row + 1 == raster.rows() => (raster.add_bottom_row(), [row + 1, col]),
        Direction::Down => (raster.clone(), [row + 1, col]),
        Direction::Left if col == 0 => (raster.add_left_column(), [row, 0]),
        Direction::Left => (raster.clone(), [row, col - 1]),
        Direction::Right if col + 1 == raster.cols() => {
            (raster.add_right_column(), [row, col + 1])
        }
        Direction::Right => (raster.clone(), [row, col + 1]),
    };
    if grown.is_foreground(target[0], target[1]) {
        return None;
    }
    grown.set(target[0], target[1], FOREGROUND);
    Some((grown, target))
}

fn trim(raster: &Raster, head: [usize; 2], endpoint: [usize; 2]) -> Option<(Raster, [usize; 2])> {
    let mut cleared = raster.clone();
    cleared.set(endpoint[0], endpoint[1], BACKGROUND);

    let head = if head == endpoint {
        cleared.single_foreground_neighbor(endpoint[0], endpoint[1])?
    } else {
        head
    };

    let (trimmed, [top, left]) = cleared.trim_background();
    if trimmed.is_empty() {
        return None;
    }
    let head = [head[0].checked_sub(top)?, head[1].checked_sub(left)?];
    trimmed
        .is_foreground(head[0], head[1])
        .then_some((trimmed, head))
}
