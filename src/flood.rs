//! Region growth for the captured set.
//!
//! Choosing a color extends the captured region to every cell reachable from
//! it through a chain of adjacent cells generated with that color. Adjacency
//! is set at runtime by a [`FloodRule`]:
//! - [`Topology::Plane`] stops at the edges, [`Topology::Torus`] wraps both axes
//! - [`Connectivity::Orthogonal`] uses 4 neighbors, [`Connectivity::AllEight`]
//!   adds the 4 diagonals
//!
//! The result is the transitive closure of same-color adjacency from the
//! current captured set, so it does not depend on the order the worklist is
//! drained in.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{Board, Color, Point};
use crate::constants::{DIAGONAL, ORTHOGONAL};

/// Whether the grid edges wrap around.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    #[default]
    Plane,
    Torus,
}

/// Whether diagonal cells count as neighbors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Connectivity {
    #[default]
    Orthogonal,
    AllEight,
}

/// The adjacency used when flooding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloodRule {
    pub topology: Topology,
    pub connectivity: Connectivity,
}

impl FloodRule {
    pub fn new(topology: Topology, connectivity: Connectivity) -> Self {
        Self {
            topology,
            connectivity,
        }
    }

    /// All four topology/connectivity combinations.
    pub fn all() -> [FloodRule; 4] {
        [
            FloodRule::new(Topology::Plane, Connectivity::Orthogonal),
            FloodRule::new(Topology::Plane, Connectivity::AllEight),
            FloodRule::new(Topology::Torus, Connectivity::Orthogonal),
            FloodRule::new(Topology::Torus, Connectivity::AllEight),
        ]
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Plane => write!(f, "plane"),
            Topology::Torus => write!(f, "torus"),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Orthogonal => write!(f, "orthogonal"),
            Connectivity::AllEight => write!(f, "all-eight"),
        }
    }
}

/// Order in which the worklist is drained.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Last in, first out
    #[default]
    DepthFirst,
    /// First in, first out
    BreadthFirst,
}

fn wrap(x: usize, d: isize, size: usize) -> usize {
    (x as isize + d).rem_euclid(size as isize) as usize
}

/// Neighbors of `(row, column)` on a `size`x`size` board under `rule`.
///
/// On a plane, edge and corner cells have fewer neighbors. On a torus every
/// cell has the full set; on boards smaller than 3 some of them coincide.
pub fn neighbors(
    size: usize,
    (row, column): Point,
    rule: FloodRule,
) -> impl Iterator<Item = Point> {
    let orthogonal: &'static [(isize, isize)] = &ORTHOGONAL;
    let diagonal: &'static [(isize, isize)] = match rule.connectivity {
        Connectivity::Orthogonal => &[],
        Connectivity::AllEight => &DIAGONAL,
    };
    orthogonal
        .iter()
        .chain(diagonal)
        .filter_map(move |&(dr, dc)| match rule.topology {
            Topology::Plane => {
                let r = row.checked_add_signed(dr)?;
                let c = column.checked_add_signed(dc)?;
                (r < size && c < size).then_some((r, c))
            }
            Topology::Torus => Some((wrap(row, dr, size), wrap(column, dc, size))),
        })
}

/// Grow the captured region with `new_color`, draining the worklist depth first.
///
/// Returns the number of newly captured cells. Choosing the color the region
/// already has (`current`) is a no-op returning 0, as is a color no frontier
/// cell carries.
pub fn flood(
    board: &mut Board,
    current: Option<Color>,
    new_color: Color,
    rule: FloodRule,
) -> usize {
    flood_with(board, current, new_color, rule, Traversal::DepthFirst)
}

/// [`flood`] with an explicit worklist order.
pub fn flood_with(
    board: &mut Board,
    current: Option<Color>,
    new_color: Color,
    rule: FloodRule,
    traversal: Traversal,
) -> usize {
    if current == Some(new_color) {
        return 0;
    }

    let size = board.size();
    // Seeded with the whole captured set; a cell enters only when it is captured.
    let mut pending: VecDeque<Point> = board.captured_points().collect();
    let mut grown = 0;

    loop {
        let next = match traversal {
            Traversal::DepthFirst => pending.pop_back(),
            Traversal::BreadthFirst => pending.pop_front(),
        };
        let Some(point) = next else { break };

        for n in neighbors(size, point, rule) {
            if board.capture_matching(n, new_color) {
                pending.push_back(n);
                grown += 1;
            }
        }
    }

    trace!(new_color, grown, ?rule, "flood finished");
    grown
}
