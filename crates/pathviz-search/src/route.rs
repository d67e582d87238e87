use std::fmt;

use pathviz_core::Point;

use crate::distance::euclidean;
use crate::error::SearchError;
use crate::node::{NodeId, SearchNode};

/// A reconstructed route and its metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Number of moves from start to target.
    pub steps: usize,
    /// Sum of the Euclidean lengths of those moves.
    pub distance: f64,
    /// Cells from start to target, both included.
    pub cells: Vec<Point>,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Steps: {}, Distance: {:.3}", self.steps, self.distance)
    }
}

/// Walk the predecessor links from the closed entry for `target` back to
/// `start`.
///
/// `nodes` is the arena `prev` handles point into and `closed` the closed
/// set of a search that found `target`. A target missing from `closed`, a
/// chain that ends before `start` or one that loops are all reported as
/// [`SearchError::ReconstructionInconsistency`].
pub fn reconstruct(
    nodes: &[SearchNode],
    closed: &[NodeId],
    start: Point,
    target: Point,
) -> Result<Route, SearchError> {
    let mut cur = closed
        .iter()
        .filter_map(|id| nodes.get(id.index()))
        .find(|n| n.pos == target)
        .ok_or(SearchError::ReconstructionInconsistency { at: target })?;

    let mut steps = 0;
    let mut distance = 0.0;
    let mut cells = vec![cur.pos];
    while cur.pos != start {
        let prev = cur
            .prev
            .and_then(|id| nodes.get(id.index()))
            .ok_or(SearchError::ReconstructionInconsistency { at: cur.pos })?;
        steps += 1;
        if steps > nodes.len() {
            return Err(SearchError::ReconstructionInconsistency { at: cur.pos });
        }
        distance += euclidean(cur.pos, prev.pos);
        cur = prev;
        cells.push(cur.pos);
    }
    cells.reverse();

    Ok(Route {
        steps,
        distance,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(points: &[(i32, i32)]) -> Vec<SearchNode> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| SearchNode {
                prev: i.checked_sub(1).map(NodeId),
                ..SearchNode::new(Point::new(x, y))
            })
            .collect()
    }

    #[test]
    fn walks_back_to_start() {
        let nodes = chain(&[(0, 0), (1, 1), (2, 1), (3, 2)]);
        let closed = [NodeId(3), NodeId(1), NodeId(0)];
        let route = reconstruct(&nodes, &closed, Point::new(0, 0), Point::new(3, 2)).unwrap();
        assert_eq!(route.steps, 3);
        assert!((route.distance - (1.0 + 2.0 * std::f64::consts::SQRT_2)).abs() < 1e-12);
        assert_eq!(
            route.cells,
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 2)
            ]
        );
        assert_eq!(route.to_string(), "Steps: 3, Distance: 3.828");
    }

    #[test]
    fn target_must_be_closed() {
        let nodes = chain(&[(0, 0), (1, 0)]);
        let err = reconstruct(&nodes, &[NodeId(0)], Point::new(0, 0), Point::new(1, 0));
        assert_eq!(
            err,
            Err(SearchError::ReconstructionInconsistency {
                at: Point::new(1, 0)
            })
        );
    }

    #[test]
    fn broken_chain_is_reported() {
        let mut nodes = chain(&[(0, 0), (1, 0), (2, 0)]);
        nodes[1].prev = None;
        let err = reconstruct(&nodes, &[NodeId(2)], Point::new(0, 0), Point::new(2, 0));
        assert_eq!(
            err,
            Err(SearchError::ReconstructionInconsistency {
                at: Point::new(1, 0)
            })
        );
    }

    #[test]
    fn dangling_handle_is_reported() {
        let mut nodes = chain(&[(0, 0), (1, 0)]);
        nodes[1].prev = Some(NodeId(9));
        assert!(reconstruct(&nodes, &[NodeId(1)], Point::new(0, 0), Point::new(1, 0)).is_err());
    }

    #[test]
    fn cycle_is_reported() {
        let mut nodes = chain(&[(0, 0), (1, 0), (2, 0)]);
        nodes[1].prev = Some(NodeId(2));
        assert!(reconstruct(&nodes, &[NodeId(2)], Point::new(0, 0), Point::new(2, 0)).is_err());
    }
}
