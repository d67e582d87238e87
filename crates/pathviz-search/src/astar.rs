use log::trace;
use pathviz_core::CellState;

use crate::distance::euclidean;
use crate::engine::{SearchEngine, StepResult};
use crate::node::{INFINITE_DIST, NodeId, SearchNode};
use crate::successors::successors;

impl SearchEngine {
    /// One A* expansion over the open list `open`.
    ///
    /// The open list is stably sorted by `f` and its head taken, so among
    /// equal `f` values the entry that has been in the list longest wins.
    ///
    /// A successor already on the open or closed list is only replaced when
    /// its stored `f` is strictly greater than the new one: on a tie the
    /// existing entry is kept, which decides between equal-length routes.
    pub(crate) fn expand_astar(&mut self, open: &mut Vec<NodeId>) -> StepResult {
        if open.is_empty() {
            return StepResult::NoSolution;
        }

        let nodes = &self.nodes;
        open.sort_by(|a, b| nodes[a.0].f.total_cmp(&nodes[b.0].f));
        let ci = open.remove(0);
        self.closed.push(ci);

        let current = self.nodes[ci.0];
        self.mark(current.pos, CellState::Closed);
        if current.pos == self.target {
            return StepResult::Found;
        }
        self.expanded += 1;
        trace!("A* expands {} (f = {:.3})", current.pos, current.f);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        successors(&self.grid, current.pos, &mut nbuf);

        for &np in nbuf.iter() {
            let g = current.g + euclidean(current.pos, np);
            let h = euclidean(np, self.target);
            let node = SearchNode {
                pos: np,
                g,
                h,
                f: g + h,
                dist: INFINITE_DIST,
                prev: Some(ci),
            };

            let in_open = open.iter().position(|id| self.nodes[id.0] == node);
            let in_closed = self.closed.iter().position(|id| self.nodes[id.0] == node);

            match (in_open, in_closed) {
                (None, None) => {}
                (Some(i), _) => {
                    if self.nodes[open[i].0].f <= node.f {
                        continue;
                    }
                    open.remove(i);
                }
                (None, Some(i)) => {
                    if self.nodes[self.closed[i].0].f <= node.f {
                        continue;
                    }
                    self.closed.remove(i);
                }
            }

            let id = self.alloc(node);
            open.push(id);
            self.mark(np, CellState::Frontier);
        }

        self.nbuf = nbuf;
        StepResult::Continue
    }
}
