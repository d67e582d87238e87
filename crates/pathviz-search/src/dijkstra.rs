use log::trace;
use pathviz_core::CellState;

use crate::distance::euclidean;
use crate::engine::{SearchEngine, StepResult};
use crate::node::{INFINITE_DIST, NodeId, SearchNode};
use crate::successors::successors;

impl SearchEngine {
    /// Collect the connected component of the start into the node arena and
    /// return it sorted by `dist`: the start (0) first, then every other
    /// member (infinite) in discovery order.
    ///
    /// Traversal is an iterative DFS using the same successor rule as the
    /// search, so a cell outside the component can never be reached.
    pub(crate) fn connected_component(&mut self) -> Vec<NodeId> {
        let mut seen = vec![false; self.grid.len()];
        let mut graph = Vec::new();
        let mut stack = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let Some(si) = self.grid.index(self.start) else {
            self.nbuf = nbuf;
            return graph;
        };
        seen[si] = true;
        let mut start = SearchNode::new(self.start);
        start.dist = 0.0;
        graph.push(self.alloc(start));
        stack.push(self.start);

        while let Some(v) = stack.pop() {
            nbuf.clear();
            successors(&self.grid, v, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.grid.index(np) else {
                    continue;
                };
                if seen[ni] {
                    continue;
                }
                seen[ni] = true;
                stack.push(np);
                graph.push(self.alloc(SearchNode::new(np)));
            }
        }

        self.nbuf = nbuf;
        let nodes = &self.nodes;
        graph.sort_by(|a, b| nodes[a.0].dist.total_cmp(&nodes[b.0].dist));
        graph
    }

    /// One Dijkstra expansion: settle the head of `graph`, relax its
    /// neighbours that are still in `graph`, and re-sort after every
    /// improvement.
    pub(crate) fn expand_dijkstra(&mut self, graph: &mut Vec<NodeId>) -> StepResult {
        if graph.is_empty() {
            return StepResult::NoSolution;
        }

        let ui = graph.remove(0);
        self.closed.push(ui);
        let u = self.nodes[ui.0];
        if u.pos == self.target {
            return StepResult::Found;
        }
        self.expanded += 1;
        self.mark(u.pos, CellState::Closed);
        if u.dist == INFINITE_DIST {
            return StepResult::NoSolution;
        }
        trace!("Dijkstra settles {} (dist = {:.3})", u.pos, u.dist);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        successors(&self.grid, u.pos, &mut nbuf);

        for &vp in nbuf.iter() {
            let Some(vi) = graph.iter().copied().find(|id| self.nodes[id.0].pos == vp) else {
                continue;
            };
            let alt = u.dist + euclidean(u.pos, vp);
            if alt < self.nodes[vi.0].dist {
                let v = &mut self.nodes[vi.0];
                v.dist = alt;
                v.prev = Some(ui);
                self.mark(vp, CellState::Frontier);
                let nodes = &self.nodes;
                graph.sort_by(|a, b| nodes[a.0].dist.total_cmp(&nodes[b.0].dist));
            }
        }

        self.nbuf = nbuf;
        StepResult::Continue
    }
}
