/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Bound, DiameterComputer};
use crate::traits::RandomAccessGraph;

impl<G: RandomAccessGraph + Sync> DiameterComputer<'_, G> {
    /// Propagates bounds by the triangle inequality from the first `len`
    /// nodes of the frontier, which have bound `bound`.
    ///
    /// The nodes at distance `k` from the seeds receive bound `bound + k`,
    /// unless they already have a smaller one, for all levels up to `limit`.
    /// The wave stops early when a level brings no improvement. This is a
    /// sequential visit: the waves are usually short.
    pub(super) fn eliminate(&mut self, mut len: usize, mut bound: Bound, limit: Bound) {
        let graph = self.graph;
        while bound < limit {
            bound = bound.succ();
            let mut next_len = 0;
            for &v in &self.curr[..len] {
                for &succ in graph.successors(v) {
                    if self.dist[succ] > bound {
                        self.dist[succ] = bound;
                        if bound < limit {
                            self.next[next_len] = succ;
                            next_len += 1;
                        }
                    }
                }
            }
            if next_len == 0 {
                break;
            }
            std::mem::swap(&mut self.curr, &mut self.next);
            len = next_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::csr_graph::CsrGraph;

    fn path(n: usize) -> CsrGraph {
        CsrGraph::from_edges(n, (0..n - 1).map(|i| (i, i + 1)))
    }

    #[test]
    fn test_wave() {
        let graph = path(7);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[0] = Bound::certified(3);
        computer.curr[0] = 0;
        computer.eliminate(1, Bound::certified(3), Bound::certified(6));
        let bounds = computer.bounds();
        assert_eq!(bounds[0], Bound::certified(3));
        for node in 1..4 {
            assert_eq!(bounds[node], Bound::certified(3 + node));
        }
        assert!(bounds[4..].iter().all(|b| b.is_unknown()));
    }

    #[test]
    fn test_stops_at_smaller_bounds() {
        let graph = path(7);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[0] = Bound::certified(1);
        computer.dist[2] = Bound::certified(2);
        computer.curr[0] = 0;
        computer.eliminate(1, Bound::certified(1), Bound::certified(6));
        let bounds = computer.bounds();
        assert_eq!(bounds[1], Bound::certified(2));
        assert_eq!(bounds[2], Bound::certified(2));
        assert!(bounds[3..].iter().all(|b| b.is_unknown()));
    }

    #[test]
    fn test_pruned_wave() {
        let graph = path(7);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[3] = Bound::pruned(2);
        computer.curr[0] = 3;
        computer.eliminate(1, Bound::pruned(2), Bound::pruned(0));
        let bounds = computer.bounds();
        assert_eq!(bounds[2], Bound::pruned(1));
        assert_eq!(bounds[4], Bound::pruned(1));
        assert_eq!(bounds[1], Bound::pruned(0));
        assert_eq!(bounds[5], Bound::pruned(0));
        assert!(bounds[0].is_unknown() && bounds[6].is_unknown());
        assert_eq!(bounds[3], Bound::pruned(2));
    }

    #[test]
    fn test_several_seeds() {
        let graph = path(7);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[0] = Bound::certified(4);
        computer.dist[6] = Bound::certified(4);
        computer.curr[0] = 0;
        computer.curr[1] = 6;
        computer.eliminate(2, Bound::certified(4), Bound::certified(5));
        let bounds = computer.bounds();
        assert_eq!(bounds[1], Bound::certified(5));
        assert_eq!(bounds[5], Bound::certified(5));
        assert!(bounds[2..5].iter().all(|b| b.is_unknown()));
    }
}
