/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Bound, DiameterComputer};
use crate::traits::RandomAccessGraph;

/// Statistics about the chains found by
/// [`remove_chains`](DiameterComputer::remove_chains).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Chains {
    /// The number of unsettled nodes of degree one from which a chain has
    /// been followed.
    pub(super) count: usize,
    /// The length of the longest chain.
    pub(super) longest: usize,
    /// The ends of the longest closed chain that increased the diameter.
    pub(super) ends: Option<(usize, usize)>,
}

impl<G: RandomAccessGraph + Sync> DiameterComputer<'_, G> {
    /// Settles chains of nodes of degree at most two in closed form.
    ///
    /// From every unsettled node of degree one, the chain of nodes of degree
    /// two is followed until a node of degree one or a node of larger degree.
    /// In the first case the chain is a connected component that is a path:
    /// its far end is certified with the length of the path, which is also a
    /// lower bound for the diameter. In the second case the nodes of the
    /// chain and the neighborhood of the branch node are pruned, while the
    /// starting node stays unsettled, as it is the only node of the chain
    /// that can realize a longer path.
    pub(super) fn remove_chains(&mut self, diameter: &mut usize) -> Chains {
        let graph = self.graph;
        let mut chains = Chains::default();
        for start in 0..self.num_nodes {
            if !self.dist[start].is_unknown() || graph.outdegree(start) != 1 {
                continue;
            }
            chains.count += 1;
            let mut end_bound = self.dist[start];
            let mut from = start;
            let mut v = graph.successors(start)[0];
            let mut len = 0;
            loop {
                len += 1;
                let succ = graph.successors(v);
                if succ.len() == 1 {
                    end_bound = Bound::certified(len);
                    self.dist[v] = end_bound;
                    if len > *diameter {
                        *diameter = len;
                        chains.ends = Some((start, v));
                    }
                    break;
                }
                self.dist[v] = self.dist[v].min(Bound::pruned(len));
                if succ.len() > 2 {
                    self.curr[0] = v;
                    self.eliminate(1, Bound::pruned(len), Bound::pruned(0));
                    break;
                }
                let next = if succ[0] == from { succ[1] } else { succ[0] };
                from = v;
                v = next;
            }
            self.dist[start] = end_bound;
            chains.longest = chains.longest.max(len);
        }
        chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::csr_graph::CsrGraph;

    #[test]
    fn test_path_component() {
        let graph = CsrGraph::from_edges(6, (0..5).map(|i| (i, i + 1)));
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        let mut diameter = 0;
        let chains = computer.remove_chains(&mut diameter);
        assert_eq!(diameter, 5);
        assert_eq!(
            chains,
            Chains {
                count: 1,
                longest: 5,
                ends: Some((0, 5))
            }
        );
        // No visit is needed: every node is settled
        assert_eq!(computer.num_sweeps(), 0);
        let bounds = computer.bounds();
        assert_eq!(bounds[0], Bound::certified(5));
        assert_eq!(bounds[5], Bound::certified(5));
        assert!(bounds[1..5].iter().all(|b| b.is_pruned()));
    }

    #[test]
    fn test_pendant_chain() {
        // A triangle 0, 1, 2 with a chain 2 - 3 - 4 - 5
        let graph = CsrGraph::from_edges(6, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5)]);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        let mut diameter = 4;
        let chains = computer.remove_chains(&mut diameter);
        assert_eq!(diameter, 4);
        assert_eq!(
            chains,
            Chains {
                count: 1,
                longest: 3,
                ends: None
            }
        );
        let bounds = computer.bounds();
        // The end of the chain stays unsettled
        assert!(bounds[5].is_unknown());
        assert_eq!(bounds[4], Bound::pruned(1));
        assert_eq!(bounds[3], Bound::pruned(2));
        assert_eq!(bounds[2], Bound::pruned(3));
        // The wave from the branch node reaches the triangle
        assert_eq!(bounds[0], Bound::pruned(2));
        assert_eq!(bounds[1], Bound::pruned(2));
        assert!(bounds.iter().all(|b| b.certified_value().is_none()));
    }

    #[test]
    fn test_settled_ends_are_skipped() {
        let graph = CsrGraph::from_edges(3, [(0, 1), (1, 2)]);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[0] = Bound::certified(2);
        let mut diameter = 0;
        let chains = computer.remove_chains(&mut diameter);
        // The walk starts from node 2
        assert_eq!(chains.count, 1);
        assert_eq!(chains.ends, Some((2, 0)));
        assert_eq!(diameter, 2);
    }
}
