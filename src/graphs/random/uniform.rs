/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::graphs::csr_graph::CsrGraph;

/// The seed used by the command-line tools when none is specified.
pub const DEFAULT_SEED: u64 = 23;

/// Uniform random simple undirected graphs with a given number of edges.
///
/// This is the Erdős–Rényi model *G*(*n*, *m*): edges are drawn uniformly
/// among the pairs of distinct nodes until `m` distinct edges have been
/// collected, so the result never contains loops or multiple edges.
///
/// After the random edges have been drawn, a list of additional pairs can be
/// [toggled](UniformRandom::toggle): an edge that is present is removed, and
/// an edge that is absent is added. This makes it possible to plant specific
/// structures (e.g., long chains) in a random graph.
///
/// The generator is deterministic: the same parameters and seed always yield
/// the same graph.
#[derive(Debug, Clone)]
pub struct UniformRandom {
    n: usize,
    m: usize,
    seed: u64,
    toggled: Vec<(usize, usize)>,
}

impl UniformRandom {
    /// Creates a new generator, given the number of nodes, the number of
    /// edges and a seed for the [pseudorandom number generator](SmallRng).
    ///
    /// # Panics
    ///
    /// Panics if `m` is larger than the number of pairs of distinct nodes.
    pub fn new(n: usize, m: usize, seed: u64) -> Self {
        assert!(
            m <= Self::max_edges(n),
            "The number of edges must be at most {}",
            Self::max_edges(n)
        );
        Self {
            n,
            m,
            seed,
            toggled: vec![],
        }
    }

    /// Returns the number of pairs of distinct nodes in a graph with `n`
    /// nodes.
    pub fn max_edges(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }

    /// Adds a pair of nodes whose edge will be toggled after the random edges
    /// have been drawn.
    ///
    /// Toggles are applied in order, so toggling the same pair twice leaves
    /// the graph unchanged.
    ///
    /// # Panics
    ///
    /// Panics if one of the nodes is out of range or if the two nodes are
    /// equal.
    pub fn toggle(mut self, src: usize, dst: usize) -> Self {
        assert!(src < self.n, "Source must be smaller than {}", self.n);
        assert!(dst < self.n, "Destination must be smaller than {}", self.n);
        assert_ne!(src, dst, "Loops cannot be toggled");
        self.toggled.push((src, dst));
        self
    }

    /// Generates the graph.
    pub fn generate(&self) -> CsrGraph {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut edges = BTreeSet::new();
        while edges.len() < self.m {
            let src = rng.random_range(0..self.n);
            let dst = rng.random_range(0..self.n);
            if src != dst {
                edges.insert((src.min(dst), src.max(dst)));
            }
        }
        for &(src, dst) in &self.toggled {
            let edge = (src.min(dst), src.max(dst));
            if !edges.remove(&edge) {
                edges.insert(edge);
            }
        }
        CsrGraph::from_edges(self.n, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{RandomAccessGraph, is_symmetric};

    #[test]
    fn test_uniform() {
        let g = UniformRandom::new(50, 100, 0).generate();
        assert_eq!(g.num_nodes(), 50);
        assert_eq!(g.num_arcs(), 200);
        assert!(is_symmetric(&g));
        for node in 0..g.num_nodes() {
            assert!(!g.has_arc(node, node));
        }
        assert_eq!(g, UniformRandom::new(50, 100, 0).generate());
    }

    #[test]
    fn test_complete() {
        let g = UniformRandom::new(6, 15, 1).generate();
        for node in 0..6 {
            assert_eq!(g.outdegree(node), 5);
        }
    }

    #[test]
    fn test_toggle() {
        let base = UniformRandom::new(10, 0, 0).generate();
        assert_eq!(base.num_arcs(), 0);
        let g = UniformRandom::new(10, 0, 0)
            .toggle(0, 1)
            .toggle(2, 3)
            .toggle(1, 0)
            .generate();
        assert_eq!(g.num_arcs(), 2);
        assert!(g.has_arc(2, 3) && g.has_arc(3, 2));
        assert!(!g.has_arc(0, 1));
    }

    #[test]
    #[should_panic]
    fn test_too_many_edges() {
        UniformRandom::new(4, 7, 0);
    }
}
