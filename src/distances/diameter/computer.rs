/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Bound;
use crate::traits::RandomAccessGraph;
use crossbeam_utils::CachePadded;
use dsi_progress_logger::ProgressLog;
use rayon::{ThreadPool, prelude::*};
use std::sync::atomic::{AtomicU64, AtomicUsize};

/// The phases of a diameter computation, as reported to the callback of
/// [`DiameterComputer::compute_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The node of maximum degree has been chosen as pivot.
    Pivot { node: usize },
    /// The eccentricity of the pivot has been computed, and `node` is a node
    /// at maximum distance from it.
    Farthest { node: usize },
    /// The eccentricity of the farthest node has been computed, and `node`
    /// is a node at maximum distance from it.
    SecondFarthest { node: usize },
    /// The graph has been checked for being a clique.
    CliqueChecked,
    /// The nodes close to the pivot have been retired; `reached` is the
    /// number of nodes visited.
    Winnowed { reached: usize },
    /// Chains have been collapsed.
    ChainsCollapsed,
    /// An unsettled node has been chosen as source of a visit.
    Source { round: usize, node: usize },
    /// The visit of a round has improved the diameter, realized by the
    /// nodes `from` and `to`. If the pivot has been winnowed again,
    /// `reached` is the number of nodes visited.
    Improved {
        round: usize,
        diameter: usize,
        from: usize,
        to: usize,
        reached: Option<usize>,
    },
    /// The bounds have been propagated after the visit of a round.
    Eliminated { round: usize },
}

impl Phase {
    /// Returns a number identifying the phase, increasing along the
    /// computation.
    pub fn index(&self) -> usize {
        match *self {
            Phase::Pivot { .. } => 0,
            Phase::Farthest { .. } => 1,
            Phase::SecondFarthest { .. } => 2,
            Phase::CliqueChecked => 3,
            Phase::Winnowed { .. } => 4,
            Phase::ChainsCollapsed => 5,
            Phase::Source { round, .. } => round * 10,
            Phase::Improved { round, .. } => round * 10 + 1,
            Phase::Eliminated { round } => round * 10 + 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Phase::Pivot { .. } => "Highest degree node",
            Phase::Farthest { .. } => "Farthest node",
            Phase::SecondFarthest { .. } => "Next farthest node",
            Phase::CliqueChecked => "After clique detection",
            Phase::Winnowed { .. } => "After removing uninteresting nodes",
            Phase::ChainsCollapsed => "After removing chains",
            Phase::Source { .. } => "Current starting node",
            Phase::Improved { .. } => "After improving the diameter",
            Phase::Eliminated { .. } => "After eliminating nodes",
        }
    }

    /// Returns the node the phase is about, if any.
    pub fn node(&self) -> Option<usize> {
        match *self {
            Phase::Pivot { node }
            | Phase::Farthest { node }
            | Phase::SecondFarthest { node }
            | Phase::Source { node, .. } => Some(node),
            _ => None,
        }
    }
}

/// The outcome of a diameter computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiameterResult {
    /// The diameter (the maximum over the connected components if the graph
    /// is disconnected).
    pub diameter: usize,
    /// The number of breadth-first visits performed.
    pub sweeps: u64,
    /// Whether the graph is connected.
    pub connected: bool,
    /// The number of nodes reachable from the pivot.
    pub component_size: usize,
    /// The number of chains found.
    pub chains: usize,
    /// The length of the longest chain.
    pub longest_chain: usize,
    /// Two nodes at distance [`diameter`](Self::diameter), or `None` if the
    /// graph has no nodes.
    pub ends: Option<(usize, usize)>,
    /// The successive values of the diameter lower bound, in increasing
    /// order; the last one is the diameter. Empty if the graph has no nodes.
    pub history: Vec<usize>,
}

/// Computes the exact diameter of an undirected graph.
///
/// The computer owns the state shared by all visits: the labels stamped with
/// the current epoch, the [bounds](Bound) of the nodes, the two frontiers,
/// and the table used by threads to merge their frontiers. All of it is
/// allocated once, and reused by every visit.
///
/// The graph must be symmetric and must not contain loops or multiple arcs,
/// as the graphs built by [`CsrGraph::from_edges`](crate::graphs::csr_graph::CsrGraph::from_edges).
pub struct DiameterComputer<'a, G: RandomAccessGraph + Sync> {
    pub(super) graph: &'a G,
    pub(super) num_nodes: usize,
    /// The number of visits started so far.
    pub(super) epoch: u64,
    /// The last epoch in which each node has been visited.
    pub(super) label: Box<[AtomicU64]>,
    /// The bounds, plus an unknown sentinel.
    pub(super) dist: Box<[Bound]>,
    pub(super) curr: Box<[usize]>,
    pub(super) next: Box<[usize]>,
    pub(super) thread_offsets: Box<[CachePadded<AtomicUsize>]>,
}

impl<'a, G: RandomAccessGraph + Sync> DiameterComputer<'a, G> {
    /// Creates a new computer for the given graph.
    pub fn new(graph: &'a G) -> Self {
        let num_nodes = graph.num_nodes();
        assert!(
            num_nodes <= Bound::MAX_SLACK,
            "The graph has too many nodes ({num_nodes})"
        );
        Self {
            graph,
            num_nodes,
            epoch: 0,
            label: (0..num_nodes).map(|_| AtomicU64::new(0)).collect(),
            dist: vec![Bound::UNKNOWN; num_nodes + 1].into_boxed_slice(),
            curr: vec![0; num_nodes].into_boxed_slice(),
            next: vec![0; num_nodes].into_boxed_slice(),
            thread_offsets: Box::new([]),
        }
    }

    /// Returns the bounds of the nodes.
    ///
    /// After [`compute`](Self::compute), no bound is
    /// [unknown](Bound::UNKNOWN); after a call to
    /// [`eccentricity`](Self::eccentricity) the bound of the source is its
    /// eccentricity.
    pub fn bounds(&self) -> &[Bound] {
        &self.dist[..self.num_nodes]
    }

    /// Returns the number of visits performed so far.
    pub fn num_sweeps(&self) -> u64 {
        self.epoch
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    #[inline(always)]
    pub(super) fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub(super) fn resize_offsets(&mut self, num_threads: usize) {
        if self.thread_offsets.len() != num_threads + 1 {
            self.thread_offsets = (0..=num_threads)
                .map(|_| CachePadded::new(AtomicUsize::new(0)))
                .collect();
        }
    }

    /// Isolated nodes are certified with eccentricity zero; all other nodes
    /// are unknown.
    pub(super) fn reset_bounds(&mut self) {
        let graph = self.graph;
        for (node, bound) in self.dist[..self.num_nodes].iter_mut().enumerate() {
            *bound = if graph.outdegree(node) == 0 {
                Bound::certified(0)
            } else {
                Bound::UNKNOWN
            };
        }
        self.dist[self.num_nodes] = Bound::UNKNOWN;
    }

    /// Computes the diameter.
    ///
    /// # Arguments
    /// * `thread_pool`: The thread pool to use for parallel computation.
    /// * `pl`: A progress logger.
    pub fn compute(
        &mut self,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> DiameterResult {
        self.compute_with(thread_pool, pl, |_, _| {})
    }

    /// Computes the diameter, calling `on_phase` at the end of every phase.
    ///
    /// The callback receives the phase and the computer, so it can inspect
    /// the [bounds](Self::bounds) (e.g., to draw them).
    pub fn compute_with(
        &mut self,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
        mut on_phase: impl FnMut(Phase, &Self),
    ) -> DiameterResult {
        let graph = self.graph;
        let num_nodes = self.num_nodes;
        let first_epoch = self.epoch;
        self.reset_bounds();

        let Some((max_degree, pivot)) = thread_pool.install(|| {
            (0..num_nodes)
                .into_par_iter()
                .map(|node| (graph.outdegree(node), node))
                .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        }) else {
            return DiameterResult {
                diameter: 0,
                sweeps: 0,
                connected: true,
                component_size: 0,
                chains: 0,
                longest_chain: 0,
                ends: None,
                history: vec![],
            };
        };

        pl.item_name("sweep");
        pl.display_memory(false);
        pl.expected_updates(None);
        pl.start("Computing diameter...");
        on_phase(Phase::Pivot { node: pivot }, self);

        // Double sweep
        let first = self.eccentricity(pivot, thread_pool);
        pl.update();
        let lower = first.eccentricity;
        let connected = first.reached == num_nodes;
        if !connected {
            log::warn!(
                "The graph is disconnected ({} nodes out of {} reachable from node {}): computing the maximum diameter of its connected components",
                first.reached,
                num_nodes,
                pivot
            );
        }
        let second = self.eccentricity(first.farthest, thread_pool);
        pl.update();
        let mut diameter = second.eccentricity;
        let mut ends = (first.farthest, second.farthest);
        let mut history = vec![diameter];
        pl.info(format_args!("Initial diameter: {diameter}"));
        on_phase(
            Phase::Farthest {
                node: first.farthest,
            },
            self,
        );
        on_phase(
            Phase::SecondFarthest {
                node: second.farthest,
            },
            self,
        );

        // Clique detection
        if diameter == 1
            && max_degree + 1 == first.reached
            && graph
                .successors(pivot)
                .iter()
                .all(|&succ| graph.outdegree(succ) == max_degree)
        {
            for &succ in graph.successors(pivot) {
                self.dist[succ] = Bound::certified(1);
            }
        }
        on_phase(Phase::CliqueChecked, self);

        let reached = self.winnow(pivot, lower, diameter, thread_pool);
        pl.update();
        pl.info(format_args!(
            "Nodes within half the diameter from node {pivot}: {reached}"
        ));
        on_phase(Phase::Winnowed { reached }, self);

        let chains = self.remove_chains(&mut diameter);
        pl.info(format_args!(
            "Found {} chains (longest: {})",
            chains.count, chains.longest
        ));
        if let Some(chain_ends) = chains.ends {
            ends = chain_ends;
            history.push(diameter);
            pl.info(format_args!(
                "Diameter: {diameter} (chain from node {} to node {})",
                chain_ends.0, chain_ends.1
            ));
        }
        on_phase(Phase::ChainsCollapsed, self);

        // The sentinel stops the scan
        let mut cursor = 0;
        let mut round = 0;
        loop {
            while !self.dist[cursor].is_unknown() {
                cursor += 1;
            }
            if cursor == num_nodes {
                break;
            }
            round += 1;
            on_phase(
                Phase::Source {
                    round,
                    node: cursor,
                },
                self,
            );

            let ecc = self.eccentricity(cursor, thread_pool);
            pl.update();
            if ecc.eccentricity > diameter {
                let new_diameter = ecc.eccentricity;
                ends = (cursor, ecc.farthest);
                pl.info(format_args!(
                    "Diameter: {new_diameter} (from node {} to node {}, sweep {})",
                    cursor,
                    ecc.farthest,
                    self.epoch - first_epoch
                ));

                let reached = if new_diameter - 1 > diameter || new_diameter % 2 == 0 {
                    let reached = self.winnow(pivot, lower, new_diameter, thread_pool);
                    pl.update();
                    pl.info(format_args!(
                        "Nodes within half the diameter from node {pivot}: {reached}"
                    ));
                    Some(reached)
                } else {
                    None
                };
                on_phase(
                    Phase::Improved {
                        round,
                        diameter: new_diameter,
                        from: cursor,
                        to: ecc.farthest,
                        reached,
                    },
                    self,
                );

                let old_bound = Bound::certified(diameter);
                let mut len = 0;
                for node in 0..num_nodes {
                    if self.dist[node] == old_bound {
                        self.curr[len] = node;
                        len += 1;
                    }
                }
                self.eliminate(len, old_bound, Bound::certified(new_diameter));
                diameter = new_diameter;
                history.push(diameter);
            } else {
                self.curr[0] = cursor;
                self.eliminate(
                    1,
                    Bound::certified(ecc.eccentricity),
                    Bound::certified(diameter),
                );
            }
            on_phase(Phase::Eliminated { round }, self);
        }

        pl.done();

        DiameterResult {
            diameter,
            sweeps: self.epoch - first_epoch,
            connected,
            component_size: first.reached,
            chains: chains.count,
            longest_chain: chains.longest,
            ends: Some(ends),
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::csr_graph::CsrGraph;
    use crate::thread_pool;
    use dsi_progress_logger::no_logging;

    fn clique(k: usize) -> CsrGraph {
        CsrGraph::from_edges(k, (0..k).flat_map(|i| (i + 1..k).map(move |j| (i, j))))
    }

    #[test]
    fn test_clique_shortcut() {
        let graph = clique(50);
        let mut computer = DiameterComputer::new(&graph);
        let result = computer.compute(&thread_pool![4], no_logging![]);
        assert_eq!(result.diameter, 1);
        // Two sweeps for the double sweep, one for the winnowing
        assert_eq!(result.sweeps, 3);
        assert!(computer.bounds().iter().all(|b| !b.is_unknown()));
    }

    #[test]
    fn test_phases() {
        let graph = CsrGraph::from_edges(
            7,
            [(0, 1), (1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (0, 6)],
        );
        let mut computer = DiameterComputer::new(&graph);
        let mut phases = vec![];
        let result = computer.compute_with(&thread_pool![2], no_logging![], |phase, computer| {
            if phase == Phase::ChainsCollapsed || matches!(phase, Phase::Eliminated { .. }) {
                assert!(computer
                    .bounds()
                    .iter()
                    .filter_map(|b| b.certified_value())
                    .all(|value| value <= 5));
            }
            phases.push(phase);
        });
        assert_eq!(result.diameter, 5);
        assert_eq!(phases[0], Phase::Pivot { node: 1 });
        assert!(matches!(phases[1], Phase::Farthest { .. }));
        assert!(matches!(phases[2], Phase::SecondFarthest { .. }));
        assert_eq!(phases[3], Phase::CliqueChecked);
        assert!(matches!(phases[4], Phase::Winnowed { reached } if reached > 1));
        assert_eq!(phases[5], Phase::ChainsCollapsed);
        assert!(phases.windows(2).all(|w| w[0].index() < w[1].index()));
        let (from, to) = result.ends.unwrap_or_default();
        assert_eq!(from.min(to), 5.min(6));
        assert_eq!(from.max(to), 5.max(6));
    }

    #[test]
    fn test_recompute() {
        let graph = CsrGraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let mut computer = DiameterComputer::new(&graph);
        let thread_pool = thread_pool![2];
        let first = computer.compute(&thread_pool, no_logging![]);
        let second = computer.compute(&thread_pool, no_logging![]);
        assert_eq!(first, second);
        assert_eq!(first.diameter, 2);
        assert_eq!(computer.num_sweeps(), 2 * first.sweeps);
    }

    #[test]
    fn test_empty() {
        let graph = CsrGraph::new();
        let result = DiameterComputer::new(&graph).compute(&thread_pool![1], no_logging![]);
        assert_eq!(result.diameter, 0);
        assert_eq!(result.sweeps, 0);
        assert_eq!(result.ends, None);
    }

    #[test]
    fn test_phase_index() {
        assert_eq!(Phase::Source { round: 3, node: 0 }.index(), 30);
        let improved = Phase::Improved {
            round: 3,
            diameter: 7,
            from: 0,
            to: 1,
            reached: None,
        };
        assert_eq!(improved.index(), 31);
        assert_eq!(Phase::Eliminated { round: 3 }.index(), 32);
        assert_eq!(Phase::Winnowed { reached: 3 }.node(), None);
        assert_eq!(Phase::Pivot { node: 4 }.node(), Some(4));
    }
}
