/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::frontier::{LevelSync, partition};
use super::{Bound, DiameterComputer};
use crate::traits::RandomAccessGraph;
use rayon::ThreadPool;
use std::sync::atomic::Ordering;
use sync_cell_slice::SyncSlice;

impl<G: RandomAccessGraph + Sync> DiameterComputer<'_, G> {
    /// Retires the nodes around `pivot` that cannot be the endpoint of a path
    /// longer than `diameter`, and returns the number of nodes reached
    /// (including the pivot).
    ///
    /// `lower` is the eccentricity of the pivot. The visit runs in push mode
    /// for at least `diameter / 2` levels, and keeps going while `lower`
    /// plus the current level does not exceed `diameter`. A node at level `k`
    /// is bounded by `lower + k` if this sum does not exceed `diameter`, and is
    /// pruned otherwise; existing smaller bounds are kept.
    pub(super) fn winnow(
        &mut self,
        pivot: usize,
        lower: usize,
        diameter: usize,
        thread_pool: &ThreadPool,
    ) -> usize {
        let max_level = diameter / 2;
        let num_threads = thread_pool.current_num_threads();
        self.resize_offsets(num_threads);
        let epoch = self.next_epoch();

        let graph = self.graph;
        let label = &self.label;
        label[pivot].store(epoch, Ordering::Relaxed);
        self.curr[0] = pivot;
        let curr = self.curr.as_sync_slice();
        let dist = self.dist.as_sync_slice();
        let sync = LevelSync::new(num_threads, &self.thread_offsets, 1);

        let reached = thread_pool.broadcast(|ctx| {
            let tid = ctx.index();
            let mut found = vec![];
            let mut reached = 0;
            let mut level = 0;
            loop {
                level += 1;
                let d = lower + level;
                if level > max_level && d > diameter {
                    break;
                }
                let bound = if d <= diameter {
                    Bound::certified(d)
                } else {
                    Bound::pruned(0)
                };

                for i in partition(sync.len(), tid, num_threads) {
                    // Safety: the frontier is only written during merges
                    let v = unsafe { curr[i].get() };
                    for &succ in graph.successors(v) {
                        if label[succ].swap(epoch, Ordering::Relaxed) != epoch {
                            found.push(succ);
                            // Safety: only the thread capturing succ writes
                            // its bound
                            unsafe { dist[succ].set(dist[succ].get().min(bound)) };
                        }
                    }
                }

                reached += found.len();
                if sync.merge(tid, &found, curr, |_| {}) == 0 {
                    break;
                }
                found.clear();
            }
            reached
        });

        1 + reached.into_iter().sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::csr_graph::CsrGraph;
    use crate::thread_pool;

    #[test]
    fn test_radius() {
        // A path of 9 nodes with pivot in the middle
        let graph = CsrGraph::from_edges(9, (0..8).map(|i| (i, i + 1)));
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        let reached = computer.winnow(4, 4, 8, &thread_pool![2]);
        // Levels 1..=4 are explored, with bounds 5..=8
        assert_eq!(reached, 9);
        let bounds = computer.bounds();
        assert_eq!(bounds[4], Bound::UNKNOWN);
        for (node, bound) in bounds.iter().enumerate() {
            if node != 4 {
                let level = node.abs_diff(4);
                assert_eq!(*bound, Bound::certified(4 + level));
            }
        }
    }

    #[test]
    fn test_pruned_beyond_diameter() {
        let graph = CsrGraph::from_edges(9, (0..8).map(|i| (i, i + 1)));
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        // The pivot is an end, with eccentricity 8, and the diameter bound is
        // 4: two levels are explored and all nodes are pruned
        let reached = computer.winnow(0, 8, 4, &thread_pool![3]);
        assert_eq!(reached, 3);
        let bounds = computer.bounds();
        assert!(bounds[1].is_pruned());
        assert!(bounds[2].is_pruned());
        assert!(bounds[3..].iter().all(|b| b.is_unknown()));
    }

    #[test]
    fn test_keeps_smaller_bounds() {
        let graph = CsrGraph::from_edges(3, [(0, 1), (1, 2)]);
        let mut computer = DiameterComputer::new(&graph);
        computer.reset_bounds();
        computer.dist[2] = Bound::certified(1);
        computer.winnow(0, 2, 4, &thread_pool![1]);
        assert_eq!(computer.bounds()[1], Bound::certified(3));
        assert_eq!(computer.bounds()[2], Bound::certified(1));
    }
}
