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

/// Frontiers whose size is at least this fraction of the number of nodes are
/// expanded by scanning unvisited nodes (pull) rather than by scanning the
/// frontier (push).
pub const PULL_RATIO: f64 = 0.1;

/// The outcome of a visit of the [eccentricity
/// engine](DiameterComputer::eccentricity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eccentricity {
    /// The eccentricity of the source.
    pub eccentricity: usize,
    /// The number of nodes reachable from the source, including the source.
    pub reached: usize,
    /// A node at maximum distance from the source (the source itself if it
    /// is isolated).
    pub farthest: usize,
}

impl<G: RandomAccessGraph + Sync> DiameterComputer<'_, G> {
    /// Computes the exact eccentricity of `node` with a parallel
    /// direction-optimizing breadth-first visit, and certifies it in the
    /// bounds.
    ///
    /// Each level is expanded either by scanning the successors of the
    /// frontier and capturing them with an atomic swap of their label (push),
    /// or, when the frontier contains at least [`PULL_RATIO`] of the nodes,
    /// by letting each thread scan its range of nodes looking for unvisited
    /// nodes with a successor in the frontier (pull). Labels are stamped with
    /// the current epoch, so they never need to be cleared.
    ///
    /// After the call, the frontier contains the last non-empty level of the
    /// visit.
    pub fn eccentricity(&mut self, node: usize, thread_pool: &ThreadPool) -> Eccentricity {
        let num_nodes = self.num_nodes;
        assert!(node < num_nodes, "Node {node} does not exist");
        let num_threads = thread_pool.current_num_threads();
        self.resize_offsets(num_threads);
        let epoch = self.next_epoch();

        let graph = self.graph;
        let label = &self.label;
        label[node].store(epoch, Ordering::Relaxed);
        self.curr[0] = node;
        let curr = self.curr.as_sync_slice();
        let sync = LevelSync::new(num_threads, &self.thread_offsets, 1);

        let results = thread_pool.broadcast(|ctx| {
            let tid = ctx.index();
            let mut found = vec![];
            let mut levels = 0;
            let mut reached = 0;
            loop {
                let len = sync.len();
                let pull = len as f64 >= PULL_RATIO * num_nodes as f64;
                if pull {
                    for v in partition(num_nodes, tid, num_threads) {
                        if label[v].load(Ordering::Relaxed) != epoch
                            && graph
                                .successors(v)
                                .iter()
                                .any(|&succ| label[succ].load(Ordering::Relaxed) == epoch)
                        {
                            found.push(v);
                        }
                    }
                } else {
                    for i in partition(len, tid, num_threads) {
                        // Safety: the frontier is only written during merges
                        let v = unsafe { curr[i].get() };
                        for &succ in graph.successors(v) {
                            if label[succ].swap(epoch, Ordering::Relaxed) != epoch {
                                found.push(succ);
                            }
                        }
                    }
                }

                // Pulled nodes are stamped after the level, so that the scan
                // only sees the previous frontier
                let next_len = sync.merge(tid, &found, curr, |v| {
                    if pull {
                        label[v].store(epoch, Ordering::Relaxed);
                    }
                });
                if next_len == 0 {
                    break;
                }
                levels += 1;
                reached += found.len();
                found.clear();
            }
            (levels, reached)
        });

        let eccentricity = results[0].0;
        let reached = 1 + results.iter().map(|&(_, reached)| reached).sum::<usize>();
        self.dist[node] = Bound::certified(eccentricity);
        Eccentricity {
            eccentricity,
            reached,
            farthest: self.curr[0],
        }
    }
}
