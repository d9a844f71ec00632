/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use diamsweep::distances::diameter::*;
use diamsweep::graphs::csr_graph::CsrGraph;
use diamsweep::graphs::random::UniformRandom;
use diamsweep::thread_pool;
use diamsweep::traits::RandomAccessGraph;
use std::collections::VecDeque;

/// Sequential breadth-first visit returning the distances from `start`
/// (`usize::MAX` for unreachable nodes).
fn correct_distances(graph: &impl RandomAccessGraph, start: usize) -> Vec<usize> {
    let mut distances = vec![usize::MAX; graph.num_nodes()];
    let mut queue = VecDeque::new();
    distances[start] = 0;
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        for &succ in graph.successors(node) {
            if distances[succ] == usize::MAX {
                distances[succ] = distances[node] + 1;
                queue.push_back(succ);
            }
        }
    }
    distances
}

fn check_all_sources(graph: &CsrGraph, threads: usize) -> Result<()> {
    let thread_pool = thread_pool![threads];
    let mut computer = DiameterComputer::new(graph);
    for node in 0..graph.num_nodes() {
        let distances = correct_distances(graph, node);
        let reachable: Vec<_> = distances
            .iter()
            .copied()
            .filter(|&d| d != usize::MAX)
            .collect();
        let expected = reachable.iter().copied().max().unwrap_or(0);

        let ecc = computer.eccentricity(node, &thread_pool);
        assert_eq!(ecc.eccentricity, expected, "node {node}");
        assert_eq!(ecc.reached, reachable.len(), "node {node}");
        assert_eq!(distances[ecc.farthest], expected, "node {node}");
        assert_eq!(computer.bounds()[node], Bound::certified(expected));
    }
    assert_eq!(computer.num_sweeps(), graph.num_nodes() as u64);
    Ok(())
}

#[test]
fn test_sparse() -> Result<()> {
    // Frontiers stay small: all levels are pushed
    let graph = UniformRandom::new(1000, 1100, 0).generate();
    for threads in [1, 4] {
        check_all_sources(&graph, threads)?;
    }
    Ok(())
}

#[test]
fn test_dense() -> Result<()> {
    // Frontiers quickly exceed a tenth of the nodes: most levels are pulled
    let graph = UniformRandom::new(150, 2000, 1).generate();
    for threads in [1, 4] {
        check_all_sources(&graph, threads)?;
    }
    Ok(())
}

#[test]
fn test_mixed() -> Result<()> {
    // A long path attached to a dense core switches direction several times
    let mut edges: Vec<_> = (0..40)
        .flat_map(|i| (i + 1..40).map(move |j| (i, j)))
        .filter(|&(i, j)| (i + j) % 3 != 0)
        .collect();
    edges.extend((39..400).map(|i| (i, i + 1)));
    let graph = CsrGraph::from_edges(401, edges);
    for threads in [1, 3, 8] {
        check_all_sources(&graph, threads)?;
    }
    Ok(())
}

#[test]
fn test_more_threads_than_nodes() -> Result<()> {
    let graph = CsrGraph::from_edges(3, [(0, 1), (1, 2)]);
    check_all_sources(&graph, 8)
}
