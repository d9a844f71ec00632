/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Exact diameter of undirected graphs by pruned breadth-first visits.
//!
//! The diameter is certified by computing the eccentricity of a small number
//! of nodes. Every node carries a [`Bound`], which is initially unknown; the
//! computation ends when all nodes have been settled. The phases are:
//!
//! 1. a *double sweep*: a visit from the node of maximum degree (the
//!    *pivot*) finds a far node, and a visit from that node gives the first
//!    lower bound on the diameter;
//! 2. if the graph turns out to be a clique, all nodes are settled at once;
//! 3. *winnowing*: a visit of bounded radius from the pivot retires the
//!    nodes that cannot be the endpoint of a longer shortest path;
//! 4. *chain collapsing*: paths of nodes of degree at most two hanging from
//!    the graph are settled in closed form;
//! 5. until some node is unknown, the eccentricity of the unknown node with
//!    the smallest index is computed; if it improves the diameter, the
//!    pivot is winnowed again with the new bound, and the nodes certified
//!    with the old diameter propagate the new one; otherwise, the node
//!    propagates its eccentricity to its neighborhood by the triangle
//!    inequality.
//!
//! Visits are parallel and direction optimizing (see
//! [`DiameterComputer::eccentricity`]); propagations are sequential.
//!
//! If the graph is disconnected, a warning is logged, and the result is the
//! maximum diameter of the connected components.
//!
//! # Examples
//!
//! ```
//! use diamsweep::distances::diameter;
//! use diamsweep::graphs::csr_graph::CsrGraph;
//! use diamsweep::thread_pool;
//! use dsi_progress_logger::no_logging;
//!
//! // A star with five leaves
//! let graph = CsrGraph::from_edges(6, (1..6).map(|leaf| (0, leaf)));
//! let result = diameter::run(&graph, &thread_pool![], no_logging![]);
//! assert_eq!(result.diameter, 2);
//! assert!(result.connected);
//! ```
//!
//! The computer can be used directly to observe the computation, or to
//! compute single eccentricities:
//!
//! ```
//! use diamsweep::distances::diameter::*;
//! use diamsweep::graphs::csr_graph::CsrGraph;
//! use diamsweep::thread_pool;
//! use dsi_progress_logger::no_logging;
//!
//! let graph = CsrGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
//! let thread_pool = thread_pool![2];
//! let mut computer = DiameterComputer::new(&graph);
//! let mut rounds = 0;
//! let result = computer.compute_with(&thread_pool, no_logging![], |phase, _| {
//!     if let Phase::Source { .. } = phase {
//!         rounds += 1;
//!     }
//! });
//! assert_eq!(result.diameter, 3);
//! // Paths need no visit beyond the first three
//! assert_eq!(rounds, 0);
//! assert_eq!(computer.eccentricity(1, &thread_pool).eccentricity, 2);
//! ```

mod bound;
mod chains;
mod computer;
mod eccentricity;
mod eliminate;
mod frontier;
mod winnow;

pub use bound::*;
pub use computer::*;
pub use eccentricity::*;

use crate::traits::RandomAccessGraph;
use dsi_progress_logger::ProgressLog;
use rayon::ThreadPool;

/// Computes the exact diameter of a symmetric graph.
///
/// This is a shortcut for [`DiameterComputer::compute`].
pub fn run(
    graph: &(impl RandomAccessGraph + Sync),
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> DiameterResult {
    DiameterComputer::new(graph).compute(thread_pool, pl)
}
