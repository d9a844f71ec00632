/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The graph trait used by the distance algorithms.

use impl_tools::autoimpl;
use std::rc::Rc;

/// An immutable graph providing random access to successor lists.
///
/// Nodes are numbered from zero to [`num_nodes`](RandomAccessGraph::num_nodes)
/// (excluded). Undirected graphs are represented by symmetric graphs, in
/// which every edge appears as two arcs; [`num_arcs`](RandomAccessGraph::num_arcs)
/// counts arcs, not edges.
///
/// Implementations must not change their content while borrowed: the
/// algorithms of this crate read successor lists concurrently from several
/// threads.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S, Rc<S>)]
pub trait RandomAccessGraph {
    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs.
    fn num_arcs(&self) -> u64;

    /// Returns the successors of a node.
    fn successors(&self, node_id: usize) -> &[usize];

    /// Returns the number of successors of a node.
    #[inline(always)]
    fn outdegree(&self, node_id: usize) -> usize {
        self.successors(node_id).len()
    }

    /// Returns whether there is an arc going from `src_node_id` to `dst_node_id`.
    ///
    /// Note that the default implementation performs a linear scan.
    fn has_arc(&self, src_node_id: usize, dst_node_id: usize) -> bool {
        self.successors(src_node_id).contains(&dst_node_id)
    }
}

/// Returns true if every arc of the graph has a reverse arc, that is, if the
/// graph represents an undirected graph.
///
/// The check performs a linear scan of the successors of each target, so it
/// is meant for tests and debug assertions.
pub fn is_symmetric(graph: &impl RandomAccessGraph) -> bool {
    (0..graph.num_nodes()).all(|node| {
        graph
            .successors(node)
            .iter()
            .all(|&succ| graph.has_arc(succ, node))
    })
}
