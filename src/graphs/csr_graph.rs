/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::RandomAccessGraph;
use itertools::Itertools;
use thiserror::Error;

/// Errors detected when assembling a [`CsrGraph`] from its parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrError {
    /// The degree-cumulative function is empty.
    #[error("The degree-cumulative function must contain at least one element")]
    EmptyDcf,
    /// The degree-cumulative function does not start from zero.
    #[error("The degree-cumulative function starts at {0} instead of 0")]
    NonZeroStart(usize),
    /// The degree-cumulative function decreases at some node.
    #[error("The degree-cumulative function decreases at node {node}: {prev} > {next}")]
    Decreasing { node: usize, prev: usize, next: usize },
    /// The last value of the degree-cumulative function is not the number of
    /// arcs.
    #[error("The degree-cumulative function ends at {last}, but there are {num_arcs} arcs")]
    ArcsMismatch { last: usize, num_arcs: usize },
    /// A successor is not a valid node.
    #[error("Successor {succ} of node {node} is out of range (nodes: {num_nodes})")]
    SuccessorOutOfRange {
        node: usize,
        succ: usize,
        num_nodes: usize,
    },
}

/// A sparse-row graph.
///
/// The graph stores the degree-cumulative function (DCF), that is, the
/// sequence of offsets at which the successors of each node start, and the
/// concatenation of all successor lists. The successors of node `x` are
/// `successors[dcf[x]..dcf[x + 1]]`.
///
/// The graph is immutable: once built, offsets and successors never change,
/// so it can be shared freely among the threads of a parallel visit.
/// Undirected graphs are stored with both arcs of every edge, as built by
/// [`from_edges`](CsrGraph::from_edges).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl core::default::Default for CsrGraph {
    fn default() -> Self {
        Self {
            dcf: vec![0].into(),
            successors: vec![].into(),
        }
    }
}

impl CsrGraph {
    /// Creates an empty CSR graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new CSR graph from the given degree-cumulative function and
    /// successors.
    ///
    /// # Safety
    /// The degree-cumulative function must be non-empty, start from zero, be
    /// monotone, and end at the number of successors; successors must be
    /// smaller than the number of nodes. Use
    /// [`try_from_parts`](Self::try_from_parts) for a checked version.
    pub unsafe fn from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Self {
        Self { dcf, successors }
    }

    /// Creates a new CSR graph from the given degree-cumulative function and
    /// successors, checking their consistency.
    pub fn try_from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Result<Self, CsrError> {
        let (&first, &last) = dcf.first().zip(dcf.last()).ok_or(CsrError::EmptyDcf)?;
        if first != 0 {
            return Err(CsrError::NonZeroStart(first));
        }
        if let Some((node, (&prev, &next))) = dcf
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (prev, next))| prev > next)
        {
            return Err(CsrError::Decreasing { node, prev, next });
        }
        if last != successors.len() {
            return Err(CsrError::ArcsMismatch {
                last,
                num_arcs: successors.len(),
            });
        }
        let num_nodes = dcf.len() - 1;
        for (node, (&start, &end)) in dcf.iter().tuple_windows().enumerate() {
            if let Some(&succ) = successors[start..end].iter().find(|&&s| s >= num_nodes) {
                return Err(CsrError::SuccessorOutOfRange {
                    node,
                    succ,
                    num_nodes,
                });
            }
        }
        Ok(Self { dcf, successors })
    }

    /// Creates an undirected graph with `num_nodes` nodes from a list of
    /// edges.
    ///
    /// Every edge is stored as two arcs; loops are dropped and duplicate
    /// edges are merged, so the result is always a simple graph with sorted
    /// successor lists.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not smaller than `num_nodes`.
    pub fn from_edges(num_nodes: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut arcs = Vec::new();
        for (u, v) in edges {
            assert!(
                u < num_nodes && v < num_nodes,
                "Edge ({u}, {v}) is out of range (nodes: {num_nodes})"
            );
            if u != v {
                arcs.push((u, v));
                arcs.push((v, u));
            }
        }
        arcs.sort_unstable();
        arcs.dedup();

        let mut dcf = Vec::with_capacity(num_nodes + 1);
        dcf.push(0);
        let mut successors = Vec::with_capacity(arcs.len());
        let mut arcs = arcs.into_iter().peekable();
        for node in 0..num_nodes {
            while let Some((_, succ)) = arcs.next_if(|&(src, _)| src == node) {
                successors.push(succ);
            }
            dcf.push(successors.len());
        }
        // Safety: the degree-cumulative function is non-decreasing, ends at
        // the number of arcs, and all successors are smaller than num_nodes
        unsafe { Self::from_parts(dcf.into(), successors.into()) }
    }

    /// Returns the degree-cumulative function.
    pub fn dcf(&self) -> &[usize] {
        &self.dcf
    }

    /// Returns the concatenation of all successor lists.
    pub fn successors_slice(&self) -> &[usize] {
        &self.successors
    }

    /// Returns the maximum outdegree and the smallest node having it, or
    /// `None` if the graph has no nodes.
    pub fn max_outdegree(&self) -> Option<(usize, usize)> {
        (0..self.num_nodes())
            .map(|node| (self.outdegree(node), node))
            .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
    }

    pub fn into_inner(self) -> (Box<[usize]>, Box<[usize]>) {
        (self.dcf, self.successors)
    }
}

impl RandomAccessGraph for CsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.dcf.len() - 1
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.successors.len() as u64
    }

    #[inline(always)]
    fn successors(&self, node_id: usize) -> &[usize] {
        &self.successors[self.dcf[node_id]..self.dcf[node_id + 1]]
    }

    #[inline(always)]
    fn outdegree(&self, node_id: usize) -> usize {
        self.dcf[node_id + 1] - self.dcf[node_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::is_symmetric;

    #[test]
    fn test_from_edges() {
        let g = CsrGraph::from_edges(5, [(0, 1), (1, 0), (1, 2), (2, 2), (4, 2)]);
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_arcs(), 6);
        assert_eq!(g.successors(0), &[1]);
        assert_eq!(g.successors(1), &[0, 2]);
        assert_eq!(g.successors(2), &[1, 4]);
        assert!(g.successors(3).is_empty());
        assert_eq!(g.successors(4), &[2]);
        assert!(is_symmetric(&g));
        assert_eq!(g.max_outdegree(), Some((2, 1)));
    }

    #[test]
    fn test_empty() {
        let g = CsrGraph::new();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_arcs(), 0);
        assert_eq!(g.max_outdegree(), None);
    }

    #[test]
    fn test_try_from_parts() {
        assert!(CsrGraph::try_from_parts(vec![0, 1, 2].into(), vec![1, 0].into()).is_ok());
        assert_eq!(
            CsrGraph::try_from_parts(vec![].into(), vec![].into()),
            Err(CsrError::EmptyDcf)
        );
        assert_eq!(
            CsrGraph::try_from_parts(vec![1, 1].into(), vec![0].into()),
            Err(CsrError::NonZeroStart(1))
        );
        assert_eq!(
            CsrGraph::try_from_parts(vec![0, 2, 1].into(), vec![1, 0].into()),
            Err(CsrError::Decreasing {
                node: 1,
                prev: 2,
                next: 1
            })
        );
        assert_eq!(
            CsrGraph::try_from_parts(vec![0, 1, 1].into(), vec![1, 0].into()),
            Err(CsrError::ArcsMismatch {
                last: 1,
                num_arcs: 2
            })
        );
        assert_eq!(
            CsrGraph::try_from_parts(vec![0, 1, 2].into(), vec![1, 2].into()),
            Err(CsrError::SuccessorOutOfRange {
                node: 1,
                succ: 2,
                num_nodes: 2
            })
        );
    }
}
