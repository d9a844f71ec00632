/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graphviz snapshots of small graphs.
//!
//! Snapshots show the state of a [`DiameterComputer`](crate::distances::diameter::DiameterComputer):
//! nodes are filled in white if unknown, in green if certified, and in blue
//! if pruned; an optional marked node is filled in red.

use crate::distances::diameter::{Bound, BoundKind};
use crate::traits::RandomAccessGraph;
use std::io::{self, Write};

/// Snapshots are written only for graphs with fewer nodes.
pub const MAX_NODES: usize = 40;

const RED: &str = "#ff0000";
const BLUE: &str = "#9090ff";
const GREEN: &str = "#00ff00";
const WHITE: &str = "#ffffff";
const GRAY: &str = "#d0d0d0";

fn write_edges(writer: &mut impl Write, graph: &impl RandomAccessGraph) -> io::Result<()> {
    for node in 0..graph.num_nodes() {
        for &succ in graph.successors(node) {
            if node < succ {
                writeln!(writer, "  {node} -- {succ}")?;
            }
        }
    }
    writeln!(writer, "}}")
}

fn write_header(writer: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(writer, "graph {{")?;
    writeln!(writer, "  label = \"{}\";", title.replace('"', "\\\""))?;
    writeln!(writer, "  labelloc = \"t\";")
}

/// Writes the graph with nodes colored by their bound.
pub fn write_bounds(
    mut writer: impl Write,
    graph: &impl RandomAccessGraph,
    bounds: &[Bound],
    title: &str,
    mark: Option<usize>,
) -> io::Result<()> {
    write_header(&mut writer, title)?;
    for (node, bound) in bounds.iter().enumerate().take(graph.num_nodes()) {
        let color = if mark == Some(node) {
            RED
        } else {
            match bound.kind() {
                BoundKind::Unknown => WHITE,
                BoundKind::Certified(_) => GREEN,
                BoundKind::Pruned => BLUE,
            }
        };
        writeln!(
            writer,
            "  {node} [style=filled, fillcolor=\"{color}\", label=\"{node}\"]"
        )?;
    }
    write_edges(&mut writer, graph)
}

/// Writes the graph with nodes labeled by their eccentricity.
pub fn write_eccentricities(
    mut writer: impl Write,
    graph: &impl RandomAccessGraph,
    eccentricities: &[usize],
    title: &str,
) -> io::Result<()> {
    write_header(&mut writer, title)?;
    for (node, ecc) in eccentricities.iter().enumerate().take(graph.num_nodes()) {
        writeln!(
            writer,
            "  {node} [style=filled, fillcolor=\"{GRAY}\", label=\"{ecc}\"]"
        )?;
    }
    write_edges(&mut writer, graph)
}
