/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{GlobalArgs, NumThreadsArg, build_info, pretty_print_elapsed};
use crate::distances::diameter::{DiameterComputer, DiameterResult, Phase};
use crate::graphs::{csr_graph::CsrGraph, ecl};
use crate::traits::RandomAccessGraph;
use crate::utils::dot;
use anyhow::{Context, Result};
use clap::{Args, Parser};
use dsi_progress_logger::{ProgressLog, progress_logger};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments shared by all commands computing a diameter.
#[derive(Args, Debug)]
pub struct DiameterArgs {
    #[clap(flatten)]
    pub num_threads: NumThreadsArg,

    /// A directory where Graphviz snapshots of the computation are written
    /// (only for graphs with fewer than 40 nodes).
    #[arg(long)]
    pub dot: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "diamsweep", version=build_info::version_string())]
/// Computes the exact diameter of an undirected graph in ECL format.
///
/// The graph must be symmetric (every edge stored as two arcs). If the graph
/// is disconnected, the maximum diameter of its connected components is
/// computed. Results, the number of nodes reached by each winnowing visit,
/// and every improvement of the diameter are printed on standard output;
/// progress is logged on standard error.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
pub struct Cli {
    /// The graph file.
    pub graph: PathBuf,

    #[clap(flatten)]
    pub diameter: DiameterArgs,

    #[clap(flatten)]
    pub args: GlobalArgs,
}

pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);

    let graph = ecl::load(&cli.graph)
        .with_context(|| format!("Could not load graph {}", cli.graph.display()))?;
    println!("input: {}", cli.graph.display());
    print_stats(&graph);
    run(&graph, &cli.args, &cli.diameter)?;

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );
    Ok(())
}

/// Prints the number of nodes and edges of a graph.
pub(super) fn print_stats(graph: &impl RandomAccessGraph) {
    println!("nodes: {}", graph.num_nodes());
    println!("edges: {} ({})", graph.num_arcs() / 2, graph.num_arcs());
}

/// Computes the diameter of a graph, printing the results, and writing
/// snapshots if requested.
pub fn run(
    graph: &CsrGraph,
    global_args: &GlobalArgs,
    args: &DiameterArgs,
) -> Result<DiameterResult> {
    let thread_pool = super::get_thread_pool(args.num_threads.num_threads)?;
    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let dot_dir = match &args.dot {
        Some(dir) if graph.num_nodes() < dot::MAX_NODES => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create directory {}", dir.display()))?;
            Some(dir.as_path())
        }
        Some(_) => {
            log::warn!(
                "The graph has {} nodes: snapshots are written only for graphs with fewer than {} nodes",
                graph.num_nodes(),
                dot::MAX_NODES
            );
            None
        }
        None => None,
    };

    let mut computer = DiameterComputer::new(graph);
    let mut snapshot_error = None;
    let start = std::time::Instant::now();
    let result = computer.compute_with(&thread_pool, &mut pl, |phase, computer| {
        match phase {
            Phase::Winnowed { reached } => println!("winnowed: {reached} nodes reached"),
            Phase::Improved {
                diameter,
                from,
                to,
                reached,
                ..
            } => {
                println!("diameter: {diameter} (from node {from} to node {to})");
                if let Some(reached) = reached {
                    println!("winnowed: {reached} nodes reached");
                }
            }
            _ => {}
        }
        let Some(dir) = dot_dir else {
            return;
        };
        if snapshot_error.is_some() {
            return;
        }
        let path = dir.join(format!("diam{}.dot", phase.index()));
        if let Err(e) = write_snapshot(&path, |writer| {
            dot::write_bounds(
                writer,
                computer.graph(),
                computer.bounds(),
                phase.title(),
                phase.node(),
            )
        }) {
            snapshot_error = Some(e);
        }
    });
    let elapsed = start.elapsed();
    if let Some(e) = snapshot_error {
        return Err(e);
    }

    if !result.connected {
        println!(
            "graph is disconnected: {} nodes reachable from the pivot",
            result.component_size
        );
    }
    println!(
        "chains: {} (longest: {})",
        result.chains, result.longest_chain
    );
    println!("diameter bounds: {}", result.history.iter().join(" -> "));
    println!("sweeps: {}", result.sweeps);
    println!("final diameter: {}", result.diameter);
    println!();
    println!("runtime: {:.4} s", elapsed.as_secs_f64());

    if let Some(dir) = dot_dir {
        let eccentricities: Vec<_> = (0..graph.num_nodes())
            .map(|node| computer.eccentricity(node, &thread_pool).eccentricity)
            .collect();
        write_snapshot(&dir.join("final.dot"), |writer| {
            dot::write_eccentricities(writer, graph, &eccentricities, "Eccentricities")
        })?;
    }

    Ok(result)
}

fn write_snapshot(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create snapshot {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Could not write snapshot {}", path.display()))
}
