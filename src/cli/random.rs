/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::diameter::{DiameterArgs, print_stats, run};
use super::{GlobalArgs, build_info, pretty_print_elapsed};
use crate::graphs::{
    ecl,
    random::{DEFAULT_SEED, UniformRandom},
};
use anyhow::{Context, Result, ensure};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diamsweep-random", version=build_info::version_string())]
/// Computes the exact diameter of a uniform random graph.
///
/// The graph has the given number of nodes and edges, drawn uniformly at
/// random without loops or multiple edges. Each additional pair of nodes
/// toggles an edge: the edge is removed if present, and added otherwise.
pub struct Cli {
    /// The number of nodes (at least 2).
    pub nodes: usize,

    /// The number of edges (at most nodes * (nodes - 1) / 2).
    pub edges: usize,

    /// Pairs of nodes whose edge is toggled after the random edges have been
    /// generated.
    pub toggle: Vec<usize>,

    /// The seed of the pseudorandom number generator.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Store the generated graph in ECL format in this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

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

    ensure!(cli.nodes >= 2, "The number of nodes must be at least 2");
    let max_edges = UniformRandom::max_edges(cli.nodes);
    ensure!(
        cli.edges <= max_edges,
        "The number of edges must be between 0 and {max_edges}"
    );
    ensure!(
        cli.toggle.len() % 2 == 0,
        "Toggled edges must be given as pairs of nodes"
    );

    let mut generator = UniformRandom::new(cli.nodes, cli.edges, cli.seed);
    for pair in cli.toggle.chunks_exact(2) {
        let (src, dst) = (pair[0], pair[1]);
        ensure!(
            src < cli.nodes,
            "Source must be between 0 and {}",
            cli.nodes - 1
        );
        ensure!(
            dst < cli.nodes,
            "Destination must be between 0 and {}",
            cli.nodes - 1
        );
        ensure!(src != dst, "Cannot toggle the loop on node {src}");
        generator = generator.toggle(src, dst);
    }
    let graph = generator.generate();
    print_stats(&graph);

    if let Some(output) = &cli.output {
        ecl::store(&graph, output)
            .with_context(|| format!("Could not store graph in {}", output.display()))?;
        log::info!("Graph stored in {}", output.display());
    }

    run(&graph, &cli.args, &cli.diameter)?;

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );
    Ok(())
}
