/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Loading and storing graphs in ECL binary format.
//!
//! An ECL file is a sequence of 32-bit little-endian signed integers:
//! - the number of nodes `n` (at least one);
//! - the number of arcs `m` (undirected edges are stored as two arcs);
//! - the `n + 1` offsets of the successor lists;
//! - the `m` successors;
//! - optionally, `m` arc weights, which are ignored by this crate.

use super::csr_graph::{CsrError, CsrGraph};
use crate::traits::RandomAccessGraph;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can happen while reading an ECL file.
#[derive(Error, Debug)]
pub enum EclError {
    #[error("I/O error while accessing the graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("The file ends while reading the {0}")]
    Truncated(&'static str),
    #[error("The number of nodes must be at least 1, but is {0}")]
    InvalidNodes(i32),
    #[error("The number of arcs must be non-negative, but is {0}")]
    InvalidArcs(i32),
    #[error("Negative value {value} in the {section}")]
    Negative { section: &'static str, value: i32 },
    #[error("The file contains {0} bytes after the successors that are not a weight section")]
    TrailingBytes(u64),
    #[error("Inconsistent graph structure: {0}")]
    Structure(#[from] CsrError),
    #[error("The graph has {0} nodes or arcs, which cannot be represented in ECL format")]
    TooLarge(usize),
}

/// The maximum number of values reserved before reading them.
const MAX_RESERVE: usize = 1 << 20;

struct IntReader<R> {
    inner: R,
}

impl<R: Read> IntReader<R> {
    fn read_i32(&mut self, section: &'static str) -> Result<i32, EclError> {
        let mut buf = [0; 4];
        self.inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => EclError::Truncated(section),
            _ => EclError::Io(e),
        })?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_usizes(&mut self, len: usize, section: &'static str) -> Result<Box<[usize]>, EclError> {
        // Counts come from the header: the file might be much shorter
        let mut values = Vec::with_capacity(len.min(MAX_RESERVE));
        for _ in 0..len {
            let value = self.read_i32(section)?;
            if value < 0 {
                return Err(EclError::Negative { section, value });
            }
            values.push(value as usize);
        }
        Ok(values.into_boxed_slice())
    }
}

/// Reads a graph in ECL format from a reader.
pub fn read(reader: impl Read) -> Result<CsrGraph, EclError> {
    let mut reader = IntReader { inner: reader };
    let num_nodes = reader.read_i32("number of nodes")?;
    if num_nodes < 1 {
        return Err(EclError::InvalidNodes(num_nodes));
    }
    let num_arcs = reader.read_i32("number of arcs")?;
    if num_arcs < 0 {
        return Err(EclError::InvalidArcs(num_arcs));
    }
    let (num_nodes, num_arcs) = (num_nodes as usize, num_arcs as usize);

    let dcf = reader.read_usizes(num_nodes + 1, "offsets")?;
    let successors = reader.read_usizes(num_arcs, "successors")?;

    // The weight section, if present, must be complete
    let mut rest = Vec::new();
    reader.inner.read_to_end(&mut rest)?;
    if !rest.is_empty() && rest.len() != num_arcs * 4 {
        return Err(EclError::TrailingBytes(rest.len() as u64));
    }

    Ok(CsrGraph::try_from_parts(dcf, successors)?)
}

/// Loads a graph in ECL format from a file.
pub fn load(path: impl AsRef<Path>) -> Result<CsrGraph, EclError> {
    let file = File::open(path.as_ref())?;
    read(BufReader::new(file))
}

/// Writes a graph in ECL format, without weights.
pub fn write(graph: &impl RandomAccessGraph, mut writer: impl Write) -> Result<(), EclError> {
    let to_i32 = |x: usize| i32::try_from(x).map_err(|_| EclError::TooLarge(x));
    let num_nodes = graph.num_nodes();
    let num_arcs = graph.num_arcs() as usize;
    writer.write_all(&to_i32(num_nodes)?.to_le_bytes())?;
    writer.write_all(&to_i32(num_arcs)?.to_le_bytes())?;
    let mut offset = 0;
    writer.write_all(&0_i32.to_le_bytes())?;
    for node in 0..num_nodes {
        offset += graph.outdegree(node);
        writer.write_all(&to_i32(offset)?.to_le_bytes())?;
    }
    for node in 0..num_nodes {
        for &succ in graph.successors(node) {
            writer.write_all(&to_i32(succ)?.to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Stores a graph in ECL format in a file, without weights.
pub fn store(graph: &impl RandomAccessGraph, path: impl AsRef<Path>) -> Result<(), EclError> {
    let file = File::create(path.as_ref())?;
    write(graph, BufWriter::new(file))
}
