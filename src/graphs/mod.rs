/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod csr_graph;
pub mod ecl;
pub mod random;

pub mod prelude {
    pub use super::csr_graph::CsrGraph;
    pub use super::ecl;
    pub use super::random::UniformRandom;
}
