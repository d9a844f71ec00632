/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]
#![allow(clippy::type_complexity)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod distances;
pub mod graphs;
pub mod traits;

#[macro_use]
pub mod utils;

pub mod prelude {
    pub use crate::distances::diameter;
    pub use crate::graphs::prelude::*;
    pub use crate::traits::*;
}
