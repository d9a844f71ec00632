/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fmt::{self, Display};

/// The settlement state of a node, as stored by a
/// [`DiameterComputer`](super::DiameterComputer).
///
/// A bound is a single 32-bit word whose range is split into three bands:
///
/// - [`UNKNOWN`](Bound::UNKNOWN), the maximum value, marks nodes whose
///   eccentricity might still exceed the current diameter; these are the only
///   candidate sources for a new breadth-first visit;
/// - *certified* values `0..=`[`MAX_CERTIFIED`](Bound::MAX_CERTIFIED) are upper
///   bounds on the eccentricity of the node that do not exceed the diameter
///   known when they were written (the exact eccentricity if the node has
///   been visited, or if it is the end of a closed chain);
/// - *pruned* values, between the two, mark nodes that have been ruled out by
///   a triangle-inequality argument; the number is only a position in an
///   elimination wave and never an eccentricity.
///
/// Pruned values closer to [`UNKNOWN`](Bound::UNKNOWN) are larger, so taking
/// the minimum of two bounds always keeps the most informative one, and
/// [`succ`](Bound::succ) moves one step along an elimination wave in both
/// bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Bound(u32);

/// The decoded form of a [`Bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// The node has not been settled.
    Unknown,
    /// The eccentricity of the node is at most the given value.
    Certified(usize),
    /// The node has been ruled out without computing its eccentricity.
    Pruned,
}

impl Bound {
    /// The bound of nodes that have not been settled yet.
    pub const UNKNOWN: Self = Self(u32::MAX);
    /// The largest certified value.
    pub const MAX_CERTIFIED: usize = (u32::MAX / 2) as usize;
    /// The largest slack of a pruned bound.
    pub const MAX_SLACK: usize = (u32::MAX - 2 - u32::MAX / 2) as usize;

    /// Returns a certified bound.
    ///
    /// # Panics
    ///
    /// Panics if `value` is larger than [`MAX_CERTIFIED`](Self::MAX_CERTIFIED).
    #[inline(always)]
    pub fn certified(value: usize) -> Self {
        assert!(
            value <= Self::MAX_CERTIFIED,
            "Certified bound {value} is too large"
        );
        Self(value as u32)
    }

    /// Returns a pruned bound with the given slack.
    ///
    /// `pruned(0)` is the largest pruned bound; the elimination wave started
    /// at `pruned(k)` stops after `k` steps.
    ///
    /// # Panics
    ///
    /// Panics if `slack` is larger than [`MAX_SLACK`](Self::MAX_SLACK).
    #[inline(always)]
    pub fn pruned(slack: usize) -> Self {
        assert!(slack <= Self::MAX_SLACK, "Pruned slack {slack} is too large");
        Self(u32::MAX - 1 - slack as u32)
    }

    /// Returns the next bound along an elimination wave.
    #[inline(always)]
    pub fn succ(self) -> Self {
        debug_assert!(self < Self::pruned(0), "No successor for {self:?}");
        Self(self.0 + 1)
    }

    #[inline(always)]
    pub fn kind(self) -> BoundKind {
        if self == Self::UNKNOWN {
            BoundKind::Unknown
        } else if self.0 as usize > Self::MAX_CERTIFIED {
            BoundKind::Pruned
        } else {
            BoundKind::Certified(self.0 as usize)
        }
    }

    #[inline(always)]
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    #[inline(always)]
    pub fn is_pruned(self) -> bool {
        self.kind() == BoundKind::Pruned
    }

    /// Returns the value of a certified bound, or `None` for unknown and
    /// pruned bounds.
    #[inline(always)]
    pub fn certified_value(self) -> Option<usize> {
        match self.kind() {
            BoundKind::Certified(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            BoundKind::Unknown => write!(f, "?"),
            BoundKind::Certified(value) => write!(f, "{value}"),
            BoundKind::Pruned => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Bound::UNKNOWN.kind(), BoundKind::Unknown);
        assert_eq!(Bound::certified(0).kind(), BoundKind::Certified(0));
        assert_eq!(
            Bound::certified(Bound::MAX_CERTIFIED).kind(),
            BoundKind::Certified(Bound::MAX_CERTIFIED)
        );
        assert_eq!(Bound::pruned(0).kind(), BoundKind::Pruned);
        assert_eq!(Bound::pruned(Bound::MAX_SLACK).kind(), BoundKind::Pruned);
        assert_eq!(Bound::pruned(7).certified_value(), None);
        assert_eq!(Bound::UNKNOWN.certified_value(), None);
        assert_eq!(Bound::certified(7).certified_value(), Some(7));
    }

    #[test]
    fn test_order() {
        assert!(Bound::certified(Bound::MAX_CERTIFIED) < Bound::pruned(Bound::MAX_SLACK));
        assert!(Bound::pruned(3) < Bound::pruned(2));
        assert!(Bound::pruned(0) < Bound::UNKNOWN);
        assert_eq!(Bound::pruned(3).min(Bound::UNKNOWN), Bound::pruned(3));
        assert_eq!(Bound::pruned(3).min(Bound::certified(9)), Bound::certified(9));
    }

    #[test]
    fn test_succ() {
        assert_eq!(Bound::certified(4).succ(), Bound::certified(5));
        assert_eq!(Bound::pruned(4).succ(), Bound::pruned(3));
        assert!(Bound::pruned(1).succ().is_pruned());
    }

    #[test]
    fn test_display() {
        assert_eq!(Bound::UNKNOWN.to_string(), "?");
        assert_eq!(Bound::certified(3).to_string(), "3");
        assert_eq!(Bound::pruned(3).to_string(), "-");
    }

    #[test]
    #[should_panic]
    fn test_certified_overflow() {
        Bound::certified(Bound::MAX_CERTIFIED + 1);
    }
}
