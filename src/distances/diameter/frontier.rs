/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crossbeam_utils::CachePadded;
use std::ops::Range;
use std::sync::{
    Barrier,
    atomic::{AtomicUsize, Ordering},
};
use sync_cell_slice::SyncCell;

/// Returns the range of `0..len` assigned to thread `tid` out of `threads`.
#[inline(always)]
pub(super) fn partition(len: usize, tid: usize, threads: usize) -> Range<usize> {
    let start = (tid as u128 * len as u128 / threads as u128) as usize;
    let end = ((tid + 1) as u128 * len as u128 / threads as u128) as usize;
    start..end
}

/// Level synchronization for the threads of a
/// [broadcast](rayon::ThreadPool::broadcast) visit.
///
/// Each thread collects the nodes it discovers in a private buffer; at the
/// end of a level, [`merge`](LevelSync::merge) computes the exclusive prefix
/// sum of the buffer sizes and copies every buffer into its own slice of the
/// shared frontier, without locks.
pub(super) struct LevelSync<'a> {
    barrier: Barrier,
    offsets: &'a [CachePadded<AtomicUsize>],
    len: AtomicUsize,
}

impl<'a> LevelSync<'a> {
    /// Creates a new synchronizer for `num_threads` threads.
    ///
    /// `offsets` must have length `num_threads + 1` and `len` is the size of
    /// the initial frontier.
    pub(super) fn new(
        num_threads: usize,
        offsets: &'a [CachePadded<AtomicUsize>],
        len: usize,
    ) -> Self {
        debug_assert_eq!(offsets.len(), num_threads + 1);
        offsets[0].store(0, Ordering::Relaxed);
        Self {
            barrier: Barrier::new(num_threads),
            offsets,
            len: AtomicUsize::new(len),
        }
    }

    /// Returns the size of the current frontier.
    #[inline(always)]
    pub(super) fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Merges the buffers of all threads into `frontier`, calling `on_copy`
    /// on each node copied by the current thread, and returns the size of the
    /// new frontier.
    ///
    /// Must be called by all threads. When the new frontier is empty,
    /// `frontier` is left untouched, so it still contains the last non-empty
    /// level.
    pub(super) fn merge(
        &self,
        tid: usize,
        found: &[usize],
        frontier: &[SyncCell<usize>],
        mut on_copy: impl FnMut(usize),
    ) -> usize {
        let num_threads = self.offsets.len() - 1;
        self.offsets[tid + 1].store(found.len(), Ordering::Relaxed);

        if self.barrier.wait().is_leader() {
            let mut sum = 0;
            for offset in &self.offsets[1..] {
                sum += offset.load(Ordering::Relaxed);
                offset.store(sum, Ordering::Relaxed);
            }
            self.len.store(sum, Ordering::Relaxed);
        }
        self.barrier.wait();

        let len = self.len();
        if len == 0 {
            return 0;
        }
        debug_assert!(tid < num_threads);
        let start = self.offsets[tid].load(Ordering::Relaxed);
        for (i, &node) in found.iter().enumerate() {
            on_copy(node);
            // Safety: the slices of different threads are disjoint
            unsafe { frontier[start + i].set(node) };
        }
        // The next level reads the frontier
        self.barrier.wait();
        len
    }
}
