//! Multi-resolution fuzzy hashing engine.
//!
//! Every byte is fed to the rolling hash and to each active block hash.
//! Whenever the rolling sum hits `bs - 1 (mod bs)` for a resolution, that
//! resolution emits one digest character. The active range of resolutions
//! grows by forking a finer one the first time a resolution triggers, and
//! shrinks by retiring the finest one once the input is known to be too long
//! for it.
use std::io;

use tracing::trace;

use crate::block_hash::{block_size, BlockHashContext, NUM_BLOCKHASHES, SPAMSUM_LENGTH};
use crate::error::{FuzzyError, Result};
use crate::rolling_hash::RollingHash;

/// Streaming fuzzy hash state for a single input.
///
/// Feed bytes with [`update`](Self::update) (or through [`io::Write`]) in any
/// chunking, then call [`digest`](Self::digest) once.
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    pub(crate) bh_start: usize,
    pub(crate) bh_end: usize,
    pub(crate) contexts: [BlockHashContext; NUM_BLOCKHASHES],
    pub(crate) total_size: u64,
    pub(crate) roll: RollingHash,
}

impl Default for FuzzyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyEngine {
    pub fn new() -> Self {
        let mut contexts = [BlockHashContext::INERT; NUM_BLOCKHASHES];
        contexts[0] = BlockHashContext::new();
        Self {
            bh_start: 0,
            bh_end: 1,
            contexts,
            total_size: 0,
            roll: RollingHash::new(),
        }
    }

    /// Number of bytes ingested so far.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        for &c in data {
            self.step(c);
        }
        self
    }

    /// Index of the smallest resolution at or above `start` whose block size
    /// can summarize `total_size` bytes in a full-length digest.
    pub fn ideal_block_index(start: usize, total_size: u64) -> Result<usize> {
        let mut bi = start;
        if bi >= NUM_BLOCKHASHES {
            return Err(FuzzyError::Internal("block index estimate starts out of range"));
        }
        while (block_size(bi) as u64) * (SPAMSUM_LENGTH as u64) < total_size {
            bi += 1;
            if bi >= NUM_BLOCKHASHES {
                return Err(FuzzyError::CapacityExceeded { total_size });
            }
        }
        Ok(bi)
    }

    fn step(&mut self, c: u8) {
        // Counted per byte so that chunk boundaries cannot shift a retirement.
        self.total_size = self.total_size.saturating_add(1);

        self.roll.add_byte(c);
        let sum = self.roll.sum();

        for ctx in &mut self.contexts[self.bh_start..self.bh_end] {
            ctx.absorb(c);
        }

        // bs(i+1) = 2 * bs(i), so a resolution can only trigger if every
        // finer one did. Stop at the first miss.
        let mut i = self.bh_start;
        while i < self.bh_end {
            let bs = block_size(i);
            if sum % bs != bs - 1 {
                break;
            }

            if self.contexts[i].dlen == 0 {
                self.try_fork();
            }

            if !self.contexts[i].emit_and_reset() {
                self.try_retire();
            }
            i += 1;
        }
    }

    fn try_fork(&mut self) {
        if self.bh_end >= NUM_BLOCKHASHES {
            return;
        }
        debug_assert!(self.bh_end > 0);

        let parent = self.contexts[self.bh_end - 1];
        self.contexts[self.bh_end] = BlockHashContext::forked_from(&parent);
        self.bh_end += 1;
        trace!(
            block_size = block_size(self.bh_end - 1),
            total_size = self.total_size,
            "forked resolution"
        );
    }

    fn try_retire(&mut self) {
        debug_assert!(self.bh_start < self.bh_end);

        // Need at least two working resolutions.
        if self.bh_end - self.bh_start < 2 {
            return;
        }
        // The length estimate would still select this block size or a smaller one.
        if (block_size(self.bh_start) as u64) * (SPAMSUM_LENGTH as u64) >= self.total_size {
            return;
        }
        // The fuller-digest fallback would still select this block size.
        if self.contexts[self.bh_start + 1].dlen < SPAMSUM_LENGTH / 2 {
            return;
        }

        self.contexts[self.bh_start] = BlockHashContext::INERT;
        self.bh_start += 1;
        trace!(
            block_size = block_size(self.bh_start),
            total_size = self.total_size,
            "retired finest resolution"
        );
    }
}

impl io::Write for FuzzyEngine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
