//! Digest finalization.
//!
//! Picks the block size from the total length, falls back to a finer
//! resolution when the preferred one has too few characters, then joins the
//! chosen resolution and the next coarser one into `<bs>:<primary>:<secondary>`.

use std::fmt;

use tracing::debug;

use crate::block_hash::{block_size, encode, SPAMSUM_LENGTH};
use crate::engine::FuzzyEngine;
use crate::error::{FuzzyError, Result};

/// A finished fuzzy hash: `<block_size>:<primary>:<secondary>`.
///
/// `primary` summarizes the input at `block_size`, `secondary` at twice that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuzzyDigest {
    pub block_size: u32,
    pub primary: String,
    pub secondary: String,
}

impl fmt::Display for FuzzyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.block_size, self.primary, self.secondary)
    }
}

fn push_chars(out: &mut String, chars: &[u8]) {
    // Digest characters are always drawn from the base64 alphabet.
    out.extend(chars.iter().map(|&c| c as char));
}

impl FuzzyEngine {
    /// Select the block size for the data seen so far and assemble the digest.
    ///
    /// Does not change the engine state.
    pub fn finalize(&self) -> Result<FuzzyDigest> {
        if self.bh_start >= self.bh_end {
            return Err(FuzzyError::Internal("empty active resolution range"));
        }
        let start = self.bh_start;
        if start > 0
            && (block_size(start) as u64 / 2) * (SPAMSUM_LENGTH as u64) >= self.total_size
        {
            return Err(FuzzyError::Internal(
                "retired a block size the input length still needs",
            ));
        }

        let mut bi = Self::ideal_block_index(start, self.total_size)?;
        debug!(
            total_size = self.total_size,
            block_size = block_size(bi),
            "initial block size estimate"
        );

        // Adapt the estimate to the resolutions actually tracked, preferring
        // one with a reasonably full digest.
        bi = bi.min(self.bh_end - 1);
        while bi > start && self.contexts[bi].dlen < SPAMSUM_LENGTH / 2 {
            bi -= 1;
        }
        debug!(block_size = block_size(bi), "final block size");

        // A non-zero rolling sum means the stream ended mid-piece.
        let mid_piece = self.roll.sum() != 0;
        let ctx = &self.contexts[bi];

        let mut primary = String::with_capacity(SPAMSUM_LENGTH);
        push_chars(&mut primary, ctx.chars());
        if mid_piece {
            primary.push(encode(ctx.h) as char);
        } else if let Some(c) = ctx.pending() {
            primary.push(c as char);
        }

        let mut secondary = String::with_capacity(SPAMSUM_LENGTH);
        if bi + 1 < self.bh_end {
            let next = &self.contexts[bi + 1];
            push_chars(&mut secondary, next.chars());
            if mid_piece {
                secondary.push(encode(next.h) as char);
            } else if let Some(c) = next.half() {
                secondary.push(c as char);
            }
        } else if mid_piece {
            secondary.push(encode(ctx.h) as char);
        }

        Ok(FuzzyDigest {
            block_size: block_size(bi),
            primary,
            secondary,
        })
    }

    /// The digest in its textual form.
    pub fn digest(&self) -> Result<String> {
        self.finalize().map(|d| d.to_string())
    }
}
