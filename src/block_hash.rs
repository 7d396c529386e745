//! Per-resolution block hash state.
//!
//! Each context hashes the bytes between two trigger points with a
//! multiplicative (FNV-style) hash and emits one base64 character per piece.

pub const SPAMSUM_LENGTH: usize = 10;
pub const MIN_BLOCKSIZE: u32 = 3;
pub const NUM_BLOCKHASHES: usize = 31;

pub const HASH_INIT: u32 = 0x2802_1967;
pub const HASH_PRIME: u32 = 0x0100_0193;

pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Marks an empty digest slot. Never a member of `ALPHABET`.
pub(crate) const UNSET: u8 = 0;

/// Nominal block size of resolution `index`.
#[inline]
pub fn block_size(index: usize) -> u32 {
    debug_assert!(index < NUM_BLOCKHASHES);
    MIN_BLOCKSIZE << index
}

#[inline]
pub(crate) fn encode(h: u32) -> u8 {
    ALPHABET[(h % 64) as usize]
}

#[inline]
fn sum_hash(c: u8, h: u32) -> u32 {
    h.wrapping_mul(HASH_PRIME) ^ c as u32
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockHashContext {
    pub(crate) h: u32,
    pub(crate) halfh: u32,
    pub(crate) digest: [u8; SPAMSUM_LENGTH],
    pub(crate) halfdigest: u8,
    pub(crate) dlen: usize,
}

impl BlockHashContext {
    /// Zeroed context for slots outside the active range.
    pub(crate) const INERT: BlockHashContext = BlockHashContext {
        h: 0,
        halfh: 0,
        digest: [UNSET; SPAMSUM_LENGTH],
        halfdigest: UNSET,
        dlen: 0,
    };

    pub(crate) fn new() -> Self {
        Self {
            h: HASH_INIT,
            halfh: HASH_INIT,
            ..Self::INERT
        }
    }

    /// Fresh digest state that continues the running hashes of `parent`.
    pub(crate) fn forked_from(parent: &BlockHashContext) -> Self {
        Self {
            h: parent.h,
            halfh: parent.halfh,
            ..Self::INERT
        }
    }

    #[inline]
    pub(crate) fn absorb(&mut self, c: u8) {
        self.h = sum_hash(c, self.h);
        self.halfh = sum_hash(c, self.halfh);
    }

    /// Write the current piece hash into the terminator slot and refresh
    /// the half digest. Returns false when the digest is already full, in
    /// which case the hashes keep running and later pieces merge into the
    /// last character.
    pub(crate) fn emit_and_reset(&mut self) -> bool {
        self.digest[self.dlen] = encode(self.h);
        self.halfdigest = encode(self.halfh);

        if self.dlen >= SPAMSUM_LENGTH - 1 {
            return false;
        }

        self.dlen += 1;
        self.digest[self.dlen] = UNSET;
        self.h = HASH_INIT;
        if self.dlen < SPAMSUM_LENGTH / 2 {
            self.halfh = HASH_INIT;
            self.halfdigest = UNSET;
        }
        true
    }

    /// Characters committed so far, excluding the terminator slot.
    pub(crate) fn chars(&self) -> &[u8] {
        &self.digest[..self.dlen]
    }

    /// The terminator slot, if a full digest has parked a character there.
    pub(crate) fn pending(&self) -> Option<u8> {
        Some(self.digest[self.dlen]).filter(|&c| c != UNSET)
    }

    pub(crate) fn half(&self) -> Option<u8> {
        Some(self.halfdigest).filter(|&c| c != UNSET)
    }
}
