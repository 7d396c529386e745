//! Context-triggered piecewise hashing (spamsum / ssdeep style fuzzy hashes).
//!
//! ```
//! let mut engine = spamsum::FuzzyEngine::new();
//! engine.update(b"The quick brown fox ");
//! engine.update(b"jumps over the lazy dog");
//! assert_eq!(engine.digest().unwrap(), "3:FJKKIUKact:FHIGi");
//! ```

pub mod block_hash;
pub mod digest;
pub mod engine;
pub mod error;
pub mod logging;
pub mod rolling_hash;
pub mod util;

pub use block_hash::{block_size, ALPHABET, MIN_BLOCKSIZE, NUM_BLOCKHASHES, SPAMSUM_LENGTH};
pub use digest::FuzzyDigest;
pub use engine::FuzzyEngine;
pub use error::{FuzzyError, Result};
pub use rolling_hash::RollingHash;
pub use util::{hash_bytes, hash_file, hash_file_mmap, hash_reader};
