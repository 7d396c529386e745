use anyhow::{Context, Result};
use memmap2::Mmap;
use std::io::Read;
use std::path::Path;

use crate::digest::FuzzyDigest;
use crate::engine::FuzzyEngine;

/// Default read buffer for streaming input. 256 KB keeps syscall overhead
/// low compared to the 8 KB `BufReader` default.
pub const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Fuzzy-hash an in-memory byte slice.
pub fn hash_bytes(data: &[u8]) -> crate::Result<FuzzyDigest> {
    let mut engine = FuzzyEngine::new();
    engine.update(data);
    engine.finalize()
}

/// Stream everything from `reader` through the engine.
pub fn hash_reader<R: Read>(reader: R, buffer_size: usize) -> Result<FuzzyDigest> {
    let mut reader = std::io::BufReader::with_capacity(buffer_size.max(1), reader);
    let mut engine = FuzzyEngine::new();
    std::io::copy(&mut reader, &mut engine).context("Failed to read input")?;
    Ok(engine.finalize()?)
}

/// Stream-hash a file with a buffered reader.
pub fn hash_file(path: &Path, buffer_size: usize) -> Result<FuzzyDigest> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    hash_reader(file, buffer_size)
        .with_context(|| format!("Failed to hash file: {}", path.display()))
}

/// Hash a file through a read-only memory map.
pub fn hash_file_mmap(path: &Path) -> Result<FuzzyDigest> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    // Zero-length files cannot be mapped on every platform.
    if meta.len() == 0 {
        return Ok(hash_bytes(&[])?);
    }
    let mmap = mmap_file(path)?;
    hash_bytes(&mmap).with_context(|| format!("Failed to hash file: {}", path.display()))
}

/// Memory-map a file for read-only access.
///
/// # Safety
/// The mapping is read-only. Callers must not concurrently truncate or replace
/// the underlying file while the `Mmap` is live.
pub fn mmap_file(path: &Path) -> Result<Mmap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    // SAFETY: We only read from this mapping; the file is not modified while hashing.
    unsafe {
        Mmap::map(&file)
            .with_context(|| format!("Failed to memory-map file: {}", path.display()))
    }
}
