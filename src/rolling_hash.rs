//! Rolling hash used to find context-triggered boundaries.
//!
//! Keeps two sums over a 7-byte sliding window (h1 and h2) plus a shift-xor
//! history term (h3). All arithmetic wraps mod 2^32.
//! Supports O(1) updates: the byte leaving the window is subtracted as the new one is added.
use std::io;

pub const ROLLING_WINDOW: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct RollingHash {
    window: [u8; ROLLING_WINDOW],
    h1: u32,
    h2: u32,
    h3: u32,
    /// Bytes seen so far; only used to index `window`.
    n: usize,
}

impl RollingHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slide the window forward by one byte.
    #[inline]
    pub fn add_byte(&mut self, c: u8) {
        let c32 = c as u32;
        let slot = self.n % ROLLING_WINDOW;

        self.h2 = self.h2.wrapping_sub(self.h1);
        self.h2 = self.h2.wrapping_add((ROLLING_WINDOW as u32).wrapping_mul(c32));

        self.h1 = self.h1.wrapping_add(c32);
        self.h1 = self.h1.wrapping_sub(self.window[slot] as u32);

        self.window[slot] = c;
        self.n = self.n.wrapping_add(1);

        self.h3 = (self.h3 << 5) ^ c32;
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        for &c in data {
            self.add_byte(c);
        }
    }

    #[inline]
    pub fn sum(&self) -> u32 {
        self.h1.wrapping_add(self.h2).wrapping_add(self.h3)
    }
}

impl io::Write for RollingHash {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_same_input_same_sum() {
        let mut h1 = RollingHash::new();
        h1.add_bytes(b"foobar");
        let v1 = h1.sum();

        let mut h2 = RollingHash::new();
        h2.add_bytes(b"foobar");
        let v2 = h2.sum();
        assert_eq!(v1, v2, "rolling hashes should match");

        h2.add_bytes(b"1");
        assert_ne!(v1, h2.sum());
    }

    #[test]
    fn test_known_values() {
        let mut h = RollingHash::new();
        assert_eq!(h.sum(), 0);
        h.add_bytes(b"foobar");
        assert_eq!(h.sum(), 0xcac6_11ee);
        h.add_byte(b'1');
        assert_eq!(h.sum(), 1_489_016_604);
    }

    #[test]
    fn test_zero_bytes_keep_sum_at_zero() {
        let mut h = RollingHash::new();
        h.add_bytes(&[0u8; 64]);
        assert_eq!(h.sum(), 0);
    }

    #[test]
    fn test_window_forgets_old_bytes_in_h1_h2() {
        // Once a byte leaves the window only h3 still remembers it, and h3
        // shifts it out after seven more bytes as well.
        let tail = b"0123456789abcdef";
        let mut a = RollingHash::new();
        a.add_bytes(b"xxxxxxxx");
        a.add_bytes(tail);

        let mut b = RollingHash::new();
        b.add_bytes(b"yyyyyyyy");
        b.add_bytes(tail);

        assert_eq!(a.sum(), b.sum());
    }

    #[test]
    fn test_write_matches_add_bytes() {
        let mut direct = RollingHash::new();
        direct.add_bytes(b"Hello, World!");

        let mut sink = RollingHash::new();
        sink.write_all(b"Hello, ").unwrap();
        sink.write_all(b"World!").unwrap();

        assert_eq!(direct.sum(), sink.sum());
    }
}
