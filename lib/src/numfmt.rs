//! Stack-only number formatting for `no_std` contexts.
//!
//! Every function writes into a caller-provided `&mut [u8]` buffer and returns
//! a `&[u8]` sub-slice of the formatted result (NUL-terminated so it can be
//! handed to console primitives that stop at NUL). No heap, no allocator.
//!
//! Hex output is fixed-width, uppercase and unprefixed, the way the monitor
//! prints table fields:
//!
//! ```ignore
//! let mut buf = NumBuf::<9>::new();
//! let text = buf.format_hex_u32(0x74);   // b"00000074\0"
//! let byte = buf.format_hex_u8(0xAB);    // b"AB\0"
//! ```

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Format the low `digits` nibbles of `value` into `buf`, most significant first.
///
/// Returns `b"\0"` (or an empty slice) if the buffer cannot hold the digits
/// plus the NUL terminator.
fn fmt_hex_fixed(value: u64, digits: usize, buf: &mut [u8]) -> &[u8] {
    let needed = digits + 1;
    if buf.len() < needed {
        if !buf.is_empty() {
            buf[0] = 0;
        }
        return &buf[..buf.len().min(1)];
    }

    for (i, slot) in buf[..digits].iter_mut().enumerate() {
        let shift = (digits - 1 - i) * 4;
        *slot = HEX_DIGITS[((value >> shift) & 0xF) as usize];
    }
    buf[digits] = 0;
    &buf[..needed]
}

/// Format a `u8` as a two-character hex string (no prefix) into `buf`.
///
/// Produces e.g. `"FF\0"`. Buffer needs at least 3 bytes.
pub fn fmt_hex_u8(value: u8, buf: &mut [u8]) -> &[u8] {
    fmt_hex_fixed(value as u64, 2, buf)
}

/// Format a `u16` as four hex digits. Buffer needs at least 5 bytes.
pub fn fmt_hex_u16(value: u16, buf: &mut [u8]) -> &[u8] {
    fmt_hex_fixed(value as u64, 4, buf)
}

/// Format a `u32` as eight hex digits. Buffer needs at least 9 bytes.
pub fn fmt_hex_u32(value: u32, buf: &mut [u8]) -> &[u8] {
    fmt_hex_fixed(value as u64, 8, buf)
}

// ---------------------------------------------------------------------------
// NumBuf --- typed stack buffer helper
// ---------------------------------------------------------------------------

/// Stack-allocated formatting buffer.
///
/// `N` should be sized for the largest formatted output expected; a
/// `NumBuf::<9>` holds any of the hex widths (8 digits + NUL).
pub struct NumBuf<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> NumBuf<N> {
    #[inline]
    pub const fn new() -> Self {
        Self { buf: [0u8; N] }
    }

    /// Format a `u8` as two hex digits (no prefix).
    #[inline]
    pub fn format_hex_u8(&mut self, value: u8) -> &[u8] {
        fmt_hex_u8(value, &mut self.buf)
    }

    /// Format a `u16` as four hex digits (no prefix).
    #[inline]
    pub fn format_hex_u16(&mut self, value: u16) -> &[u8] {
        fmt_hex_u16(value, &mut self.buf)
    }

    /// Format a `u32` as eight hex digits (no prefix).
    #[inline]
    pub fn format_hex_u32(&mut self, value: u32) -> &[u8] {
        fmt_hex_u32(value, &mut self.buf)
    }
}

impl<const N: usize> Default for NumBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_widths() {
        let mut buf = NumBuf::<9>::new();
        assert_eq!(buf.format_hex_u8(0x0A), b"0A\0");
        assert_eq!(buf.format_hex_u16(0x604), b"0604\0");
        assert_eq!(buf.format_hex_u32(0x74), b"00000074\0");
        assert_eq!(buf.format_hex_u32(0xDEAD_BEEF), b"DEADBEEF\0");
    }

    #[test]
    fn test_hex_buffer_too_small() {
        let mut small = [0xFFu8; 4];
        assert_eq!(fmt_hex_u32(0x1234, &mut small), b"\0");
        let mut empty: [u8; 0] = [];
        assert!(fmt_hex_u8(0x12, &mut empty).is_empty());
    }
}
