//! Constant-time comparison of byte strings.
//!
//! The comparison functions accumulate the OR of all byte differences
//! and only then convert the accumulator into a mask; there is no early
//! exit, so the execution time does not depend on where (or whether)
//! the two inputs differ. Returned masks follow the crate convention:
//! 0xFFFFFFFF for "equal", 0x00000000 for "different".

/// Converts a byte-difference accumulator into an equality mask.
#[inline(always)]
fn zero_mask(d: u32) -> u32 {
    // d is at most 0xFF; d - 1 has its top bit set only if d == 0.
    ((d.wrapping_sub(1)) >> 31).wrapping_neg()
}

#[inline(always)]
fn diff(x: &[u8], y: &[u8]) -> u32 {
    let mut d = 0u32;
    for i in 0..x.len() {
        d |= (x[i] ^ y[i]) as u32;
    }
    d
}

/// Compares two 16-byte values (e.g. Poly1305 tags).
pub fn verify16(x: &[u8; 16], y: &[u8; 16]) -> u32 {
    zero_mask(diff(&x[..], &y[..]))
}

/// Compares two 32-byte values (e.g. encoded points).
pub fn verify32(x: &[u8; 32], y: &[u8; 32]) -> u32 {
    zero_mask(diff(&x[..], &y[..]))
}

/// Compares two byte slices of arbitrary length.
///
/// Returns `false` if the slices differ in length or are empty; lengths
/// are considered public. Otherwise the contents are compared in
/// constant time.
pub fn verify_slices(x: &[u8], y: &[u8]) -> bool {
    if x.is_empty() || y.is_empty() || x.len() != y.len() {
        return false;
    }
    zero_mask(diff(x, y)) != 0
}
