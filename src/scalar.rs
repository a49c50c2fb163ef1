//! Integers modulo L = 2^252 + 27742317777372353535851937790883648493.
//!
//! L is the prime order of the subgroup of interest in edwards25519.
//! Scalars are kept in their canonical 32-byte little-endian encoding;
//! arithmetic expands them into 64 signed limbs of 8 bits (held in
//! `i64`), accumulates, then reduces back modulo L.
//!
//! The reduction folds each top limb (positions 63 down to 32) into
//! lower positions with the matching multiple of L, using the fact that
//! 2^252 = -(L - 2^252) mod L; a final pass subtracts L once more if
//! needed. All loops and branches depend only on limb indices, never on
//! limb values.

use zeroize::Zeroize;

use crate::verify::verify32;

/// L, over 32 bytes (little-endian).
const L: [i64; 32] = [
    0xED, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
    0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// An integer modulo L.
#[derive(Clone, Copy, Debug)]
pub struct Scalar([u8; 32]);

// Reduces a 512-bit value given as 64 signed 8-bit limbs. The limbs are
// modified in place (the caller is responsible for wiping them).
fn mod_l(x: &mut [i64; 64]) -> [u8; 32] {
    for i in (32..64).rev() {
        let mut carry = 0i64;
        let mut j = i - 32;
        while j < i - 12 {
            let t = carry - 16 * x[i] * L[j - (i - 32)];
            x[j] += t;
            carry = (x[j] + 128) >> 8;
            x[j] -= carry << 8;
            j += 1;
        }
        x[j] += carry;
        x[i] = 0;
    }

    let mut carry = 0i64;
    for j in 0..32 {
        let t = carry - (x[31] >> 4) * L[j];
        x[j] += t;
        carry = x[j] >> 8;
        x[j] &= 255;
    }
    for j in 0..32 {
        x[j] -= carry * L[j];
    }

    let mut r = [0u8; 32];
    for i in 0..32 {
        let t = x[i] >> 8;
        x[i + 1] += t;
        r[i] = (x[i] & 255) as u8;
    }
    r
}

impl Scalar {

    pub const ZERO: Self = Self([0u8; 32]);

    /// Decodes bytes (unsigned little-endian) into a scalar, with
    /// reduction modulo L. The source can have any length (typically 32
    /// or 64 bytes); an empty slice yields zero.
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut acc = [0u8; 32];
        let mut x = [0i64; 64];

        // Horner evaluation over 32-byte chunks, most significant first:
        // acc <- (acc*2^256 + chunk) mod L.
        for chunk in buf.chunks(32).rev() {
            for i in 0..chunk.len() {
                x[i] = chunk[i] as i64;
            }
            for i in chunk.len()..32 {
                x[i] = 0;
            }
            for i in 0..32 {
                x[32 + i] = acc[i] as i64;
            }
            acc = mod_l(&mut x);
        }
        x.zeroize();
        Self(acc)
    }

    /// Decodes 32 bytes into a scalar. The returned mask is 0xFFFFFFFF
    /// if the source was canonical (value lower than L), 0x00000000
    /// otherwise; the scalar is the reduced value in both cases.
    pub fn decode32(buf: &[u8; 32]) -> (Self, u32) {
        let s = Self::decode_reduce(&buf[..]);
        let ok = verify32(&s.0, buf);
        (s, ok)
    }

    /// Encodes this scalar over exactly 32 bytes (canonical).
    pub fn encode(self) -> [u8; 32] {
        self.0
    }

    /// Returns `a*b + c mod L`.
    pub fn mul_add(a: &Self, b: &Self, c: &Self) -> Self {
        let mut x = [0i64; 64];
        for i in 0..32 {
            x[i] = c.0[i] as i64;
        }
        for i in 0..32 {
            for j in 0..32 {
                x[i + j] += (a.0[i] as i64) * (b.0[j] as i64);
            }
        }
        let r = mod_l(&mut x);
        x.zeroize();
        Self(r)
    }

    /// Returns 0xFFFFFFFF if this scalar is zero, 0x00000000 otherwise.
    pub fn iszero(self) -> u32 {
        verify32(&self.0, &[0u8; 32])
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
