//! Curve25519 scalar multiplication (X25519).
//!
//! This module implements the X25519 primitive, as defined by [RFC
//! 7748]. The primitive takes as input two 32-byte values, the first
//! being a scalar (a big integer) and the second the representation of
//! a point on Curve25519 (a Montgomery curve) or on its quadratic twist.
//! The scalar is internally "clamped" (some bits are set to specific
//! values), then the point is multiplied by the scalar, and the output
//! point is reencoded into 32 bytes.
//!
//! Arguments follow the NaCl order: scalar first, then point.
//!
//! The `scalarmult()` function does NOT filter out any value from its
//! input; any input sequence of 32 bytes is accepted, even if it encodes
//! a low-order curve point. The top point bit (most significant bit of
//! the last byte) is ignored. The clamping process ensures that the
//! integer used for the multiplication is a multiple of 8, at least
//! 2^254, and lower than 2^255.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use zeroize::Zeroize;

use crate::field::GF25519;

/// Length of a scalar, in bytes.
pub const SCALAR_BYTES: usize = 32;

/// Length of an encoded point (u coordinate), in bytes.
pub const BYTES: usize = 32;

/// The conventional generator point (u = 9).
pub const BASE: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Clamps a scalar: bits 0, 1, 2 and 255 are cleared, bit 254 is set.
pub fn clamp(n: &[u8; 32]) -> [u8; 32] {
    let mut s = *n;
    s[0] &= 248;
    s[31] &= 127;
    s[31] |= 64;
    s
}

/// Multiplies the point `p` by the scalar `n` (after clamping), and
/// returns the encoded u coordinate of the result.
pub fn scalarmult(n: &[u8; 32], p: &[u8; 32]) -> [u8; 32] {
    let mut s = clamp(n);

    // As per RFC 7748 rules, the top bit is ignored, and non-canonical
    // values are acceptable.
    let x1 = GF25519::decode_reduce(p);

    // RFC 7748 section 5 ladder.
    let mut x2 = GF25519::ONE;
    let mut z2 = GF25519::ZERO;
    let mut x3 = x1;
    let mut z3 = GF25519::ONE;
    let mut swap = 0u32;

    for t in (0..255).rev() {
        let kt = (((s[t >> 3] >> (t & 7)) & 1) as u32).wrapping_neg();
        swap ^= kt;
        GF25519::cswap(&mut x2, &mut x3, swap);
        GF25519::cswap(&mut z2, &mut z3, swap);
        swap = kt;

        let A = x2 + z2;
        let B = x2 - z2;
        let AA = A.square();
        let BB = B.square();
        let C = x3 + z3;
        let D = x3 - z3;
        let E = AA - BB;
        let DA = D * A;
        let CB = C * B;
        x3 = (DA + CB).square();
        z3 = x1 * (DA - CB).square();
        x2 = AA * BB;
        z2 = E * (AA + E.mul_small(121665));
    }
    GF25519::cswap(&mut x2, &mut x3, swap);
    GF25519::cswap(&mut z2, &mut z3, swap);

    // If z2 = 0 then inversion yields 0, and so does the output.
    let r = (x2 * z2.invert()).encode();

    s.zeroize();
    x2.zeroize();
    z2.zeroize();
    x3.zeroize();
    z3.zeroize();
    r
}

/// Multiplies the conventional generator (u = 9) by the scalar `n`.
///
/// This is the public key matching the secret scalar `n`.
pub fn scalarmult_base(n: &[u8; 32]) -> [u8; 32] {
    scalarmult(n, &BASE)
}

// ========================================================================
