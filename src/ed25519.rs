//! Edwards25519 curve and Ed25519 signatures.
//!
//! This module implements group operations on the twisted Edwards curve
//! of equation `-x^2 + y^2 = 1 + d*x^2*y^2`, over the finite field
//! GF(2^255 - 19), for the constant `d` = -121665/121666. This curve is
//! described in [RFC 7748]. The signature algorithm Ed25519, which
//! operates on that curve, is described in [RFC 8032].
//!
//! A curve point is represented by the `Point` structure, in extended
//! coordinates (X:Y:Z:T) with x = X/Z, y = Y/Z and x*y = T/Z. Points can
//! be added with the `+` operator (values and references), negated
//! with unary `-`, and subtracted with `-`. Multiplication by a scalar
//! (`Point::mul()`) is a constant-time double-and-add over all 256 bits
//! of the scalar, with conditional swaps driven by the scalar bits.
//!
//! The `PrivateKey` structure represents an Ed25519 private key. It is
//! instantiated from a 32-byte seed, or from the 64-byte NaCl secret key
//! format (seed followed by the encoded public key). Signatures are
//! deterministic. The `PublicKey` structure represents a public key;
//! signature verification functions are available on it.
//!
//! # Ed25519 Edge Cases
//!
//! Decoding of points follows NaCl: the y coordinate is not checked for
//! canonicality (values in the p..2^255-1 range are reduced), and a
//! sign bit of 1 with x = 0 is accepted. The `S` component of a
//! signature MUST be canonical (in the 0 to `L-1` range); signatures
//! with a larger `S` are rejected. Verification uses the cofactorless
//! equation `R = S*B - k*A`, compared on encodings.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use zeroize::Zeroize;

use crate::field::GF25519;
use crate::scalar::Scalar;
use crate::sha512::Sha512;
use crate::verify::verify32;

#[cfg(feature = "alloc")]
use crate::Vec;

/// Length of an encoded public key, in bytes.
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Length of a secret key (seed followed by public key), in bytes.
pub const SECRET_KEY_BYTES: usize = 64;

/// Length of a seed, in bytes.
pub const SEED_BYTES: usize = 32;

/// Length of a signature, in bytes.
pub const SIGNATURE_BYTES: usize = 64;

/// A point on the twisted Edwards curve edwards25519.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

impl Point {

    /// The group neutral (identity point) in the curve.
    ///
    /// Affine coordinates of the neutral are (0,1).
    pub const NEUTRAL: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The conventional base point in the curve.
    ///
    /// This point generates the subgroup of prime order L.
    pub const BASE: Self = Self {
        X: GF25519::w64be(
            0x216936D3CD6E53FE, 0xC0A4E231FDD6DC5C,
            0x692CC7609525A7B2, 0xC9562D608F25D51A),
        Y: GF25519::w64be(
            0x6666666666666666, 0x6666666666666666,
            0x6666666666666666, 0x6666666666666658),
        Z: GF25519::ONE,
        T: GF25519::w64be(
            0x67875F0FD78B7665, 0x66EA4E8E64ABE37D,
            0x20F09F80775152F5, 0x6DDE8AB3A5B7DDA3),
    };

    /// Curve equation parameter d = -121665 / 121666.
    pub const D: GF25519 = GF25519::w64be(
        0x52036CEE2B6FFE73,
        0x8CC740797779E898,
        0x00700A4D4141D8AB,
        0x75EB4DCA135978A3,
    );

    /// Double of the curve equation parameter: 2*d
    pub const D2: GF25519 = GF25519::w64be(
        0x2406D9DC56DFFCE7,
        0x198E80F2EEF3D130,
        0x00E0149A8283B156,
        0xEBD69B9426B2F159,
    );

    /// 2^((p-1)/4), which is a square root of -1 in GF(2^255-19)
    pub const SQRT_M1: GF25519 = GF25519::w64be(
        0x2B8324804FC1DF0B,
        0x2B4D00993DFBD7A7,
        0x2F431806AD2FE478,
        0xC4EE1B274A0EA0B0,
    );

    /// Decodes a point from bytes, and sets this point to its opposite.
    ///
    /// On success, 0xFFFFFFFF is returned; on failure (no curve point
    /// has the encoded y coordinate), 0x00000000 is returned and this
    /// point is set to the neutral. The y coordinate is implicitly
    /// reduced modulo p.
    pub fn set_decode_neg(&mut self, buf: &[u8; 32]) -> u32 {
        let sign_x = (buf[31] >> 7) as u32;
        let y = GF25519::decode_reduce(buf);

        // u = y^2 - 1
        // v = d*y^2 + 1
        let y2 = y.square();
        let u = y2 - GF25519::ONE;
        let v = Self::D * y2 + GF25519::ONE;

        // x = u*v^3*(u*v^7)^((p-5)/8)
        let v2 = v.square();
        let v3 = v2 * v;
        let t = u * v3 * v2.square();
        let mut x = t.pow2523() * u * v3;

        // If v*x^2 == u, then x is correct.
        // If v*x^2 == -u, then we must replace x with x*2^((p-1)/4).
        // If neither holds, then there is no solution.
        let w = x.square() * v;
        let r1 = w.equals(u);
        let r2 = w.equals(-u);
        let r = r1 | r2;
        x.set_cond(&(x * Self::SQRT_M1), !r1);

        // We want the opposite of the encoded point: negate x when its
        // parity matches the sign bit.
        let nx = (x.parity() ^ sign_x ^ 1).wrapping_neg();
        x.set_cond(&-x, nx);

        // If the process failed, then set (x,y) to (0,1).
        x.set_cond(&GF25519::ZERO, !r);
        let y = GF25519::select(&GF25519::ONE, &y, r);

        self.X = x;
        self.Y = y;
        self.Z = GF25519::ONE;
        self.T = x * y;
        r
    }

    /// Decodes a point from bytes and returns its opposite, or `None` if
    /// the bytes do not encode a curve point.
    ///
    /// Since this method returns an `Option<Point>`, it leaks (through
    /// timing-based side channels) whether decoding succeeded or not;
    /// the decoded point itself does not leak.
    pub fn decode_neg(buf: &[u8; 32]) -> Option<Point> {
        let mut P = Point::NEUTRAL;
        if P.set_decode_neg(buf) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Decodes a point from bytes, or returns `None` if the bytes do not
    /// encode a curve point.
    pub fn decode(buf: &[u8; 32]) -> Option<Point> {
        Self::decode_neg(buf).map(|P| -P)
    }

    /// Encodes this point into exactly 32 bytes: the affine y
    /// coordinate, with the parity of x in the top bit.
    pub fn encode(self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let (x, y) = (self.X * iZ, self.Y * iZ);
        let mut r = y.encode();
        r[31] |= (x.parity() as u8) << 7;
        r
    }

    /// Adds another point (`rhs`) to this point.
    pub fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);
        let (X2, Y2, Z2, T2) = (&rhs.X, &rhs.Y, &rhs.Z, &rhs.T);

        // Formulas from RFC 8032, section 5.1.4.
        let A = (Y1 - X1) * (Y2 - X2);
        let B = (Y1 + X1) * (Y2 + X2);
        let C = T1 * Self::D2 * T2;
        let D = Z1.mul_small(2) * Z2;
        let E = B - A;
        let F = D - C;
        let G = D + C;
        let H = B + A;
        self.X = E * F;
        self.Y = G * H;
        self.T = E * H;
        self.Z = F * G;
    }

    /// Doubles this point (in place).
    pub fn set_double(&mut self) {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // Formulas from RFC 8032, section 5.1.4 (special doubling case).
        let A = X.square();
        let B = Y.square();
        let C = Z.square().mul_small(2);
        let H = A + B;
        let E = H - (X + Y).square();
        let G = A - B;
        let F = C + G;
        self.X = E * F;
        self.Y = G * H;
        self.T = E * H;
        self.Z = F * G;
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Exchanges `P` and `Q` if `ctl` is 0xFFFFFFFF, or leaves them
    /// unchanged if `ctl` is 0x00000000.
    #[inline]
    pub fn cswap(P: &mut Self, Q: &mut Self, ctl: u32) {
        GF25519::cswap(&mut P.X, &mut Q.X, ctl);
        GF25519::cswap(&mut P.Y, &mut Q.Y, ctl);
        GF25519::cswap(&mut P.Z, &mut Q.Z, ctl);
        GF25519::cswap(&mut P.T, &mut Q.T, ctl);
    }

    /// Compares two points for equality. Returned value is 0xFFFFFFFF
    /// if the two points are equal, 0x00000000 otherwise.
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).equals(rhs.X * self.Z)
            & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral (identity point).
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000 otherwise.
    pub fn isneutral(self) -> u32 {
        self.X.iszero() & self.Y.equals(self.Z)
    }

    /// Multiplies this point by a scalar, given as 32 bytes (unsigned
    /// little-endian; all 256 bits are used, no reduction modulo L is
    /// needed).
    pub fn set_mul(&mut self, n: &[u8; 32]) {
        let mut P = Self::NEUTRAL;
        let mut Q = *self;
        for i in (0..256).rev() {
            let b = (((n[i >> 3] >> (i & 7)) & 1) as u32).wrapping_neg();
            Self::cswap(&mut P, &mut Q, b);
            Q.set_add(&P);
            P.set_double();
            Self::cswap(&mut P, &mut Q, b);
        }
        *self = P;
        Q.zeroize();
    }

    /// Returns the product of this point by a scalar (see `set_mul()`).
    #[inline(always)]
    pub fn mul(self, n: &[u8; 32]) -> Self {
        let mut r = self;
        r.set_mul(n);
        r
    }

    /// Returns the product of the base point by a scalar.
    pub fn mulgen(n: &[u8; 32]) -> Self {
        Self::BASE.mul(n)
    }
}

impl Zeroize for Point {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
        self.T.zeroize();
    }
}

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        self + (-other)
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        self + (-other)
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_add(&-other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_add(&-other);
    }
}

// ========================================================================

/// An Ed25519 private key.
///
/// It is built from a 32-byte seed (which should be generated from a
/// cryptographically secure random source). From the seed are derived
/// the secret scalar, the prefix used for deterministic signing, and
/// the public key. The key material is wiped when the value is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    s: Scalar,                  // secret scalar
    prefix: [u8; 32],           // second half of SHA-512(seed)
    seed: [u8; 32],             // source seed
    public_key: [u8; 32],       // encoded public key
}

/// An Ed25519 public key.
///
/// The decoded point is kept in negated form, which is what the
/// verification equation uses.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    neg_point: Point,
    encoded: [u8; 32],
}

impl PrivateKey {

    /// Instantiates a private key from the provided seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        // We follow RFC 8032, section 5.1.5.
        let mut hh = Sha512::hash(seed);

        // Prune the first half and decode it as a scalar (with
        // reduction).
        hh[0] &= 0xF8;
        hh[31] &= 0x7F;
        hh[31] |= 0x40;
        let s = Scalar::decode_reduce(&hh[..32]);

        // Save second half of the hashed seed for signing operations.
        let mut prefix = [0u8; 32];
        prefix[..].copy_from_slice(&hh[32..]);
        hh.zeroize();

        // Public key is obtained from the secret scalar.
        let public_key = Point::mulgen(&s.encode()).encode();

        Self { s, prefix, seed: *seed, public_key }
    }

    /// Instantiates a private key from the 64-byte NaCl secret key
    /// format (seed followed by the public key).
    ///
    /// The secret scalar and prefix are derived from the seed; the
    /// public key half is used as is, without being recomputed or
    /// checked against the seed.
    pub fn from_secret_key(sk: &[u8; 64]) -> Self {
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&sk[..32]);
        let mut r = Self::from_seed(&seed);
        r.public_key.copy_from_slice(&sk[32..]);
        seed.zeroize();
        r
    }

    /// Returns the encoded public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    /// Returns the seed.
    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Encodes this key in the 64-byte NaCl format (seed followed by
    /// public key).
    pub fn encode(&self) -> [u8; 64] {
        let mut r = [0u8; 64];
        r[..32].copy_from_slice(&self.seed);
        r[32..].copy_from_slice(&self.public_key);
        r
    }

    /// Signs a message; the 64-byte signature (R followed by S) is
    /// returned.
    pub fn sign_detached(&self, m: &[u8]) -> [u8; 64] {
        // SHA-512(prefix || M) -> scalar r
        let mut sh = Sha512::new();
        sh.update(&self.prefix);
        sh.update(m);
        let mut hv1 = sh.digest();
        let mut r = Scalar::decode_reduce(&hv1);
        hv1.zeroize();

        // R = r*B
        let R_enc = Point::mulgen(&r.encode()).encode();

        // SHA-512(R || A || M) -> scalar k
        sh.update(&R_enc);
        sh.update(&self.public_key);
        sh.update(m);
        let k = Scalar::decode_reduce(&sh.digest());

        // Signature is (R, S) with S = r + k*s mod L
        let mut sig = [0u8; 64];
        sig[0..32].copy_from_slice(&R_enc);
        sig[32..64].copy_from_slice(&Scalar::mul_add(&k, &self.s, &r).encode());
        r.zeroize();
        sig
    }

    /// Signs a message and returns the signed message (signature
    /// followed by the message).
    #[cfg(feature = "alloc")]
    pub fn sign(&self, m: &[u8]) -> Vec<u8> {
        let mut sm = Vec::with_capacity(SIGNATURE_BYTES + m.len());
        sm.extend_from_slice(&self.sign_detached(m));
        sm.extend_from_slice(m);
        sm
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.s.zeroize();
        self.prefix.zeroize();
        self.seed.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl PublicKey {

    /// Decodes the provided bytes as a public key.
    ///
    /// This process fails if the bytes are not the encoding of a curve
    /// point.
    pub fn decode(buf: &[u8; 32]) -> Option<PublicKey> {
        let neg_point = Point::decode_neg(buf)?;
        Some(Self { neg_point, encoded: *buf })
    }

    /// Encodes the key into exactly 32 bytes.
    pub fn encode(self) -> [u8; 32] {
        self.encoded
    }

    /// Verifies a detached signature on a message. Return value is
    /// `true` on a valid signature, `false` otherwise.
    pub fn verify_detached(&self, sig: &[u8; 64], m: &[u8]) -> bool {
        let mut R_enc = [0u8; 32];
        R_enc.copy_from_slice(&sig[..32]);
        let mut S_enc = [0u8; 32];
        S_enc.copy_from_slice(&sig[32..]);

        // S must be canonical.
        let (S, ok) = Scalar::decode32(&S_enc);
        if ok == 0 {
            return false;
        }

        // SHA-512(R || A || M) -> scalar k
        let mut sh = Sha512::new();
        sh.update(&R_enc);
        sh.update(&self.encoded);
        sh.update(m);
        let k = Scalar::decode_reduce(&sh.digest());

        // R' = k*(-A) + S*B must encode to R.
        let P = self.neg_point.mul(&k.encode()) + Point::mulgen(&S.encode());
        verify32(&P.encode(), &R_enc) != 0
    }

    /// Verifies a signed message (signature followed by message) and
    /// returns the message, or `None` if the signature is not valid or
    /// the input is shorter than a signature.
    #[cfg(feature = "alloc")]
    pub fn open(&self, sm: &[u8]) -> Option<Vec<u8>> {
        if sm.len() < SIGNATURE_BYTES {
            return None;
        }
        let mut sig = [0u8; 64];
        sig.copy_from_slice(&sm[..SIGNATURE_BYTES]);
        let m = &sm[SIGNATURE_BYTES..];
        if self.verify_detached(&sig, m) {
            Some(m.to_vec())
        } else {
            None
        }
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, PrivateKey, PublicKey};
    use crate::scalar::Scalar;
    use crate::x25519;
    use sha2::{Sha256, Digest};

    #[test]
    fn base_arith() {
        // For a point P (randomly generated on the curve with Sage),
        // points i*P for i = 0 to 6, encoded.
        const EPP: [[u8; 32]; 7] = [
            [
                0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
            ],
            [
                0x91, 0x7E, 0x2B, 0x2F, 0xF9, 0xC9, 0x66, 0x45,
                0x1D, 0x28, 0xC9, 0x3E, 0xD4, 0xDE, 0x9A, 0xE9,
                0xCE, 0x2D, 0x67, 0x2C, 0xD3, 0xCF, 0x74, 0x06,
                0xAE, 0x0D, 0x86, 0xC4, 0x21, 0xB9, 0x02, 0xE6
            ],
            [
                0x18, 0x68, 0xD3, 0xEA, 0xE6, 0x62, 0x1B, 0xAF,
                0xD0, 0x4C, 0x2C, 0xEC, 0x8B, 0xA9, 0xEE, 0xF3,
                0x28, 0xCE, 0xC3, 0x07, 0x5A, 0x57, 0xCE, 0x98,
                0x69, 0x83, 0x3C, 0x8A, 0x8E, 0xF2, 0x90, 0xD4
            ],
            [
                0x37, 0x31, 0xAB, 0x10, 0x85, 0x48, 0x38, 0xC7,
                0x2E, 0x2F, 0xCF, 0x29, 0xD9, 0xCD, 0xA0, 0xBD,
                0xC8, 0xAE, 0xD6, 0x70, 0x58, 0x56, 0x6F, 0xAE,
                0xCD, 0x6F, 0xFC, 0xB7, 0x0D, 0x6A, 0xC5, 0x60
            ],
            [
                0x47, 0x18, 0x8B, 0xDD, 0x31, 0xDE, 0x9E, 0x3E,
                0x29, 0x2B, 0x52, 0x6C, 0x50, 0x0A, 0x91, 0x29,
                0x96, 0x9D, 0xAD, 0xE2, 0x6B, 0x13, 0x3A, 0x8E,
                0xAB, 0x55, 0xED, 0xBA, 0xD9, 0x01, 0x34, 0x26
            ],
            [
                0xE4, 0xD0, 0x2A, 0x56, 0x90, 0xE1, 0x86, 0xCD,
                0xEC, 0x21, 0x41, 0xF0, 0x49, 0x4F, 0x19, 0x70,
                0x7C, 0x3B, 0x4D, 0xC0, 0x0E, 0x6B, 0x90, 0x1C,
                0x9D, 0x8E, 0xF0, 0xE2, 0xC6, 0x91, 0x11, 0xD2
            ],
            [
                0x3B, 0x7F, 0xFC, 0x19, 0x3B, 0x7C, 0xC4, 0x58,
                0xDF, 0x56, 0xE3, 0xD8, 0xBB, 0xEC, 0x71, 0x3F,
                0xE9, 0xE3, 0x97, 0xD8, 0x6E, 0x4A, 0x7E, 0x08,
                0x25, 0x1A, 0xCC, 0x29, 0xED, 0x17, 0x88, 0x32
            ],
        ];

        let mut PP = [Point::NEUTRAL; 7];
        for i in 0..7 {
            let P = Point::decode(&EPP[i]).unwrap();
            assert!(EPP[i] == P.encode());
            let N = Point::decode_neg(&EPP[i]).unwrap();
            assert!((P + N).isneutral() == 0xFFFFFFFF);
            PP[i] = P;
            if i == 0 {
                assert!(P.isneutral() == 0xFFFFFFFF);
            } else {
                assert!(P.isneutral() == 0x00000000);
            }
        }

        for i in 1..7 {
            assert!(PP[i].equals(PP[i - 1]) == 0);
            let Q = PP[i - 1] + PP[1];
            assert!(PP[i].equals(Q) == 0xFFFFFFFF);
            assert!(Q.encode() == EPP[i]);
            assert!((Q + Point::NEUTRAL).equals(Q) == 0xFFFFFFFF);
            assert!((Q - PP[1]).equals(PP[i - 1]) == 0xFFFFFFFF);
        }

        let P1 = PP[1];
        assert!(P1.double().encode() == EPP[2]);
        assert!(P1.double().double().encode() == EPP[4]);
        assert!(PP[3].double().encode() == EPP[6]);
        assert!((PP[2] + PP[4]).encode() == EPP[6]);

        let mut n = [0u8; 32];
        for i in 0..7 {
            n[0] = i as u8;
            assert!(P1.mul(&n).encode() == EPP[i]);
        }
    }

    #[test]
    fn decode_failure() {
        // y = 2 does not match any curve point.
        let mut b = [0u8; 32];
        b[0] = 2;
        assert!(Point::decode_neg(&b).is_none());
        let mut P = Point::BASE;
        assert!(P.set_decode_neg(&b) == 0);
        assert!(P.isneutral() == 0xFFFFFFFF);
        assert!(PublicKey::decode(&b).is_none());
    }

    #[test]
    fn mul() {
        let mut sh = Sha256::new();
        for i in 0..20 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let v1 = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let v2 = sh.finalize_reset();

            let s1 = Scalar::decode_reduce(&v1);
            let s2 = Scalar::decode_reduce(&v2);
            let s3 = Scalar::mul_add(&s1, &s2, &Scalar::ZERO);
            let s4 = Scalar::mul_add(&s1, &Scalar::decode_reduce(&[1u8]), &s2);
            let P1 = Point::mulgen(&s1.encode());
            let P2 = Point::mulgen(&s2.encode());
            assert!(P1.mul(&s2.encode()).equals(Point::mulgen(&s3.encode()))
                == 0xFFFFFFFF);
            assert!((P1 + P2).equals(Point::mulgen(&s4.encode()))
                == 0xFFFFFFFF);

            // The u coordinate (1+y)/(1-y) of a*B is X25519(a, 9) when a
            // is clamped.
            let mut a = [0u8; 32];
            a.copy_from_slice(&v1);
            let a = x25519::clamp(&a);
            let P = Point::mulgen(&a);
            let iZ = P.Z.invert();
            let y = P.Y * iZ;
            let u = (crate::field::GF25519::ONE + y)
                * (crate::field::GF25519::ONE - y).invert();
            assert!(u.encode() == x25519::scalarmult_base(&a));
        }

        // L*B is the neutral.
        let mut L = [0u8; 32];
        hex::decode_to_slice("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010", &mut L[..]).unwrap();
        assert!(Point::mulgen(&L).isneutral() == 0xFFFFFFFF);
    }

    struct Ed25519TestVector<'a> {
        s: &'a str,
        Q: &'a str,
        m: &'a str,
        sig: &'a str,
    }

    // Test vectors from RFC 8032 (Ed25519, no context).
    const TEST_VECTORS: [Ed25519TestVector; 4] = [
        Ed25519TestVector {
            s:   "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            Q:   "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            m:   "",
            sig: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        Ed25519TestVector {
            s:   "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            Q:   "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            m:   "72",
            sig: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        Ed25519TestVector {
            s:   "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            Q:   "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            m:   "af82",
            sig: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
        Ed25519TestVector {
            s:   "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42",
            Q:   "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf",
            m:   "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
            sig: "dc2a4459e7369633a52b1bf277839a00201009a3efbf3ecb69bea2186c26b58909351fc9ac90b3ecfdfbc7c66431e0303dca179c138ac17ad9bef1177331a704",
        },
    ];

    #[test]
    fn signatures() {
        for tv in TEST_VECTORS.iter() {
            let mut seed = [0u8; 32];
            hex::decode_to_slice(tv.s, &mut seed[..]).unwrap();
            let mut Q_enc = [0u8; 32];
            hex::decode_to_slice(tv.Q, &mut Q_enc[..]).unwrap();
            let msg = hex::decode(tv.m).unwrap();
            let mut sig = [0u8; 64];
            hex::decode_to_slice(tv.sig, &mut sig[..]).unwrap();

            let skey = PrivateKey::from_seed(&seed);
            assert!(skey.public_key() == Q_enc);
            assert!(skey.sign_detached(&msg) == sig);

            // NaCl secret key format round-trip.
            let sk = skey.encode();
            assert!(sk[..32] == seed[..] && sk[32..] == Q_enc[..]);
            let skey2 = PrivateKey::from_secret_key(&sk);
            assert!(skey2.sign_detached(&msg) == sig);

            let pkey = PublicKey::decode(&Q_enc).unwrap();
            assert!(pkey.encode() == Q_enc);
            assert!(pkey.verify_detached(&sig, &msg));
            assert!(!pkey.verify_detached(&sig, &[0u8]));
        }
    }

    #[test]
    fn bit_flips() {
        let skey = PrivateKey::from_seed(&[0x2Au8; 32]);
        let m = b"bit flips must invalidate the signature";
        let sig = skey.sign_detached(m);
        let pkey = PublicKey::decode(&skey.public_key()).unwrap();
        assert!(pkey.verify_detached(&sig, m));

        for i in 0..64 {
            let mut s2 = sig;
            s2[i] ^= 1 << (i & 7);
            assert!(!pkey.verify_detached(&s2, m));
        }
        for i in 0..m.len() {
            let mut m2 = *m;
            m2[i] ^= 0x01;
            assert!(!pkey.verify_detached(&sig, &m2));
        }
        for i in 0..32 {
            let mut pk2 = skey.public_key();
            pk2[i] ^= 0x04;
            if let Some(pkey2) = PublicKey::decode(&pk2) {
                assert!(!pkey2.verify_detached(&sig, m));
            }
        }
    }

    #[test]
    fn non_canonical_s() {
        // S + L verifies the same equation but must be rejected.
        let skey = PrivateKey::from_seed(&[7u8; 32]);
        let m = b"malleability";
        let sig = skey.sign_detached(m);
        let pkey = PublicKey::decode(&skey.public_key()).unwrap();
        assert!(pkey.verify_detached(&sig, m));

        let mut L = [0u8; 32];
        hex::decode_to_slice("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010", &mut L[..]).unwrap();
        let mut s2 = sig;
        let mut cc = 0u32;
        for i in 0..32 {
            let t = (s2[32 + i] as u32) + (L[i] as u32) + cc;
            s2[32 + i] = t as u8;
            cc = t >> 8;
        }
        assert!(!pkey.verify_detached(&s2, m));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn attached() {
        let skey = PrivateKey::from_seed(&[1u8; 32]);
        let pkey = PublicKey::decode(&skey.public_key()).unwrap();
        let sm = skey.sign(b"hello");
        assert!(sm.len() == 64 + 5);
        assert!(sm[..64] == skey.sign_detached(b"hello")[..]);
        assert!(pkey.open(&sm).unwrap() == b"hello".to_vec());

        let mut sm2 = sm.clone();
        sm2[66] ^= 0x20;
        assert!(pkey.open(&sm2).is_none());
        assert!(pkey.open(&sm[..63]).is_none());

        // Empty message.
        let sm = skey.sign(&[]);
        assert!(pkey.open(&sm).unwrap().is_empty());
    }
}
