//! Finite field GF(2^255 - 19).
//!
//! This is the base field of Curve25519 and Edwards25519. An element is
//! represented by the `GF25519` type; the usual arithmetic operators can
//! be used on values and references (`+`, `-`, `*` and unary `-`, as
//! well as the compound assignments `+=`, `-=` and `*=`).
//!
//! # Internal format
//!
//! The value is split over five unsigned limbs in base 2^51:
//!
//! ```text
//!   y0 + y1*2^51 + y2*2^102 + y3*2^153 + y4*2^204
//! ```
//!
//! implicitly reduced modulo p = 2^255 - 19. Every operation ends with a
//! carry propagation pass in which the bits above 2^255 are folded back
//! into the low limb with a multiplication by 19 (since 2^255 = 19 mod
//! p). After that pass, all limbs are lower than about 1.0001*2^51; the
//! value is not necessarily fully reduced, which happens only when
//! encoding.
//!
//! Products of two limbs are computed over 128 bits. With limbs below
//! 2^51.1 and one operand premultiplied by 19, each of the five partial
//! sums stays below 2^109, so no intermediate value can overflow.
//!
//! # Constant-time conventions
//!
//! No function branches on element values. Functions that return a
//! potentially secret Boolean use the `u32` type: 0xFFFFFFFF means
//! "true", 0x00000000 means "false". Functions that take such a control
//! word (`set_cond()`, `select()`, `cswap()`) require one of these two
//! values.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use zeroize::Zeroize;

use crate::verify::verify32;

/// An element of GF(2^255 - 19).
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u64; 5]);

// 2^51 - 1
const M51: u64 = 0x0007FFFFFFFFFFFF;

// Returns 0xFFFFFFFFFFFFFFFF if the top bit of x is set, 0 otherwise.
#[inline(always)]
const fn sgnw(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}

#[inline(always)]
fn mul_wide(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl GF25519 {

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0 ]);

    // 2*p over 51-bit limbs (each limb close to 2^52); added before
    // subtracting so that limbs never go negative.
    const DMOD_M51: [u64; 5] = [
        (0x0008000000000000 - 19) << 1,
        M51 << 1,
        M51 << 1,
        M51 << 1,
        M51 << 1,
    ];

    /// Creates an element from a 256-bit value given as four 64-bit
    /// limbs in low-to-high order. The value is implicitly reduced
    /// modulo p.
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        // Bit 255 is worth 19; the top limb keeps bits 204 to 254.
        let y0 = (x0 & M51) + (19 & sgnw(x3));
        let y1 = (x0 >> 51) | ((x1 << 13) & M51);
        let y2 = (x1 >> 38) | ((x2 << 26) & M51);
        let y3 = (x2 >> 25) | ((x3 << 39) & M51);
        let y4 = (x3 >> 12) & M51;
        Self([ y0, y1, y2, y3, y4 ])
    }

    /// Creates an element from a 256-bit value given as four 64-bit
    /// limbs in high-to-low order. The value is implicitly reduced
    /// modulo p.
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    /// Creates an element from a small integer.
    pub fn from_u32(x: u32) -> Self {
        Self([ x as u64, 0, 0, 0, 0 ])
    }

    // Carry propagation on five 64-bit limbs. Input limbs may use up to
    // 64 bits; output limbs are lower than 2^51 + 19*2^13.
    #[inline(always)]
    fn carry(d0: u64, d1: u64, d2: u64, d3: u64, d4: u64) -> Self {
        let h0 = d0 >> 51;
        let h1 = d1 >> 51;
        let h2 = d2 >> 51;
        let h3 = d3 >> 51;
        let h4 = d4 >> 51;
        Self([
            (d0 & M51) + h4 * 19,
            (d1 & M51) + h0,
            (d2 & M51) + h1,
            (d3 & M51) + h2,
            (d4 & M51) + h3,
        ])
    }

    // Reduction of five 128-bit accumulators (output of a product).
    #[inline(always)]
    fn carry_wide(c0: u128, c1: u128, c2: u128, c3: u128, c4: u128)
        -> Self
    {
        let c1 = c1 + (c0 >> 51);
        let c2 = c2 + (c1 >> 51);
        let c3 = c3 + (c2 >> 51);
        let c4 = c4 + (c3 >> 51);
        let mut y0 = (c0 as u64) & M51;
        let mut y1 = (c1 as u64) & M51;
        let y2 = (c2 as u64) & M51;
        let y3 = (c3 as u64) & M51;
        let y4 = (c4 as u64) & M51;

        // c4 < 2^105, hence the folded carry stays below 2^59.
        y0 += ((c4 >> 51) as u64) * 19;
        y1 += y0 >> 51;
        y0 &= M51;
        Self([ y0, y1, y2, y3, y4 ])
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        *self = Self::carry(
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4]);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        *self = Self::carry(
            (self.0[0] + Self::DMOD_M51[0]) - rhs.0[0],
            (self.0[1] + Self::DMOD_M51[1]) - rhs.0[1],
            (self.0[2] + Self::DMOD_M51[2]) - rhs.0[2],
            (self.0[3] + Self::DMOD_M51[3]) - rhs.0[3],
            (self.0[4] + Self::DMOD_M51[4]) - rhs.0[4]);
    }

    /// Negates this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        *self = Self::carry(
            Self::DMOD_M51[0] - self.0[0],
            Self::DMOD_M51[1] - self.0[1],
            Self::DMOD_M51[2] - self.0[2],
            Self::DMOD_M51[3] - self.0[3],
            Self::DMOD_M51[4] - self.0[4]);
    }

    #[inline]
    fn set_mul(&mut self, rhs: &Self) {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = rhs.0;
        let b1_19 = b1 * 19;
        let b2_19 = b2 * 19;
        let b3_19 = b3 * 19;
        let b4_19 = b4 * 19;

        let c0 = mul_wide(a0, b0) + mul_wide(a1, b4_19)
            + mul_wide(a2, b3_19) + mul_wide(a3, b2_19)
            + mul_wide(a4, b1_19);
        let c1 = mul_wide(a0, b1) + mul_wide(a1, b0)
            + mul_wide(a2, b4_19) + mul_wide(a3, b3_19)
            + mul_wide(a4, b2_19);
        let c2 = mul_wide(a0, b2) + mul_wide(a1, b1)
            + mul_wide(a2, b0) + mul_wide(a3, b4_19)
            + mul_wide(a4, b3_19);
        let c3 = mul_wide(a0, b3) + mul_wide(a1, b2)
            + mul_wide(a2, b1) + mul_wide(a3, b0)
            + mul_wide(a4, b4_19);
        let c4 = mul_wide(a0, b4) + mul_wide(a1, b3)
            + mul_wide(a2, b2) + mul_wide(a3, b1)
            + mul_wide(a4, b0);
        *self = Self::carry_wide(c0, c1, c2, c3, c4);
    }

    /// Squares this value (in place).
    #[inline]
    pub fn set_square(&mut self) {
        let [a0, a1, a2, a3, a4] = self.0;
        let d0 = a0 << 1;
        let d1 = a1 << 1;
        let d2 = a2 << 1;
        let a3_19 = a3 * 19;
        let a4_19 = a4 * 19;

        let c0 = mul_wide(a0, a0) + mul_wide(d1, a4_19)
            + mul_wide(d2, a3_19);
        let c1 = mul_wide(d0, a1) + mul_wide(d2, a4_19)
            + mul_wide(a3, a3_19);
        let c2 = mul_wide(d0, a2) + mul_wide(a1, a1)
            + mul_wide(a3 << 1, a4_19);
        let c3 = mul_wide(d0, a3) + mul_wide(d1, a2)
            + mul_wide(a4, a4_19);
        let c4 = mul_wide(d0, a4) + mul_wide(d1, a3)
            + mul_wide(a2, a2);
        *self = Self::carry_wide(c0, c1, c2, c3, c4);
    }

    /// Returns the square of this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this value `n` times (in place).
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Returns this value squared `n` times.
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Multiplies this value by a small integer (in place).
    #[inline]
    pub fn set_mul_small(&mut self, x: u32) {
        let x = x as u64;
        *self = Self::carry_wide(
            mul_wide(self.0[0], x),
            mul_wide(self.0[1], x),
            mul_wide(self.0[2], x),
            mul_wide(self.0[3], x),
            mul_wide(self.0[4], x));
    }

    /// Returns the product of this value by a small integer.
    #[inline(always)]
    pub fn mul_small(self, x: u32) -> Self {
        let mut r = self;
        r.set_mul_small(x);
        r
    }

    /// Inverts this value (in place). The inverse of zero is zero.
    ///
    /// This raises the value to the power p - 2 = 2^255 - 21, whose
    /// binary expansion is all ones except bits 2 and 4: each of the 254
    /// squarings is followed by a multiplication, except at these two
    /// positions.
    pub fn set_invert(&mut self) {
        let x = *self;
        for i in (0..254).rev() {
            self.set_square();
            if i != 2 && i != 4 {
                self.set_mul(&x);
            }
        }
    }

    /// Returns the inverse of this value (zero if this value is zero).
    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    /// Raises this value to the power (p - 5)/8 = 2^252 - 3.
    ///
    /// This is the core of the square root computation used when
    /// decompressing Edwards points.
    pub fn pow2523(self) -> Self {
        let mut r = self;
        for i in (0..251).rev() {
            r.set_square();
            if i != 1 {
                r.set_mul(&self);
            }
        }
        r
    }

    /// Sets this value to `a` if `ctl` is 0xFFFFFFFF, or leaves it
    /// unchanged if `ctl` is 0x00000000.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..5 {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    /// Returns `a0` if `ctl` is 0x00000000, or `a1` if `ctl` is
    /// 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Exchanges `a` and `b` if `ctl` is 0xFFFFFFFF, or leaves them
    /// unchanged if `ctl` is 0x00000000.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..5 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    /// Encodes this value over exactly 32 bytes (unsigned little-endian).
    /// The encoding is always canonical (value lower than p).
    pub fn encode(self) -> [u8; 32] {
        let [mut y0, mut y1, mut y2, mut y3, mut y4] = Self::carry(
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4]).0;

        // The value is now lower than 2*p. q = 1 if value >= p, which
        // is the case exactly when value + 19 >= 2^255.
        let mut q = (y0 + 19) >> 51;
        q = (y1 + q) >> 51;
        q = (y2 + q) >> 51;
        q = (y3 + q) >> 51;
        q = (y4 + q) >> 51;

        // Subtract q*p: add 19*q, then drop bit 255.
        y0 += 19 * q;
        y1 += y0 >> 51;
        y0 &= M51;
        y2 += y1 >> 51;
        y1 &= M51;
        y3 += y2 >> 51;
        y2 &= M51;
        y4 += y3 >> 51;
        y3 &= M51;
        y4 &= M51;

        let mut r = [0u8; 32];
        r[ 0.. 8].copy_from_slice(&(y0 | (y1 << 51)).to_le_bytes());
        r[ 8..16].copy_from_slice(&((y1 >> 13) | (y2 << 38)).to_le_bytes());
        r[16..24].copy_from_slice(&((y2 >> 26) | (y3 << 25)).to_le_bytes());
        r[24..32].copy_from_slice(&((y3 >> 39) | (y4 << 12)).to_le_bytes());
        r
    }

    /// Decodes 32 bytes (unsigned little-endian). The top bit of the last
    /// byte is ignored; values in the p..2^255-1 range are accepted and
    /// implicitly reduced. This never fails.
    pub fn decode_reduce(buf: &[u8; 32]) -> Self {
        let mut w = [0u64; 4];
        for (i, chunk) in buf.chunks_exact(8).enumerate() {
            let mut tmp = [0u8; 8];
            tmp.copy_from_slice(chunk);
            w[i] = u64::from_le_bytes(tmp);
        }
        Self([
            w[0] & M51,
            ((w[0] >> 51) | (w[1] << 13)) & M51,
            ((w[1] >> 38) | (w[2] << 26)) & M51,
            ((w[2] >> 25) | (w[3] << 39)) & M51,
            (w[3] >> 12) & M51,
        ])
    }

    /// Returns 0xFFFFFFFF if this value is equal to `rhs`, 0x00000000
    /// otherwise.
    pub fn equals(self, rhs: Self) -> u32 {
        verify32(&self.encode(), &rhs.encode())
    }

    /// Returns 0xFFFFFFFF if this value is zero, 0x00000000 otherwise.
    pub fn iszero(self) -> u32 {
        self.equals(Self::ZERO)
    }

    /// Returns the least significant bit (0 or 1) of the canonical
    /// representation of this value.
    pub fn parity(self) -> u32 {
        (self.encode()[0] & 1) as u32
    }
}

impl Zeroize for GF25519 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

macro_rules! gf_binop {
    ($trait:ident, $fname:ident, $atrait:ident, $afname:ident, $inner:ident) => {

        impl $trait<GF25519> for GF25519 {
            type Output = GF25519;

            #[inline(always)]
            fn $fname(self, other: GF25519) -> GF25519 {
                let mut r = self;
                r.$inner(&other);
                r
            }
        }

        impl $trait<&GF25519> for GF25519 {
            type Output = GF25519;

            #[inline(always)]
            fn $fname(self, other: &GF25519) -> GF25519 {
                let mut r = self;
                r.$inner(other);
                r
            }
        }

        impl $trait<GF25519> for &GF25519 {
            type Output = GF25519;

            #[inline(always)]
            fn $fname(self, other: GF25519) -> GF25519 {
                let mut r = *self;
                r.$inner(&other);
                r
            }
        }

        impl $trait<&GF25519> for &GF25519 {
            type Output = GF25519;

            #[inline(always)]
            fn $fname(self, other: &GF25519) -> GF25519 {
                let mut r = *self;
                r.$inner(other);
                r
            }
        }

        impl $atrait<GF25519> for GF25519 {
            #[inline(always)]
            fn $afname(&mut self, other: GF25519) {
                self.$inner(&other);
            }
        }

        impl $atrait<&GF25519> for GF25519 {
            #[inline(always)]
            fn $afname(&mut self, other: &GF25519) {
                self.$inner(other);
            }
        }
    }
}

gf_binop!(Add, add, AddAssign, add_assign, set_add);
gf_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
gf_binop!(Mul, mul, MulAssign, mul_assign, set_mul);

impl Neg for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// ========================================================================
