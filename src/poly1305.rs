//! Poly1305 one-time authenticator.
//!
//! The 32-byte one-time key is split into `r` (first 16 bytes, clamped)
//! and `s` (last 16 bytes). The message is processed in 16-byte blocks,
//! each interpreted as a little-endian integer with an extra 1 bit
//! appended just above its last byte; the accumulator `h` is updated as
//! `h = (h + block) * r mod 2^130 - 5`. The tag is `(h + s) mod 2^128`.
//!
//! # Internal format
//!
//! Values modulo 2^130 - 5 are held over five 26-bit limbs in `u32`;
//! limb products are computed over 64 bits. Since 2^130 = 5 mod p, the
//! high partial products use the precomputed multiples `5*r[i]`. After
//! each block, the accumulator limbs are only partially reduced; full
//! reduction happens once, in `finish()`.
//!
//! A key must never be used for more than one message.

use zeroize::Zeroize;

use crate::verify::verify16;

/// Length of a Poly1305 tag, in bytes.
pub const BYTES: usize = 16;

/// Length of a Poly1305 key, in bytes.
pub const KEY_BYTES: usize = 32;

// 2^26 - 1
const M26: u32 = 0x03FFFFFF;

#[inline(always)]
fn load32(b: &[u8]) -> u32 {
    u32::from_le_bytes([ b[0], b[1], b[2], b[3] ])
}

/// Incremental Poly1305 state.
///
/// The state is cleared when dropped.
#[derive(Clone)]
pub struct Poly1305 {
    r: [u32; 5],
    h: [u32; 5],
    pad: [u32; 4],
    buf: [u8; 16],
    ptr: usize,
}

impl Poly1305 {

    /// Creates a new instance from a 32-byte one-time key.
    pub fn new(key: &[u8; KEY_BYTES]) -> Self {
        // r &= 0xffffffc0ffffffc0ffffffc0fffffff
        let r = [
            (load32(&key[ 0..]))      & 0x03FFFFFF,
            (load32(&key[ 3..]) >> 2) & 0x03FFFF03,
            (load32(&key[ 6..]) >> 4) & 0x03FFC0FF,
            (load32(&key[ 9..]) >> 6) & 0x03F03FFF,
            (load32(&key[12..]) >> 8) & 0x000FFFFF,
        ];
        let pad = [
            load32(&key[16..]),
            load32(&key[20..]),
            load32(&key[24..]),
            load32(&key[28..]),
        ];
        Self { r, h: [0u32; 5], pad, buf: [0u8; 16], ptr: 0 }
    }

    // Processes whole 16-byte blocks; `hibit` is 2^24 (the 2^128 bit in
    // the top limb) for full blocks, 0 for the padded final block.
    fn blocks(&mut self, m: &[u8], hibit: u32) {
        let [r0, r1, r2, r3, r4] = self.r;
        let s1 = r1 * 5;
        let s2 = r2 * 5;
        let s3 = r3 * 5;
        let s4 = r4 * 5;
        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;

        for b in m.chunks_exact(16) {
            h0 += (load32(&b[ 0..]))      & M26;
            h1 += (load32(&b[ 3..]) >> 2) & M26;
            h2 += (load32(&b[ 6..]) >> 4) & M26;
            h3 += (load32(&b[ 9..]) >> 6) & M26;
            h4 += (load32(&b[12..]) >> 8) | hibit;

            let d0 = (h0 as u64) * (r0 as u64)
                + (h1 as u64) * (s4 as u64)
                + (h2 as u64) * (s3 as u64)
                + (h3 as u64) * (s2 as u64)
                + (h4 as u64) * (s1 as u64);
            let mut d1 = (h0 as u64) * (r1 as u64)
                + (h1 as u64) * (r0 as u64)
                + (h2 as u64) * (s4 as u64)
                + (h3 as u64) * (s3 as u64)
                + (h4 as u64) * (s2 as u64);
            let mut d2 = (h0 as u64) * (r2 as u64)
                + (h1 as u64) * (r1 as u64)
                + (h2 as u64) * (r0 as u64)
                + (h3 as u64) * (s4 as u64)
                + (h4 as u64) * (s3 as u64);
            let mut d3 = (h0 as u64) * (r3 as u64)
                + (h1 as u64) * (r2 as u64)
                + (h2 as u64) * (r1 as u64)
                + (h3 as u64) * (r0 as u64)
                + (h4 as u64) * (s4 as u64);
            let mut d4 = (h0 as u64) * (r4 as u64)
                + (h1 as u64) * (r3 as u64)
                + (h2 as u64) * (r2 as u64)
                + (h3 as u64) * (r1 as u64)
                + (h4 as u64) * (r0 as u64);

            // Partial reduction.
            let mut c = (d0 >> 26) as u32;
            h0 = (d0 as u32) & M26;
            d1 += c as u64;
            c = (d1 >> 26) as u32;
            h1 = (d1 as u32) & M26;
            d2 += c as u64;
            c = (d2 >> 26) as u32;
            h2 = (d2 as u32) & M26;
            d3 += c as u64;
            c = (d3 >> 26) as u32;
            h3 = (d3 as u32) & M26;
            d4 += c as u64;
            h4 = (d4 as u32) & M26;
            let t = (h0 as u64) + (d4 >> 26) * 5;
            h0 = (t as u32) & M26;
            h1 += (t >> 26) as u32;
        }

        self.h = [h0, h1, h2, h3, h4];
    }

    /// Processes some message bytes; this function can be called
    /// repeatedly.
    pub fn update(&mut self, src: impl AsRef<[u8]>) {
        let mut m = src.as_ref();
        if self.ptr != 0 {
            let clen = core::cmp::min(m.len(), 16 - self.ptr);
            self.buf[self.ptr..(self.ptr + clen)].copy_from_slice(&m[..clen]);
            self.ptr += clen;
            m = &m[clen..];
            if self.ptr < 16 {
                return;
            }
            let buf = self.buf;
            self.blocks(&buf, 1 << 24);
            self.ptr = 0;
        }
        let full = m.len() & !15;
        self.blocks(&m[..full], 1 << 24);
        let rem = m.len() - full;
        self.buf[..rem].copy_from_slice(&m[full..]);
        self.ptr = rem;
    }

    /// Computes the 16-byte tag over all bytes injected so far. The
    /// instance is consumed.
    pub fn finish(mut self) -> [u8; BYTES] {
        // Final partial block: append a 1 byte then zeros, without the
        // 2^128 bit.
        if self.ptr != 0 {
            let mut b = [0u8; 16];
            b[..self.ptr].copy_from_slice(&self.buf[..self.ptr]);
            b[self.ptr] = 1;
            self.blocks(&b, 0);
        }

        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;

        // Full carry.
        let mut c = h1 >> 26;
        h1 &= M26;
        h2 += c;
        c = h2 >> 26;
        h2 &= M26;
        h3 += c;
        c = h3 >> 26;
        h3 &= M26;
        h4 += c;
        c = h4 >> 26;
        h4 &= M26;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= M26;
        h1 += c;

        // g = h + 5 - 2^130; keep g if it did not underflow, h otherwise.
        let mut g0 = h0.wrapping_add(5);
        c = g0 >> 26;
        g0 &= M26;
        let mut g1 = h1.wrapping_add(c);
        c = g1 >> 26;
        g1 &= M26;
        let mut g2 = h2.wrapping_add(c);
        c = g2 >> 26;
        g2 &= M26;
        let mut g3 = h3.wrapping_add(c);
        c = g3 >> 26;
        g3 &= M26;
        let g4 = h4.wrapping_add(c).wrapping_sub(1 << 26);

        // mask = 0xFFFFFFFF if g4 did not underflow (h >= p).
        let mask = (g4 >> 31).wrapping_sub(1);
        h0 = (h0 & !mask) | (g0 & mask);
        h1 = (h1 & !mask) | (g1 & mask);
        h2 = (h2 & !mask) | (g2 & mask);
        h3 = (h3 & !mask) | (g3 & mask);
        h4 = (h4 & !mask) | (g4 & mask);

        // h = h mod 2^128, over four 32-bit words.
        let w0 = h0 | (h1 << 26);
        let w1 = (h1 >> 6) | (h2 << 20);
        let w2 = (h2 >> 12) | (h3 << 14);
        let w3 = (h3 >> 18) | (h4 << 8);

        // tag = (h + pad) mod 2^128
        let mut f = (w0 as u64) + (self.pad[0] as u64);
        let t0 = f as u32;
        f = (w1 as u64) + (self.pad[1] as u64) + (f >> 32);
        let t1 = f as u32;
        f = (w2 as u64) + (self.pad[2] as u64) + (f >> 32);
        let t2 = f as u32;
        f = (w3 as u64) + (self.pad[3] as u64) + (f >> 32);
        let t3 = f as u32;

        let mut tag = [0u8; BYTES];
        tag[ 0.. 4].copy_from_slice(&t0.to_le_bytes());
        tag[ 4.. 8].copy_from_slice(&t1.to_le_bytes());
        tag[ 8..12].copy_from_slice(&t2.to_le_bytes());
        tag[12..16].copy_from_slice(&t3.to_le_bytes());
        tag
    }
}

impl Zeroize for Poly1305 {
    fn zeroize(&mut self) {
        self.r.zeroize();
        self.h.zeroize();
        self.pad.zeroize();
        self.buf.zeroize();
        self.ptr = 0;
    }
}

impl Drop for Poly1305 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Computes the Poly1305 tag of message `m` under one-time key `k`.
pub fn onetimeauth(m: &[u8], k: &[u8; KEY_BYTES]) -> [u8; BYTES] {
    let mut p = Poly1305::new(k);
    p.update(m);
    p.finish()
}

/// Checks the Poly1305 tag `h` of message `m` under one-time key `k`.
/// Returned value is 0xFFFFFFFF if the tag matches, 0x00000000
/// otherwise. The comparison is constant-time.
pub fn onetimeauth_verify(h: &[u8; BYTES], m: &[u8], k: &[u8; KEY_BYTES])
    -> u32
{
    verify16(h, &onetimeauth(m, k))
}
