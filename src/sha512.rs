//! SHA-512 hash function (FIPS 180-4).
//!
//! `Sha512` is a streaming context (`update()` can be called repeatedly,
//! `digest()` returns the output and resets the context); `hash()` is a
//! one-call convenience. The compression function is also exposed as
//! `hashblocks()`, which processes all complete 128-byte blocks of its
//! input into a caller-held state and reports how many trailing bytes
//! were left over (the NaCl `crypto_hashblocks` contract).
//!
//! All 64-bit additions and rotations use native `u64` arithmetic.

use zeroize::Zeroize;

/// Digest length, in bytes.
pub const HASH_BYTES: usize = 64;

/// Compression function block length, in bytes.
pub const BLOCK_BYTES: usize = 128;

/// Initial hash value.
pub const IV: [u64; 8] = [
    0x6A09E667F3BCC908, 0xBB67AE8584CAA73B, 0x3C6EF372FE94F82B,
    0xA54FF53A5F1D36F1, 0x510E527FADE682D1, 0x9B05688C2B3E6C1F,
    0x1F83D9ABFB41BD6B, 0x5BE0CD19137E2179,
];

const K: [u64; 80] = [
    0x428A2F98D728AE22, 0x7137449123EF65CD,
    0xB5C0FBCFEC4D3B2F, 0xE9B5DBA58189DBBC,
    0x3956C25BF348B538, 0x59F111F1B605D019,
    0x923F82A4AF194F9B, 0xAB1C5ED5DA6D8118,
    0xD807AA98A3030242, 0x12835B0145706FBE,
    0x243185BE4EE4B28C, 0x550C7DC3D5FFB4E2,
    0x72BE5D74F27B896F, 0x80DEB1FE3B1696B1,
    0x9BDC06A725C71235, 0xC19BF174CF692694,
    0xE49B69C19EF14AD2, 0xEFBE4786384F25E3,
    0x0FC19DC68B8CD5B5, 0x240CA1CC77AC9C65,
    0x2DE92C6F592B0275, 0x4A7484AA6EA6E483,
    0x5CB0A9DCBD41FBD4, 0x76F988DA831153B5,
    0x983E5152EE66DFAB, 0xA831C66D2DB43210,
    0xB00327C898FB213F, 0xBF597FC7BEEF0EE4,
    0xC6E00BF33DA88FC2, 0xD5A79147930AA725,
    0x06CA6351E003826F, 0x142929670A0E6E70,
    0x27B70A8546D22FFC, 0x2E1B21385C26C926,
    0x4D2C6DFC5AC42AED, 0x53380D139D95B3DF,
    0x650A73548BAF63DE, 0x766A0ABB3C77B2A8,
    0x81C2C92E47EDAEE6, 0x92722C851482353B,
    0xA2BFE8A14CF10364, 0xA81A664BBC423001,
    0xC24B8B70D0F89791, 0xC76C51A30654BE30,
    0xD192E819D6EF5218, 0xD69906245565A910,
    0xF40E35855771202A, 0x106AA07032BBD1B8,
    0x19A4C116B8D2D0C8, 0x1E376C085141AB53,
    0x2748774CDF8EEB99, 0x34B0BCB5E19B48A8,
    0x391C0CB3C5C95A63, 0x4ED8AA4AE3418ACB,
    0x5B9CCA4F7763E373, 0x682E6FF3D6B2B8A3,
    0x748F82EE5DEFB2FC, 0x78A5636F43172F60,
    0x84C87814A1F0AB72, 0x8CC702081A6439EC,
    0x90BEFFFA23631E28, 0xA4506CEBDE82BDE9,
    0xBEF9A3F7B2C67915, 0xC67178F2E372532B,
    0xCA273ECEEA26619C, 0xD186B8C721C0C207,
    0xEADA7DD6CDE0EB1E, 0xF57D4F7FEE6ED178,
    0x06F067AA72176FBA, 0x0A637DC5A2C898A6,
    0x113F9804BEF90DAE, 0x1B710B35131C471B,
    0x28DB77F523047D84, 0x32CAAB7B40C72493,
    0x3C9EBE0A15C9BEBC, 0x431D67C49C100D4C,
    0x4CC5D4BECB3E42B6, 0x597F299CFC657E2A,
    0x5FCB6FAB3AD6FAEC, 0x6C44198C4A475817,
];

#[inline(always)]
fn ch(x: u64, y: u64, z: u64) -> u64 {
    z ^ (x & (y ^ z))
}

#[inline(always)]
fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) | (z & (x | y))
}

#[inline(always)]
fn bsig0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline(always)]
fn bsig1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline(always)]
fn ssig0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn ssig1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

// Applies the compression function on one 128-byte block.
fn compress(state: &mut [u64; 8], block: &[u8]) {
    let mut w = [0u64; 80];
    for (i, word) in block.chunks_exact(8).enumerate() {
        let mut tmp = [0u8; 8];
        tmp.copy_from_slice(word);
        w[i] = u64::from_be_bytes(tmp);
    }
    for i in 16..80 {
        w[i] = ssig1(w[i - 2]).wrapping_add(w[i - 7])
            .wrapping_add(ssig0(w[i - 15])).wrapping_add(w[i - 16]);
    }

    // v = (a, b, c, d, e, f, g, h)
    let mut v = *state;
    for i in 0..80 {
        let t1 = v[7].wrapping_add(bsig1(v[4]))
            .wrapping_add(ch(v[4], v[5], v[6]))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t2 = bsig0(v[0]).wrapping_add(maj(v[0], v[1], v[2]));
        v.rotate_right(1);
        v[4] = v[4].wrapping_add(t1);
        v[0] = t1.wrapping_add(t2);
    }
    for i in 0..8 {
        state[i] = state[i].wrapping_add(v[i]);
    }
    w.zeroize();
}

/// Processes all complete 128-byte blocks of `m` into `state`.
///
/// Returns the number of trailing bytes (less than 128) that were not
/// processed.
pub fn hashblocks(state: &mut [u64; 8], m: &[u8]) -> usize {
    let mut blocks = m.chunks_exact(BLOCK_BYTES);
    for block in &mut blocks {
        compress(state, block);
    }
    blocks.remainder().len()
}

/// SHA-512 implementation.
///
/// Cloning captures the current object state.
#[derive(Clone, Debug)]
pub struct Sha512 {
    h: [u64; 8],
    buf: [u8; BLOCK_BYTES],
    ctr: u128,
}

impl Sha512 {

    /// Creates a new instance.
    pub fn new() -> Self {
        Self {
            h: IV,
            buf: [0u8; BLOCK_BYTES],
            ctr: 0,
        }
    }

    /// Processes some input bytes; this function can be called
    /// repeatedly.
    pub fn update(&mut self, src: impl AsRef<[u8]>) {
        let src = src.as_ref();
        let mut j = 0;
        let mut ptr = (self.ctr as usize) & (BLOCK_BYTES - 1);
        self.ctr += src.len() as u128;

        // Complete a partially filled buffer first.
        if ptr != 0 {
            let clen = core::cmp::min(src.len(), BLOCK_BYTES - ptr);
            self.buf[ptr..(ptr + clen)].copy_from_slice(&src[..clen]);
            ptr += clen;
            j = clen;
            if ptr < BLOCK_BYTES {
                return;
            }
            compress(&mut self.h, &self.buf);
        }

        // Whole blocks are hashed directly from the source.
        let rem = hashblocks(&mut self.h, &src[j..]);
        let start = src.len() - rem;
        self.buf[..rem].copy_from_slice(&src[start..]);
    }

    /// Computes the hash of all bytes injected since the last reset of
    /// this instance. The instance is automatically reset.
    pub fn digest(&mut self) -> [u8; HASH_BYTES] {
        let mut ptr = (self.ctr as usize) & (BLOCK_BYTES - 1);
        self.buf[ptr] = 0x80;
        ptr += 1;
        if ptr > 112 {
            for b in self.buf[ptr..].iter_mut() {
                *b = 0;
            }
            compress(&mut self.h, &self.buf);
            ptr = 0;
        }
        for b in self.buf[ptr..112].iter_mut() {
            *b = 0;
        }
        self.buf[112..].copy_from_slice(&(self.ctr << 3).to_be_bytes());
        compress(&mut self.h, &self.buf);

        let mut r = [0u8; HASH_BYTES];
        for (i, chunk) in r.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&self.h[i].to_be_bytes());
        }
        self.reset();
        r
    }

    /// Resets this instance to its initial state.
    pub fn reset(&mut self) {
        self.h = IV;
        self.buf.zeroize();
        self.ctr = 0;
    }

    /// One-call hash of a given input.
    pub fn hash(src: impl AsRef<[u8]>) -> [u8; HASH_BYTES] {
        let mut s = Self::new();
        s.update(src);
        s.digest()
    }
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the SHA-512 hash of `m`.
pub fn hash(m: &[u8]) -> [u8; HASH_BYTES] {
    Sha512::hash(m)
}
