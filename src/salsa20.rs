//! Salsa20 core, HSalsa20 and the XSalsa20 stream cipher.
//!
//! The Salsa20 core maps a 64-byte input (four constant words, a 256-bit
//! key and a 128-bit input block) to a 64-byte output through 20 rounds
//! of add-rotate-xor quarter-rounds, alternating column rounds and row
//! rounds, followed by a feed-forward addition of the input.
//!
//! HSalsa20 runs the same permutation without the feed-forward and
//! outputs eight of the sixteen state words; it is used to derive a
//! subkey from a key and the first 16 bytes of an extended nonce. The
//! XSalsa20 stream (24-byte nonce) is Salsa20 keyed with that subkey,
//! using the remaining 8 nonce bytes.
//!
//! Stream functions work in place: `*_xor()` functions XOR the keystream
//! into the provided buffer, `*_stream()` functions overwrite the buffer
//! with raw keystream.

use zeroize::Zeroize;

/// The constant "expand 32-byte k".
pub const SIGMA: [u8; 16] = *b"expand 32-byte k";

/// Salsa20 block length, in bytes.
pub const BLOCK_BYTES: usize = 64;

#[inline(always)]
fn load32(b: &[u8]) -> u32 {
    u32::from_le_bytes([ b[0], b[1], b[2], b[3] ])
}

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

// Builds the initial state from the constant, key and input block.
fn init_state(input: &[u8; 16], k: &[u8; 32], c: &[u8; 16]) -> [u32; 16] {
    let mut x = [0u32; 16];
    for i in 0..4 {
        x[5 * i] = load32(&c[(4 * i)..]);
        x[1 + i] = load32(&k[(4 * i)..]);
        x[6 + i] = load32(&input[(4 * i)..]);
        x[11 + i] = load32(&k[(16 + 4 * i)..]);
    }
    x
}

// The 20-round permutation.
fn permute(x: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round.
        quarter_round(x, 0, 4, 8, 12);
        quarter_round(x, 5, 9, 13, 1);
        quarter_round(x, 10, 14, 2, 6);
        quarter_round(x, 15, 3, 7, 11);

        // Row round.
        quarter_round(x, 0, 1, 2, 3);
        quarter_round(x, 5, 6, 7, 4);
        quarter_round(x, 10, 11, 8, 9);
        quarter_round(x, 15, 12, 13, 14);
    }
}

/// Salsa20 core: 64-byte output block for a 16-byte input block, a key
/// and a 16-byte constant (normally `SIGMA`).
pub fn core_salsa20(input: &[u8; 16], k: &[u8; 32], c: &[u8; 16])
    -> [u8; 64]
{
    let x0 = init_state(input, k, c);
    let mut x = x0;
    permute(&mut x);
    let mut out = [0u8; 64];
    for i in 0..16 {
        out[(4 * i)..(4 * i + 4)].copy_from_slice(
            &x[i].wrapping_add(x0[i]).to_le_bytes());
    }
    x.zeroize();
    out
}

/// HSalsa20: 32-byte output for a 16-byte input block, a key and a
/// 16-byte constant (normally `SIGMA`).
pub fn core_hsalsa20(input: &[u8; 16], k: &[u8; 32], c: &[u8; 16])
    -> [u8; 32]
{
    let mut x = init_state(input, k, c);
    permute(&mut x);
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[(4 * i)..(4 * i + 4)].copy_from_slice(&x[5 * i].to_le_bytes());
        out[(16 + 4 * i)..(20 + 4 * i)].copy_from_slice(
            &x[6 + i].to_le_bytes());
    }
    x.zeroize();
    out
}

/// XORs the Salsa20 keystream for nonce `n` and key `k` into `buf`.
///
/// The input block is the nonce followed by an 8-byte little-endian
/// block counter, starting at zero and incremented after each 64-byte
/// block.
pub fn salsa20_xor(buf: &mut [u8], n: &[u8; 8], k: &[u8; 32]) {
    let mut z = [0u8; 16];
    z[..8].copy_from_slice(n);
    for chunk in buf.chunks_mut(BLOCK_BYTES) {
        let mut ks = core_salsa20(&z, k, &SIGMA);
        for (d, s) in chunk.iter_mut().zip(ks.iter()) {
            *d ^= *s;
        }
        ks.zeroize();

        // Counter increment with byte-wise carry.
        let mut u = 1u32;
        for b in z[8..].iter_mut() {
            u += *b as u32;
            *b = u as u8;
            u >>= 8;
        }
    }
}

/// Fills `out` with the Salsa20 keystream for nonce `n` and key `k`.
pub fn salsa20_stream(out: &mut [u8], n: &[u8; 8], k: &[u8; 32]) {
    for b in out.iter_mut() {
        *b = 0;
    }
    salsa20_xor(out, n, k);
}

// Derives the XSalsa20 subkey and splits off the Salsa20 nonce.
fn xsalsa20_setup(n: &[u8; 24], k: &[u8; 32]) -> ([u8; 32], [u8; 8]) {
    let mut hn = [0u8; 16];
    hn.copy_from_slice(&n[..16]);
    let mut sn = [0u8; 8];
    sn.copy_from_slice(&n[16..]);
    (core_hsalsa20(&hn, k, &SIGMA), sn)
}

/// XORs the XSalsa20 keystream for nonce `n` and key `k` into `buf`.
pub fn xsalsa20_xor(buf: &mut [u8], n: &[u8; 24], k: &[u8; 32]) {
    let (mut subkey, sn) = xsalsa20_setup(n, k);
    salsa20_xor(buf, &sn, &subkey);
    subkey.zeroize();
}

/// Fills `out` with the XSalsa20 keystream for nonce `n` and key `k`.
pub fn xsalsa20_stream(out: &mut [u8], n: &[u8; 24], k: &[u8; 32]) {
    let (mut subkey, sn) = xsalsa20_setup(n, k);
    salsa20_stream(out, &sn, &subkey);
    subkey.zeroize();
}

#[cfg(test)]
mod tests {

    use super::*;

    fn h32(s: &str) -> [u8; 32] {
        let mut r = [0u8; 32];
        hex::decode_to_slice(s, &mut r[..]).unwrap();
        r
    }

    #[test]
    fn hsalsa20_shared_key() {
        // Curve25519 shared secret of the NaCl test key pairs, and the
        // derived box key (NaCl tests core1).
        let shared = h32("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
        let k = core_hsalsa20(&[0u8; 16], &shared, &SIGMA);
        assert!(k == h32("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389"));
    }

    #[test]
    fn xsalsa20_first_block() {
        let k = h32("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389");
        let mut n = [0u8; 24];
        hex::decode_to_slice("69696ee955b62b73cd62bda875fc73d68219e0036b7a0b37",
            &mut n[..]).unwrap();
        let mut out = [0u8; 32];
        xsalsa20_stream(&mut out, &n, &k);
        assert!(out == h32("eea6a7251c1e72916d11c2cb214d3c252539121d8e234e652d651fa4c8cff880"));
    }

    #[test]
    fn stream_is_prefix_stable() {
        // The keystream does not depend on the requested length, and
        // XOR twice restores the input.
        let k = [7u8; 32];
        let n = [3u8; 24];
        let mut long = [0u8; 300];
        xsalsa20_stream(&mut long, &n, &k);
        for len in [1usize, 63, 64, 65, 128, 200].iter() {
            let mut short = [0u8; 300];
            xsalsa20_stream(&mut short[..*len], &n, &k);
            assert!(short[..*len] == long[..*len]);
        }

        let mut buf = [0u8; 300];
        for i in 0..buf.len() {
            buf[i] = i as u8;
        }
        let orig = buf;
        xsalsa20_xor(&mut buf, &n, &k);
        for i in 0..buf.len() {
            assert!(buf[i] == orig[i] ^ long[i]);
        }
        xsalsa20_xor(&mut buf, &n, &k);
        assert!(buf[..] == orig[..]);
    }

    #[test]
    fn counter_increments_per_block() {
        // Block i of the stream is core_salsa20(n || le64(i)).
        let k = [0x42u8; 32];
        let n = [0x11u8; 8];
        let mut s = [0u8; 64 * 3];
        salsa20_stream(&mut s, &n, &k);
        for i in 0..3u64 {
            let mut z = [0u8; 16];
            z[..8].copy_from_slice(&n);
            z[8..].copy_from_slice(&i.to_le_bytes());
            let b = core_salsa20(&z, &k, &SIGMA);
            let j = (i as usize) * 64;
            assert!(s[j..(j + 64)] == b[..]);
        }
    }
}
