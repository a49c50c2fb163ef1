//! Secret-key authenticated encryption (XSalsa20-Poly1305).
//!
//! Functions in this module use the NaCl zero-padded buffer
//! convention: the plaintext buffer starts with `ZERO_BYTES` (32) zero
//! bytes, and the ciphertext buffer starts with `BOX_ZERO_BYTES` (16)
//! zero bytes followed by the 16-byte Poly1305 tag. Both buffers have
//! the same length. The unpadded wire format (tag followed by
//! ciphertext) is handled by the high-level API in `nacl`.
//!
//! The Poly1305 one-time key is the first 32 bytes of the XSalsa20
//! keystream; the message is encrypted with the keystream that follows.
//! Tags are checked in constant time before any decryption takes place.

use zeroize::Zeroize;

use crate::error::{check_padded, Result};
use crate::poly1305::{onetimeauth, onetimeauth_verify};
use crate::salsa20::{xsalsa20_stream, xsalsa20_xor};

/// Length of a secretbox key, in bytes.
pub const KEY_BYTES: usize = 32;

/// Length of a secretbox nonce, in bytes.
pub const NONCE_BYTES: usize = 24;

/// Number of leading zero bytes in a padded plaintext.
pub const ZERO_BYTES: usize = 32;

/// Number of leading zero bytes in a padded ciphertext.
pub const BOX_ZERO_BYTES: usize = 16;

/// Length of the authentication tag, in bytes.
pub const MAC_BYTES: usize = ZERO_BYTES - BOX_ZERO_BYTES;

/// Encrypts and authenticates the padded plaintext `m` into `c`.
///
/// `m` must start with `ZERO_BYTES` zero bytes (their content is not
/// checked, but they are part of the keystream computation). On output,
/// `c[..16]` is zero, `c[16..32]` is the tag and `c[32..]` the
/// ciphertext. An error is returned if `c` and `m` differ in length or
/// are shorter than `ZERO_BYTES`.
pub fn seal_padded(c: &mut [u8], m: &[u8], n: &[u8; NONCE_BYTES],
    k: &[u8; KEY_BYTES]) -> Result<()>
{
    check_padded(m.len(), c.len(), ZERO_BYTES)?;
    c.copy_from_slice(m);
    xsalsa20_xor(c, n, k);

    // c[0..32] now holds the Poly1305 key (the zero prefix was XORed
    // with the keystream).
    let mut otk = [0u8; 32];
    otk.copy_from_slice(&c[..32]);
    let tag = onetimeauth(&c[32..], &otk);
    otk.zeroize();
    c[16..32].copy_from_slice(&tag);
    for b in c[..16].iter_mut() {
        *b = 0;
    }
    Ok(())
}

/// Verifies and decrypts the padded ciphertext `c` into `m`.
///
/// Returned value is `Ok(true)` on success, in which case `m[..32]` is
/// zero and `m[32..]` holds the plaintext. If the tag does not match,
/// `Ok(false)` is returned and `m` is left untouched. An error is
/// returned if `c` and `m` differ in length or are shorter than
/// `ZERO_BYTES`.
pub fn open_padded(m: &mut [u8], c: &[u8], n: &[u8; NONCE_BYTES],
    k: &[u8; KEY_BYTES]) -> Result<bool>
{
    check_padded(c.len(), m.len(), ZERO_BYTES)?;
    let mut otk = [0u8; 32];
    xsalsa20_stream(&mut otk, n, k);
    let mut tag = [0u8; 16];
    tag.copy_from_slice(&c[16..32]);
    let ok = onetimeauth_verify(&tag, &c[32..], &otk);
    otk.zeroize();
    if ok == 0 {
        return Ok(false);
    }
    m.copy_from_slice(c);
    xsalsa20_xor(m, n, k);
    for b in m[..32].iter_mut() {
        *b = 0;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::Error;

    const FIRSTKEY: &str = "1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389";
    const NONCE: &str = "69696ee955b62b73cd62bda875fc73d68219e0036b7a0b37";
    const MESSAGE: &str = "be075fc53c81f2d5cf141316ebeb0c7b5228c52a4c62cbd44b66849b64244ffce5ecbaaf33bd751a1ac728d45e6c61296cdc3c01233561f41db66cce314adb310e3be8250c46f06dceea3a7fa1348057e2f6556ad6b1318a024a838f21af1fde048977eb48f59ffd4924ca1c60902e52f0a089bc76897040e082f937763848645e0705";
    const BOXED: &str = "f3ffc7703f9400e52a7dfb4b3d3305d98e993b9f48681273c29650ba32fc76ce48332ea7164d96a4476fb8c531a1186ac0dfc17c98dce87b4da7f011ec48c97271d2c20f9b928fe2270d6fb863d51738b48eeee314a7cc8ab932164548e526ae90224368517acfeabd6bb3732bc0e9da99832b61ca01b6de56244a9e88d5f9b37973f622a43d14a6599b1f654cb45a74e355a5";

    fn key_nonce() -> ([u8; 32], [u8; 24]) {
        let mut k = [0u8; 32];
        hex::decode_to_slice(FIRSTKEY, &mut k[..]).unwrap();
        let mut n = [0u8; 24];
        hex::decode_to_slice(NONCE, &mut n[..]).unwrap();
        (k, n)
    }

    #[test]
    fn nacl_vector() {
        let (k, n) = key_nonce();
        let msg = hex::decode(MESSAGE).unwrap();
        let boxed = hex::decode(BOXED).unwrap();
        assert!(msg.len() == 131);

        let mut m = vec![0u8; 32 + msg.len()];
        m[32..].copy_from_slice(&msg);
        let mut c = vec![0xAAu8; m.len()];
        seal_padded(&mut c, &m, &n, &k).unwrap();
        assert!(c[..16] == [0u8; 16]);
        assert!(c[16..] == boxed[..]);

        let mut m2 = vec![0x55u8; c.len()];
        assert!(open_padded(&mut m2, &c, &n, &k).unwrap());
        assert!(m2 == m);
    }

    #[test]
    fn forgery() {
        let (k, n) = key_nonce();
        let mut m = [0u8; 32 + 40];
        for i in 32..m.len() {
            m[i] = i as u8;
        }
        let mut c = [0u8; 32 + 40];
        seal_padded(&mut c, &m, &n, &k).unwrap();

        // Every single-bit flip in the tag or ciphertext is rejected,
        // and the output is untouched.
        for i in 16..c.len() {
            for j in 0..8 {
                let mut c2 = c;
                c2[i] ^= 1 << j;
                let mut m2 = [0x33u8; 32 + 40];
                assert!(!open_padded(&mut m2, &c2, &n, &k).unwrap());
                assert!(m2 == [0x33u8; 32 + 40]);
            }
        }

        // Wrong key or nonce.
        let mut m2 = [0u8; 32 + 40];
        let mut k2 = k;
        k2[5] ^= 0x10;
        assert!(!open_padded(&mut m2, &c, &n, &k2).unwrap());
        let mut n2 = n;
        n2[23] ^= 0x01;
        assert!(!open_padded(&mut m2, &c, &n2, &k).unwrap());
        assert!(open_padded(&mut m2, &c, &n, &k).unwrap());
        assert!(m2 == m);
    }

    #[test]
    fn empty_message() {
        let (k, n) = key_nonce();
        let m = [0u8; 32];
        let mut c = [0u8; 32];
        seal_padded(&mut c, &m, &n, &k).unwrap();
        let mut m2 = [1u8; 32];
        assert!(open_padded(&mut m2, &c, &n, &k).unwrap());
        assert!(m2 == [0u8; 32]);
    }

    #[test]
    fn bad_buffers() {
        let (k, n) = key_nonce();
        let mut c = [0u8; 31];
        assert!(seal_padded(&mut c, &[0u8; 31], &n, &k)
            == Err(Error::ShortBuffer { min: 32, actual: 31 }));
        let mut c = [0u8; 40];
        assert!(seal_padded(&mut c, &[0u8; 41], &n, &k)
            == Err(Error::LengthMismatch { input: 41, output: 40 }));
        let mut m = [7u8; 40];
        assert!(open_padded(&mut m, &[0u8; 41], &n, &k)
            == Err(Error::LengthMismatch { input: 41, output: 40 }));
        assert!(m == [7u8; 40]);
    }
}
