//! Public-key authenticated encryption (Curve25519-XSalsa20-Poly1305).
//!
//! The sender's secret key and the recipient's public key are combined
//! with X25519; the shared point is passed through HSalsa20 (zero input
//! block, `SIGMA` constant) to obtain a 32-byte symmetric key, which is
//! then used with `secretbox`. The `*_afternm` functions take that
//! precomputed key directly, which saves the scalar multiplication when
//! many messages are exchanged between the same two parties.
//!
//! Buffers follow the same zero-padded convention as `secretbox`.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::Result;
use crate::rng;
use crate::salsa20::{core_hsalsa20, SIGMA};
use crate::secretbox;
use crate::x25519::{scalarmult, scalarmult_base};

/// Length of a public key, in bytes.
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Length of a secret key, in bytes.
pub const SECRET_KEY_BYTES: usize = 32;

/// Length of a precomputed shared key, in bytes.
pub const BEFORE_NM_BYTES: usize = 32;

/// Length of a nonce, in bytes.
pub const NONCE_BYTES: usize = secretbox::NONCE_BYTES;

/// Number of leading zero bytes in a padded plaintext.
pub const ZERO_BYTES: usize = secretbox::ZERO_BYTES;

/// Number of leading zero bytes in a padded ciphertext.
pub const BOX_ZERO_BYTES: usize = secretbox::BOX_ZERO_BYTES;

/// Returns the public key matching the secret key `sk`.
pub fn keypair_from_secret(sk: &[u8; SECRET_KEY_BYTES])
    -> [u8; PUBLIC_KEY_BYTES]
{
    scalarmult_base(sk)
}

/// Generates a new key pair from the provided random source. Returned
/// value is `(public_key, secret_key)`.
pub fn keypair<R: CryptoRng + RngCore + ?Sized>(rng: &mut R)
    -> Result<([u8; PUBLIC_KEY_BYTES], [u8; SECRET_KEY_BYTES])>
{
    let mut sk = [0u8; SECRET_KEY_BYTES];
    rng::fill(rng, &mut sk)?;
    Ok((keypair_from_secret(&sk), sk))
}

/// Computes the shared key for public key `pk` and secret key `sk`.
pub fn beforenm(pk: &[u8; PUBLIC_KEY_BYTES], sk: &[u8; SECRET_KEY_BYTES])
    -> [u8; BEFORE_NM_BYTES]
{
    let mut s = scalarmult(sk, pk);
    let k = core_hsalsa20(&[0u8; 16], &s, &SIGMA);
    s.zeroize();
    k
}

/// Encrypts the padded plaintext `m` into `c` with a precomputed shared
/// key (see `secretbox::seal_padded()`).
pub fn seal_padded_afternm(c: &mut [u8], m: &[u8], n: &[u8; NONCE_BYTES],
    k: &[u8; BEFORE_NM_BYTES]) -> Result<()>
{
    secretbox::seal_padded(c, m, n, k)
}

/// Verifies and decrypts the padded ciphertext `c` into `m` with a
/// precomputed shared key (see `secretbox::open_padded()`).
pub fn open_padded_afternm(m: &mut [u8], c: &[u8], n: &[u8; NONCE_BYTES],
    k: &[u8; BEFORE_NM_BYTES]) -> Result<bool>
{
    secretbox::open_padded(m, c, n, k)
}

/// Encrypts the padded plaintext `m` into `c`, from the sender's secret
/// key `sk` to the recipient's public key `pk`.
pub fn seal_padded(c: &mut [u8], m: &[u8], n: &[u8; NONCE_BYTES],
    pk: &[u8; PUBLIC_KEY_BYTES], sk: &[u8; SECRET_KEY_BYTES]) -> Result<()>
{
    let mut k = beforenm(pk, sk);
    let r = seal_padded_afternm(c, m, n, &k);
    k.zeroize();
    r
}

/// Verifies and decrypts the padded ciphertext `c` into `m`, using the
/// sender's public key `pk` and the recipient's secret key `sk`.
pub fn open_padded(m: &mut [u8], c: &[u8], n: &[u8; NONCE_BYTES],
    pk: &[u8; PUBLIC_KEY_BYTES], sk: &[u8; SECRET_KEY_BYTES]) -> Result<bool>
{
    let mut k = beforenm(pk, sk);
    let r = open_padded_afternm(m, c, n, &k);
    k.zeroize();
    r
}
