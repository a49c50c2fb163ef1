//! High-level API over slices.
//!
//! This module mirrors the classic NaCl "easy" interface. Arguments are
//! byte slices whose lengths are checked against the constants below
//! before anything is computed; a wrong length yields the matching
//! `Error` variant. Authentication failures are not errors: opening a
//! forged box or signed message yields `Ok(None)`, and verifying a bad
//! detached signature yields `Ok(false)`.
//!
//! Boxes use the unpadded wire format: 16-byte tag followed by the
//! ciphertext (same length as the plaintext).
//!
//! Operations that need randomness are methods of `Nacl`, which owns
//! the random source; it cannot be built without one.
//!
//! ```
//! # fn main() -> tinysalt::Result<()> {
//! let key = [7u8; 32];
//! let nonce = [1u8; 24];
//! let c = tinysalt::nacl::secretbox(b"hello", &nonce, &key)?;
//! assert_eq!(c.len(), 5 + 16);
//! let m = tinysalt::nacl::secretbox_open(&c, &nonce, &key)?;
//! assert_eq!(m.as_deref(), Some(&b"hello"[..]));
//! # Ok(())
//! # }
//! ```

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::Vec;
use crate::cryptobox;
use crate::ed25519::{PrivateKey, PublicKey};
use crate::error::{check_len, Arg, Result};
use crate::rng;
use crate::secretbox::{self, BOX_ZERO_BYTES, ZERO_BYTES};
use crate::sha512;
use crate::verify::verify_slices;
use crate::x25519;

#[cfg(feature = "getrandom")]
use crate::rng::OsRandom;

pub const SECRETBOX_KEY_LENGTH: usize = 32;
pub const SECRETBOX_NONCE_LENGTH: usize = 24;
pub const SECRETBOX_OVERHEAD_LENGTH: usize = 16;

pub const SCALAR_MULT_SCALAR_LENGTH: usize = 32;
pub const SCALAR_MULT_GROUP_ELEMENT_LENGTH: usize = 32;

pub const BOX_PUBLIC_KEY_LENGTH: usize = 32;
pub const BOX_SECRET_KEY_LENGTH: usize = 32;
pub const BOX_SHARED_KEY_LENGTH: usize = 32;
pub const BOX_NONCE_LENGTH: usize = SECRETBOX_NONCE_LENGTH;
pub const BOX_OVERHEAD_LENGTH: usize = SECRETBOX_OVERHEAD_LENGTH;

pub const SIGN_PUBLIC_KEY_LENGTH: usize = 32;
pub const SIGN_SECRET_KEY_LENGTH: usize = 64;
pub const SIGN_SEED_LENGTH: usize = 32;
pub const SIGN_SIGNATURE_LENGTH: usize = 64;

pub const HASH_LENGTH: usize = 64;

// Copies a slice into a fixed-size array, after a length check.
fn to_array<const N: usize>(arg: Arg, s: &[u8]) -> Result<[u8; N]> {
    check_len(arg, N, s.len())?;
    let mut r = [0u8; N];
    r.copy_from_slice(s);
    Ok(r)
}

/// A Curve25519 key pair for `box`. The secret key is wiped on drop.
#[derive(Clone)]
pub struct BoxKeyPair {
    pub public_key: [u8; BOX_PUBLIC_KEY_LENGTH],
    pub secret_key: [u8; BOX_SECRET_KEY_LENGTH],
}

impl Drop for BoxKeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// An Ed25519 key pair. The secret key (seed followed by public key) is
/// wiped on drop.
#[derive(Clone)]
pub struct SignKeyPair {
    pub public_key: [u8; SIGN_PUBLIC_KEY_LENGTH],
    pub secret_key: [u8; SIGN_SECRET_KEY_LENGTH],
}

impl Drop for SignKeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// Encrypts and authenticates `m` with nonce `n` and key `k`. The
/// output is the 16-byte tag followed by the ciphertext.
pub fn secretbox(m: &[u8], n: &[u8], k: &[u8]) -> Result<Vec<u8>> {
    let n = to_array::<SECRETBOX_NONCE_LENGTH>(Arg::Nonce, n)?;
    let mut k = to_array::<SECRETBOX_KEY_LENGTH>(Arg::Key, k)?;
    let mut mp = vec![0u8; ZERO_BYTES + m.len()];
    mp[ZERO_BYTES..].copy_from_slice(m);
    let mut c = vec![0u8; mp.len()];
    let r = secretbox::seal_padded(&mut c, &mp, &n, &k);
    k.zeroize();
    mp.zeroize();
    r?;
    Ok(c.split_off(BOX_ZERO_BYTES))
}

/// Verifies and decrypts a box produced by `secretbox()`. Returned value
/// is `Ok(None)` if the box does not authenticate (including when it is
/// shorter than the tag).
pub fn secretbox_open(c: &[u8], n: &[u8], k: &[u8])
    -> Result<Option<Vec<u8>>>
{
    let n = to_array::<SECRETBOX_NONCE_LENGTH>(Arg::Nonce, n)?;
    let mut k = to_array::<SECRETBOX_KEY_LENGTH>(Arg::Key, k)?;
    if c.len() < SECRETBOX_OVERHEAD_LENGTH {
        k.zeroize();
        return Ok(None);
    }
    let mut cp = vec![0u8; BOX_ZERO_BYTES + c.len()];
    cp[BOX_ZERO_BYTES..].copy_from_slice(c);
    let mut m = vec![0u8; cp.len()];
    let r = secretbox::open_padded(&mut m, &cp, &n, &k);
    k.zeroize();
    if !r? {
        return Ok(None);
    }
    Ok(Some(m.split_off(ZERO_BYTES)))
}

/// Multiplies the Curve25519 point `p` by the scalar `n`.
pub fn scalar_mult(n: &[u8], p: &[u8]) -> Result<[u8; 32]> {
    let mut n = to_array::<SCALAR_MULT_SCALAR_LENGTH>(Arg::Scalar, n)?;
    let p = to_array::<SCALAR_MULT_GROUP_ELEMENT_LENGTH>(
        Arg::GroupElement, p)?;
    let q = x25519::scalarmult(&n, &p);
    n.zeroize();
    Ok(q)
}

/// Multiplies the Curve25519 base point by the scalar `n`.
pub fn scalar_mult_base(n: &[u8]) -> Result<[u8; 32]> {
    let mut n = to_array::<SCALAR_MULT_SCALAR_LENGTH>(Arg::Scalar, n)?;
    let q = x25519::scalarmult_base(&n);
    n.zeroize();
    Ok(q)
}

/// Computes the shared key between public key `pk` and secret key `sk`.
pub fn box_before(pk: &[u8], sk: &[u8]) -> Result<[u8; BOX_SHARED_KEY_LENGTH]> {
    let pk = to_array::<BOX_PUBLIC_KEY_LENGTH>(Arg::PublicKey, pk)?;
    let mut sk = to_array::<BOX_SECRET_KEY_LENGTH>(Arg::SecretKey, sk)?;
    let k = cryptobox::beforenm(&pk, &sk);
    sk.zeroize();
    Ok(k)
}

/// Encrypts `m` with a shared key from `box_before()`.
pub fn box_after(m: &[u8], n: &[u8], k: &[u8]) -> Result<Vec<u8>> {
    secretbox(m, n, k)
}

/// Opens a box with a shared key from `box_before()`.
pub fn box_open_after(c: &[u8], n: &[u8], k: &[u8])
    -> Result<Option<Vec<u8>>>
{
    secretbox_open(c, n, k)
}

/// Encrypts `m` from secret key `sk` to public key `pk`.
pub fn box_seal(m: &[u8], n: &[u8], pk: &[u8], sk: &[u8])
    -> Result<Vec<u8>>
{
    check_len(Arg::Nonce, BOX_NONCE_LENGTH, n.len())?;
    let mut k = box_before(pk, sk)?;
    let r = box_after(m, n, &k);
    k.zeroize();
    r
}

/// Opens a box sent by public key `pk` to secret key `sk`.
pub fn box_open(c: &[u8], n: &[u8], pk: &[u8], sk: &[u8])
    -> Result<Option<Vec<u8>>>
{
    check_len(Arg::Nonce, BOX_NONCE_LENGTH, n.len())?;
    let mut k = box_before(pk, sk)?;
    let r = box_open_after(c, n, &k);
    k.zeroize();
    r
}

/// Rebuilds a box key pair from its secret key.
pub fn box_keypair_from_secret_key(sk: &[u8]) -> Result<BoxKeyPair> {
    let secret_key = to_array::<BOX_SECRET_KEY_LENGTH>(Arg::SecretKey, sk)?;
    let public_key = cryptobox::keypair_from_secret(&secret_key);
    Ok(BoxKeyPair { public_key, secret_key })
}

fn sign_private_key(sk: &[u8]) -> Result<PrivateKey> {
    let mut sk = to_array::<SIGN_SECRET_KEY_LENGTH>(Arg::SecretKey, sk)?;
    let key = PrivateKey::from_secret_key(&sk);
    sk.zeroize();
    Ok(key)
}

/// Signs `m` with the 64-byte secret key `sk`; the output is the
/// signature followed by the message.
pub fn sign(m: &[u8], sk: &[u8]) -> Result<Vec<u8>> {
    Ok(sign_private_key(sk)?.sign(m))
}

/// Verifies a signed message against public key `pk`, and returns the
/// message. Returned value is `Ok(None)` if the signature is invalid,
/// if the input is shorter than a signature, or if `pk` does not decode.
pub fn sign_open(sm: &[u8], pk: &[u8]) -> Result<Option<Vec<u8>>> {
    let pk = to_array::<SIGN_PUBLIC_KEY_LENGTH>(Arg::PublicKey, pk)?;
    Ok(PublicKey::decode(&pk).and_then(|key| key.open(sm)))
}

/// Computes the detached signature of `m` with the 64-byte secret key
/// `sk`.
pub fn sign_detached(m: &[u8], sk: &[u8])
    -> Result<[u8; SIGN_SIGNATURE_LENGTH]>
{
    Ok(sign_private_key(sk)?.sign_detached(m))
}

/// Verifies the detached signature `sig` of `m` against public key
/// `pk`.
pub fn sign_detached_verify(m: &[u8], sig: &[u8], pk: &[u8])
    -> Result<bool>
{
    let sig = to_array::<SIGN_SIGNATURE_LENGTH>(Arg::Signature, sig)?;
    let pk = to_array::<SIGN_PUBLIC_KEY_LENGTH>(Arg::PublicKey, pk)?;
    Ok(match PublicKey::decode(&pk) {
        Some(key) => key.verify_detached(&sig, m),
        None => false,
    })
}

/// Derives an Ed25519 key pair from a 32-byte seed.
pub fn sign_keypair_from_seed(seed: &[u8]) -> Result<SignKeyPair> {
    let mut seed = to_array::<SIGN_SEED_LENGTH>(Arg::Seed, seed)?;
    let key = PrivateKey::from_seed(&seed);
    seed.zeroize();
    Ok(SignKeyPair {
        public_key: key.public_key(),
        secret_key: key.encode(),
    })
}

/// Rebuilds an Ed25519 key pair from a 64-byte secret key; the public
/// key is the second half of the secret key.
pub fn sign_keypair_from_secret_key(sk: &[u8]) -> Result<SignKeyPair> {
    let secret_key = to_array::<SIGN_SECRET_KEY_LENGTH>(Arg::SecretKey, sk)?;
    let mut public_key = [0u8; SIGN_PUBLIC_KEY_LENGTH];
    public_key.copy_from_slice(&secret_key[32..]);
    Ok(SignKeyPair { public_key, secret_key })
}

/// SHA-512 of `m`.
pub fn hash(m: &[u8]) -> [u8; HASH_LENGTH] {
    sha512::hash(m)
}

/// Constant-time comparison of two byte strings; `false` if the lengths
/// differ or are zero.
pub fn verify(x: &[u8], y: &[u8]) -> bool {
    verify_slices(x, y)
}

/// Entry point for operations that need randomness.
///
/// The random source is provided at construction; `from_os()` uses the
/// operating system source.
pub struct Nacl<R: CryptoRng + RngCore> {
    rng: R,
}

impl<R: CryptoRng + RngCore> Nacl<R> {

    /// Creates an instance over the provided random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns `n` random bytes.
    pub fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut r = vec![0u8; n];
        rng::fill(&mut self.rng, &mut r)?;
        Ok(r)
    }

    /// Returns a random nonce, suitable for `secretbox()` and
    /// `box_seal()`.
    pub fn random_nonce(&mut self) -> Result<[u8; SECRETBOX_NONCE_LENGTH]> {
        let mut n = [0u8; SECRETBOX_NONCE_LENGTH];
        rng::fill(&mut self.rng, &mut n)?;
        Ok(n)
    }

    /// Generates a new box key pair.
    pub fn box_keypair(&mut self) -> Result<BoxKeyPair> {
        let (public_key, secret_key) = cryptobox::keypair(&mut self.rng)?;
        Ok(BoxKeyPair { public_key, secret_key })
    }

    /// Generates a new Ed25519 key pair.
    pub fn sign_keypair(&mut self) -> Result<SignKeyPair> {
        let mut seed = [0u8; SIGN_SEED_LENGTH];
        rng::fill(&mut self.rng, &mut seed)?;
        let r = sign_keypair_from_seed(&seed);
        seed.zeroize();
        r
    }
}

#[cfg(feature = "getrandom")]
impl Nacl<OsRandom> {

    /// Creates an instance over the operating system random source.
    pub fn from_os() -> Self {
        Self::new(OsRandom)
    }
}
