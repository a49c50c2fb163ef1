//! Tinysalt is a portable, constant-time implementation of the NaCl
//! cryptographic core.
//!
//! The library provides, from the bottom up:
//!
//!  - arithmetic in the finite field GF(2^255-19) (`field`);
//!  - the X25519 key exchange function (`x25519`);
//!  - the Salsa20 core, HSalsa20 and the XSalsa20 stream cipher
//!    (`salsa20`);
//!  - the Poly1305 one-time authenticator (`poly1305`);
//!  - authenticated encryption with a shared secret key (`secretbox`)
//!    and with public keys (`cryptobox`);
//!  - the SHA-512 hash function (`sha512`);
//!  - integers modulo the Edwards25519 group order (`scalar`), curve
//!    points and Ed25519 signatures (`ed25519`);
//!  - a high-level API over byte slices, with length checks and an
//!    injected random source (`nacl`, requires the `alloc` feature).
//!
//! Low-level modules work on fixed-size arrays and, for `secretbox` and
//! `cryptobox`, on the NaCl zero-padded buffer convention. The `nacl`
//! module works on slices, checks all lengths, and uses the unpadded
//! wire format (tag followed by ciphertext).
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the
//! standard library and enables the `getrandom` feature, which provides
//! the operating system random source (`rng::OsRandom`). With only the
//! `alloc` feature, the high-level API remains available; without
//! `alloc`, only the fixed-size primitives can be used.
//!
//! # Conventions
//!
//! All implemented functions are constant-time with regard to secret
//! data. In order to avoid unwanted side-channel leaks, Booleans are
//! avoided in internal computations (compilers tend to "optimize"
//! things a bit too eagerly when handling `bool` values). Functions that
//! return or use a potentially secret Boolean value use the `u32` type;
//! the convention is that 0xFFFFFFFF means "true", and 0x00000000 means
//! "false". No other value shall be used.
//!
//! Functions that modify the object on which they are called tend to
//! have a name in `set_*()` (e.g. for a curve point `P`, `P.set_double()`
//! modifies the point in place, while `P.double()` returns the double as
//! a new value).
//!
//! Errors are reported through the `Error` type, only for calls that
//! cannot be carried out (wrong argument length, failing random source).
//! Forged ciphertexts and invalid signatures are reported as `None` or
//! `false`. The `log` facade is used for diagnostics; no key or message
//! bytes are ever logged.

#![no_std]

#[cfg(all(feature = "alloc", not(any(feature = "std", test))))]
#[macro_use]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(any(feature = "std", test))))]
pub(crate) use alloc::vec::Vec;

#[cfg(any(feature = "std", test))]
pub(crate) use std::vec::Vec;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod error;
pub use error::{Error, Result};

pub mod verify;
pub mod field;
pub mod x25519;
pub mod salsa20;
pub mod poly1305;
pub mod secretbox;
pub mod cryptobox;
pub mod sha512;
pub mod scalar;
pub mod ed25519;
pub mod rng;

#[cfg(feature = "alloc")]
pub mod nacl;
