//! Random sources.
//!
//! Operations that need randomness (key pair generation, nonces) take
//! the source as an explicit argument implementing the `rand_core`
//! traits `RngCore` and `CryptoRng`. There is no global source and no
//! fallback: a source that fails makes the operation fail with
//! `Error::Rng`.
//!
//! `OsRandom` (feature `getrandom`) is the default source: it reads
//! from the operating system, in requests of at most `QUOTA` bytes
//! each.

use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Maximum number of bytes requested from the operating system in a
/// single call.
pub const QUOTA: usize = 65536;

/// Fills `buf` with bytes from `rng`.
///
/// A failure of the source is logged and reported as `Error::Rng`; the
/// content of `buf` is then unspecified.
pub fn fill<R: CryptoRng + RngCore + ?Sized>(rng: &mut R, buf: &mut [u8])
    -> Result<()>
{
    rng.try_fill_bytes(buf).map_err(|e| {
        log::error!("random source failed to produce {} bytes: {}",
            buf.len(), e);
        Error::Rng
    })
}

/// Operating system random source.
///
/// This wraps `rand_core::OsRng`, splitting large requests into chunks
/// of at most `QUOTA` bytes.
#[cfg(feature = "getrandom")]
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

#[cfg(feature = "getrandom")]
impl RngCore for OsRandom {

    fn next_u32(&mut self) -> u32 {
        rand_core::OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(QUOTA) {
            rand_core::OsRng.fill_bytes(chunk);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8])
        -> core::result::Result<(), rand_core::Error>
    {
        if dest.len() > QUOTA {
            log::trace!("splitting {}-byte random request into chunks",
                dest.len());
        }
        for chunk in dest.chunks_mut(QUOTA) {
            rand_core::OsRng.try_fill_bytes(chunk)?;
        }
        Ok(())
    }
}

#[cfg(feature = "getrandom")]
impl CryptoRng for OsRandom {}

#[cfg(test)]
pub(crate) mod tests {

    use super::*;
    use core::num::NonZeroU32;

    /// Deterministic source for tests: SHA-256 in counter mode.
    pub(crate) struct TestRng {
        ctr: u64,
        buf: [u8; 32],
        ptr: usize,
    }

    impl TestRng {
        pub(crate) fn new(seed: u64) -> Self {
            Self { ctr: seed << 32, buf: [0u8; 32], ptr: 32 }
        }
    }

    impl RngCore for TestRng {
        fn next_u32(&mut self) -> u32 {
            rand_core::impls::next_u32_via_fill(self)
        }

        fn next_u64(&mut self) -> u64 {
            rand_core::impls::next_u64_via_fill(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            use sha2::{Digest, Sha256};
            for b in dest.iter_mut() {
                if self.ptr == 32 {
                    self.buf.copy_from_slice(
                        &Sha256::digest(self.ctr.to_le_bytes()));
                    self.ctr += 1;
                    self.ptr = 0;
                }
                *b = self.buf[self.ptr];
                self.ptr += 1;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8])
            -> core::result::Result<(), rand_core::Error>
        {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for TestRng {}

    /// Source that always fails.
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8])
            -> core::result::Result<(), rand_core::Error>
        {
            let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
            Err(rand_core::Error::from(code))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn deterministic() {
        let mut a = [0u8; 100];
        let mut b = [0u8; 100];
        fill(&mut TestRng::new(1), &mut a).unwrap();
        fill(&mut TestRng::new(1), &mut b).unwrap();
        assert!(a == b);
        fill(&mut TestRng::new(2), &mut b).unwrap();
        assert!(a != b);
    }

    #[test]
    fn failure() {
        let mut buf = [0u8; 16];
        assert!(fill(&mut FailingRng, &mut buf) == Err(Error::Rng));
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn os_random() {
        // Larger than one quota, so that the request is split.
        let mut buf = std::vec![0u8; QUOTA + 1000];
        fill(&mut OsRandom, &mut buf).unwrap();
        assert!(buf[..32] != [0u8; 32]);
        assert!(buf[QUOTA..(QUOTA + 32)] != [0u8; 32]);

        let mut c = [0u8; 32];
        let mut d = [0u8; 32];
        fill(&mut OsRandom, &mut c).unwrap();
        fill(&mut OsRandom, &mut d).unwrap();
        assert!(c != d);
    }
}
