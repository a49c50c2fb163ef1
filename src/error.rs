//! Error type for precondition failures.
//!
//! Only calls that cannot be carried out at all produce an `Error`:
//! a key, nonce, seed or signature of the wrong length, a buffer too
//! short for the NaCl zero-padding convention, or a failing random
//! source. A ciphertext or signature that does not authenticate is NOT
//! an error; such outcomes are reported as `None` (or `false`) so that
//! callers can tell "forged input" apart from "malformed call".

/// Precondition failure reported by this library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("bad key size: expected {expected} bytes, got {actual}")]
    BadKeySize { expected: usize, actual: usize },

    #[error("bad nonce size: expected {expected} bytes, got {actual}")]
    BadNonceSize { expected: usize, actual: usize },

    #[error("bad public key size: expected {expected} bytes, got {actual}")]
    BadPublicKeySize { expected: usize, actual: usize },

    #[error("bad secret key size: expected {expected} bytes, got {actual}")]
    BadSecretKeySize { expected: usize, actual: usize },

    #[error("bad signature size: expected {expected} bytes, got {actual}")]
    BadSignatureSize { expected: usize, actual: usize },

    #[error("bad seed size: expected {expected} bytes, got {actual}")]
    BadSeedSize { expected: usize, actual: usize },

    #[error("bad scalar size: expected {expected} bytes, got {actual}")]
    BadScalarSize { expected: usize, actual: usize },

    #[error("bad group element size: expected {expected} bytes, got {actual}")]
    BadGroupElementSize { expected: usize, actual: usize },

    /// A padded NaCl buffer is shorter than the mandatory zero prefix.
    #[error("buffer too short: need at least {min} bytes, got {actual}")]
    ShortBuffer { min: usize, actual: usize },

    /// Input and output buffers of a padded NaCl call differ in length.
    #[error("buffer length mismatch: input has {input} bytes, output has {output}")]
    LengthMismatch { input: usize, output: usize },

    /// The random source could not produce bytes.
    #[error("random source failure")]
    Rng,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Kind of fixed-size argument, used by `check_len()` to pick the
/// matching error variant.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Arg {
    Key,
    Nonce,
    PublicKey,
    SecretKey,
    Signature,
    Seed,
    Scalar,
    GroupElement,
}

/// Checks that `actual` equals `expected`, returning the error variant
/// for `arg` otherwise.
pub(crate) fn check_len(arg: Arg, expected: usize, actual: usize)
    -> Result<()>
{
    if actual == expected {
        return Ok(());
    }
    log::debug!("rejecting {:?} argument: expected {} bytes, got {}",
        arg, expected, actual);
    Err(match arg {
        Arg::Key          => Error::BadKeySize { expected, actual },
        Arg::Nonce        => Error::BadNonceSize { expected, actual },
        Arg::PublicKey    => Error::BadPublicKeySize { expected, actual },
        Arg::SecretKey    => Error::BadSecretKeySize { expected, actual },
        Arg::Signature    => Error::BadSignatureSize { expected, actual },
        Arg::Seed         => Error::BadSeedSize { expected, actual },
        Arg::Scalar       => Error::BadScalarSize { expected, actual },
        Arg::GroupElement => Error::BadGroupElementSize { expected, actual },
    })
}

/// Checks the layout of a padded NaCl buffer pair: both buffers have the
/// same length, which is at least `min`.
pub(crate) fn check_padded(input: usize, output: usize, min: usize)
    -> Result<()>
{
    if input != output {
        log::debug!("padded buffers differ in length ({} vs {})",
            input, output);
        return Err(Error::LengthMismatch { input, output });
    }
    if input < min {
        log::debug!("padded buffer of {} bytes is below the {} byte minimum",
            input, min);
        return Err(Error::ShortBuffer { min, actual: input });
    }
    Ok(())
}
