//! Hashing input key material into the BLS12-381 scalar field.

use hkdf::Hkdf;
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

use crate::{
    derive::DerivationError,
    keys::{SecretKey, GROUP_ORDER},
};

/// Number of HKDF output bytes reduced into a scalar.
///
/// This is `ceil((3 * ceil(log2(r))) / 16)`.
pub const L: usize = 48;

/// ASCII salt whose digest keys the first extraction.
pub const SALT: &[u8; 20] = b"BLS-SIG-KEYGEN-SALT-";

/// Bound on rejection sampling rounds.
///
/// A round yields zero with probability `1/r`, so reaching this bound means the hash is broken.
const MAX_ROUNDS: usize = 255;

/// Hashes `ikm` into a nonzero scalar modulo `r`.
///
/// Extracts with `SHA-256(SALT)` over `ikm || 0x00`, expands `L` bytes with
/// `key_info || I2OSP(L, 2)`, and reduces modulo `r`. The salt stays fixed across rounds, so a
/// zero result repeats until [`DerivationError::StreamExhaustion`] ends the loop.
pub fn hkdf_mod_r(ikm: &[u8], key_info: &[u8]) -> Result<SecretKey, DerivationError> {
    let mut ikm_ext = Zeroizing::new(Vec::with_capacity(ikm.len() + 1));
    ikm_ext.extend_from_slice(ikm);
    ikm_ext.push(0x00);

    let mut info = Vec::with_capacity(key_info.len() + 2);
    info.extend_from_slice(key_info);
    info.extend_from_slice(&(L as u16).to_be_bytes());

    let salt: [u8; 32] = Sha256::digest(SALT).into();

    let sk = first_nonzero(|| {
        let hk = Hkdf::<Sha256>::new(Some(salt.as_slice()), ikm_ext.as_slice());
        let mut okm = Zeroizing::new([0u8; L]);
        hk.expand(&info, okm.as_mut_slice())
            .map_err(|_| DerivationError::StreamExhaustion)?;

        Ok(BigUint::from_bytes_be(okm.as_slice()) % &*GROUP_ORDER)
    })?;

    Ok(SecretKey::from_reduced(&sk))
}

/// Runs `round` until it yields a nonzero scalar, at most [`MAX_ROUNDS`] times.
fn first_nonzero(
    mut round: impl FnMut() -> Result<BigUint, DerivationError>,
) -> Result<BigUint, DerivationError> {
    for i in 0..MAX_ROUNDS {
        let sk = round()?;
        if !sk.is_zero() {
            return Ok(sk);
        }

        trace!(round = %i, "reduced scalar is zero, retrying");
    }

    Err(DerivationError::StreamExhaustion)
}
