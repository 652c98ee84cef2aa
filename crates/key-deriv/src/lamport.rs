//! Lamport one-time keys used to mix a parent key and a child index.
//!
//! A parent secret key is expanded into two sets of [`LAMPORT_CHUNK_COUNT`] chunks, one from the
//! key itself and one from its 256-bit complement. Each chunk is hashed and the result is
//! compressed into a single 32-byte Lamport public key, which seeds the child key.

use std::ops::Deref;

use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{derive::DerivationError, keys::SecretKey};

/// Number of chunks in a Lamport secret key.
pub const LAMPORT_CHUNK_COUNT: usize = 255;

/// Size of a Lamport chunk, equal to the SHA-256 digest size.
pub const LAMPORT_CHUNK_SIZE: usize = 32;

/// Total HKDF output needed for one Lamport secret key.
///
/// This is exactly the most HKDF-SHA256 can expand to.
const LAMPORT_OKM_LEN: usize = LAMPORT_CHUNK_COUNT * LAMPORT_CHUNK_SIZE;

/// A single Lamport chunk.
pub type LamportChunk = [u8; LAMPORT_CHUNK_SIZE];

/// A compressed Lamport public key.
pub type LamportPublicKey = [u8; 32];

/// A Lamport secret key: [`LAMPORT_CHUNK_COUNT`] chunks of HKDF output.
///
/// This type can only be constructed via [`ikm_to_lamport_sk`].
/// Implements [`Deref<Target = [LamportChunk; LAMPORT_CHUNK_COUNT]>`] for access to the chunks.
pub struct LamportSecretKey(Box<[LamportChunk; LAMPORT_CHUNK_COUNT]>);

impl Drop for LamportSecretKey {
    fn drop(&mut self) {
        (*self.0).zeroize();
    }
}

impl ZeroizeOnDrop for LamportSecretKey {}

impl Deref for LamportSecretKey {
    type Target = [LamportChunk; LAMPORT_CHUNK_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for LamportSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LamportSecretKey(<redacted>)")
    }
}

/// Expands `ikm` under `salt` into a Lamport secret key.
///
/// Runs HKDF-Extract with `salt`, then HKDF-Expand with empty info, and splits the output
/// stream into sequential chunks.
pub fn ikm_to_lamport_sk(ikm: &[u8], salt: &[u8]) -> Result<LamportSecretKey, DerivationError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = Zeroizing::new([0u8; LAMPORT_OKM_LEN]);
    hk.expand(&[], okm.as_mut_slice())
        .map_err(|_| DerivationError::StreamExhaustion)?;

    let mut chunks = Box::new([[0u8; LAMPORT_CHUNK_SIZE]; LAMPORT_CHUNK_COUNT]);
    for (chunk, stream) in chunks.iter_mut().zip(okm.chunks_exact(LAMPORT_CHUNK_SIZE)) {
        chunk.copy_from_slice(stream);
    }

    Ok(LamportSecretKey(chunks))
}

/// First Lamport secret key of `parent` at `index`, expanded from the minimal big-endian
/// encoding of the parent key.
pub fn lamport_0(parent: &SecretKey, index: u32) -> Result<LamportSecretKey, DerivationError> {
    ikm_to_lamport_sk(parent.minimal_be_bytes(), &index.to_be_bytes())
}

/// Second Lamport secret key of `parent` at `index`, expanded from the complement of the parent
/// key over 256 bits.
pub fn lamport_1(parent: &SecretKey, index: u32) -> Result<LamportSecretKey, DerivationError> {
    let flipped = Zeroizing::new(parent.flipped_be_bytes());
    let first = flipped.iter().position(|b| *b != 0).unwrap_or(flipped.len());
    ikm_to_lamport_sk(&flipped[first..], &index.to_be_bytes())
}

/// Compresses the two Lamport secret keys of `parent` at `index` into a Lamport public key.
///
/// The digest covers `H(lamport_0[0]) || .. || H(lamport_0[254]) || H(lamport_1[0]) || .. ||
/// H(lamport_1[254])`, in that order.
pub fn parent_sk_to_lamport_pk(
    parent: &SecretKey,
    index: u32,
) -> Result<LamportPublicKey, DerivationError> {
    let lamport_0 = lamport_0(parent, index)?;
    let lamport_1 = lamport_1(parent, index)?;

    // Streaming the per-chunk digests is equivalent to hashing the full concatenation.
    let mut hasher = Sha256::new();
    for chunk in lamport_0.iter().chain(lamport_1.iter()) {
        hasher.update(Sha256::digest(chunk));
    }

    Ok(hasher.finalize().into())
}
