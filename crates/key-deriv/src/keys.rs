//! The BLS12-381 secret scalar produced by every derivation step.

use std::{fmt, sync::LazyLock};

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    derive::{derive_child_sk, DerivationError},
    paths::DerivationPath,
};

/// Order of the BLS12-381 scalar group, in decimal.
pub const R: &str =
    "52435875175126190479447740508185965837690552500527637822603658699938581184513";

/// Big-endian encoding of [`R`].
const R_BE_BYTES: [u8; SECRET_KEY_LEN] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Width of the fixed big-endian encoding of a [`SecretKey`].
///
/// This is also the width over which the parent key is complemented when building the second
/// Lamport chunk set.
pub const SECRET_KEY_LEN: usize = 32;

/// [`R`] as a big integer.
pub(crate) static GROUP_ORDER: LazyLock<BigUint> =
    LazyLock::new(|| BigUint::from_bytes_be(&R_BE_BYTES));

/// A BLS12-381 secret key: an integer in the range `[1, r)`.
///
/// Held as a fixed-width big-endian array so the memory can be wiped on drop.
/// The [`fmt::Debug`] impl never prints the value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Wraps an already reduced, nonzero scalar.
    pub(crate) fn from_reduced(scalar: &BigUint) -> Self {
        debug_assert!(!scalar.is_zero() && scalar < &*GROUP_ORDER);

        let bytes = scalar.to_bytes_be();
        let mut out = [0u8; SECRET_KEY_LEN];
        out[SECRET_KEY_LEN - bytes.len()..].copy_from_slice(&bytes);
        Self(out)
    }

    /// Builds a secret key from its 32-byte big-endian encoding.
    ///
    /// Fails with [`DerivationError::InvalidScalar`] unless `0 < value < r`.
    pub fn from_be_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Result<Self, DerivationError> {
        let value = BigUint::from_bytes_be(bytes);
        if value.is_zero() || value >= *GROUP_ORDER {
            return Err(DerivationError::InvalidScalar);
        }
        Ok(Self(*bytes))
    }

    /// Parses a secret key from its decimal rendering.
    pub fn from_decimal(s: &str) -> Result<Self, DerivationError> {
        let value: BigUint = s.trim().parse().map_err(|_| DerivationError::InvalidScalar)?;
        if value.is_zero() || value >= *GROUP_ORDER {
            return Err(DerivationError::InvalidScalar);
        }
        Ok(Self::from_reduced(&value))
    }

    /// Fixed-width 32-byte big-endian encoding.
    pub const fn to_be_bytes(&self) -> [u8; SECRET_KEY_LEN] {
        self.0
    }

    /// Minimal big-endian encoding, without leading zero bytes.
    ///
    /// This is the form hashed into the first Lamport chunk set.
    pub fn minimal_be_bytes(&self) -> &[u8] {
        let first = self.0.iter().position(|b| *b != 0).unwrap_or(SECRET_KEY_LEN);
        &self.0[first..]
    }

    /// Bitwise complement over the full 256-bit width, big-endian.
    ///
    /// The top bit of any valid key is clear, so the result never has a leading zero byte.
    pub fn flipped_be_bytes(&self) -> [u8; SECRET_KEY_LEN] {
        self.0.map(|b| !b)
    }

    /// The key as a big integer.
    pub fn as_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Decimal rendering, as used by the published test vectors.
    pub fn to_decimal_string(&self) -> String {
        self.as_biguint().to_str_radix(10)
    }

    /// Derives the hardened child at `index`.
    pub fn derive_child(&self, index: u32) -> Result<Self, DerivationError> {
        derive_child_sk(self, index)
    }

    /// Walks every index of `path` starting from this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, DerivationError> {
        let mut key = self.clone();
        for index in path {
            key = key.derive_child(index)?;
        }
        Ok(key)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
