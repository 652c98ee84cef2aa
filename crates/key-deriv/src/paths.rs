//! EIP-2334 derivation paths.
//!
//! # Path Layout
//!
//! Paths have the form `m / purpose / coin_type / account / use`, where every index is a hardened
//! `u32` child of the previous node:
//!
//! ```text
//! Master Seed (>= 32 bytes)
//! └── m
//!     └── m/12381 ───────────────────── BLS12-381 purpose
//!         └── m/12381/3600 ──────────── coin type
//!             └── m/12381/3600/i ────── account `i`
//!                 └── m/12381/3600/i/0 ────── withdrawal key
//!                     └── m/12381/3600/i/0/0 ─ signing key
//! ```
//!
//! Only the root marker `m` and decimal indices are accepted. There are no hardened markers
//! (`'`) since every level is hardened.

use std::{fmt, str::FromStr};

use crate::derive::DerivationError;

/// Purpose index, named after the curve (BLS12-381).
pub const PURPOSE: u32 = 12381;

/// Coin type index separating these keys from those of other chains.
pub const COIN_TYPE: u32 = 3600;

/// Index of the withdrawal key under an account.
const WITHDRAWAL_IDX: u32 = 0;

/// Index of the signing key under the withdrawal key.
const SIGNING_IDX: u32 = 0;

/// Root marker every path starts with.
const ROOT: char = 'm';

/// Returns the withdrawal key path `m/12381/3600/{account}/0`.
pub fn withdrawal_key_path(account: u32) -> String {
    format!("m/{PURPOSE}/{COIN_TYPE}/{account}/{WITHDRAWAL_IDX}")
}

/// Returns the signing key path `m/12381/3600/{account}/0/0`.
pub fn signing_key_path(account: u32) -> String {
    format!("m/{PURPOSE}/{COIN_TYPE}/{account}/{WITHDRAWAL_IDX}/{SIGNING_IDX}")
}

/// Parses `path` into the ordered child indices below the master node.
///
/// Whitespace anywhere in the string is ignored. The remainder must match `m(/[0-9]+)*`,
/// otherwise [`DerivationError::InvalidPath`] is returned. A segment that does not fit in a
/// `u32` yields [`DerivationError::IndexOverflow`].
pub fn parse_path(path: &str) -> Result<Vec<u32>, DerivationError> {
    let compact: String = path.chars().filter(|c| !c.is_whitespace()).collect();

    let Some(rest) = compact.strip_prefix(ROOT) else {
        return Err(DerivationError::InvalidPath(path.to_owned()));
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = rest.strip_prefix('/') else {
        return Err(DerivationError::InvalidPath(path.to_owned()));
    };

    // Check the whole grammar before parsing so a malformed path is reported as such even when
    // an earlier segment would overflow.
    let segments: Vec<&str> = rest.split('/').collect();
    if segments
        .iter()
        .any(|seg| seg.is_empty() || !seg.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(DerivationError::InvalidPath(path.to_owned()));
    }

    segments
        .into_iter()
        .map(|seg| {
            seg.parse::<u32>()
                .map_err(|_| DerivationError::IndexOverflow(seg.to_owned()))
        })
        .collect()
}

/// A parsed derivation path: the indices walked from the master node to the leaf, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The empty path, designating the master key itself.
    pub const fn master() -> Self {
        Self(Vec::new())
    }

    /// The withdrawal key path of `account`.
    pub fn withdrawal(account: u32) -> Self {
        Self(vec![PURPOSE, COIN_TYPE, account, WITHDRAWAL_IDX])
    }

    /// The signing key path of `account`.
    pub fn signing(account: u32) -> Self {
        Self(vec![PURPOSE, COIN_TYPE, account, WITHDRAWAL_IDX, SIGNING_IDX])
    }

    /// Returns this path extended by one more child index.
    #[must_use]
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The indices below the master node.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Depth of the leaf below the master node.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this path designates the master key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl FromStr for DerivationPath {
    type Err = DerivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s).map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT}")?;
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
