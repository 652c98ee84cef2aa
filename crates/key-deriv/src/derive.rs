//! Tree derivation of BLS12-381 secret keys.
//!
//! The master key is hashed out of the seed with [`hkdf_mod_r()`]. Every child is derived from its
//! parent's secret through a Lamport public key, so all derivation is hardened: nothing about a
//! child or its siblings can be learned without the parent secret.
//!
//! # Usage
//!
//! ```rust
//! use bls_key_deriv::{derive_child_sk, derive_key, derive_master_sk};
//!
//! let seed = [0x42u8; 32];
//! let master = derive_master_sk(&seed)?;
//! let child = derive_child_sk(&derive_child_sk(&master, 12381)?, 3600)?;
//!
//! assert_eq!(derive_key(&seed, "m/12381/3600")?, child);
//! # Ok::<(), bls_key_deriv::DerivationError>(())
//! ```

use tracing::debug;

use crate::{
    hkdf_mod_r::hkdf_mod_r,
    keys::SecretKey,
    lamport::parent_sk_to_lamport_pk,
    paths::{parse_path, DerivationPath},
};

/// Minimum seed length, in bytes.
pub const SEED_MIN_LEN: usize = 32;

/// Error type for key derivation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivationError {
    /// The seed is shorter than [`SEED_MIN_LEN`].
    #[error("seed must be at least {} bytes, got {len}", SEED_MIN_LEN)]
    InvalidSeed {
        /// Length of the rejected seed.
        len: usize,
    },

    /// The path does not match `m(/[0-9]+)*`.
    #[error("invalid derivation path: {0:?}")]
    InvalidPath(String),

    /// A path segment does not fit in a `u32`.
    #[error("path index {0} does not fit in 32 bits")]
    IndexOverflow(String),

    /// The value is not a scalar in `[1, r)`.
    #[error("scalar is zero or not below the group order")]
    InvalidScalar,

    /// HKDF could not produce the requested output.
    ///
    /// This indicates a broken hash implementation rather than bad input.
    #[error("HKDF output stream exhausted")]
    StreamExhaustion,
}

/// Derives the master secret key from `seed`.
///
/// Fails with [`DerivationError::InvalidSeed`] before doing any hashing if the seed is shorter
/// than [`SEED_MIN_LEN`].
pub fn derive_master_sk(seed: &[u8]) -> Result<SecretKey, DerivationError> {
    if seed.len() < SEED_MIN_LEN {
        return Err(DerivationError::InvalidSeed { len: seed.len() });
    }

    hkdf_mod_r(seed, &[])
}

/// Derives the hardened child of `parent` at `index`.
pub fn derive_child_sk(parent: &SecretKey, index: u32) -> Result<SecretKey, DerivationError> {
    let lamport_pk = parent_sk_to_lamport_pk(parent, index)?;
    hkdf_mod_r(&lamport_pk, &[])
}

/// Derives the key at `path` in the tree rooted at `seed`.
///
/// The path is validated before the seed, and no key is returned unless every step succeeds.
pub fn derive_key(seed: &[u8], path: &str) -> Result<SecretKey, DerivationError> {
    let path = DerivationPath::from(parse_path(path)?);
    derive_key_at(seed, &path)
}

/// Derives the key at an already parsed `path` in the tree rooted at `seed`.
pub fn derive_key_at(seed: &[u8], path: &DerivationPath) -> Result<SecretKey, DerivationError> {
    let master = derive_master_sk(seed)?;
    debug!(depth = path.len(), "walking derivation path");
    master.derive_path(path)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        keys::GROUP_ORDER,
        paths::{signing_key_path, withdrawal_key_path},
    };

    struct TestVector {
        seed: &'static str,
        master_sk: &'static str,
        child_index: u32,
        child_sk: &'static str,
    }

    /// Published EIP-2333 test vectors.
    const TEST_VECTORS: &[TestVector] = &[
        TestVector {
            seed: "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
            master_sk: "6083874454709270928345386274498605044986640685124978867557563392430687146096",
            child_index: 0,
            child_sk: "20397789859736650942317412262472558107875392172444076792671091975210932703118",
        },
        TestVector {
            seed: "3141592653589793238462643383279502884197169399375105820974944592",
            master_sk: "29757020647961307431480504535336562678282505419141012933316116377660817309383",
            child_index: 3141592653,
            child_sk: "25457201688850691947727629385191704516744796114925897962676248250929345014287",
        },
        TestVector {
            seed: "0099FF991111002299DD7744EE3355BBDD8844115566CC55663355668888CC00",
            master_sk: "27580842291869792442942448775674722299803720648445448686099262467207037398656",
            child_index: 4294967295,
            child_sk: "29358610794459428860402234341874281240803786294062035874021252734817515685787",
        },
        TestVector {
            seed: "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3",
            master_sk: "19022158461524446591288038168518313374041767046816487870552872741050760015818",
            child_index: 42,
            child_sk: "31372231650479070279774297061823572166496564838472787488249775572789064611981",
        },
    ];

    #[test]
    fn test_master_sk_vectors() {
        for tv in TEST_VECTORS {
            let seed = hex::decode(tv.seed).unwrap();
            let master = derive_master_sk(&seed).unwrap();
            assert_eq!(master.to_decimal_string(), tv.master_sk);
        }
    }

    #[test]
    fn test_child_sk_vectors() {
        for tv in TEST_VECTORS {
            let master = SecretKey::from_decimal(tv.master_sk).unwrap();
            let child = derive_child_sk(&master, tv.child_index).unwrap();
            assert_eq!(child.to_decimal_string(), tv.child_sk);
        }
    }

    #[test]
    fn test_derive_key_vectors() {
        for tv in TEST_VECTORS {
            let seed = hex::decode(tv.seed).unwrap();
            let key = derive_key(&seed, &format!("m/{}", tv.child_index)).unwrap();
            assert_eq!(key.to_decimal_string(), tv.child_sk);

            let master = derive_key(&seed, "m").unwrap();
            assert_eq!(master.to_decimal_string(), tv.master_sk);
        }
    }

    #[test]
    fn test_seed_length_boundary() {
        assert_eq!(
            derive_master_sk(&[1u8; 31]),
            Err(DerivationError::InvalidSeed { len: 31 })
        );
        assert!(derive_master_sk(&[1u8; 32]).is_ok());
        assert_eq!(
            derive_key(&[], "m/0"),
            Err(DerivationError::InvalidSeed { len: 0 })
        );
    }

    #[test]
    fn test_path_errors_reported_before_seed() {
        assert!(matches!(
            derive_key(&[1u8; 31], "m//1"),
            Err(DerivationError::InvalidPath(_))
        ));
        assert!(matches!(
            derive_key(&[1u8; 32], "m/4294967296"),
            Err(DerivationError::IndexOverflow(_))
        ));
    }

    #[test]
    fn test_signing_key_is_child_of_withdrawal_key() {
        let seed = [9u8; 32];
        let withdrawal = derive_key(&seed, &withdrawal_key_path(5)).unwrap();
        let signing = derive_key(&seed, &signing_key_path(5)).unwrap();
        assert_eq!(derive_child_sk(&withdrawal, 0).unwrap(), signing);
        assert_ne!(withdrawal, signing);
    }

    #[test]
    fn test_siblings_differ() {
        let master = derive_master_sk(&[5u8; 48]).unwrap();
        let children: Vec<_> = (0..8)
            .map(|i| derive_child_sk(&master, i).unwrap())
            .collect();
        for (i, a) in children.iter().enumerate() {
            for b in &children[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(a, &master);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        // Walking a path equals folding single child derivations, and stays in [1, r).
        #[test]
        fn path_walk_is_a_fold(
            seed in prop::collection::vec(any::<u8>(), 32..64),
            indices in prop::collection::vec(any::<u32>(), 0..3),
        ) {
            let path = DerivationPath::from(indices.clone());
            let walked = derive_key(&seed, &path.to_string()).unwrap();

            let mut folded = derive_master_sk(&seed).unwrap();
            for index in indices {
                folded = derive_child_sk(&folded, index).unwrap();
            }

            prop_assert_eq!(&walked, &folded);
            prop_assert!(walked.as_biguint() < *GROUP_ORDER);
            prop_assert_eq!(walked, derive_key_at(&seed, &path).unwrap());
        }

        // Any seed shorter than the minimum is rejected.
        #[test]
        fn short_seeds_rejected(seed in prop::collection::vec(any::<u8>(), 0..SEED_MIN_LEN)) {
            prop_assert_eq!(
                derive_master_sk(&seed),
                Err(DerivationError::InvalidSeed { len: seed.len() })
            );
        }
    }
}
