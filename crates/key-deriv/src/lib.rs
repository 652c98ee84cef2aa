//! Hierarchical deterministic key derivation for BLS12-381 secret keys.
//!
//! This crate derives a tree of BLS12-381 secret keys from a single seed, following EIP-2333 for
//! the tree KDF and EIP-2334 for the path layout. The same seed and path always yield the same
//! key, bit for bit, across implementations.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bls_key_deriv::{derive_key, signing_key_path};
//!
//! let key = derive_key(&seed, &signing_key_path(0))?;
//! println!("{}", key.to_decimal_string());
//! ```
//!
//! # Key Hierarchy
//!
//! The master key comes from [`derive_master_sk`]. Each level below is a hardened child built by
//! [`derive_child_sk`], which mixes the parent key and index through a Lamport public key (see
//! [`lamport`]) before hashing back into the scalar field with [`hkdf_mod_r()`].

pub mod derive;
pub mod hkdf_mod_r;
pub mod lamport;
mod keys;
pub mod paths;

pub use derive::{
    derive_child_sk, derive_key, derive_key_at, derive_master_sk, DerivationError, SEED_MIN_LEN,
};
pub use hkdf_mod_r::{hkdf_mod_r, L, SALT};
pub use keys::{SecretKey, R, SECRET_KEY_LEN};
pub use lamport::{
    ikm_to_lamport_sk, parent_sk_to_lamport_pk, LamportPublicKey, LamportSecretKey,
    LAMPORT_CHUNK_COUNT, LAMPORT_CHUNK_SIZE,
};
pub use paths::{
    parse_path, signing_key_path, withdrawal_key_path, DerivationPath, COIN_TYPE, PURPOSE,
};
