//! Command handlers.

pub(crate) mod derive_key;
pub(crate) mod path;
