//! Crate includes reusable utils for the key derivation tools.
//! Such as initializing the tracing framework.

pub mod logging;
