//! Hierarchical deterministic key derivation over secp256k1, compatible with
//! BIP32 extended keys (`xprv`/`xpub`).
//!
//! A master key pair is derived from a seed, and children are derived from
//! parents by HMAC-SHA512 tweaking of the parent scalar or point. Hardened
//! steps commit to the parent's private scalar and are therefore only
//! reachable on the secret side; normal steps commit to the public point, so
//! secret-side and public-side derivation stay in lockstep. Every key is an
//! immutable value and every derivation returns a fresh one.
//!
//! Serialization parameters (version prefixes and the master HMAC key) come
//! from a [`KeyHasher`], so the same engine serves both the BIP32 reference
//! parameters and Grin's variant.

pub mod child_number;
pub mod error;
pub mod extended_key;
pub mod hasher;
pub mod path;

pub use child_number::{ChildNumber, HARDENED_OFFSET};
pub use error::Error;
pub use extended_key::{ExtendedPublicKey, ExtendedSecretKey};
pub use hasher::{BitcoinHasher, GrinHasher, KeyHasher, TweakInput};
pub use path::DerivationPath;
