//! Byte-level codecs and digest primitives shared by the extended-key crate:
//! Base58/Base58Check text encoding and the SHA-256 / RIPEMD-160 / HMAC-SHA512
//! helpers that key derivation and checksumming are built on.

pub mod base58;
pub mod hash;
