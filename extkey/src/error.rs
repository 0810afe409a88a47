use codec::base58::Base58Error;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("character {0:?} is not in the base58 alphabet")]
    InvalidCharacter(char),
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
    #[error("decoded string too short to carry a checksum")]
    TooShort,
    #[error("version prefix does not match the expected key kind")]
    VersionMismatch,
    #[error("extended key payload must be exactly 78 bytes")]
    Length,
    #[error("child index must be below 2^31")]
    IndexRange,
    #[error("hardened derivation is not possible from a public key")]
    HardenedIndex,
    #[error("scalar is zero or not below the curve order")]
    InvalidScalar,
    #[error("point is not a valid curve point")]
    InvalidPoint,
    #[error("key is already at the maximum depth of 255")]
    DepthOverflow,
    #[error("malformed derivation path")]
    InvalidPath,
}

impl From<Base58Error> for Error {
    fn from(err: Base58Error) -> Self {
        match err {
            Base58Error::InvalidCharacter(c) => Error::InvalidCharacter(c),
            Base58Error::ChecksumMismatch => Error::ChecksumMismatch,
            Base58Error::TooShort => Error::TooShort,
        }
    }
}
