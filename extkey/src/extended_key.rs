//! Extended secret and public keys: master-seed initialization, child key
//! derivation (CKDpriv / CKDpub) and the 78-byte Base58Check serialization.

use crate::hasher::{KeyHasher, TweakInput};
use crate::{ChildNumber, Error};
use codec::base58;
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};

/// Serialized extended keys are always exactly 78 bytes:
/// `version(4) | depth(1) | parent_fingerprint(4) | child_number(4)
/// | chain_code(32) | key_data(33)`.
pub const SERIALIZED_LEN: usize = 78;

/// An extended secret key: a secp256k1 scalar plus the chain code and
/// lineage metadata that make further derivation possible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedSecretKey {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: ChildNumber,
    pub chain_code: [u8; 32],
    pub secret_key: SecretKey,
}

/// An extended public key. Supports normal (non-hardened) derivation only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: ChildNumber,
    pub chain_code: [u8; 32],
    pub public_key: PublicKey,
}

impl ExtendedSecretKey {
    /// Derives the master key from a seed: the hasher's master tweak yields
    /// the scalar on the left and the chain code on the right.
    pub fn new_master(hasher: &impl KeyHasher, seed: &[u8]) -> Result<Self, Error> {
        let (scalar, chain_code) = hasher.master_tweak(seed);
        let secret_key = SecretKey::from_slice(&scalar).map_err(|_| Error::InvalidScalar)?;
        Ok(ExtendedSecretKey {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::from_index(0),
            chain_code,
            secret_key,
        })
    }

    /// The secp256k1 public key matching this key's scalar.
    pub fn public_key(&self, secp: &Secp256k1<All>) -> PublicKey {
        PublicKey::from_secret_key(secp, &self.secret_key)
    }

    /// Fingerprint of this key, as recorded in its children.
    pub fn fingerprint(&self, secp: &Secp256k1<All>, hasher: &impl KeyHasher) -> [u8; 4] {
        hasher.fingerprint(&self.public_key(secp))
    }

    /// Child secret key derivation (CKDpriv). The child scalar is
    /// `(parent + I_L) mod n`; an `I_L` outside the group or a zero sum is
    /// surfaced as [`Error::InvalidScalar`] rather than silently resampled.
    pub fn ckd_secret(
        &self,
        secp: &Secp256k1<All>,
        hasher: &impl KeyHasher,
        index: ChildNumber,
    ) -> Result<Self, Error> {
        let depth = self.depth.checked_add(1).ok_or(Error::DepthOverflow)?;
        let parent_public = self.public_key(secp);

        let input = if index.is_hardened() {
            TweakInput::Hardened(&self.secret_key)
        } else {
            TweakInput::Normal(&parent_public)
        };
        let (tweak, chain_code) = hasher.derivation_tweak(&self.chain_code, input, index);

        let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidScalar)?;
        let secret_key = self
            .secret_key
            .add_tweak(&tweak)
            .map_err(|_| Error::InvalidScalar)?;

        Ok(ExtendedSecretKey {
            depth,
            parent_fingerprint: hasher.fingerprint(&parent_public),
            child_number: index,
            chain_code,
            secret_key,
        })
    }

    /// Folds [`ckd_secret`](Self::ckd_secret) over a path. The empty path
    /// yields the key itself.
    pub fn derive_secret(
        &self,
        secp: &Secp256k1<All>,
        hasher: &impl KeyHasher,
        path: &[ChildNumber],
    ) -> Result<Self, Error> {
        let mut key = self.clone();
        for &index in path {
            key = key.ckd_secret(secp, hasher, index)?;
        }
        Ok(key)
    }

    /// The 78-byte layout with a zero spacer before the 32-byte scalar.
    pub fn to_bytes(&self, hasher: &impl KeyHasher) -> [u8; SERIALIZED_LEN] {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.secret_key.secret_bytes());
        pack(
            hasher.secret_version(),
            self.depth,
            self.parent_fingerprint,
            self.child_number,
            self.chain_code,
            key_data,
        )
    }

    pub fn to_base58check(&self, hasher: &impl KeyHasher) -> String {
        base58::check_encode(&self.to_bytes(hasher))
    }

    pub fn from_bytes(hasher: &impl KeyHasher, data: &[u8]) -> Result<Self, Error> {
        let (header, key_data) = unpack(data, hasher.secret_version())?;
        if key_data[0] != 0 {
            return Err(Error::InvalidScalar);
        }
        let secret_key =
            SecretKey::from_slice(&key_data[1..]).map_err(|_| Error::InvalidScalar)?;
        Ok(ExtendedSecretKey {
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            chain_code: header.chain_code,
            secret_key,
        })
    }

    pub fn from_base58check(hasher: &impl KeyHasher, text: &str) -> Result<Self, Error> {
        Self::from_bytes(hasher, &base58::check_decode(text)?)
    }
}

impl ExtendedPublicKey {
    /// Projects an extended secret key onto its public counterpart. Depth,
    /// fingerprint, child number and chain code carry over unchanged.
    pub fn from_secret(secp: &Secp256k1<All>, secret: &ExtendedSecretKey) -> Self {
        ExtendedPublicKey {
            depth: secret.depth,
            parent_fingerprint: secret.parent_fingerprint,
            child_number: secret.child_number,
            chain_code: secret.chain_code,
            public_key: secret.public_key(secp),
        }
    }

    /// Fingerprint of this key, as recorded in its children.
    pub fn fingerprint(&self, hasher: &impl KeyHasher) -> [u8; 4] {
        hasher.fingerprint(&self.public_key)
    }

    /// Child public key derivation (CKDpub): the child point is
    /// `point(I_L) + parent`. Only defined for normal indices.
    pub fn ckd_public(
        &self,
        secp: &Secp256k1<All>,
        hasher: &impl KeyHasher,
        index: ChildNumber,
    ) -> Result<Self, Error> {
        if index.is_hardened() {
            return Err(Error::HardenedIndex);
        }
        let depth = self.depth.checked_add(1).ok_or(Error::DepthOverflow)?;

        let (tweak, chain_code) =
            hasher.derivation_tweak(&self.chain_code, TweakInput::Normal(&self.public_key), index);

        let tweak = SecretKey::from_slice(&tweak).map_err(|_| Error::InvalidScalar)?;
        let tweak_point = PublicKey::from_secret_key(secp, &tweak);
        let public_key = self
            .public_key
            .combine(&tweak_point)
            .map_err(|_| Error::InvalidPoint)?;

        Ok(ExtendedPublicKey {
            depth,
            parent_fingerprint: hasher.fingerprint(&self.public_key),
            child_number: index,
            chain_code,
            public_key,
        })
    }

    /// Folds [`ckd_public`](Self::ckd_public) over a path, stopping at the
    /// first hardened element.
    pub fn derive_public(
        &self,
        secp: &Secp256k1<All>,
        hasher: &impl KeyHasher,
        path: &[ChildNumber],
    ) -> Result<Self, Error> {
        let mut key = self.clone();
        for &index in path {
            key = key.ckd_public(secp, hasher, index)?;
        }
        Ok(key)
    }

    /// The 78-byte layout; the compressed point fills the key-data field,
    /// its own 0x02/0x03 prefix taking the place of the secret spacer.
    pub fn to_bytes(&self, hasher: &impl KeyHasher) -> [u8; SERIALIZED_LEN] {
        pack(
            hasher.public_version(),
            self.depth,
            self.parent_fingerprint,
            self.child_number,
            self.chain_code,
            self.public_key.serialize(),
        )
    }

    pub fn to_base58check(&self, hasher: &impl KeyHasher) -> String {
        base58::check_encode(&self.to_bytes(hasher))
    }

    pub fn from_bytes(hasher: &impl KeyHasher, data: &[u8]) -> Result<Self, Error> {
        let (header, key_data) = unpack(data, hasher.public_version())?;
        let public_key = PublicKey::from_slice(key_data).map_err(|_| Error::InvalidPoint)?;
        Ok(ExtendedPublicKey {
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            chain_code: header.chain_code,
            public_key,
        })
    }

    pub fn from_base58check(hasher: &impl KeyHasher, text: &str) -> Result<Self, Error> {
        Self::from_bytes(hasher, &base58::check_decode(text)?)
    }
}

/// Header fields shared by both serialized key kinds.
struct Header {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
}

fn pack(
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key_data: [u8; 33],
) -> [u8; SERIALIZED_LEN] {
    let mut data = [0u8; SERIALIZED_LEN];
    data[0..4].copy_from_slice(&version);
    data[4] = depth;
    data[5..9].copy_from_slice(&parent_fingerprint);
    data[9..13].copy_from_slice(&child_number.to_bytes());
    data[13..45].copy_from_slice(&chain_code);
    data[45..78].copy_from_slice(&key_data);
    data
}

fn unpack(data: &[u8], version: [u8; 4]) -> Result<(Header, &[u8]), Error> {
    if data.len() != SERIALIZED_LEN {
        return Err(Error::Length);
    }
    if data[0..4] != version {
        return Err(Error::VersionMismatch);
    }
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&data[5..9]);
    let raw_index = u32::from_be_bytes([data[9], data[10], data[11], data[12]]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&data[13..45]);
    let header = Header {
        depth: data[4],
        parent_fingerprint,
        child_number: ChildNumber::from_index(raw_index),
        chain_code,
    };
    Ok((header, &data[45..]))
}
