//! The per-step key-tweak hasher.
//!
//! Every derivation step computes a 64-byte value `I = HMAC-SHA512(key =
//! chain_code, message)` and splits it: the left half tweaks the key
//! material, the right half becomes the child chain code. A [`KeyHasher`]
//! bundles that computation with the serialization version prefixes and the
//! master-seed HMAC key, which is all that distinguishes one deployment of
//! the scheme from another.

use crate::ChildNumber;
use codec::hash::{hash160, hmac_sha512};
use secp256k1::{PublicKey, SecretKey};

/// Parent key material committed to by a derivation step.
///
/// A hardened step commits to the private scalar, which is why it cannot be
/// replayed from a public key: a leaked public branch plus one leaked child
/// secret does not expose its hardened siblings.
pub enum TweakInput<'a> {
    /// Normal step: the parent's compressed public key.
    Normal(&'a PublicKey),
    /// Hardened step: a zero pad byte followed by the parent's scalar.
    Hardened(&'a SecretKey),
}

pub trait KeyHasher {
    /// Version prefix for serialized extended secret keys.
    fn secret_version(&self) -> [u8; 4];

    /// Version prefix for serialized extended public keys.
    fn public_version(&self) -> [u8; 4];

    /// HMAC key used to turn a seed into master key material.
    fn master_hmac_key(&self) -> &'static [u8];

    /// Computes the derivation value for one child step and splits it into
    /// `(I_L, I_R)`: the 32-byte scalar tweak and the child chain code.
    fn derivation_tweak(
        &self,
        chain_code: &[u8; 32],
        input: TweakInput<'_>,
        index: ChildNumber,
    ) -> ([u8; 32], [u8; 32]) {
        let mut message = Vec::with_capacity(37);
        match input {
            TweakInput::Normal(public_key) => {
                message.extend_from_slice(&public_key.serialize());
            }
            TweakInput::Hardened(secret_key) => {
                message.push(0);
                message.extend_from_slice(&secret_key.secret_bytes());
            }
        }
        message.extend_from_slice(&index.to_bytes());
        split(hmac_sha512(chain_code, &message))
    }

    /// Computes `(master_scalar, master_chain_code)` from a seed.
    fn master_tweak(&self, seed: &[u8]) -> ([u8; 32], [u8; 32]) {
        split(hmac_sha512(self.master_hmac_key(), seed))
    }

    /// HASH160 of the compressed public key, the key identifier.
    fn identifier(&self, public_key: &PublicKey) -> [u8; 20] {
        hash160(&public_key.serialize())
    }

    /// First four bytes of the identifier, linking a child to its parent in
    /// serialized form.
    fn fingerprint(&self, public_key: &PublicKey) -> [u8; 4] {
        let id = self.identifier(public_key);
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&id[..4]);
        fingerprint
    }
}

fn split(i: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    (left, right)
}

/// The BIP32 reference parameters: mainnet `xprv`/`xpub` version prefixes
/// and the `"Bitcoin seed"` master key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitcoinHasher;

impl KeyHasher for BitcoinHasher {
    fn secret_version(&self) -> [u8; 4] {
        [0x04, 0x88, 0xAD, 0xE4]
    }

    fn public_version(&self) -> [u8; 4] {
        [0x04, 0x88, 0xB2, 0x1E]
    }

    fn master_hmac_key(&self) -> &'static [u8] {
        b"Bitcoin seed"
    }
}

/// Grin's wallet parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GrinHasher;

impl KeyHasher for GrinHasher {
    fn secret_version(&self) -> [u8; 4] {
        [0x03, 0x3C, 0x04, 0xA4]
    }

    fn public_version(&self) -> [u8; 4] {
        [0x03, 0x3C, 0x08, 0xDF]
    }

    fn master_hmac_key(&self) -> &'static [u8] {
        b"IamVoldemort"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HARDENED_OFFSET;
    use codec::hash::hmac_sha512;
    use secp256k1::Secp256k1;

    fn test_key() -> (SecretKey, PublicKey) {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let public = PublicKey::from_secret_key(&secp, &secret);
        (secret, public)
    }

    #[test]
    fn normal_tweak_commits_to_public_key_and_index() {
        let hasher = BitcoinHasher;
        let (_, public) = test_key();
        let chain_code = [7u8; 32];
        let index = ChildNumber::from_normal_index(5).unwrap();

        let mut message = Vec::new();
        message.extend_from_slice(&public.serialize());
        message.extend_from_slice(&5u32.to_be_bytes());
        let i = hmac_sha512(&chain_code, &message);

        let (left, right) = hasher.derivation_tweak(&chain_code, TweakInput::Normal(&public), index);
        assert_eq!(left, i[..32]);
        assert_eq!(right, i[32..]);
    }

    #[test]
    fn hardened_tweak_commits_to_padded_scalar_and_index() {
        let hasher = BitcoinHasher;
        let (secret, _) = test_key();
        let chain_code = [7u8; 32];
        let index = ChildNumber::from_hardened_index(5).unwrap();

        let mut message = vec![0u8];
        message.extend_from_slice(&secret.secret_bytes());
        message.extend_from_slice(&(5u32 | HARDENED_OFFSET).to_be_bytes());
        let i = hmac_sha512(&chain_code, &message);

        let (left, right) =
            hasher.derivation_tweak(&chain_code, TweakInput::Hardened(&secret), index);
        assert_eq!(left, i[..32]);
        assert_eq!(right, i[32..]);
    }

    #[test]
    fn hashers_disagree_on_versions_and_master_key() {
        assert_ne!(BitcoinHasher.secret_version(), GrinHasher.secret_version());
        assert_ne!(BitcoinHasher.public_version(), GrinHasher.public_version());
        assert_ne!(
            BitcoinHasher.master_hmac_key(),
            GrinHasher.master_hmac_key()
        );
    }
}
