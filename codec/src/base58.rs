//! Base58 and Base58Check codecs.
//!
//! The input is treated as a big-endian base-256 integer and re-expressed in
//! base 58; each leading zero byte is carried across as one leading `'1'`
//! symbol so that byte-length information survives the numeric conversion.

use crate::hash::sha256d;
use thiserror::Error;

/// The 58-symbol alphabet (no `0`, `O`, `I` or `l`).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum suffix in bytes.
pub const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("character {0:?} is not in the base58 alphabet")]
    InvalidCharacter(char),
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
    #[error("decoded string too short to carry a checksum")]
    TooShort,
}

fn digit(symbol: u8) -> Option<u8> {
    ALPHABET.iter().position(|&c| c == symbol).map(|i| i as u8)
}

/// Encodes bytes as base58 text. The empty input encodes to the empty string.
pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // Base-58 digits of the value, least significant first. Each input byte
    // shifts the accumulated value up by 256 and adds itself.
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            carry += (*d as u32) << 8;
            *d = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push(ALPHABET[0] as char);
    }
    for &d in digits.iter().rev() {
        out.push(ALPHABET[d as usize] as char);
    }
    out
}

/// Decodes base58 text back into bytes, the exact inverse of [`encode`].
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let symbols = input.as_bytes();
    let zeros = symbols.iter().take_while(|&&c| c == ALPHABET[0]).count();

    // Bytes of the value, least significant first.
    let mut bytes: Vec<u8> = Vec::with_capacity(symbols.len() * 733 / 1000 + 1);
    for &symbol in &symbols[zeros..] {
        let mut carry =
            digit(symbol).ok_or(Base58Error::InvalidCharacter(symbol as char))? as u32;
        for b in bytes.iter_mut() {
            carry += *b as u32 * 58;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Encodes a payload with a trailing 4-byte double-SHA256 checksum.
pub fn check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&sha256d(payload)[..CHECKSUM_LEN]);
    encode(&data)
}

/// Decodes Base58Check text, verifying and stripping the checksum.
pub fn check_decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let mut data = decode(input)?;
    if data.len() < CHECKSUM_LEN {
        return Err(Base58Error::TooShort);
    }
    let payload_len = data.len() - CHECKSUM_LEN;
    let (payload, checksum) = data.split_at(payload_len);
    if sha256d(payload)[..CHECKSUM_LEN] != *checksum {
        return Err(Base58Error::ChecksumMismatch);
    }
    data.truncate(payload_len);
    Ok(data)
}
