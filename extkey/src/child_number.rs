use crate::Error;
use std::fmt;

/// Bit 31 of a child index marks the child as hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A single 32-bit derivation index, tagged as normal or hardened through
/// the top bit. Pure data; the derivation rules live on the key types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// A normal (non-hardened) child. The index must be below 2^31.
    pub fn from_normal_index(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_OFFSET {
            return Err(Error::IndexRange);
        }
        Ok(ChildNumber(index))
    }

    /// A hardened child. The index must be below 2^31 before the hardening
    /// bit is applied.
    pub fn from_hardened_index(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_OFFSET {
            return Err(Error::IndexRange);
        }
        Ok(ChildNumber(index | HARDENED_OFFSET))
    }

    /// Reconstructs a child number from a raw serialized index, hardening
    /// bit included. Total: every u32 is a valid raw index.
    pub fn from_index(index: u32) -> Self {
        ChildNumber(index)
    }

    pub fn is_normal(self) -> bool {
        !self.is_hardened()
    }

    pub fn is_hardened(self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }

    /// The index without the hardening bit.
    pub fn index(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    /// The raw 32-bit value, hardening bit included.
    pub fn to_index(self) -> u32 {
        self.0
    }

    /// Big-endian serialized form, as fed into the derivation HMAC and the
    /// 78-byte extended-key layout.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_and_hardened_constructors() {
        let normal = ChildNumber::from_normal_index(7).unwrap();
        assert!(normal.is_normal());
        assert!(!normal.is_hardened());
        assert_eq!(normal.index(), 7);
        assert_eq!(normal.to_index(), 7);

        let hardened = ChildNumber::from_hardened_index(7).unwrap();
        assert!(hardened.is_hardened());
        assert_eq!(hardened.index(), 7);
        assert_eq!(hardened.to_index(), 7 | HARDENED_OFFSET);
    }

    #[test]
    fn constructors_reject_out_of_range_indices() {
        assert_eq!(
            ChildNumber::from_normal_index(HARDENED_OFFSET).unwrap_err(),
            Error::IndexRange
        );
        assert_eq!(
            ChildNumber::from_hardened_index(HARDENED_OFFSET).unwrap_err(),
            Error::IndexRange
        );
        assert!(ChildNumber::from_normal_index(HARDENED_OFFSET - 1).is_ok());
        assert!(ChildNumber::from_hardened_index(HARDENED_OFFSET - 1).is_ok());
    }

    #[test]
    fn serializes_big_endian_with_hardening_bit() {
        let hardened = ChildNumber::from_hardened_index(2).unwrap();
        assert_eq!(hardened.to_bytes(), [0x80, 0x00, 0x00, 0x02]);
        let normal = ChildNumber::from_normal_index(1_000_000_000).unwrap();
        assert_eq!(normal.to_bytes(), 1_000_000_000u32.to_be_bytes());
    }

    #[test]
    fn raw_index_roundtrip() {
        for raw in [0, 1, HARDENED_OFFSET, HARDENED_OFFSET + 44, u32::MAX] {
            assert_eq!(ChildNumber::from_index(raw).to_index(), raw);
        }
    }

    #[test]
    fn display_marks_hardened_children() {
        assert_eq!(ChildNumber::from_normal_index(44).unwrap().to_string(), "44");
        assert_eq!(
            ChildNumber::from_hardened_index(44).unwrap().to_string(),
            "44'"
        );
    }
}
