use crate::{ChildNumber, Error};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// A derivation path such as `m/44'/0'/0'/0/1`. Dereferences to a slice of
/// [`ChildNumber`]s, which is what the key types fold over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn new(children: Vec<ChildNumber>) -> Self {
        DerivationPath(children)
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(children: Vec<ChildNumber>) -> Self {
        DerivationPath(children)
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<I: IntoIterator<Item = ChildNumber>>(iter: I) -> Self {
        DerivationPath(iter.into_iter().collect())
    }
}

impl Deref for DerivationPath {
    type Target = [ChildNumber];

    fn deref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parses `"m"`, `"m/0'/1"`, `"M/0h/1"` or the same without the master
    /// prefix. Hardened markers: `'`, `h` or `H`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("m") {
            return Ok(DerivationPath(Vec::new()));
        }
        let rest = s
            .strip_prefix("m/")
            .or_else(|| s.strip_prefix("M/"))
            .unwrap_or(s);

        let mut children = Vec::new();
        for part in rest.split('/') {
            let (digits, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidPath);
            }
            let index: u32 = digits.parse().map_err(|_| Error::InvalidPath)?;
            children.push(if hardened {
                ChildNumber::from_hardened_index(index)?
            } else {
                ChildNumber::from_normal_index(index)?
            });
        }
        Ok(DerivationPath(children))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_path() {
        let path: DerivationPath = "m/0'/1/2h/2/1000000000".parse().unwrap();
        let expected = vec![
            ChildNumber::from_hardened_index(0).unwrap(),
            ChildNumber::from_normal_index(1).unwrap(),
            ChildNumber::from_hardened_index(2).unwrap(),
            ChildNumber::from_normal_index(2).unwrap(),
            ChildNumber::from_normal_index(1_000_000_000).unwrap(),
        ];
        assert_eq!(path.as_slice(), expected.as_slice());
    }

    #[test]
    fn master_forms_parse_to_empty_path() {
        for s in ["m", "M", ""] {
            let path: DerivationPath = s.parse().unwrap();
            assert!(path.is_empty());
        }
    }

    #[test]
    fn display_uses_canonical_form() {
        let path: DerivationPath = "m/0h/1/2H/2/1000000000".parse().unwrap();
        assert_eq!(path.to_string(), "m/0'/1/2'/2/1000000000");
        assert_eq!(DerivationPath::default().to_string(), "m");
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let path: DerivationPath = "m/44'/0'/0'/0/1".parse().unwrap();
        assert_eq!(path.to_string().parse::<DerivationPath>().unwrap(), path);
    }

    #[test]
    fn rejects_malformed_paths() {
        for s in ["m//1", "m/abc", "m/", "m/1''", "m/-1"] {
            assert_eq!(s.parse::<DerivationPath>().unwrap_err(), Error::InvalidPath);
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(
            "m/2147483648".parse::<DerivationPath>().unwrap_err(),
            Error::IndexRange
        );
        assert_eq!(
            "m/2147483648'".parse::<DerivationPath>().unwrap_err(),
            Error::IndexRange
        );
    }

    #[test]
    fn parses_without_master_prefix() {
        let with: DerivationPath = "m/44/0".parse().unwrap();
        let without: DerivationPath = "44/0".parse().unwrap();
        assert_eq!(with, without);
    }
}
