//! Block hash identifier.

use std::borrow::Borrow;
use std::fmt;

/// Opaque block hash, usually a `0x`-prefixed hex string.
///
/// Ordering is plain lexicographic ordering of the string form. Sibling
/// tie-breaks rely on this being a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockHash(String);

impl BlockHash {
    /// Wrap a hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The hash as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for BlockHash {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for BlockHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for BlockHash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BlockHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ordering_is_lexicographic() {
        let mut hashes = vec![
            BlockHash::from("0xb"),
            BlockHash::from("0xa"),
            BlockHash::from("0xab"),
        ];
        hashes.sort();
        let strs: Vec<_> = hashes.iter().map(BlockHash::as_str).collect();
        assert_eq!(strs, ["0xa", "0xab", "0xb"]);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(BlockHash::from("0xc"), 3);
        assert_eq!(map.get("0xc"), Some(&3));
        assert_eq!(map.get("0xd"), None);
    }

    #[test]
    fn display_is_raw_string() {
        assert_eq!(BlockHash::new("0xdead").to_string(), "0xdead");
    }
}
