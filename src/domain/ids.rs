//! Domain identifier types with validation
//!
//! Newtype wrappers for the two identifiers the pipeline moves around:
//! the repository's own item id and the PubMed numeric identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repository item identifier newtype wrapper
///
/// The institutional repository's own identifier for a publication.
/// Some identifier schemes embed a fixed-width namespace prefix that the
/// LinkOut output does not want; [`ItemId::stripped`] removes it.
///
/// # Examples
///
/// ```
/// use linkout::domain::ids::ItemId;
///
/// let id = ItemId::new("qt4x95w9fp").unwrap();
/// assert_eq!(id.as_str(), "qt4x95w9fp");
/// assert_eq!(id.stripped(2), "4x95w9fp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new ItemId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Item ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the item ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the id with the first `prefix_len` characters removed.
    ///
    /// Used by variants whose identifier scheme embeds a fixed-width
    /// namespace prefix (e.g. the `qt` prefix on eScholarship ids). If the
    /// id is shorter than `prefix_len` the full id is returned unchanged.
    pub fn stripped(&self, prefix_len: usize) -> &str {
        self.0.get(prefix_len..).filter(|s| !s.is_empty()).unwrap_or(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// PubMed identifier newtype wrapper
///
/// The numeric PubMed identifier (PMID) associated with a publication.
/// LinkOut rejects non-numeric object ids, so construction enforces the
/// digits-only, non-empty predicate; rows failing it are dropped at
/// selection time rather than surfaced as errors.
///
/// # Examples
///
/// ```
/// use linkout::domain::ids::Pmid;
///
/// assert!(Pmid::new("31346828").is_ok());
/// assert!(Pmid::new("789X").is_err());
/// assert!(Pmid::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pmid(String);

impl Pmid {
    /// Creates a new Pmid from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or contains a non-digit
    pub fn new(pmid: impl Into<String>) -> Result<Self, String> {
        let pmid = pmid.into();
        if pmid.is_empty() {
            return Err("PMID cannot be empty".to_string());
        }
        if !pmid.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("PMID must be digits only, got: {pmid}"));
        }
        Ok(Self(pmid))
    }

    /// Returns the PMID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Pmid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pmid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Pmid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_creation() {
        let id = ItemId::new("qt4x95w9fp").unwrap();
        assert_eq!(id.as_str(), "qt4x95w9fp");
    }

    #[test]
    fn test_item_id_empty_fails() {
        assert!(ItemId::new("").is_err());
        assert!(ItemId::new("   ").is_err());
    }

    #[test]
    fn test_item_id_stripped() {
        let id = ItemId::new("qt4x95w9fp").unwrap();
        assert_eq!(id.stripped(2), "4x95w9fp");
        assert_eq!(id.stripped(0), "qt4x95w9fp");
    }

    #[test]
    fn test_item_id_stripped_shorter_than_prefix() {
        let id = ItemId::new("qt").unwrap();
        assert_eq!(id.stripped(4), "qt");
        assert_eq!(id.stripped(2), "qt");
    }

    #[test]
    fn test_item_id_from_str() {
        let id: ItemId = "qt0001".parse().unwrap();
        assert_eq!(id.as_str(), "qt0001");
    }

    #[test]
    fn test_pmid_valid() {
        let pmid = Pmid::new("31346828").unwrap();
        assert_eq!(pmid.as_str(), "31346828");
        assert_eq!(format!("{pmid}"), "31346828");
    }

    #[test]
    fn test_pmid_rejects_non_digits() {
        assert!(Pmid::new("789X").is_err());
        assert!(Pmid::new("12 34").is_err());
        assert!(Pmid::new("-123").is_err());
    }

    #[test]
    fn test_pmid_rejects_empty() {
        assert!(Pmid::new("").is_err());
    }

    #[test]
    fn test_pmid_serialization() {
        let pmid = Pmid::new("123").unwrap();
        let json = serde_json::to_string(&pmid).unwrap();
        let back: Pmid = serde_json::from_str(&json).unwrap();
        assert_eq!(pmid, back);
    }
}
