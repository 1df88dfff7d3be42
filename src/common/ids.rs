//! Validated identifier types for PubChem compounds and PDB entries

use crate::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn pdb_code_regex() -> &'static Regex {
    static PDB_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    PDB_CODE_REGEX.get_or_init(|| {
        Regex::new(r"[1-9][A-Za-z0-9]{3}").expect("Failed to compile PDB code regex")
    })
}

/// Whether `code` is exactly a 4-character PDB code (digit 1-9 then three
/// alphanumerics), case-insensitively
///
/// # Examples
///
/// ```
/// use affinity_data_client::common::is_pdb_code;
///
/// assert!(is_pdb_code("4HHB"));
/// assert!(is_pdb_code("1abc"));
/// assert!(!is_pdb_code("0ABC"));
/// assert!(!is_pdb_code("ABCD"));
/// assert!(!is_pdb_code("12AB5"));
/// ```
pub fn is_pdb_code(code: &str) -> bool {
    code.len() == 4
        && pdb_code_regex()
            .find(code)
            .is_some_and(|m| m.start() == 0 && m.end() == 4)
}

/// A validated 4-character PDB structure code
///
/// The code is stored uppercase, so every request built from it uses the
/// normalized form.
///
/// # Examples
///
/// ```
/// use affinity_data_client::common::PdbId;
///
/// let id = PdbId::parse("4hhb").unwrap();
/// assert_eq!(id.as_str(), "4HHB");
///
/// // Whitespace is trimmed
/// let id = PdbId::parse("  1abc ").unwrap();
/// assert_eq!(id.as_str(), "1ABC");
///
/// assert!(PdbId::parse("0ABC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PdbId {
    value: String,
}

impl PdbId {
    /// Parse a PDB code
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidStructureCode` if the trimmed input is not
    /// a 4-character code starting with a digit 1-9.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !is_pdb_code(trimmed) {
            return Err(ClientError::InvalidStructureCode {
                code: s.to_string(),
            });
        }

        Ok(Self {
            value: trimmed.to_ascii_uppercase(),
        })
    }

    /// Find the first PDB code embedded in a longer identifier
    ///
    /// Search results name polymer entities like `4HHB_1`; this pulls the
    /// entry code out of such strings.
    ///
    /// ```
    /// use affinity_data_client::common::PdbId;
    ///
    /// let id = PdbId::extract("4hhb_2").unwrap();
    /// assert_eq!(id.as_str(), "4HHB");
    /// assert!(PdbId::extract("___").is_none());
    /// ```
    pub fn extract(identifier: &str) -> Option<Self> {
        pdb_code_regex().find(identifier).map(|m| Self {
            value: m.as_str().to_ascii_uppercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for PdbId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A validated PubChem compound identifier (CID)
///
/// # Examples
///
/// ```
/// use affinity_data_client::common::CompoundId;
///
/// let cid = CompoundId::parse(" 2244 ").unwrap();
/// assert_eq!(cid.as_u64(), 2244);
/// assert_eq!(cid.to_string(), "2244");
///
/// assert!(CompoundId::parse("0").is_err());
/// assert!(CompoundId::parse("aspirin").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundId {
    value: u64,
}

impl CompoundId {
    /// Parse a CID from a string
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidCompoundId` if the trimmed input is not a
    /// positive integer.
    pub fn parse(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| ClientError::InvalidCompoundId { cid: s.to_string() })?;
        Self::try_from_u64(value)
    }

    /// PubChem answers unknown structures with CID 0, so zero is rejected
    pub fn try_from_u64(value: u64) -> Result<Self> {
        if value == 0 {
            return Err(ClientError::InvalidCompoundId {
                cid: value.to_string(),
            });
        }
        Ok(Self { value })
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for CompoundId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
