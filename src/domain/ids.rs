//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the archiver passes between the
//! log service, the parameter store and the export destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Required length of an AWS account id
pub const ACCOUNT_ID_LEN: usize = 12;

/// Log group name newtype wrapper
///
/// Log group names are path-like (`/aws/lambda/api`) and may start or end
/// with a separator.
///
/// # Examples
///
/// ```
/// use cwlogs_archive::domain::ids::SourceName;
/// use std::str::FromStr;
///
/// let name = SourceName::from_str("/aws/codebuild/hugo-blog/").unwrap();
/// assert_eq!(name.trimmed(), "aws/codebuild/hugo-blog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceName(String);

impl SourceName {
    /// Creates a new SourceName, rejecting empty names
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.is_empty() {
            return Err("Log group name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the log group name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with leading and trailing separators removed
    pub fn trimmed(&self) -> &str {
        self.0.trim_matches('/')
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// AWS account id newtype wrapper
///
/// Only the length is checked: exactly [`ACCOUNT_ID_LEN`] characters.
///
/// # Examples
///
/// ```
/// use cwlogs_archive::domain::ids::AccountId;
///
/// assert!(AccountId::new("123412341234").is_ok());
/// assert!(AccountId::new("1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new AccountId
    ///
    /// # Returns
    ///
    /// Returns `Err` unless the id is exactly 12 characters long
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.chars().count() != ACCOUNT_ID_LEN {
            return Err(format!(
                "Account Id must be valid {ACCOUNT_ID_LEN}-digit AWS account id, got '{id}'"
            ));
        }
        Ok(Self(id))
    }

    /// Returns the account id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_source_name_valid() {
        let name = SourceName::new("/aws/lambda/api").unwrap();
        assert_eq!(name.as_str(), "/aws/lambda/api");
        assert_eq!(name.to_string(), "/aws/lambda/api");
    }

    #[test]
    fn test_source_name_empty() {
        assert!(SourceName::new("").is_err());
    }

    #[test_case("/aws/codebuild/hugo-blog/", "aws/codebuild/hugo-blog" ; "both ends")]
    #[test_case("/first", "first" ; "leading only")]
    #[test_case("first/", "first" ; "trailing only")]
    #[test_case("a/b", "a/b" ; "inner separators kept")]
    #[test_case("//double//", "double" ; "runs stripped at ends")]
    fn test_source_name_trimmed(input: &str, expected: &str) {
        assert_eq!(SourceName::new(input).unwrap().trimmed(), expected);
    }

    #[test_case("123412341234" ; "twelve digits")]
    #[test_case("abcdefghijkl" ; "twelve characters")]
    fn test_account_id_valid(input: &str) {
        assert_eq!(AccountId::new(input).unwrap().as_str(), input);
    }

    #[test_case("1" ; "too short")]
    #[test_case("" ; "empty")]
    #[test_case("1234123412345" ; "too long")]
    fn test_account_id_invalid(input: &str) {
        let err = AccountId::new(input).unwrap_err();
        assert!(err.contains("12-digit"));
    }

    #[test]
    fn test_account_id_from_str() {
        let id: AccountId = "123412341234".parse().unwrap();
        assert_eq!(id.to_string(), "123412341234");
    }
}
