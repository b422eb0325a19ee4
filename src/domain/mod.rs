//! Domain types for the archiver.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SourceName`], [`AccountId`])
//! - **Error types** ([`ArchiveError`], [`LogServiceError`], [`ParameterStoreError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use cwlogs_archive::domain::{AccountId, SourceName};
//!
//! # fn example() -> Result<(), String> {
//! let account = AccountId::new("123412341234")?;
//! let source = SourceName::new("/aws/lambda/api")?;
//! assert_eq!(format!("{}/{}", account, source.trimmed()), "123412341234/aws/lambda/api");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{ArchiveError, LogServiceError, ParameterStoreError};
pub use ids::{AccountId, SourceName};
pub use result::Result;
