//! CLI command implementations
//!
//! Every command returns the process exit code:
//! `0` success, `2` configuration error, `5` fatal error.

pub mod export;
pub mod serve;
pub mod status;
pub mod validate;
