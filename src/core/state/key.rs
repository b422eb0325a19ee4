//! Parameter name derivation
//!
//! The same derivation is used for reads and writes, so a watermark written
//! for a log group is always found again under the same name whether or not
//! the log group name starts with `/`.

/// Derive the parameter name holding the watermark of `source_name`
///
/// Concatenates `prefix` and `source_name`, then replaces every `//` with `/`.
///
/// # Examples
///
/// ```
/// use cwlogs_archive::core::state::parameter_name;
///
/// assert_eq!(parameter_name("/pre/", "/foo"), "/pre/foo");
/// assert_eq!(parameter_name("/pre/", "foo"), "/pre/foo");
/// ```
pub fn parameter_name(prefix: &str, source_name: &str) -> String {
    format!("{prefix}{source_name}").replace("//", "/")
}
