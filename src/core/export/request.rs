//! Export task request

use crate::core::state::{ExportWindow, Watermark};
use crate::domain::ids::{AccountId, SourceName};
use serde::Serialize;

/// One export task, built immediately before submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    /// Log group to export
    pub source_name: SourceName,

    /// Start of the window, inclusive
    pub from: Watermark,

    /// End of the window, exclusive
    pub to: Watermark,

    /// Destination S3 bucket
    pub destination: String,

    /// Destination key prefix: `{account_id}/{log group without outer '/'}`
    pub destination_prefix: String,
}

impl ExportRequest {
    /// Build the request for exporting `window` of `source_name`
    ///
    /// # Examples
    ///
    /// ```
    /// use cwlogs_archive::core::export::ExportRequest;
    /// use cwlogs_archive::core::state::{ExportWindow, Watermark};
    /// use cwlogs_archive::domain::{AccountId, SourceName};
    ///
    /// let request = ExportRequest::new(
    ///     SourceName::new("/aws/codebuild/hugo-blog/").unwrap(),
    ///     ExportWindow::new(Watermark::ZERO, Watermark::from_millis(1642488495636)),
    ///     "archive-bucket",
    ///     &AccountId::new("123412341234").unwrap(),
    /// );
    /// assert_eq!(request.destination_prefix, "123412341234/aws/codebuild/hugo-blog");
    /// ```
    pub fn new(
        source_name: SourceName,
        window: ExportWindow,
        destination: impl Into<String>,
        account_id: &AccountId,
    ) -> Self {
        let destination_prefix = destination_prefix(account_id, &source_name);
        Self {
            source_name,
            from: window.from,
            to: window.to,
            destination: destination.into(),
            destination_prefix,
        }
    }

    /// The requested window
    pub fn window(&self) -> ExportWindow {
        ExportWindow::new(self.from, self.to)
    }
}

/// Destination key prefix for a log group
pub fn destination_prefix(account_id: &AccountId, source_name: &SourceName) -> String {
    format!("{}/{}", account_id, source_name.trimmed())
}
