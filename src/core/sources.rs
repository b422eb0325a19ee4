//! Log group enumeration
//!
//! Walks the paginated log group listing lazily: a page is only requested
//! once every name of the previous page has been consumed.

use crate::adapters::traits::LogService;
use crate::domain::errors::ArchiveError;
use crate::domain::ids::SourceName;
use crate::domain::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::sync::Arc;

/// Lists every exportable log group
pub struct SourceEnumerator {
    log_service: Arc<dyn LogService>,
    name_prefix: Option<String>,
}

impl SourceEnumerator {
    /// Create an enumerator over all log groups, or only those whose names
    /// start with `name_prefix`
    pub fn new(log_service: Arc<dyn LogService>, name_prefix: Option<String>) -> Self {
        Self {
            log_service,
            name_prefix,
        }
    }

    /// Stream log group names in service order
    ///
    /// Every call starts again from the first page. A failed page request
    /// ends the stream with that error.
    pub fn sources(&self) -> impl Stream<Item = Result<SourceName>> + Send + '_ {
        // `None` once the last page has been fetched, otherwise the token to send.
        let first_page: Option<Option<String>> = Some(None);

        stream::try_unfold(first_page, move |cursor| async move {
            let Some(token) = cursor else {
                return Ok::<_, ArchiveError>(None);
            };

            let page = self
                .log_service
                .describe_sources(self.name_prefix.as_deref(), token.as_deref())
                .await?;

            tracing::debug!(
                count = page.sources.len(),
                has_more = page.next_token.is_some(),
                "Fetched log group page"
            );

            Ok(Some((page.sources, page.next_token.map(Some))))
        })
        .map_ok(|names| stream::iter(names.into_iter().map(Ok::<SourceName, ArchiveError>)))
        .try_flatten()
    }
}
