//! In-memory service implementations
//!
//! Stand-ins for CloudWatch Logs and SSM that keep everything in process.
//! They record every call so tests can assert on what the orchestrator
//! submitted and wrote.

use crate::adapters::traits::{ExportTaskId, LogService, ParameterStore, SourcePage};
use crate::core::export::request::ExportRequest;
use crate::domain::errors::{LogServiceError, ParameterStoreError};
use crate::domain::ids::SourceName;
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory log service
///
/// Pages are cut every `page_size` log groups; the continuation token is the
/// offset of the next page.
#[derive(Debug)]
pub struct InMemoryLogService {
    sources: Vec<SourceName>,
    page_size: usize,
    limit_exceeded: HashSet<String>,
    failing: HashSet<String>,
    fail_listing: bool,
    submitted: Mutex<Vec<ExportRequest>>,
    describe_calls: AtomicUsize,
}

impl InMemoryLogService {
    /// Create a service holding the given log groups, in listing order
    ///
    /// Empty names are ignored.
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources
                .into_iter()
                .filter_map(|name| SourceName::new(name).ok())
                .collect(),
            page_size: 50,
            limit_exceeded: HashSet::new(),
            failing: HashSet::new(),
            fail_listing: false,
            submitted: Mutex::new(Vec::new()),
            describe_calls: AtomicUsize::new(0),
        }
    }

    /// Set how many log groups each listing page holds
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Reject exports of `source` with a capacity-limit error
    pub fn with_limit_exceeded(mut self, source: &str) -> Self {
        self.limit_exceeded.insert(source.to_string());
        self
    }

    /// Reject exports of `source` with a generic service error
    pub fn with_failure(mut self, source: &str) -> Self {
        self.failing.insert(source.to_string());
        self
    }

    /// Fail every listing call
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Export requests accepted so far, in submission order
    pub fn submitted(&self) -> Vec<ExportRequest> {
        lock(&self.submitted).clone()
    }

    /// Number of listing calls made so far
    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogService for InMemoryLogService {
    async fn describe_sources(
        &self,
        name_prefix: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<SourcePage> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_listing {
            return Err(LogServiceError::Service {
                code: "AccessDeniedException".to_string(),
                message: "not authorized to perform logs:DescribeLogGroups".to_string(),
            }
            .into());
        }

        let offset = match next_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                LogServiceError::Service {
                    code: "InvalidParameterException".to_string(),
                    message: format!("invalid nextToken '{token}'"),
                }
            })?,
            None => 0,
        };

        let matching: Vec<&SourceName> = self
            .sources
            .iter()
            .filter(|name| name_prefix.map_or(true, |prefix| name.as_str().starts_with(prefix)))
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let sources = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|name| (*name).clone())
            .collect();

        Ok(SourcePage {
            sources,
            next_token: (end < matching.len()).then(|| end.to_string()),
        })
    }

    async fn create_export_task(&self, request: &ExportRequest) -> Result<ExportTaskId> {
        let name = request.source_name.as_str();

        if self.limit_exceeded.contains(name) {
            return Err(LogServiceError::LimitExceeded(
                "Resource limit exceeded.".to_string(),
            )
            .into());
        }
        if self.failing.contains(name) {
            return Err(LogServiceError::Service {
                code: "InvalidParameterException".to_string(),
                message: "GetBucketAcl call on the given bucket failed".to_string(),
            }
            .into());
        }

        let mut submitted = lock(&self.submitted);
        submitted.push(request.clone());
        Ok(format!("task-{}", submitted.len()))
    }
}

/// In-memory parameter store
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: Mutex<BTreeMap<String, String>>,
    fail_reads: bool,
    fail_writes: bool,
    put_calls: AtomicUsize,
}

impl InMemoryParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a parameter
    pub fn with_parameter(self, name: &str, value: &str) -> Self {
        lock(&self.values).insert(name.to_string(), value.to_string());
        self
    }

    /// Fail every read with a non-"not found" error
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Reject every write
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current value of a parameter
    pub fn value(&self, name: &str) -> Option<String> {
        lock(&self.values).get(name).cloned()
    }

    /// Number of writes made so far
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        if self.fail_reads {
            return Err(ParameterStoreError::Service {
                code: "AccessDeniedException".to_string(),
                message: format!("not authorized to read '{name}'"),
            }
            .into());
        }

        lock(&self.values)
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterStoreError::NotFound(name.to_string()).into())
    }

    async fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_writes {
            return Err(ParameterStoreError::Service {
                code: "AccessDeniedException".to_string(),
                message: format!("not authorized to write '{name}'"),
            }
            .into());
        }

        let mut values = lock(&self.values);
        if !overwrite && values.contains_key(name) {
            return Err(ParameterStoreError::Service {
                code: "ParameterAlreadyExists".to_string(),
                message: format!("parameter '{name}' already exists"),
            }
            .into());
        }
        values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn get_parameters_by_path(&self, path: &str) -> Result<Vec<(String, String)>> {
        let path = path.trim_end_matches('/');
        Ok(lock(&self.values)
            .iter()
            .filter(|(name, _)| {
                name.strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_service_pagination() {
        let service = InMemoryLogService::new(["a", "b", "c"]).with_page_size(2);

        let first = service.describe_sources(None, None).await.unwrap();
        assert_eq!(first.sources.len(), 2);
        assert_eq!(first.next_token.as_deref(), Some("2"));

        let second = service.describe_sources(None, Some("2")).await.unwrap();
        assert_eq!(second.sources, vec![SourceName::new("c").unwrap()]);
        assert!(second.next_token.is_none());
        assert_eq!(service.describe_calls(), 2);
    }

    #[tokio::test]
    async fn test_log_service_prefix_filter() {
        let service = InMemoryLogService::new(["/aws/lambda/a", "/aws/ecs/b", "/aws/lambda/c"]);
        let page = service
            .describe_sources(Some("/aws/lambda"), None)
            .await
            .unwrap();
        assert_eq!(page.sources.len(), 2);
    }

    #[tokio::test]
    async fn test_log_service_empty() {
        let service = InMemoryLogService::new(Vec::<String>::new());
        let page = service.describe_sources(None, None).await.unwrap();
        assert!(page.sources.is_empty());
        assert!(page.next_token.is_none());
    }

    #[tokio::test]
    async fn test_parameter_store_not_found() {
        let store = InMemoryParameterStore::new();
        let err = store.get_parameter("/missing").await.unwrap_err();
        assert!(err.is_parameter_not_found());
    }

    #[tokio::test]
    async fn test_parameter_store_overwrite_flag() {
        let store = InMemoryParameterStore::new().with_parameter("/p/a", "1");
        assert!(store.put_parameter("/p/a", "2", false).await.is_err());
        store.put_parameter("/p/a", "2", true).await.unwrap();
        assert_eq!(store.value("/p/a").as_deref(), Some("2"));
        assert_eq!(store.put_calls(), 2);
    }

    #[tokio::test]
    async fn test_parameter_store_failing_writes() {
        let store = InMemoryParameterStore::new()
            .with_parameter("/p/a", "1")
            .with_failing_writes();
        assert!(store.put_parameter("/p/a", "2", true).await.is_err());
        assert_eq!(store.value("/p/a").as_deref(), Some("1"));
        assert_eq!(store.put_calls(), 1);
    }

    #[tokio::test]
    async fn test_parameter_store_by_path() {
        let store = InMemoryParameterStore::new()
            .with_parameter("/pre/a", "1")
            .with_parameter("/pre/aws/b", "2")
            .with_parameter("/prefix-other/c", "3");
        let listed = store.get_parameters_by_path("/pre/").await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
