//! Queue name → queue URL cache with get-or-create semantics.

use crate::error::QueueResolutionError;
use aws_sdk_sqs as sqs;
use sqs::error::SdkError;
use sqs::operation::get_queue_url::GetQueueUrlError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Process-lifetime cache of queue name → queue URL.
///
/// Entries are added lazily the first time a name is resolved and are never
/// evicted. A queue deleted out-of-band keeps serving its stale URL until the
/// owning process restarts; callers that need invalidation must rebuild the
/// cache.
pub struct QueueHandleCache {
    client: sqs::Client,
    handles: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl QueueHandleCache {
    pub fn new(client: sqs::Client) -> Self {
        Self {
            client,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a queue name to its URL, creating the queue on first use.
    ///
    /// A cached name returns immediately with no external call. Otherwise the
    /// queue is looked up by name, and a queue-does-not-exist answer turns
    /// into a create call whose URL is cached instead.
    ///
    /// Concurrent first-time resolutions of the same name collapse into a
    /// single lookup/create; the other callers wait and read the winner's
    /// result. A failed or cancelled resolution caches nothing, so the next
    /// caller starts over.
    pub async fn resolve(&self, queue: &str) -> Result<String, QueueResolutionError> {
        let cell = {
            let mut handles = self.handles.lock().await;
            Arc::clone(handles.entry(queue.to_string()).or_default())
        };

        cell.get_or_try_init(|| self.lookup_or_create(queue))
            .await
            .cloned()
    }

    async fn lookup_or_create(&self, queue: &str) -> Result<String, QueueResolutionError> {
        let url = match self.client.get_queue_url().queue_name(queue).send().await {
            Ok(output) => output.queue_url,
            Err(err) if is_missing_queue(&err) => {
                log::debug!("queue '{queue}' does not exist, creating it");
                self.client
                    .create_queue()
                    .queue_name(queue)
                    .send()
                    .await
                    .map_err(|e| QueueResolutionError::create(queue, e))?
                    .queue_url
            }
            Err(err) => return Err(QueueResolutionError::lookup(queue, err)),
        };

        url.ok_or_else(|| QueueResolutionError::missing_handle(queue))
    }
}

fn is_missing_queue(err: &SdkError<GetQueueUrlError>) -> bool {
    err.as_service_error()
        .is_some_and(|e| e.is_queue_does_not_exist())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolutionCause;
    use aws_sdk_sqs::error::ErrorMetadata;
    use aws_sdk_sqs::operation::create_queue::CreateQueueOutput;
    use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlOutput;
    use aws_sdk_sqs::types::error::QueueDoesNotExist;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    const ORDERS_URL: &str = "https://sqs.us-east-1.amazonaws.com/000000000000/Orders";

    #[tokio::test]
    async fn second_resolve_is_a_cache_hit() {
        let lookup = mock!(sqs::Client::get_queue_url)
            .match_requests(|req| req.queue_name() == Some("Orders"))
            .then_output(|| GetQueueUrlOutput::builder().queue_url(ORDERS_URL).build());
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&lookup]);
        let cache = QueueHandleCache::new(client);

        assert_eq!(cache.resolve("Orders").await.unwrap(), ORDERS_URL);
        assert_eq!(cache.resolve("Orders").await.unwrap(), ORDERS_URL);
        assert_eq!(lookup.num_calls(), 1);
    }

    #[tokio::test]
    async fn missing_queue_is_created_and_cached() {
        let lookup = mock!(sqs::Client::get_queue_url)
            .then_error(|| GetQueueUrlError::QueueDoesNotExist(QueueDoesNotExist::builder().build()));
        let create = mock!(sqs::Client::create_queue)
            .match_requests(|req| req.queue_name() == Some("Orders"))
            .then_output(|| CreateQueueOutput::builder().queue_url(ORDERS_URL).build());
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&lookup, &create]);
        let cache = QueueHandleCache::new(client);

        assert_eq!(cache.resolve("Orders").await.unwrap(), ORDERS_URL);
        // second resolve must not touch the service again
        assert_eq!(cache.resolve("Orders").await.unwrap(), ORDERS_URL);
        assert_eq!(lookup.num_calls(), 1);
        assert_eq!(create.num_calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_resolutions_create_once() {
        let lookup = mock!(sqs::Client::get_queue_url)
            .then_error(|| GetQueueUrlError::QueueDoesNotExist(QueueDoesNotExist::builder().build()));
        let create = mock!(sqs::Client::create_queue)
            .then_output(|| CreateQueueOutput::builder().queue_url(ORDERS_URL).build());
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&lookup, &create]);
        let cache = Arc::new(QueueHandleCache::new(client));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.resolve("Orders").await })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), ORDERS_URL);
        }

        assert_eq!(lookup.num_calls(), 1);
        assert_eq!(create.num_calls(), 1);
    }

    #[tokio::test]
    async fn failed_resolution_caches_nothing() {
        let denied = mock!(sqs::Client::get_queue_url).then_error(|| {
            GetQueueUrlError::generic(ErrorMetadata::builder().code("AccessDenied").build())
        });
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&denied]);
        let cache = QueueHandleCache::new(client);

        let err = cache.resolve("Orders").await.unwrap_err();
        assert_eq!(err.queue, "Orders");
        assert!(matches!(err.cause, ResolutionCause::Lookup(_)));

        // the failure must not be memoized: the next resolve retries
        assert!(cache.resolve("Orders").await.is_err());
        assert_eq!(denied.num_calls(), 2);
    }

    #[tokio::test]
    async fn failed_create_propagates_with_queue_name() {
        let lookup = mock!(sqs::Client::get_queue_url)
            .then_error(|| GetQueueUrlError::QueueDoesNotExist(QueueDoesNotExist::builder().build()));
        let create = mock!(sqs::Client::create_queue).then_error(|| {
            aws_sdk_sqs::operation::create_queue::CreateQueueError::generic(
                ErrorMetadata::builder().code("InvalidParameterValue").build(),
            )
        });
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&lookup, &create]);
        let cache = QueueHandleCache::new(client);

        let err = cache.resolve("bad name").await.unwrap_err();
        assert_eq!(err.queue, "bad name");
        assert!(matches!(err.cause, ResolutionCause::Create(_)));
    }

    #[tokio::test]
    async fn distinct_names_resolve_independently() {
        let lookup = mock!(sqs::Client::get_queue_url).then_output(|| {
            GetQueueUrlOutput::builder().queue_url(ORDERS_URL).build()
        });
        let client = mock_client!(aws_sdk_sqs, RuleMode::MatchAny, [&lookup]);
        let cache = QueueHandleCache::new(client);

        cache.resolve("Orders").await.unwrap();
        cache.resolve("Invoices").await.unwrap();
        assert_eq!(lookup.num_calls(), 2);
    }
}
