//! Queue client facade: name-based send, long-poll receive, and delete.

use crate::cache::QueueHandleCache;
use crate::error::{DeleteError, ReceiveError, SendError};
use aws_config::SdkConfig;
use aws_sdk_sqs as sqs;

/// Default receive batch size, the SQS per-call maximum.
pub const DEFAULT_MAX_MESSAGES: i32 = 10;
/// Default long-poll window in seconds, the SQS maximum wait.
pub const DEFAULT_WAIT_SECONDS: i32 = 20;

/// Client for a named SQS queue.
///
/// Every operation resolves the queue name through an internal
/// [`QueueHandleCache`], so the first call against a name may look up or
/// create the queue; later calls reuse the cached URL. Each operation is a
/// single request against the service with no retry; failures carry the queue
/// name and the underlying cause.
///
/// Share across tasks by wrapping in an `Arc`.
pub struct QueueClient {
    client: sqs::Client,
    handles: QueueHandleCache,
}

impl QueueClient {
    /// Creates a client around a pre-constructed SQS client.
    ///
    /// Credentials, region, and endpoint are whatever the given client was
    /// built with; this type does not touch configuration.
    pub fn new(client: sqs::Client) -> Self {
        let handles = QueueHandleCache::new(client.clone());
        Self { client, handles }
    }

    /// Creates a client from a pre-built AWS SDK config.
    pub fn from_config(config: &SdkConfig) -> Self {
        Self::new(sqs::Client::new(config))
    }

    /// The underlying name → URL cache.
    pub fn handles(&self) -> &QueueHandleCache {
        &self.handles
    }

    /// Sends one message to the named queue.
    pub async fn send(&self, queue: &str, body: &str) -> Result<(), SendError> {
        let queue_url = self.handles.resolve(queue).await?;

        self.client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|cause| SendError::Service {
                queue: queue.to_string(),
                cause,
            })?;

        Ok(())
    }

    /// Long-poll receive with the default batch size and wait window.
    pub async fn receive(&self, queue: &str) -> Result<Vec<Message>, ReceiveError> {
        self.receive_with(queue, DEFAULT_MAX_MESSAGES, DEFAULT_WAIT_SECONDS)
            .await
    }

    /// One long-poll receive bounded by `wait_seconds`.
    ///
    /// Returns early if messages arrive; an empty vec is a normal outcome
    /// meaning nothing arrived within the wait window.
    pub async fn receive_with(
        &self,
        queue: &str,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<Message>, ReceiveError> {
        let queue_url = self.handles.resolve(queue).await?;

        let output = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|cause| ReceiveError::Service {
                queue: queue.to_string(),
                cause,
            })?;

        Ok(output
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Message::from_sqs)
            .collect())
    }

    /// Deletes one received message by its receipt handle.
    ///
    /// A stale or already-used handle may come back as a [`DeleteError`];
    /// the facade stays usable either way and the cached queue URL is kept.
    pub async fn delete(&self, queue: &str, receipt_handle: &str) -> Result<(), DeleteError> {
        let queue_url = self.handles.resolve(queue).await?;

        self.client
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|cause| DeleteError::Service {
                queue: queue.to_string(),
                cause,
            })?;

        Ok(())
    }

    /// The smoke-test sequence: send one message, long-poll, log each
    /// received body, and delete each message by its receipt handle.
    ///
    /// Returns the drained messages so the caller can inspect them.
    pub async fn round_trip(&self, queue: &str, body: &str) -> anyhow::Result<Vec<Message>> {
        self.send(queue, body).await?;

        let messages = self.receive(queue).await?;
        for message in &messages {
            log::info!("received message: {}", message.body);
            self.delete(queue, &message.receipt_handle).await?;
        }

        Ok(messages)
    }
}

/// A received message: the body plus the single-use receipt handle needed to
/// delete this delivery.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Message {
    /// Identifier assigned by SQS.
    pub message_id: String,
    /// Single-use token, valid only for the delivery that produced it.
    pub receipt_handle: String,
    /// The message content.
    pub body: String,
}

impl Message {
    fn from_sqs(message: sqs::types::Message) -> Self {
        Self {
            message_id: message.message_id.unwrap_or_default(),
            receipt_handle: message.receipt_handle.unwrap_or_default(),
            body: message.body.unwrap_or_default(),
        }
    }
}
