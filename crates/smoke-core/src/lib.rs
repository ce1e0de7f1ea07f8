//! # sqs-smoke-core
//!
//! Queue client facade for SQS smoke tests.
//!
//! Resolves human-readable queue names to queue URLs (creating missing queues
//! on first use), then sends, long-polls, and deletes messages against the
//! named queue. Resolved URLs are cached for the lifetime of the client.
//!
//! ## Example
//!
//! ```no_run
//! use sqs_smoke::QueueClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = aws_config::from_env().load().await;
//! let client = QueueClient::from_config(&config);
//!
//! client.send("TestQueue", "Hello, SQS!").await?;
//! for message in client.receive("TestQueue").await? {
//!     println!("{}", message.body);
//!     client.delete("TestQueue", &message.receipt_handle).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod sqs;

pub use cache::QueueHandleCache;
pub use error::{DeleteError, QueueResolutionError, ReceiveError, ResolutionCause, SendError};
pub use sqs::*;
