use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::create_queue::CreateQueueError;
use aws_sdk_sqs::operation::delete_message::DeleteMessageError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use std::fmt;

/// Failure to turn a queue name into a queue URL.
#[derive(Debug)]
pub struct QueueResolutionError {
    pub queue: String,
    pub cause: ResolutionCause,
}

#[derive(Debug)]
pub enum ResolutionCause {
    /// The `GetQueueUrl` call failed with something other than
    /// queue-does-not-exist.
    Lookup(SdkError<GetQueueUrlError>),
    /// The queue was missing and the `CreateQueue` call failed.
    Create(SdkError<CreateQueueError>),
    /// The service accepted the call but returned no queue URL.
    MissingHandle,
}

impl QueueResolutionError {
    pub(crate) fn lookup(queue: &str, cause: SdkError<GetQueueUrlError>) -> Self {
        Self {
            queue: queue.to_string(),
            cause: ResolutionCause::Lookup(cause),
        }
    }

    pub(crate) fn create(queue: &str, cause: SdkError<CreateQueueError>) -> Self {
        Self {
            queue: queue.to_string(),
            cause: ResolutionCause::Create(cause),
        }
    }

    pub(crate) fn missing_handle(queue: &str) -> Self {
        Self {
            queue: queue.to_string(),
            cause: ResolutionCause::MissingHandle,
        }
    }
}

impl fmt::Display for QueueResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            ResolutionCause::Lookup(e) => {
                write!(f, "failed to look up queue '{}': {}", self.queue, e)
            }
            ResolutionCause::Create(e) => {
                write!(f, "failed to create queue '{}': {}", self.queue, e)
            }
            ResolutionCause::MissingHandle => {
                write!(f, "no queue URL returned for queue '{}'", self.queue)
            }
        }
    }
}

impl std::error::Error for QueueResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            ResolutionCause::Lookup(e) => Some(e),
            ResolutionCause::Create(e) => Some(e),
            ResolutionCause::MissingHandle => None,
        }
    }
}

/// Failure to send a message to a named queue.
#[derive(Debug)]
pub enum SendError {
    Resolve(QueueResolutionError),
    Service {
        queue: String,
        cause: SdkError<SendMessageError>,
    },
}

impl SendError {
    pub fn queue(&self) -> &str {
        match self {
            SendError::Resolve(e) => &e.queue,
            SendError::Service { queue, .. } => queue,
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Resolve(e) => e.fmt(f),
            SendError::Service { queue, cause } => {
                write!(f, "failed to send to queue '{}': {}", queue, cause)
            }
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Resolve(e) => Some(e),
            SendError::Service { cause, .. } => Some(cause),
        }
    }
}

impl From<QueueResolutionError> for SendError {
    fn from(e: QueueResolutionError) -> Self {
        SendError::Resolve(e)
    }
}

/// Failure to receive messages from a named queue.
#[derive(Debug)]
pub enum ReceiveError {
    Resolve(QueueResolutionError),
    Service {
        queue: String,
        cause: SdkError<ReceiveMessageError>,
    },
}

impl ReceiveError {
    pub fn queue(&self) -> &str {
        match self {
            ReceiveError::Resolve(e) => &e.queue,
            ReceiveError::Service { queue, .. } => queue,
        }
    }
}

impl fmt::Display for ReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiveError::Resolve(e) => e.fmt(f),
            ReceiveError::Service { queue, cause } => {
                write!(f, "failed to receive from queue '{}': {}", queue, cause)
            }
        }
    }
}

impl std::error::Error for ReceiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiveError::Resolve(e) => Some(e),
            ReceiveError::Service { cause, .. } => Some(cause),
        }
    }
}

impl From<QueueResolutionError> for ReceiveError {
    fn from(e: QueueResolutionError) -> Self {
        ReceiveError::Resolve(e)
    }
}

/// Failure to delete a message from a named queue.
///
/// A stale or already-used receipt handle may surface here; whether to retry
/// or ignore is the caller's decision.
#[derive(Debug)]
pub enum DeleteError {
    Resolve(QueueResolutionError),
    Service {
        queue: String,
        cause: SdkError<DeleteMessageError>,
    },
}

impl DeleteError {
    pub fn queue(&self) -> &str {
        match self {
            DeleteError::Resolve(e) => &e.queue,
            DeleteError::Service { queue, .. } => queue,
        }
    }
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteError::Resolve(e) => e.fmt(f),
            DeleteError::Service { queue, cause } => {
                write!(f, "failed to delete from queue '{}': {}", queue, cause)
            }
        }
    }
}

impl std::error::Error for DeleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeleteError::Resolve(e) => Some(e),
            DeleteError::Service { cause, .. } => Some(cause),
        }
    }
}

impl From<QueueResolutionError> for DeleteError {
    fn from(e: QueueResolutionError) -> Self {
        DeleteError::Resolve(e)
    }
}
