use crate::message::{ChannelId, InboundMessage, UserId};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendTarget {
    User(UserId),
    Channel(ChannelId),
}

/// Structured (embed-shaped) payload for notices the transport can render
/// richer than plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The platform refused the call for permission reasons (closed DMs,
    /// missing channel permissions). Fallback chains key on this variant.
    #[error("missing permissions: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransportError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, TransportError::Forbidden(_))
    }
}

/// The chat platform's send/delete primitives. Rate limiting, retries and
/// timeouts are the implementor's concern, not the pipeline's.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn delete_message(&self, message: &InboundMessage) -> Result<(), TransportError>;
    async fn send_text(&self, target: SendTarget, text: &str) -> Result<(), TransportError>;
    async fn send_structured(&self, target: SendTarget, notice: &Notice)
        -> Result<(), TransportError>;
}
