//! # Domain Traits
//!
//! Abstract interfaces for the chat transport and the HTTP client.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::types::ImageContent;

/// Abstract interface for a Chat Provider bound to a single room (e.g., Matrix)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown message to the room, returning its event ID
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Upload and send an image to the room
    async fn send_image(&self, image: &ImageContent, name: &str) -> Result<String, String>;

    /// Annotate an existing event with a reaction
    async fn react(&self, event_id: &str, key: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Looks up rooms other than the one a message arrived in.
pub trait ChatDirectory: Send + Sync {
    fn room(&self, room_id: &str) -> Option<Box<dyn ChatProvider>>;
}

/// Raw response of an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Abstract HTTP client. `Err` is reserved for transport-level failures
/// (DNS, timeout, connection reset); any status code is an `Ok` response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, String>;
}
