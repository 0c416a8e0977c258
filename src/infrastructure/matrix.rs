//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! This module acts as the bridge between the generic `ChatProvider` interface used by the bot's core logic
//! and the specific implementation details of the Matrix SDK.

use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::attachment::{AttachmentConfig, AttachmentInfo, BaseFileInfo, BaseImageInfo};
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::reaction::ReactionEventContent;
use matrix_sdk::ruma::events::relation::Annotation;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use matrix_sdk::ruma::{EventId, RoomId, UInt};

use crate::domain::traits::{ChatDirectory, ChatProvider};
use crate::domain::types::ImageContent;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_image(&self, image: &ImageContent, name: &str) -> Result<String, String> {
        let content_type: mime::Mime = image
            .mime_type
            .parse()
            .map_err(|e: mime::FromStrError| e.to_string())?;

        let config = AttachmentConfig::new().info(attachment_info(image, &content_type));

        tracing::info!(
            "Bot sending image {} ({}, {}*{}) to {}",
            name,
            image.mime_type,
            image.width,
            image.height,
            self.room_id()
        );
        self.room
            .send_attachment(name, &content_type, image.data.to_vec(), config)
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn react(&self, event_id: &str, key: &str) -> Result<(), String> {
        let event_id = <&EventId>::try_from(event_id).map_err(|e| e.to_string())?;
        let content = ReactionEventContent::new(Annotation::new(event_id.to_owned(), key.to_owned()));
        self.room
            .send(content)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Image metadata for recognized images; a plain file otherwise.
fn attachment_info(image: &ImageContent, content_type: &mime::Mime) -> AttachmentInfo {
    let size = UInt::new(image.data.len() as u64);
    if content_type.type_() != mime::IMAGE {
        return AttachmentInfo::File(BaseFileInfo { size });
    }

    // Zero means the dimensions could not be read, so leave them out.
    AttachmentInfo::Image(BaseImageInfo {
        width: (image.width > 0).then(|| UInt::from(image.width)),
        height: (image.height > 0).then(|| UInt::from(image.height)),
        size,
        ..Default::default()
    })
}

/// Resolves room IDs against the rooms the client has joined.
#[derive(Clone)]
pub struct MatrixDirectory {
    client: Client,
}

impl MatrixDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ChatDirectory for MatrixDirectory {
    fn room(&self, room_id: &str) -> Option<Box<dyn ChatProvider>> {
        let room_id = <&RoomId>::try_from(room_id).ok()?;
        self.client
            .get_room(room_id)
            .map(|room| Box::new(MatrixService::new(room)) as Box<dyn ChatProvider>)
    }
}
