//! Fixtures and in-memory fakes shared by the unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::domain::traits::{ChatDirectory, ChatProvider, HttpResponse, HttpTransport};
use crate::domain::types::ImageContent;

fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(width, height)
        .write_to(&mut out, format)
        .expect("fixture image encodes");
    out.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Jpeg)
}

pub fn gif(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Gif)
}

pub fn comic_page(index: u32, src: &str, title: &str, alt: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>xkcd: {alt}</title></head>
<body>
<div id="ctitle">{alt}</div>
<div id="comic">
<img src="{src}" title="{title}" alt="{alt}" srcset="{src} 2x" style="image-orientation:none" />
</div>
<br />
Permanent link to this comic: <a href="https://xkcd.com/{index}">https://xkcd.com/{index}/</a><br />
Image URL (for hotlinking/embedding): <a href= "https:{src}">https:{src}</a>
</body>
</html>
"#
    )
}

pub fn archive_page(entries: &[(u32, &str, &str)]) -> String {
    let links: String = entries
        .iter()
        .map(|(index, date, title)| format!("<a href=\"/{index}/\" title=\"{date}\">{title}</a><br/>\n"))
        .collect();
    format!("<div id=\"middleContainer\" class=\"box\">\n<h1>Comics:</h1>\n{links}</div>\n")
}

/// HTTP transport answering from a fixed table and recording every request.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Result<HttpResponse, String>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<Bytes>) -> &Self {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.into(),
            }),
        );
        self
    }

    pub fn fail(&self, url: &str, error: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error.to_string()));
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn headers(&self) -> Vec<Vec<(String, String)>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, headers)| headers.clone())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(format!("no route for {url}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Image { name: String, width: u32, height: u32, mime_type: String },
    Reaction { event_id: String, key: String },
}

/// Chat room that records everything the bot sends to it.
#[derive(Clone)]
pub struct FakeChat {
    room_id: String,
    sent: Arc<Mutex<Vec<Sent>>>,
    rejects_messages: bool,
}

impl FakeChat {
    pub fn new(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
            rejects_messages: false,
        }
    }

    /// A room that refuses every text message, as a homeserver error would.
    pub fn rejecting(room_id: &str) -> Self {
        Self {
            rejects_messages: true,
            ..Self::new(room_id)
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn reactions(&self) -> usize {
        self.sent()
            .iter()
            .filter(|sent| matches!(sent, Sent::Reaction { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        if self.rejects_messages {
            return Err(format!("M_FORBIDDEN: cannot post in {}", self.room_id));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Text(content.to_string()));
        Ok(format!("$event{}", sent.len()))
    }

    async fn send_image(&self, image: &ImageContent, name: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Image {
            name: name.to_string(),
            width: image.width,
            height: image.height,
            mime_type: image.mime_type.clone(),
        });
        Ok(format!("$event{}", sent.len()))
    }

    async fn react(&self, event_id: &str, key: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(Sent::Reaction {
            event_id: event_id.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    fn room_id(&self) -> String {
        self.room_id.clone()
    }
}

/// Directory over a fixed set of fake rooms.
#[derive(Default)]
pub struct FakeDirectory {
    rooms: HashMap<String, FakeChat>,
}

impl FakeDirectory {
    pub fn with_room(mut self, chat: &FakeChat) -> Self {
        self.rooms.insert(chat.room_id(), chat.clone());
        self
    }
}

impl ChatDirectory for FakeDirectory {
    fn room(&self, room_id: &str) -> Option<Box<dyn ChatProvider>> {
        self.rooms
            .get(room_id)
            .map(|chat| Box::new(chat.clone()) as Box<dyn ChatProvider>)
    }
}
