//! # xkcd Client
//!
//! Fetches comic pages, pulls the interesting fields out of the HTML with a
//! handful of regexes, downloads the image and sniffs it.
//! A missing field is reported as [`RetrievalError::Extraction`] so layout
//! changes upstream can be told apart from network trouble.

use bytes::Bytes;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::application::image;
use crate::domain::config::ComicsConfig;
use crate::domain::traits::HttpTransport;
use crate::domain::types::{ArchiveEntry, ComicResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrievalError {
    #[error("resource not found")]
    NotFound,
    #[error("remote error (status code {0})")]
    Remote(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("response had no data")]
    NoData,
    #[error("could not extract {0} from page")]
    Extraction(&'static str),
}

type Result<T> = std::result::Result<T, RetrievalError>;

static COMIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<div id="comic">\s*(.*?)\s*</div>"#).expect("comic regex"));
static SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\ssrc="([^"]+)""#).expect("src regex"));
static ALT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\salt="([^"]+)""#).expect("alt regex"));
static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\stitle="([^"]+)""#).expect("title regex"));
static PERMALINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)Permanent link to this comic:\s*(?:<a[^>]*>)?\s*https?://[^\s<"]*?/([0-9]+)/?"#)
        .expect("permalink regex")
});
static ARCHIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="/([0-9]+)/" title="([^"]*)">([^<]+)</a>"#).expect("archive regex")
});

/// Fields scraped from a single comic page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicPage {
    pub index: u32,
    pub title: String,
    pub comment: String,
    pub image_url: String,
}

pub struct XkcdClient {
    http: Arc<dyn HttpTransport>,
    config: ComicsConfig,
}

impl XkcdClient {
    pub fn new(http: Arc<dyn HttpTransport>, config: ComicsConfig) -> Self {
        Self { http, config }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn permalink(&self, index: u32) -> String {
        format!("{}/{}/", self.base_url(), index)
    }

    pub async fn latest(&self) -> Result<ComicResult> {
        let url = self.base_url().to_string();
        self.fetch_comic(&url).await
    }

    pub async fn comic(&self, index: u32) -> Result<ComicResult> {
        let url = format!("{}/{}", self.base_url(), index);
        self.fetch_comic(&url).await
    }

    pub async fn random(&self) -> Result<ComicResult> {
        let url = self.config.random_url.clone();
        self.fetch_comic(&url).await
    }

    /// All archive entries whose title contains `query`, newest first.
    pub async fn search(&self, query: &str) -> Result<Vec<ArchiveEntry>> {
        let url = format!("{}/archive/", self.base_url());
        let body = self.get(&url).await?;
        let html = String::from_utf8_lossy(&body);
        let needle = query.trim().to_lowercase();

        let entries = parse_archive(&html)
            .into_iter()
            .filter(|entry| entry.title.to_lowercase().contains(&needle))
            .collect::<Vec<_>>();
        tracing::info!("Archive search for {:?} matched {} comics", query, entries.len());
        Ok(entries)
    }

    async fn fetch_comic(&self, url: &str) -> Result<ComicResult> {
        let body = self.get(url).await?;
        let page = parse_comic_page(&String::from_utf8_lossy(&body))?;
        let image_url = self.resolve_url(&page.image_url);

        tracing::info!("Downloading image for comic #{} from {}", page.index, image_url);
        let data = self.get(&image_url).await?;

        Ok(ComicResult {
            index: page.index,
            title: page.title,
            comment: page.comment,
            image: image::describe(data),
        })
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("//") {
            format!("https:{url}")
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url(), url)
        } else {
            url.to_string()
        }
    }

    async fn get(&self, url: &str) -> Result<Bytes> {
        let headers = [("User-Agent", self.config.user_agent.as_str())];
        let response = self.http.get(url, &headers).await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            RetrievalError::Transport(e)
        })?;

        match response.status {
            200 if response.body.is_empty() => Err(RetrievalError::NoData),
            200 => Ok(response.body),
            404 => Err(RetrievalError::NotFound),
            status => Err(RetrievalError::Remote(status)),
        }
    }
}

/// Extracts the comic fields from a page. Title, image and index are
/// required; the hover text may be missing.
pub fn parse_comic_page(html: &str) -> Result<ComicPage> {
    let markup = capture(&COMIC_REGEX, html).ok_or(RetrievalError::Extraction("comic"))?;
    let image_url = capture(&SRC_REGEX, markup).ok_or(RetrievalError::Extraction("image"))?;
    let title = capture(&ALT_REGEX, markup).ok_or(RetrievalError::Extraction("title"))?;
    let comment = capture(&TITLE_REGEX, markup).unwrap_or_default();
    let index = capture(&PERMALINK_REGEX, html)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|index| *index >= 1)
        .ok_or(RetrievalError::Extraction("index"))?;

    Ok(ComicPage {
        index,
        title: unescape(title),
        comment: unescape(comment),
        image_url: unescape(image_url),
    })
}

pub fn parse_archive(html: &str) -> Vec<ArchiveEntry> {
    ARCHIVE_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let index = caps.get(1)?.as_str().parse().ok()?;
            Some(ArchiveEntry {
                index,
                date: caps.get(2)?.as_str().to_string(),
                title: unescape(caps.get(3)?.as_str()),
            })
        })
        .collect()
}

fn capture<'a>(regex: &Regex, haystack: &'a str) -> Option<&'a str> {
    regex
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            }?;
            Some((ch, end))
        });

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
