//! RSS 2.0 and Atom feed parsing.
//!
//! Only the fields news ingestion needs are extracted. Entries are returned
//! in document order.

use std::io::BufRead;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use reqwest::blocking::Client;

use crate::error::FetchError;
use crate::http::{FEED_TIMEOUT, build_client, get_bytes};
use crate::source::FeedSource;

/// A single item (RSS) or entry (Atom).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    /// Title as found in the feed. CDATA titles keep their entities and markup.
    pub title: Option<String>,
    pub link: Option<String>,
    /// Raw HTML description (`description`, `summary`, or `content`).
    pub description: Option<String>,
    /// `url` attribute of the first `media:content`.
    pub media_content: Option<String>,
    /// `url` attribute of the first `media:thumbnail`.
    pub media_thumbnail: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// In-progress entry state while walking the document.
#[derive(Default)]
struct EntryBuilder {
    entry: FeedEntry,
    /// `content:encoded` / Atom `content`, used when no description is present.
    content: Option<String>,
    link_is_alternate: bool,
    published: Option<String>,
    updated: Option<String>,
}

impl EntryBuilder {
    fn finish(mut self) -> FeedEntry {
        if self.entry.description.is_none() {
            self.entry.description = self.content;
        }
        self.entry.published = self
            .published
            .as_deref()
            .and_then(parse_date)
            .or_else(|| self.updated.as_deref().and_then(parse_date));
        self.entry
    }

    fn handle_element(&mut self, e: &BytesStart<'_>) -> Result<(), FetchError> {
        match e.name().as_ref() {
            b"media:content" => {
                if self.entry.media_content.is_none() {
                    self.entry.media_content = attr_value(e, b"url")?;
                }
            }
            b"media:thumbnail" => {
                if self.entry.media_thumbnail.is_none() {
                    self.entry.media_thumbnail = attr_value(e, b"url")?;
                }
            }
            b"link" => {
                // Atom links carry the target in `href`; RSS links are text.
                let Some(href) = attr_value(e, b"href")? else {
                    return Ok(());
                };
                let is_alternate = match attr_value(e, b"rel")? {
                    None => true,
                    Some(rel) => rel == "alternate",
                };
                if self.entry.link.is_none() || (is_alternate && !self.link_is_alternate) {
                    self.entry.link = Some(href);
                    self.link_is_alternate = is_alternate;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_text(&mut self, tag: &[u8], text: String) {
        if text.is_empty() {
            return;
        }
        match tag {
            b"title" => self.entry.title = Some(text),
            b"link" => {
                if self.entry.link.is_none() {
                    self.entry.link = Some(text);
                }
            }
            b"description" | b"summary" => self.entry.description = Some(text),
            b"content:encoded" | b"content" => self.content = Some(text),
            b"pubDate" | b"published" | b"dc:date" => self.published = Some(text),
            b"updated" => self.updated = Some(text),
            _ => {}
        }
    }
}

/// Parse an RFC 2822 (RSS) or RFC 3339 (Atom) timestamp.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, FetchError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value()?.trim().to_string();
            return Ok((!value.is_empty()).then_some(value));
        }
    }
    Ok(None)
}

/// Parse a feed document from a reader.
pub fn parse_feed<R: BufRead>(reader: R) -> Result<Vec<FeedEntry>, FetchError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    let mut saw_root = false;
    // Name of the innermost open element, and the text collected inside it.
    let mut current_tag: Vec<u8> = Vec::new();
    let mut text = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"rss" | b"feed" | b"rdf:RDF" => saw_root = true,
                    b"item" | b"entry" => current = Some(EntryBuilder::default()),
                    _ => {
                        if let Some(ref mut entry) = current {
                            entry.handle_element(e)?;
                        }
                    }
                }
                current_tag = name;
                text.clear();
            }
            Event::Empty(ref e) => {
                if let Some(ref mut entry) = current {
                    entry.handle_element(e)?;
                }
            }
            Event::Text(ref e) => {
                if current.is_some() {
                    // HTML entities such as &nbsp; are not valid XML; keep them raw.
                    match e.unescape() {
                        Ok(t) => text.push_str(&t),
                        Err(_) => text.push_str(&String::from_utf8_lossy(e)),
                    }
                }
            }
            Event::CData(ref e) => {
                if current.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                let name = e.name();
                match name.as_ref() {
                    b"item" | b"entry" => {
                        if let Some(entry) = current.take() {
                            entries.push(entry.finish());
                        }
                    }
                    tag => {
                        if let Some(ref mut entry) = current {
                            if tag == current_tag.as_slice() {
                                entry.handle_text(tag, std::mem::take(&mut text).trim().to_string());
                            }
                        }
                    }
                }
                current_tag.clear();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(FetchError::parse("document is not an RSS or Atom feed"));
    }
    Ok(entries)
}

/// Fetches feeds over HTTP.
pub struct FeedClient {
    http: Client,
}

impl FeedClient {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(FEED_TIMEOUT)?,
        })
    }
}

impl FeedSource for FeedClient {
    fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let bytes = get_bytes(&self.http, url)?;
        parse_feed(bytes.as_slice())
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
