//! JSON payload builders behind the API routes. Query strings are parsed
//! by hand; values arrive percent-encoded from the page.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::data::loader::LoadError;
use crate::data::registry::{source_label, SOURCES};
use crate::data::search;
use crate::render::render_cards;

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "rulebook-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceListItem {
    pub id: &'static str,
    pub label: &'static str,
}

/// Registry listing, in registration order. The page builds its menu from this.
pub fn sources_payload() -> Result<String, serde_json::Error> {
    let list: Vec<SourceListItem> = SOURCES
        .iter()
        .map(|source| SourceListItem {
            id: source.id,
            label: source.label,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "sources": list }))
}

#[derive(Debug)]
pub enum BrowsePayloadError {
    MissingSource,
    Unavailable(LoadError),
    Serialize(serde_json::Error),
}

impl fmt::Display for BrowsePayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => write!(f, "missing 'source' query parameter"),
            Self::Unavailable(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BrowsePayloadError {}

/// Scoped browse: cards for one source, footnotes included, no category tags.
pub async fn browse_payload(data_dir: &Path, path: &str) -> Result<String, BrowsePayloadError> {
    let source_id = query_param(path, "source").ok_or(BrowsePayloadError::MissingSource)?;
    let records = search::browse(data_dir, &source_id)
        .await
        .map_err(BrowsePayloadError::Unavailable)?;
    let cards = render_cards(&records, false);

    serde_json::to_string_pretty(&serde_json::json!({
        "source": source_id,
        "label": source_label(&source_id),
        "count": cards.len(),
        "cards": cards
    }))
    .map_err(BrowsePayloadError::Serialize)
}

/// Global search: cards from every source that matched, category-tagged.
/// A blank query yields an empty card list without loading anything.
pub async fn search_payload(data_dir: &Path, path: &str) -> Result<String, serde_json::Error> {
    let query = query_param(path, "q").unwrap_or_default();
    let records = search::search(data_dir, &query).await;
    let cards = render_cards(&records, true);

    serde_json::to_string_pretty(&serde_json::json!({
        "query": query.trim(),
        "count": cards.len(),
        "cards": cards
    }))
}

/// First occurrence of `name` in the query string, percent-decoded.
fn query_param(path: &str, name: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| percent_decode(value))
    })
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        decoded.push(high << 4 | low);
                        i += 3;
                    }
                    _ => {
                        decoded.push(bytes[i]);
                        i += 1;
                    }
                }
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
