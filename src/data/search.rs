//! Scoped browse and cross-source search over the registered sources.
//!
//! Global search fans out one load per registered source, joins on all of
//! them settling, and only then filters and merges. A source that fails to
//! load contributes zero records; it never aborts the aggregate.

use std::path::Path;

use futures_util::future::join_all;

use crate::data::loader::{load_source, LoadError, Record};
use crate::data::registry::SOURCES;
use crate::data::resolve::resolve_fields;

/// A record plus the category label of the source it came from.
/// `category` is set exactly when the record was produced by a global
/// search pass; scoped browse leaves it None.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub fields: Record,
    pub category: Option<String>,
}

/// Load exactly one source for browsing. No filtering, no category label,
/// file order preserved. A missing or malformed source is the caller's
/// error to surface.
pub async fn browse(data_dir: &Path, source_id: &str) -> Result<Vec<SourceRecord>, LoadError> {
    let records = load_source(data_dir, source_id).await?;
    Ok(records
        .into_iter()
        .map(|fields| SourceRecord {
            fields,
            category: None,
        })
        .collect())
}

/// Case-insensitive substring search across every registered source.
///
/// A blank query short-circuits to an empty result without touching the
/// data dir. All sources load concurrently; the merge happens only after
/// every load has settled.
pub async fn search(data_dir: &Path, query: &str) -> Vec<SourceRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let loads = SOURCES
        .iter()
        .map(|source| async move { (source, load_source(data_dir, source.id).await) });
    let settled = join_all(loads).await;

    let query_lower = query.to_lowercase();
    let mut matches = Vec::new();
    for (source, outcome) in settled {
        let records = match outcome {
            Ok(records) => records,
            Err(err) => {
                eprintln!("search: skipping unavailable source: {err}");
                continue;
            }
        };
        for fields in records {
            if record_matches(&fields, &query_lower) {
                matches.push(SourceRecord {
                    fields,
                    category: Some(source.label.to_string()),
                });
            }
        }
    }
    matches
}

/// A record matches when its resolved name or description contains the
/// lowercased query. Unresolvable fields count as empty strings, so a
/// record with neither never matches.
pub fn record_matches(record: &Record, query_lower: &str) -> bool {
    let resolved = resolve_fields(record);
    resolved
        .name
        .map(|name| name.to_lowercase().contains(query_lower))
        .unwrap_or(false)
        || resolved
            .description
            .map(|description| description.to_lowercase().contains(query_lower))
            .unwrap_or(false)
}
