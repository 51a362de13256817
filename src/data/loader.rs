//! Load one tabular source into header-keyed records.
//! The first CSV row is the schema; key sets differ per source.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// One data row, as a header -> raw value mapping.
pub type Record = HashMap<String, String>;

#[derive(Debug)]
pub enum LoadError {
    Read {
        source_id: String,
        err: std::io::Error,
    },
    Parse {
        source_id: String,
        err: csv::Error,
    },
}

impl LoadError {
    /// Identifier of the source that failed to load.
    pub fn source_id(&self) -> &str {
        match self {
            Self::Read { source_id, .. } | Self::Parse { source_id, .. } => source_id,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { source_id, err } => {
                write!(f, "failed to read source '{source_id}': {err}")
            }
            Self::Parse { source_id, err } => {
                write!(f, "failed to parse source '{source_id}': {err}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Fetch and parse one source. Records come back in file order.
pub async fn load_source(data_dir: &Path, source_id: &str) -> Result<Vec<Record>, LoadError> {
    let path = data_dir.join(source_id);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| LoadError::Read {
            source_id: source_id.to_string(),
            err,
        })?;
    parse_records(source_id, &content)
}

/// Parse headered CSV content into records. Rows whose every field is empty
/// are skipped; a UTF-8 BOM in front of the header is tolerated.
pub fn parse_records(source_id: &str, content: &str) -> Result<Vec<Record>, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| LoadError::Parse {
            source_id: source_id.to_string(),
            err,
        })?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| LoadError::Parse {
            source_id: source_id.to_string(),
            err,
        })?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }
    Ok(records)
}
