//! Resolve the logical name/description fields across the varying source
//! schemas. Single authority for the column-alias priority tables.

use crate::data::loader::Record;

/// Name column aliases, highest priority first.
pub const NAME_ALIASES: &[&str] = &[
    "種類・領域",
    "項目名",
    "用語名",
    "能力語",
    "能力名",
    "処理名",
    "カウンター名",
];

/// Description column aliases, highest priority first.
pub const DESCRIPTION_ALIASES: &[&str] = &["解説", "ルール内容"];

/// Supplementary note column, rendered as a card footnote when present.
pub const NOTE_FIELD: &str = "補足";

/// Logical fields recovered from a record. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// First alias present in the record with a non-empty value wins, for each
/// logical field independently. Safe on records from any source.
pub fn resolve_fields(record: &Record) -> ResolvedFields<'_> {
    ResolvedFields {
        name: first_present(record, NAME_ALIASES),
        description: first_present(record, DESCRIPTION_ALIASES),
    }
}

/// Supplementary note value, None when the column is absent or blank.
pub fn resolve_note(record: &Record) -> Option<&str> {
    record
        .get(NOTE_FIELD)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

fn first_present<'a>(record: &'a Record, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| {
        record
            .get(*alias)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    })
}
