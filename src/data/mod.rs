pub mod loader;
pub mod registry;
pub mod resolve;
pub mod search;
pub mod validate;

pub use loader::{load_source, parse_records, LoadError, Record};
pub use registry::{source_label, Source, SOURCES};
pub use resolve::{
    resolve_fields, resolve_note, ResolvedFields, DESCRIPTION_ALIASES, NAME_ALIASES, NOTE_FIELD,
};
pub use search::{browse, record_matches, search, SourceRecord};
pub use validate::{
    validate_sources, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
