//! Health checks over the registered sources: missing files, rows that
//! resolve to nothing, duplicate names, notation that will not iconize.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::data::loader::load_source;
use crate::data::registry::SOURCES;
use crate::data::resolve::resolve_fields;
use crate::render::format::{normalize_parens, MAX_ICON_KEY_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub source_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        source_id: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            source_id: source_id.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate every registered source. An unavailable source is an Error;
/// everything else degrades to Warning/Info diagnostics.
pub async fn validate_sources(data_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    for source in SOURCES {
        let records = match load_source(data_dir, source.id).await {
            Ok(records) => records,
            Err(err) => {
                report.push(ValidationSeverity::Error, source.id, err.to_string());
                continue;
            }
        };

        if records.is_empty() {
            report.push(ValidationSeverity::Warning, source.id, "no data rows");
            continue;
        }

        let mut seen_names: HashSet<String> = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            // Header is row 1, so the first data row is row 2.
            let row = index + 2;
            let resolved = resolve_fields(record);

            if resolved.name.is_none() && resolved.description.is_none() {
                report.push(
                    ValidationSeverity::Warning,
                    source.id,
                    format!("row {row}: no name or description under any known column"),
                );
                continue;
            }

            if let Some(name) = resolved.name {
                if !seen_names.insert(name.to_string()) {
                    report.push(
                        ValidationSeverity::Warning,
                        source.id,
                        format!("row {row}: duplicate name '{name}'"),
                    );
                }
            }

            if let Some(description) = resolved.description {
                for issue in notation_issues(description) {
                    report.push(
                        ValidationSeverity::Info,
                        source.id,
                        format!("row {row}: {issue}"),
                    );
                }
            }
        }

        report.push(
            ValidationSeverity::Info,
            source.id,
            format!("{} row(s)", records.len()),
        );
    }

    report
}

/// Parenthesized runs that the inline formatter will leave as literal text:
/// unclosed, empty, or longer than the icon-key limit.
fn notation_issues(description: &str) -> Vec<String> {
    let normalized = normalize_parens(description);
    let mut issues = Vec::new();
    let mut open: Option<usize> = None;

    for ch in normalized.chars() {
        match ch {
            '(' => {
                if open.is_some() {
                    issues.push("nested '(' in inline notation".to_string());
                }
                open = Some(0);
            }
            ')' => match open.take() {
                Some(0) => issues.push("empty inline notation '()'".to_string()),
                Some(len) if len > MAX_ICON_KEY_CHARS => issues.push(format!(
                    "inline notation run of {len} chars exceeds the {MAX_ICON_KEY_CHARS}-char icon limit"
                )),
                Some(_) => {}
                None => issues.push("unmatched ')' in description".to_string()),
            },
            _ => {
                if let Some(len) = open.as_mut() {
                    *len += 1;
                }
            }
        }
    }
    if open.is_some() {
        issues.push("unclosed '(' in description".to_string());
    }
    issues
}
