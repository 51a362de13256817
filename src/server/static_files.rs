//! Serve the built viewer bundle (frontend/dist) when it exists, plus the
//! CSV data dir the page fetches directly. API paths and non-GET requests
//! always fall through to the router.

use std::fs;
use std::path::{Path, PathBuf};

use super::routes::HttpResponse;

pub fn try_serve_static(method: &str, path: &str, data_dir: &Path) -> Option<HttpResponse> {
    if method != "GET" || path.starts_with("/api") {
        return None;
    }

    let path = path.split('?').next().unwrap_or(path).trim_start_matches('/');
    if path.contains("..") {
        return None;
    }

    // The page loads its sources straight from the data dir.
    if let Some(file) = path.strip_prefix("data/") {
        let body = fs::read_to_string(data_dir.join(file)).ok()?;
        return Some(HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/csv; charset=utf-8",
            body,
        });
    }

    let dist = dist_dir()?;
    let requested = if path.is_empty() { "index.html" } else { path };

    let file_path = dist.join(requested);
    let (file_path, content_type) = if file_path.is_file() {
        (file_path, content_type_for_path(requested)?)
    } else {
        // SPA fallback: unknown page paths get the index.
        let index = dist.join("index.html");
        if !index.is_file() {
            return None;
        }
        (index, "text/html; charset=utf-8")
    };

    let body = fs::read_to_string(&file_path).ok()?;
    Some(HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type,
        body,
    })
}

fn dist_dir() -> Option<PathBuf> {
    let base = std::env::current_dir().ok()?;
    base.join("frontend/dist").canonicalize().ok()
}

/// Text-representable assets only; anything else falls through to the router.
fn content_type_for_path(path: &str) -> Option<&'static str> {
    if path.ends_with(".html") {
        Some("text/html; charset=utf-8")
    } else if path.ends_with(".js") {
        Some("application/javascript; charset=utf-8")
    } else if path.ends_with(".css") {
        Some("text/css; charset=utf-8")
    } else if path.ends_with(".json") {
        Some("application/json; charset=utf-8")
    } else if path.ends_with(".csv") {
        Some("text/csv; charset=utf-8")
    } else if path.ends_with(".svg") {
        Some("image/svg+xml")
    } else {
        None
    }
}
