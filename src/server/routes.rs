use std::path::Path;

use crate::server::api;
use crate::server::static_files;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub async fn route_request(method: &str, path: &str, data_dir: &Path) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(method, path, data_dir) {
        return response;
    }
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/sources") => match api::sources_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path) if method == "GET" && path.starts_with("/api/browse") => {
            match api::browse_payload(data_dir, path).await {
                Ok(payload) => ok_json(payload),
                Err(api::BrowsePayloadError::MissingSource) => {
                    error_response(400, "Bad Request", "missing 'source' query parameter")
                }
                Err(api::BrowsePayloadError::Unavailable(err)) => {
                    error_response(404, "Not Found", &err.to_string())
                }
                Err(api::BrowsePayloadError::Serialize(err)) => {
                    error_response(500, "Internal Server Error", &err.to_string())
                }
            }
        }
        (method, path) if method == "GET" && path.starts_with("/api/search") => {
            match api::search_payload(data_dir, path).await {
                Ok(payload) => ok_json(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn ok_json(payload: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body: payload,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

/// Fallback console when no frontend bundle is built. Drives the same API
/// the real page uses.
fn index_html() -> String {
    r#"<!doctype html>
<html lang="ja">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Rulebook API Console</title>
  <style>
    body { font-family: sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Rulebook Local API</h1>
  <p>Plain console for the rulebook data endpoints; the real viewer is the built frontend.</p>

  <div class="card">
    <strong>Browse</strong>
    <label for="source">Source</label>
    <select id="source"></select>
    <div><button id="browse-btn">GET /api/browse</button></div>
  </div>

  <div class="card">
    <strong>Search</strong>
    <label for="query">Query</label>
    <input id="query" value="" />
    <div><button id="search-btn">GET /api/search</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    const sourceEl = document.getElementById('source');
    const queryEl = document.getElementById('query');

    async function call(url) {
      try {
        const response = await fetch(url);
        output.textContent = await response.text();
      } catch (err) {
        output.textContent = String(err);
      }
    }

    fetch('/api/sources')
      .then((response) => response.json())
      .then((payload) => {
        for (const source of payload.sources) {
          const option = document.createElement('option');
          option.value = source.id;
          option.textContent = source.label + ' (' + source.id + ')';
          sourceEl.appendChild(option);
        }
      });

    document.getElementById('browse-btn').addEventListener('click', () => {
      call('/api/browse?source=' + encodeURIComponent(sourceEl.value));
    });
    document.getElementById('search-btn').addEventListener('click', () => {
      call('/api/search?q=' + encodeURIComponent(queryEl.value.trim()));
    });
  </script>
</body>
</html>"#
        .to_string()
}
