//! Local dev server: serves the compiled page and reloads it when the
//! storybook file changes.
//!
//! The page is recompiled from disk on every request, so the only shared
//! state is a revision counter the watcher bumps and the page polls.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use notify::{Event, RecursiveMode, Watcher};
use tiny_http::{Header, Response, Server};

use crate::runtime::helpers::html_escape;
use crate::runtime::{PageOptions, DEV_RELOAD_JS};

/// A fully formed response, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn new(status: u16, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }
}

/// Answer one request path against the storybook at `source`.
pub fn route(url: &str, source: &Path, revision: u64) -> Reply {
    let path = url.split('?').next().unwrap_or(url);
    match path {
        "/" | "/index.html" => {
            let options = PageOptions { dev_reload: true };
            match crate::compile_file(source, false, &options) {
                Ok(out) => {
                    for w in &out.warnings {
                        log::warn!("{w}");
                    }
                    Reply::new(200, "text/html; charset=utf-8", out.html)
                }
                Err(e) => {
                    log::error!("{e}");
                    Reply::new(500, "text/html; charset=utf-8", error_page(&e.to_string()))
                }
            }
        }
        "/storybook.json" => match crate::story::load(source) {
            Ok(loaded) => match serde_json::to_string_pretty(&loaded.storybook) {
                Ok(json) => Reply::new(200, "application/json", json),
                Err(e) => Reply::new(500, "text/plain; charset=utf-8", e.to_string()),
            },
            Err(e) => Reply::new(422, "text/plain; charset=utf-8", e.to_string()),
        },
        "/__revision" => Reply::new(200, "text/plain; charset=utf-8", revision.to_string()),
        _ => Reply::new(404, "text/plain; charset=utf-8", "not found".to_string()),
    }
}

fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>storybook error</title>
<style>body {{ background: #1a1a1a; color: #f87171; font: 14px monospace; padding: 32px; white-space: pre-wrap; }}</style>
</head>
<body>{msg}
<script>{DEV_RELOAD_JS}</script>
</body>
</html>
"#,
        msg = html_escape(message),
    )
}

/// Whether a watcher event concerns the storybook file.
fn touches(event: &Event, file: &Path) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == file.file_name())
}

/// Start the dev server for a storybook file. Blocks until the listener fails.
pub fn run_dev_server(path: PathBuf, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let revision = Arc::new(AtomicU64::new(0));

    let watch_rev = Arc::clone(&revision);
    let watched = path.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if touches(&event, &watched) => {
            let rev = watch_rev.fetch_add(1, Ordering::SeqCst) + 1;
            log::info!("{} changed, revision {rev}", watched.display());
        }
        Ok(_) => {}
        Err(e) => log::warn!("watch error: {e}"),
    })?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    let server = Server::http(("127.0.0.1", port)).map_err(|e| e as Box<dyn std::error::Error>)?;
    log::info!("storybook dev server");
    log::info!("  file:     {}", path.display());
    log::info!("  preview:  http://localhost:{port}/");
    log::info!("  data:     http://localhost:{port}/storybook.json");
    log::info!("  watching for changes...");

    for request in server.incoming_requests() {
        let reply = route(request.url(), &path, revision.load(Ordering::SeqCst));
        log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) = Header::from_bytes("Content-Type", reply.content_type) {
            response = response.with_header(header);
        }
        if let Ok(header) = Header::from_bytes("Cache-Control", "no-store") {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }

    drop(watcher);
    Ok(())
}
