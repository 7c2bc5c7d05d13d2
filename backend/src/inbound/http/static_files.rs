//! Static front-end assets served from a capability-scoped directory.
//!
//! Only direct children of the asset directory are reachable: the route
//! pattern admits a single path segment and `cap_std` refuses lookups that
//! would escape the directory.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, error};

use crate::domain::{ApiResult, Error};

const INDEX_FILE: &str = "index.html";
const NOT_FOUND_MESSAGE: &str = "Not found";

/// Handle on the directory holding the static page.
#[derive(Clone)]
pub struct StaticAssets {
    dir: Arc<Dir>,
}

impl StaticAssets {
    /// Open `path` as the asset root.
    ///
    /// # Errors
    /// Returns the I/O error raised while opening the directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn serve(&self, name: String) -> ApiResult<HttpResponse> {
        let dir = Arc::clone(&self.dir);
        let lookup = name.clone();
        let bytes = web::block(move || dir.read(Path::new(&lookup)))
            .await
            .map_err(|err| Error::internal(format!("static asset task failed: {err}")))?
            .map_err(|err| map_read_error(&name, &err))?;

        Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, content_type_for(&name)))
            .body(bytes))
    }
}

fn map_read_error(name: &str, err: &io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::PermissionDenied
        | io::ErrorKind::IsADirectory
        | io::ErrorKind::InvalidInput => {
            debug!(asset = name, error = %err, "static asset unavailable");
            Error::not_found(NOT_FOUND_MESSAGE)
        }
        _ => {
            error!(asset = name, error = %err, "static asset read failed");
            Error::internal(format!("failed to read static asset {name}: {err}"))
        }
    }
}

fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Serve the front page.
#[get("/")]
pub async fn index(assets: web::Data<StaticAssets>) -> ApiResult<HttpResponse> {
    assets.serve(INDEX_FILE.to_owned()).await
}

/// Serve a top-level asset such as `script.js`.
#[get("/{file}")]
pub async fn asset(
    assets: web::Data<StaticAssets>,
    file: web::Path<String>,
) -> ApiResult<HttpResponse> {
    assets.serve(file.into_inner()).await
}
