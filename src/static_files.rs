//! Static asset handler
//!
//! Maps a [`FileSystem`] onto HTTP: `NotFound` is 404, any other asset
//! error is 500, files are served whole with `Content-Length`,
//! `Last-Modified` and an extension-derived `Content-Type`.

use crate::core::error::AssetError;
use crate::core::fs::{AssetFile, FileSystem};
use crate::core::path;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{HeaderMap, Method, Response, StatusCode};
use mime::Mime;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

pub type HttpResponse = Response<Full<Bytes>>;

/// Body served for directories, whose listings are always empty
const EMPTY_LISTING: &str = "<pre>\n</pre>\n";

/// Served in place of a directory that contains it
const INDEX_FILE: &str = "index.html";

/// Serve `path` from `fs` for a GET or HEAD request.
///
/// A directory is answered with its `index.html` when it has one, otherwise
/// with an empty listing.
pub fn serve_asset<F: FileSystem + ?Sized>(
    fs: &F,
    method: &Method,
    headers: &HeaderMap,
    path: &str,
) -> HttpResponse {
    if method != Method::GET && method != Method::HEAD {
        return method_not_allowed();
    }

    let file = match fs.open(path) {
        Ok(file) => file,
        Err(e) => return error_response(path, &e),
    };

    if !file.is_dir() {
        return serve_file(method, headers, path, file);
    }

    let index_path = path::join(path, INDEX_FILE);
    match fs.open(&index_path) {
        Ok(index) if !index.is_dir() => {
            debug!("Serving directory index {}", index_path);
            serve_file(method, headers, &index_path, index)
        }
        Ok(_) => empty_listing(method),
        Err(e) if e.is_not_found() => empty_listing(method),
        Err(e) => error_response(&index_path, &e),
    }
}

fn serve_file(method: &Method, headers: &HeaderMap, path: &str, file: AssetFile) -> HttpResponse {
    let info = file.stat().clone();
    let last_modified = HeaderValue::from_str(&http_date(info.mod_time)).ok();

    if is_not_modified(headers, info.mod_time) {
        let mut response = respond(StatusCode::NOT_MODIFIED, None, Bytes::new());
        if let Some(value) = last_modified {
            response.headers_mut().insert(header::LAST_MODIFIED, value);
        }
        return response;
    }

    let mime = content_type(path);
    let mut response = with_body(method, StatusCode::OK, Some(&mime), file.into_bytes());
    let response_headers = response.headers_mut();
    response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(info.size));
    if let Some(value) = last_modified {
        response_headers.insert(header::LAST_MODIFIED, value);
    }
    response
}

fn empty_listing(method: &Method) -> HttpResponse {
    let body = Bytes::from_static(EMPTY_LISTING.as_bytes());
    let len = body.len() as u64;
    let mut response = with_body(method, StatusCode::OK, Some(&mime::TEXT_HTML_UTF_8), body);
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    response
}

fn error_response(path: &str, err: &AssetError) -> HttpResponse {
    if err.is_not_found() {
        debug!("Asset not found: {}", path);
        not_found()
    } else {
        error!("Failed to open asset {}: {}", path, err);
        internal_error()
    }
}

/// Content type for a path, by extension
pub fn content_type(path: &str) -> Mime {
    let normalized = path::normalize(path);
    let extension = path::basename(&normalized)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "css" => mime::TEXT_CSS_UTF_8,
        "js" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "json" => mime::APPLICATION_JSON,
        "svg" => mime::IMAGE_SVG,
        "png" => mime::IMAGE_PNG,
        "txt" => mime::TEXT_PLAIN_UTF_8,
        "ico" => "image/x-icon"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// IMF-fixdate as used by `Last-Modified`
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// True when `If-Modified-Since` is at or after `mod_time` (second precision)
fn is_not_modified(headers: &HeaderMap, mod_time: SystemTime) -> bool {
    if mod_time <= UNIX_EPOCH {
        return false;
    }

    let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
    else {
        return false;
    };

    DateTime::<Utc>::from(mod_time).timestamp() <= since.timestamp()
}

/// Response with `body`, dropped for HEAD requests
fn with_body(method: &Method, status: StatusCode, mime: Option<&Mime>, body: Bytes) -> HttpResponse {
    if method == Method::HEAD {
        respond(status, mime, Bytes::new())
    } else {
        respond(status, mime, body)
    }
}

pub(crate) fn respond(status: StatusCode, mime: Option<&Mime>, body: Bytes) -> HttpResponse {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    if let Some(value) = mime.and_then(|m| HeaderValue::from_str(m.as_ref()).ok()) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}

pub(crate) fn not_found() -> HttpResponse {
    respond(
        StatusCode::NOT_FOUND,
        Some(&mime::TEXT_PLAIN_UTF_8),
        Bytes::from_static(b"404 page not found\n"),
    )
}

pub(crate) fn bad_request() -> HttpResponse {
    respond(
        StatusCode::BAD_REQUEST,
        Some(&mime::TEXT_PLAIN_UTF_8),
        Bytes::from_static(b"400 bad request\n"),
    )
}

pub(crate) fn internal_error() -> HttpResponse {
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(&mime::TEXT_PLAIN_UTF_8),
        Bytes::from_static(b"500 internal server error\n"),
    )
}

pub(crate) fn method_not_allowed() -> HttpResponse {
    let mut response = respond(
        StatusCode::METHOD_NOT_ALLOWED,
        Some(&mime::TEXT_PLAIN_UTF_8),
        Bytes::from_static(b"405 method not allowed\n"),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
    response
}
