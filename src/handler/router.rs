//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: picks the page route from the
//! path prefix, validates the title, checks the method and hands off to the
//! page handlers. Every other path is the home page.

use crate::config::AppState;
use crate::error::WikiError;
use crate::handler::wiki;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::wiki::title_from_path;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const HOME_TEXT: &str = "Home";

/// Form field carrying the page body on save
const BODY_FIELD: &str = "body";

/// The three page routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute {
    View,
    Edit,
    Save,
}

impl PageRoute {
    /// Route for a path prefix, `None` for anything that isn't a page route
    pub fn from_path(path: &str) -> Option<Self> {
        if path.starts_with("/view/") {
            Some(Self::View)
        } else if path.starts_with("/edit/") {
            Some(Self::Edit)
        } else if path.starts_with("/save/") {
            Some(Self::Save)
        } else {
            None
        }
    }

    /// Value of the `Allow` header for this route
    pub const fn allow(self) -> &'static str {
        match self {
            Self::View | Self::Edit => "GET, HEAD",
            Self::Save => "POST",
        }
    }

    pub fn permits(self, method: &Method) -> bool {
        match self {
            Self::View | Self::Edit => *method == Method::GET || *method == Method::HEAD,
            Self::Save => *method == Method::POST,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let entry = state
        .config
        .logging
        .access_log
        .then(|| AccessLogEntry::from_request(remote_addr, &parts));

    let mut response = route_request(&parts, body, &state).await;
    set_server_header(&mut response, &state.config.http.server_name);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path prefix
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // Titles are matched against the decoded path; bytes that aren't UTF-8
    // become U+FFFD and fail validation
    let decoded = percent_decode_str(parts.uri.path()).decode_utf8_lossy();
    let path = decoded.as_ref();

    let Some(route) = PageRoute::from_path(path) else {
        return http::build_text_response(StatusCode::OK, HOME_TEXT);
    };

    let title = match title_from_path(path) {
        Ok(title) => title,
        Err(e) => {
            logger::log_warning(&format!("Rejected path {path}: {e}"));
            return http::build_error_response(&e);
        }
    };

    if !route.permits(&parts.method) {
        logger::log_warning(&format!("Method not allowed: {} {path}", parts.method));
        return http::build_405_response(route.allow());
    }

    let is_head = parts.method == Method::HEAD;
    match route {
        PageRoute::View => wiki::view_page(state, title, is_head).await,
        PageRoute::Edit => wiki::edit_page(state, title, is_head).await,
        PageRoute::Save => {
            let max_body_size = state.config.http.max_body_size;
            if let Some(resp) = check_body_size(&parts.headers, max_body_size) {
                return resp;
            }
            match read_body(body, max_body_size).await {
                Ok(bytes) => {
                    let value =
                        http::form_value(&parts.headers, &bytes, parts.uri.query(), BODY_FIELD);
                    wiki::save_page(state, title, value).await
                }
                Err(e) => {
                    logger::log_warning(&format!("Save {title}: {e}"));
                    http::build_error_response(&e)
                }
            }
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get(CONTENT_LENGTH)?;
    match content_length.to_str().ok()?.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_error_response(&WikiError::PayloadTooLarge {
                limit: max_body_size,
            }))
        }
        _ => None,
    }
}

/// Collect the request body, refusing to buffer more than `limit` bytes
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes, WikiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                WikiError::PayloadTooLarge { limit }
            } else {
                WikiError::Form(e.to_string())
            }
        })
}

fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(_) => logger::log_warning(&format!("Invalid server_name: {server_name:?}")),
    }
}
