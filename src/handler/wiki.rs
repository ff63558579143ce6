//! Page handlers
//!
//! One function per page route. Each receives a title that has already been
//! validated and turns the page store and templates into a response.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::wiki::template::{EDIT, VIEW};
use crate::wiki::Page;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Show a page, or send the client to its edit form if it can't be loaded
pub async fn view_page(state: &AppState, title: &str, is_head: bool) -> Response<Full<Bytes>> {
    match state.store.load(title).await {
        Ok(page) => render_page(state, VIEW, &page, is_head),
        Err(_) => http::build_redirect_response(&format!("/edit/{title}")),
    }
}

/// Show the edit form, blank if the page can't be loaded
pub async fn edit_page(state: &AppState, title: &str, is_head: bool) -> Response<Full<Bytes>> {
    let page = state
        .store
        .load(title)
        .await
        .unwrap_or_else(|_| Page::blank(title));
    render_page(state, EDIT, &page, is_head)
}

/// Replace a page's body and redirect to its view
pub async fn save_page(state: &AppState, title: &str, body: String) -> Response<Full<Bytes>> {
    let mut page = state
        .store
        .load(title)
        .await
        .unwrap_or_else(|_| Page::blank(title));
    page.body = body.into_bytes();

    match state.store.save(&page).await {
        Ok(()) => {
            logger::log_page_saved(title, page.body.len());
            http::build_redirect_response(&format!("/view/{title}"))
        }
        Err(e) => {
            logger::log_error(&e.to_string());
            http::build_error_response(&e)
        }
    }
}

fn render_page(state: &AppState, template: &str, page: &Page, is_head: bool) -> Response<Full<Bytes>> {
    match state.templates.render(template, page) {
        Ok(html) => http::build_html_response(html, is_head),
        Err(e) => {
            logger::log_error(&format!("Rendering {template} for {}: {e}", page.title));
            http::build_error_response(&e)
        }
    }
}
