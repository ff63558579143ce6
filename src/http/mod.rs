//! HTTP protocol layer module
//!
//! Response builders and form decoding shared by the request handlers.

pub mod form;
pub mod response;

// Re-export commonly used functions
pub use form::form_value;
pub use response::{
    build_405_response, build_error_response, build_html_response, build_redirect_response,
    build_text_response,
};
