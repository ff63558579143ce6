//! Wiki core
//!
//! Page titles, flat-file page storage and the HTML templates pages are
//! rendered through. Nothing in here knows about HTTP.

pub mod page;
pub mod template;
pub mod title;

pub use page::{Page, PageStore};
pub use template::Templates;
pub use title::title_from_path;
