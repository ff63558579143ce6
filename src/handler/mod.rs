//! Request handler module
//!
//! Route dispatch and the page handlers behind it.

pub mod router;
pub mod wiki;

// Re-export main entry point
pub use router::handle_request;
