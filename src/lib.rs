//! flatwiki: a small wiki server that keeps each page as a text file.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod wiki;

pub use error::WikiError;
