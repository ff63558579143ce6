//! Flat-file page storage
//!
//! One page is one `<title>.txt` file in the pages directory. There is no
//! index, no cache and no locking: every request goes back to disk and
//! concurrent saves to the same title are last-writer-wins.

use crate::error::WikiError;
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// File extension every page is stored under
const PAGE_EXTENSION: &str = "txt";

/// A wiki page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Page with a title and no content, used when nothing is stored yet
    pub fn blank(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Directory-backed page store
#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a page with this title lives in
    ///
    /// The title is used verbatim; callers must validate it first.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Load a page from disk
    ///
    /// Any read failure is reported the same way, whether the file is
    /// missing or unreadable.
    pub async fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        let body = fs::read(&path).await.map_err(WikiError::io("open", &path))?;
        Ok(Page::new(title, body))
    }

    /// Write a page to disk, creating or truncating its file
    ///
    /// New files are created readable and writable by the owner only.
    pub async fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&path)
            .await
            .map_err(WikiError::io("open", &path))?;
        file.write_all(&page.body)
            .await
            .map_err(WikiError::io("write", &path))?;
        file.flush().await.map_err(WikiError::io("write", &path))?;
        Ok(())
    }
}
