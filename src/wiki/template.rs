//! Page templates
//!
//! Two templates are compiled once at startup, `view` and `edit`, and are
//! read-only afterwards. They come either from a directory on disk or from
//! the copies compiled into the binary.

use crate::error::WikiError;
use crate::wiki::Page;
use std::path::Path;
use tera::{Context, Tera};

/// Logical name of the page view template
pub const VIEW: &str = "view";
/// Logical name of the page edit form template
pub const EDIT: &str = "edit";

const VIEW_FILE: &str = "view.html";
const EDIT_FILE: &str = "edit.html";

const BUILTIN_VIEW: &str = include_str!("../../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../../templates/edit.html");

/// Compiled template set
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile the templates shipped with the binary
    pub fn builtin() -> Result<Self, WikiError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(VIEW_FILE, BUILTIN_VIEW), (EDIT_FILE, BUILTIN_EDIT)])?;
        Ok(Self { tera })
    }

    /// Compile `view.html` and `edit.html` from `dir`
    ///
    /// Fails if either file is missing or does not parse.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut tera = Tera::default();
        tera.add_template_files(vec![
            (dir.join(VIEW_FILE), Some(VIEW_FILE)),
            (dir.join(EDIT_FILE), Some(EDIT_FILE)),
        ])?;
        Ok(Self { tera })
    }

    /// Render the template with logical name `name` (`view` or `edit`)
    pub fn render(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let mut context = Context::new();
        context.insert("title", &page.title);
        context.insert("body", &page.body_text());
        Ok(self.tera.render(&format!("{name}.html"), &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_view_contains_title_body_and_edit_link() {
        let templates = Templates::builtin().unwrap();
        let html = templates
            .render(VIEW, &Page::new("FrontPage", "Welcome to the wiki"))
            .unwrap();
        assert!(html.contains("<h1>FrontPage</h1>"));
        assert!(html.contains("Welcome to the wiki"));
        assert!(html.contains(r#"href="/edit/FrontPage""#));
    }

    #[test]
    fn test_edit_form_posts_to_save() {
        let templates = Templates::builtin().unwrap();
        let html = templates.render(EDIT, &Page::blank("NewPage")).unwrap();
        assert!(html.contains("<h1>Editing NewPage</h1>"));
        assert!(html.contains(r#"action="/save/NewPage""#));
        assert!(html.contains(r#"<textarea name="body" rows="20" cols="80"></textarea>"#));
    }

    #[test]
    fn test_body_is_escaped() {
        let templates = Templates::builtin().unwrap();
        let html = templates
            .render(VIEW, &Page::new("Xss", "<script>alert(1)</script>"))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let templates = Templates::builtin().unwrap();
        let err = templates.render("history", &Page::blank("A")).unwrap_err();
        assert!(matches!(err, WikiError::Template(_)));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "V:{{ title }}:{{ body }}").unwrap();
        std::fs::write(dir.path().join("edit.html"), "E:{{ title }}").unwrap();

        let templates = Templates::load(dir.path()).unwrap();
        assert_eq!(
            templates.render(VIEW, &Page::new("T", "b")).unwrap(),
            "V:T:b"
        );
        assert_eq!(templates.render(EDIT, &Page::blank("T")).unwrap(), "E:T");
    }

    #[test]
    fn test_load_requires_both_templates() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "{{ title }}").unwrap();
        assert!(Templates::load(dir.path()).is_err());
    }

    #[test]
    fn test_load_rejects_broken_syntax() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "{{ title").unwrap();
        std::fs::write(dir.path().join("edit.html"), "ok").unwrap();
        assert!(matches!(
            Templates::load(dir.path()),
            Err(WikiError::Template(_))
        ));
    }
}
