//! Page title validation
//!
//! A title is only accepted when it arrives as `/(edit|save|view)/<title>`
//! with an alphanumeric title, which also keeps it safe to use as a file name.

use crate::error::WikiError;
use regex::Regex;
use std::sync::LazyLock;

static VALID_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("page path pattern is valid")
});

/// Extract the page title from a request path
///
/// # Examples
/// ```
/// use flatwiki::wiki::title_from_path;
/// assert_eq!(title_from_path("/view/FrontPage").unwrap(), "FrontPage");
/// assert!(title_from_path("/view/../secret").is_err());
/// ```
pub fn title_from_path(path: &str) -> Result<&str, WikiError> {
    VALID_PATH
        .captures(path)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .ok_or(WikiError::InvalidTitle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_alphanumeric_titles() {
        for prefix in ["view", "edit", "save"] {
            for title in ["a", "Z", "0", "FrontPage", "page42", "ABCxyz019"] {
                let path = format!("/{prefix}/{title}");
                assert_eq!(title_from_path(&path).unwrap(), title, "path: {path}");
            }
        }
    }

    #[test]
    fn test_rejects_bad_titles() {
        let rejected = [
            "/view/",
            "/view/a/b",
            "/view/a.txt",
            "/view/../etc",
            "/view/a-b",
            "/view/a_b",
            "/view/a%20b",
            "/edit/caf\u{e9}",
            "/save/ ",
        ];
        for path in rejected {
            assert!(
                matches!(title_from_path(path), Err(WikiError::InvalidTitle)),
                "should reject: {path}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_prefix() {
        assert!(title_from_path("/delete/Page").is_err());
        assert!(title_from_path("/View/Page").is_err());
        assert!(title_from_path("view/Page").is_err());
        assert!(title_from_path("/").is_err());
    }

    #[test]
    fn test_title_is_case_sensitive() {
        assert_eq!(title_from_path("/view/foo").unwrap(), "foo");
        assert_eq!(title_from_path("/view/FOO").unwrap(), "FOO");
    }
}
