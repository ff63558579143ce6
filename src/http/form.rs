//! Form field extraction
//!
//! Url-encoded request bodies take precedence over the query string, and a
//! field that is absent from both reads as empty.

use hyper::header::{HeaderMap, CONTENT_TYPE};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Whether the request declares an url-encoded form body
pub fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// Value of the first `key` field in `body`, falling back to `query`
///
/// `body` is only consulted when it is url-encoded form data.
pub fn form_value(headers: &HeaderMap, body: &[u8], query: Option<&str>, key: &str) -> String {
    let from_body = if is_form_urlencoded(headers) {
        first_value(body, key)
    } else {
        None
    };

    from_body
        .or_else(|| query.and_then(|q| first_value(q.as_bytes(), key)))
        .unwrap_or_default()
}

fn first_value(input: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(input)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn form_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        headers
    }

    #[test]
    fn test_decodes_body_field() {
        let value = form_value(&form_headers(), b"body=Hello+wiki%21&x=1", None, "body");
        assert_eq!(value, "Hello wiki!");
    }

    #[test]
    fn test_body_wins_over_query() {
        let value = form_value(&form_headers(), b"body=posted", Some("body=queried"), "body");
        assert_eq!(value, "posted");
    }

    #[test]
    fn test_query_used_when_body_lacks_field() {
        let value = form_value(&form_headers(), b"other=1", Some("body=queried"), "body");
        assert_eq!(value, "queried");
    }

    #[test]
    fn test_non_form_body_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert_eq!(form_value(&headers, b"body=raw", None, "body"), "");
        assert_eq!(form_value(&HeaderMap::new(), b"body=raw", None, "body"), "");
    }

    #[test]
    fn test_missing_field_is_empty() {
        assert_eq!(form_value(&form_headers(), b"", None, "body"), "");
    }

    #[test]
    fn test_multiline_body_is_preserved() {
        let value = form_value(&form_headers(), b"body=line+one%0D%0Aline+two", None, "body");
        assert_eq!(value, "line one\r\nline two");
    }
}
