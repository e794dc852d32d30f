use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `#[` opens an attribute, not a comment, hence the `[^\[]` guard.
    static ref PURE_COMMENT_RE: Regex = Regex::new(r"^\s*(//|#[^\[])").unwrap();
    // A marker preceded by `:` or `(` is not a comment: context uris such as
    // "php://" or "http://" inside literals, and this very pattern.
    static ref TRAILING_COMMENT_RE: Regex = Regex::new(r"([^:(])(//|#[^\[]).*$").unwrap();
}

/// Classify one line of source text: `None` when the whole line is a
/// single-line comment, otherwise the line with any trailing single-line
/// comment removed.
///
/// Purely heuristic: a marker inside a string literal that defeats the
/// guards above is still treated as a comment.
pub fn classify(line: &str) -> Option<String> {
    if PURE_COMMENT_RE.is_match(line) {
        return None;
    }

    Some(TRAILING_COMMENT_RE.replace(line, "${1}").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_pure_comment_lines() {
        assert_eq!(classify("// a comment"), None);
        assert_eq!(classify("   // indented"), None);
        assert_eq!(classify("# bash style"), None);
        assert_eq!(classify("\t# indented bash style"), None);
    }

    #[test]
    fn keeps_attributes() {
        assert_eq!(classify("#[Attribute]"), Some("#[Attribute]".to_string()));
        assert_eq!(
            classify("#[Route('/index')]"),
            Some("#[Route('/index')]".to_string())
        );
    }

    #[test]
    fn strips_trailing_comments() {
        assert_eq!(classify("echo 1; // done"), Some("echo 1; ".to_string()));
        assert_eq!(classify("echo 1; # done"), Some("echo 1; ".to_string()));
    }

    #[test]
    fn keeps_scheme_uris() {
        let line = r#"require "scheme://resource/path";"#;
        assert_eq!(classify(line), Some(line.to_string()));

        let line = r#"$stream = fopen("php://temp", "r+");"#;
        assert_eq!(classify(line), Some(line.to_string()));
    }

    #[test]
    fn strips_comment_after_uri() {
        assert_eq!(
            classify(r#"$url = "http://example.com"; // homepage"#),
            Some(r#"$url = "http://example.com"; "#.to_string())
        );
    }

    #[test]
    fn keeps_plain_code() {
        assert_eq!(classify("$a = 1 / 2;"), Some("$a = 1 / 2;".to_string()));
    }
}
