use lazy_static::lazy_static;
use regex::Regex;

const OPEN_DOC: &str = "/**";
const OPEN: &str = "/*";
const CLOSE: &str = "*/";

lazy_static! {
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s\s+").unwrap();
}

/// Remove multi-line comment regions from space-joined source text.
///
/// A single left-to-right pass over whitespace-delimited tokens with an
/// explicit in/out-of-comment state. An unterminated region consumes the
/// remainder of the text: this is a best-effort minifier, not a validating
/// parser, and that case is not an error.
pub fn strip(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_comment = false;

    for token in text.split(' ') {
        if token == CLOSE && in_comment {
            in_comment = false;
            continue;
        }

        if in_comment {
            continue;
        }

        let trimmed = token.trim();
        if trimmed == OPEN_DOC || trimmed == OPEN {
            in_comment = true;
            continue;
        }

        kept.push(token);
    }

    WHITESPACE_RUN_RE
        .replace_all(&kept.join(" "), " ")
        .into_owned()
}
