pub mod heredoc;
pub mod line;
pub mod tokens;

/// Strip comments and redundant whitespace from PHP source text without
/// altering executable semantics.
///
/// Two passes: single-line comments are handled per line, multi-line
/// comment regions over the whitespace-delimited token stream. Heredoc
/// boundary breaks are restored afterwards since the token pass flattens
/// them away.
pub fn strip_whitespace(source: &str) -> String {
    let lines: Vec<String> = source.lines().filter_map(line::classify).collect();

    let contents = lines.join(" ");
    let text = tokens::strip(&contents);

    heredoc::restore(&text)
}
