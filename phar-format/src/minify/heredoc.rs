use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEREDOC_OPEN_RE: Regex = Regex::new(r"<<<'([A-Z]+)'").unwrap();
}

/// Reinsert the line breaks around heredoc boundaries that the token pass
/// destroyed. Line breaks *inside* a heredoc body are not preserved; only
/// the boundary syntax is made valid again.
///
/// Each replacement first normalizes any break already present back to the
/// compact form, so re-applying the rewrite is a fixed point.
pub fn restore(text: &str) -> String {
    let mut out = text.to_string();

    let mut boundaries: Vec<String> = Vec::new();
    for cap in HEREDOC_OPEN_RE.captures_iter(text) {
        let boundary = cap[1].to_string();
        if !boundaries.contains(&boundary) {
            boundaries.push(boundary);
        }
    }

    for boundary in boundaries {
        let open = format!("<<<'{}'", boundary);
        let close = format!("{};", boundary);

        out = out.replace(&format!("{}\n", open), &open);
        out = out.replace(&format!("\n{};\n", boundary), &close);

        out = out.replace(&open, &format!("{}\n", open));
        out = out.replace(&close, &format!("\n{};\n", boundary));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_boundary_breaks() {
        let text = "$x = <<<'EOT' hello world EOT; echo $x;";
        let restored = restore(text);
        assert_eq!(restored, "$x = <<<'EOT'\n hello world \nEOT;\n echo $x;");
    }

    #[test]
    fn keeps_boundary_markers_and_terminator_adjacency() {
        let text = "$x = <<<'EOT' hello EOT; echo $x;";
        let restored = restore(text);
        assert!(restored.contains("<<<'EOT'"));
        assert!(restored.contains("\nEOT;\n"));
    }

    #[test]
    fn handles_multiple_distinct_boundaries() {
        let text = "$a = <<<'ONE' aa ONE; $b = <<<'TWO' bb TWO;";
        let restored = restore(text);
        assert!(restored.contains("<<<'ONE'\n"));
        assert!(restored.contains("\nONE;\n"));
        assert!(restored.contains("<<<'TWO'\n"));
        assert!(restored.contains("\nTWO;\n"));
    }

    #[test]
    fn idempotent_on_rewritten_output() {
        let text = "$x = <<<'EOT' hello world EOT; echo $x;";
        let once = restore(text);
        assert_eq!(restore(&once), once);
    }

    #[test]
    fn leaves_text_without_heredocs_untouched() {
        let text = "echo 1; echo 2;";
        assert_eq!(restore(text), text);
    }
}
