use std::fs;
use std::io::Result;
use std::path::Path;

/// Shebang line of an executable archive.
pub const SHEBANG: &str = "#!/usr/bin/env php";

const OPEN_TAG: &str = "<?php";

// PHP comment block markers used to wrap the banner.
const COMMENT_OPEN: &str = "/**";
const COMMENT_CLOSE: &str = " */";
const COMMENT_LINE: &str = " * ";

/// A legal/informational notice wrapped in comment syntax, embedded in the
/// stub between the open tag and the bootstrap directives.
#[derive(Debug, Clone)]
pub struct Banner {
    lines: Vec<String>,
}

impl Banner {
    /// Wrap raw notice lines in a comment block.
    pub fn wrap<I, S>(lines: I) -> Banner
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = vec![COMMENT_OPEN.to_string()];
        out.extend(
            lines
                .into_iter()
                .map(|line| format!("{}{}", COMMENT_LINE, line.as_ref())),
        );
        out.push(COMMENT_CLOSE.to_string());

        Banner { lines: out }
    }

    /// Load a notice from a file and wrap it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Banner> {
        let contents = fs::read_to_string(path)?;
        Ok(Banner::wrap(contents.lines()))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Everything the stub needs, computed once at compile time.
#[derive(Debug)]
pub struct StubSpec<'a> {
    /// Whether to emit the shebang line.
    pub shebang: bool,
    /// Optional banner block.
    pub banner: Option<&'a Banner>,
    /// The alias the archive binds its own contents under: the temporary
    /// archive name.
    pub alias: &'a str,
    /// Archive-local name of the main entrypoint script.
    pub main: &'a str,
}

/// Render the bootstrap script. The final statement hands control to the
/// main entry script and halts the parser, marking the boundary between
/// bootstrap text and binary payload.
pub fn generate(spec: &StubSpec<'_>) -> String {
    let mut lines = Vec::new();

    if spec.shebang {
        lines.push(SHEBANG.to_string());
    }
    lines.push(OPEN_TAG.to_string());

    if let Some(banner) = spec.banner {
        lines.push(banner.text());
    }

    lines.push(format!(
        "// Compiled with pharc {}",
        env!("CARGO_PKG_VERSION")
    ));
    lines.push(format!("Phar::mapPhar(\"{}\");", spec.alias));
    // Support builtin phar flavoured require "vendor/autoload.php" while
    // still allowing the use of absolute path based requires.
    // @see https://bugs.php.net/bug.php?id=63028
    lines.push(format!("set_include_path(\"phar://{}/\");", spec.alias));
    lines.push(format!(
        "require \"phar://{}/{}\"; __HALT_COMPILER();",
        spec.alias, spec.main
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_line_order() {
        let stub = generate(&StubSpec {
            shebang: true,
            banner: None,
            alias: "abc123.phar",
            main: "bin/app.php",
        });

        let lines: Vec<&str> = stub.lines().collect();
        assert_eq!(lines[0], "#!/usr/bin/env php");
        assert_eq!(lines[1], "<?php");
        assert!(lines[2].starts_with("// Compiled with pharc "));
        assert_eq!(lines[3], "Phar::mapPhar(\"abc123.phar\");");
        assert_eq!(lines[4], "set_include_path(\"phar://abc123.phar/\");");
        assert_eq!(
            lines[5],
            "require \"phar://abc123.phar/bin/app.php\"; __HALT_COMPILER();"
        );
    }

    #[test]
    fn shebang_less_stub_starts_with_open_tag() {
        let stub = generate(&StubSpec {
            shebang: false,
            banner: None,
            alias: "abc123.phar",
            main: "app.php",
        });

        assert!(stub.starts_with("<?php\n"));
        assert!(!stub.contains("#!/usr/bin/env php"));
    }

    #[test]
    fn banner_is_wrapped_and_placed_after_open_tag() {
        let banner = Banner::wrap(vec!["Copyright (c) Example", "All rights reserved."]);
        assert_eq!(
            banner.text(),
            "/**\n * Copyright (c) Example\n * All rights reserved.\n */"
        );

        let stub = generate(&StubSpec {
            shebang: true,
            banner: Some(&banner),
            alias: "abc123.phar",
            main: "app.php",
        });

        let lines: Vec<&str> = stub.lines().collect();
        assert_eq!(lines[1], "<?php");
        assert_eq!(lines[2], "/**");
        assert_eq!(lines[5], " */");
    }
}
