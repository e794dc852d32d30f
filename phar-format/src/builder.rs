use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    minify, scan,
    stub::{self, Banner, StubSpec},
    Compression, EntryName, PharWriter,
};

/// The file extension of PHP scripts; only these are minify-eligible when
/// adding whole directories.
const SCRIPT_EXTENSION: &str = "php";

/// A directory to add plus an optional extension filter, as given on the
/// command line (`dir` or `dir:ext`, where `ext` may be an alternation such
/// as `(php|phtml)`).
#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub root: PathBuf,
    pub extensions: Option<String>,
}

impl DirectorySpec {
    pub fn parse(spec: &str) -> DirectorySpec {
        let mut parts = spec.splitn(2, ':');
        let root = PathBuf::from(parts.next().unwrap_or_default());
        let extensions = parts.next().filter(|s| !s.is_empty()).map(String::from);

        DirectorySpec { root, extensions }
    }

    fn pattern(&self) -> Result<Option<Regex>> {
        match &self.extensions {
            Some(extensions) => {
                let pattern = Regex::new(&format!(r"\.{}$", extensions))?;
                Ok(Some(pattern))
            }
            None => Ok(None),
        }
    }
}

/// Orchestrates one archive build: collects entries (minified or verbatim),
/// banner and metadata, then compiles everything into a single executable
/// archive file.
///
/// Owns its writer and entry store exclusively for the duration of the
/// build; a builder is not meant to be shared, and a failed build leaves at
/// most a stray temporary file, never a partial output.
#[derive(Debug)]
pub struct PharBuilder {
    writer: PharWriter,
    pharname: String,
    main: EntryName,
    banner: Option<Banner>,
    metadata: Vec<(String, Value)>,
}

impl PharBuilder {
    /// Begin a new build for the given main entrypoint script.
    pub fn create(main: &str) -> Result<PharBuilder> {
        let pharname = unique_name();
        let main = EntryName::new(main)?;

        tracing::debug!(archive = %pharname, main = %main, "initializing archive builder");

        Ok(PharBuilder {
            writer: PharWriter::create(&pharname),
            pharname,
            main,
            banner: None,
            metadata: Vec::new(),
        })
    }

    /// Add a single file, optionally under a different local name. Minified
    /// entries go through the comment/whitespace stripper; everything else
    /// is stored byte-for-byte.
    pub fn add_file<P: AsRef<Path>>(
        &mut self,
        file: P,
        local: Option<&str>,
        minify: bool,
    ) -> Result<()> {
        let file = file.as_ref();
        let name = match local {
            Some(local) => EntryName::new(local)?,
            None => EntryName::new(file)?,
        };

        let data = if minify {
            let source = fs::read_to_string(file)?;
            minify::strip_whitespace(&source).into_bytes()
        } else {
            fs::read(file)?
        };

        tracing::debug!(file = %file.display(), entry = %name, minified = minify, "adding entry");
        self.writer.insert(name, data, minify);

        Ok(())
    }

    /// Expand a directory spec and add every matching file, inferring
    /// minification from the script extension. Returns the added local
    /// names, for diagnostics.
    pub fn add_directory(&mut self, spec: &DirectorySpec) -> Result<Vec<String>> {
        let pattern = spec.pattern()?;
        let files = scan::find(&spec.root, pattern.as_ref())?;

        let mut added = Vec::with_capacity(files.len());
        for file in files {
            let minify = file.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION);
            let local = file.to_string_lossy().into_owned();
            self.add_file(&file, Some(&local), minify)?;
            added.push(local);
        }

        Ok(added)
    }

    /// Set the banner embedded in the stub. Single slot; the last call wins.
    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Add an archive-level metadata property. A duplicate name overwrites
    /// the earlier value.
    pub fn add_metadata<S: Into<String>>(&mut self, name: S, value: Value) {
        let name = name.into();
        match self.metadata.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.metadata.push((name, value)),
        }
    }

    /// The local names added so far, in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.writer.names().map(|n| n.as_str()).collect()
    }

    /// The temporary archive name, which doubles as the stub's alias.
    pub fn pharname(&self) -> &str {
        &self.pharname
    }

    /// Compress, set metadata and stub, flush to a temporary sibling of
    /// `output`, mark it executable and atomically move it into place.
    /// Returns the final byte size.
    ///
    /// Fails with [`Error::MissingMain`] if the main entrypoint contents
    /// were never added; nothing is written in that case.
    pub fn compile<P: AsRef<Path>>(
        mut self,
        output: P,
        shebang: bool,
        compression: Compression,
    ) -> Result<u64> {
        let output = output.as_ref();

        if !self.writer.has(&self.main) {
            return Err(Error::MissingMain {
                name: self.main.to_string(),
            });
        }

        self.writer.compress(compression)?;

        if !self.metadata.is_empty() {
            let map: serde_json::Map<String, Value> = self.metadata.iter().cloned().collect();
            self.writer.set_metadata(&Value::Object(map))?;
        }

        // The stub is set after the compression pass so it stays stored as
        // plain, directly interpretable bootstrap text.
        let main = self.main.to_string();
        let stub = stub::generate(&StubSpec {
            shebang,
            banner: self.banner.as_ref(),
            alias: &self.pharname,
            main: &main,
        });
        self.writer.set_stub(stub);

        // Flush next to the output so the final rename stays on one
        // filesystem.
        let temp = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&self.pharname),
            _ => PathBuf::from(&self.pharname),
        };
        let written = self.writer.finalize(&temp)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp, fs::Permissions::from_mode(0o755))?;
        }

        fs::rename(&temp, output)?;

        tracing::debug!(output = %output.display(), bytes = written, "archive published");

        Ok(written)
    }
}

/// A process-unique temporary archive name, in the spirit of `uniqid()`.
fn unique_name() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default();

    format!("{:x}{:x}.phar", micros, std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_specs() {
        let spec = DirectorySpec::parse("src:php");
        assert_eq!(spec.root, PathBuf::from("src"));
        assert_eq!(spec.extensions.as_deref(), Some("php"));

        let spec = DirectorySpec::parse("vendor");
        assert_eq!(spec.root, PathBuf::from("vendor"));
        assert_eq!(spec.extensions, None);

        let spec = DirectorySpec::parse("src:(php|phtml)");
        assert_eq!(spec.extensions.as_deref(), Some("(php|phtml)"));
    }

    #[test]
    fn metadata_overwrites_by_name() {
        let mut builder = PharBuilder::create("app.php").unwrap();
        builder.add_metadata("version", serde_json::json!("0.9"));
        builder.add_metadata("license", serde_json::json!("MIT"));
        builder.add_metadata("version", serde_json::json!("1.0.0"));

        assert_eq!(builder.metadata.len(), 2);
        assert_eq!(builder.metadata[0].0, "version");
        assert_eq!(builder.metadata[0].1, serde_json::json!("1.0.0"));
    }

    #[test]
    fn unique_names_differ_over_time() {
        let a = unique_name();
        std::thread::sleep(std::time::Duration::from_micros(2));
        let b = unique_name();
        assert_ne!(a, b);
        assert!(a.ends_with(".phar"));
    }
}
