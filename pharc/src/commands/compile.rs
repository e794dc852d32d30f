use std::path::Path;

use humansize::{file_size_opts as options, FileSize};
use phar_format::{stub::Banner, DirectorySpec, PharBuilder};

use crate::error::{Error, Result};
use crate::CliOpts;

pub fn run(opts: CliOpts) -> Result<()> {
    let main = require(opts.main.as_deref(), "main")?;
    let output = require(opts.output.as_deref(), "output")?;

    eprintln!("Initializing Phar builder...");
    let mut builder = PharBuilder::create(main)?;

    eprintln!("Adding stub entrypoint script contents...");
    add_file(&mut builder, main)?;

    for file in &opts.files {
        eprintln!("Adding single file {}...", file);
        add_file(&mut builder, file)?;
    }

    for spec in &opts.dirs {
        let spec = DirectorySpec::parse(spec);
        let wildcard = match &spec.extensions {
            Some(extensions) => format!("*.{}", extensions),
            None => "all".to_string(),
        };
        eprintln!(
            "Scanning directory {} for {} files...",
            spec.root.display(),
            wildcard
        );

        let added = builder.add_directory(&spec)?;
        for file in &added {
            eprintln!("+ {}", file);
        }
        eprintln!("Added {} files.", added.len());
    }

    if let Some(path) = &opts.banner {
        eprintln!("Loading banner contents from {} file...", path.display());
        let banner = Banner::from_file(path).map_err(|source| Error::Banner {
            path: path.clone(),
            source,
        })?;
        eprintln!("{}", banner.text());
        builder.set_banner(banner);
    }

    for definition in &opts.meta {
        let (name, value) = split_meta(definition)?;
        eprintln!("Adding {} metadata property", name);
        eprintln!("-> {}: {}", name, value);
        builder.add_metadata(name, serde_json::Value::String(value.to_string()));
    }

    eprintln!("Saving archive to {}...", output.display());
    let size = builder.compile(output, !opts.shebang_less, opts.compression)?;
    eprintln!(
        "{} bytes written ({}).",
        size,
        size.file_size(options::BINARY).unwrap()
    );
    eprintln!("Build complete.");

    Ok(())
}

fn add_file(builder: &mut PharBuilder, file: &str) -> Result<()> {
    eprintln!("+ {}", file);

    // Only minify pure PHP source files; other files such as code templates
    // should be left as-is.
    let minify = Path::new(file).extension().and_then(|e| e.to_str()) == Some("php");

    builder.add_file(file, Some(file), minify).map_err(Error::from)
}

fn require<'a, T: ?Sized>(value: Option<&'a T>, option: &str) -> Result<&'a T> {
    value.ok_or_else(|| Error::MandatoryOption {
        option: option.to_string(),
    })
}

fn split_meta(definition: &str) -> Result<(&str, &str)> {
    let mut parts = definition.splitn(2, ':');
    match (parts.next(), parts.next()) {
        (Some(name), Some(value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(Error::InvalidMeta {
            spec: definition.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_the_missing_option() {
        let err = require(None::<&str>, "main").unwrap_err();
        assert_eq!(err.to_string(), "Mandatory option --main is missing");
    }

    #[test]
    fn splits_metadata_definitions() {
        assert_eq!(split_meta("version:1.0.0").unwrap(), ("version", "1.0.0"));
        // Only the first separator splits; values may contain colons.
        assert_eq!(
            split_meta("homepage:https://example.com").unwrap(),
            ("homepage", "https://example.com")
        );
        assert!(split_meta("no-separator").is_err());
        assert!(split_meta(":empty-name").is_err());
    }
}
