use std::{
    fmt,
    path::{Path, PathBuf},
};

/// The separator used in archive-local entry names, and in the
/// `phar://` paths the stub emits.
pub const NAME_SEP: &str = "/";

/// A sanitized archive-local path: always relative, `/`-delimited, with no
/// `.` or `..` chunks.
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntryName(pub(crate) String);

#[derive(Debug, Clone, thiserror::Error)]
pub enum IntoEntryNameError {
    #[error("unrepresentable string found in entry name")]
    UnrepresentableStr,
    #[error("no entry name provided")]
    EmptyName,
}

pub fn sanitize<P: AsRef<Path>>(path: P) -> Option<Vec<String>> {
    use std::path::Component;
    use unic_normal::StrNormalForm;
    use unic_ucd::GeneralCategory;

    let mut out = vec![];

    for component in path.as_ref().components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(os_str) => out.push(
                os_str
                    .to_str()
                    .map(|x| x.trim())
                    .filter(|x| !x.is_empty())
                    .filter(|x| {
                        !x.chars().any(|c| {
                            let cat = GeneralCategory::of(c);
                            c == '\\'
                                || cat == GeneralCategory::Control
                                || (cat.is_separator() && c != ' ')
                        })
                    })
                    .map(|x| x.nfc().collect::<String>())?,
            ),
        }
    }

    Some(out)
}

impl EntryName {
    pub fn new<P: AsRef<Path>>(path: P) -> std::result::Result<EntryName, IntoEntryNameError> {
        let out = sanitize(&path).ok_or(IntoEntryNameError::UnrepresentableStr)?;

        if out.is_empty() {
            return Err(IntoEntryNameError::EmptyName);
        }

        Ok(EntryName(out.join(NAME_SEP)))
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    pub fn filename(&self) -> String {
        self.iter().collect::<Vec<_>>().pop().unwrap().to_string()
    }

    pub fn iter(&self) -> std::str::Split<'_, &str> {
        self.0.split(NAME_SEP)
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitisation() {
        let name = EntryName::new("/something/../somethingelse/./foo.php").unwrap();
        assert_eq!(name.0, "somethingelse/foo.php");
        let name = EntryName::new("../something/../somethingelse/./foo.php/.").unwrap();
        assert_eq!(name.0, "somethingelse/foo.php");
    }

    #[test]
    fn sanitisation_null() {
        let name = EntryName::new("\0");
        assert!(name.is_err());
    }

    #[test]
    fn sanitisation_empty() {
        let name = EntryName::new("");
        assert!(name.is_err());
    }

    #[test]
    fn sanitisation_doubled_separators() {
        let name = EntryName::new("/cant/hate//the/path");
        assert_eq!(name.unwrap().0, "cant/hate/the/path");
    }

    #[test]
    fn sanitisation_simple_self() {
        let name = EntryName::new("./vendor/autoload.php");
        assert_eq!(name.unwrap().0, "vendor/autoload.php");
    }

    #[test]
    fn sanitisation_slash() {
        let name = EntryName::new("/");
        assert!(name.is_err());
    }

    #[test]
    fn filename() {
        let name = EntryName::new("src/Command/Compile.php").unwrap();
        assert_eq!(name.filename(), "Compile.php");
    }
}
