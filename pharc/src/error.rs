use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Mandatory option --{option} is missing")]
    MandatoryOption { option: String },

    #[error("Invalid metadata definition `{spec}` (expected \"$key:$value\")")]
    InvalidMeta { spec: String },

    #[error("Cannot load banner file `{}`: {}", .path.display(), .source)]
    Banner {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Build(#[from] phar_format::Error),
}
