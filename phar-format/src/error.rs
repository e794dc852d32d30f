pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A build must not produce an executable archive without its own
    /// entrypoint.
    #[error("Main script {name} contents must be added to the archive")]
    MissingMain { name: String },

    #[error("Invalid entry name")]
    Name(#[from] crate::name::IntoEntryNameError),

    #[error("Invalid extension filter")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
