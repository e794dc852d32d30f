mod builder;
mod compression;
mod de;
mod error;
mod file;
mod header;
pub mod minify;
mod name;
mod record;
pub mod scan;
mod ser;
mod store;
pub mod stub;

pub use builder::{DirectorySpec, PharBuilder};
pub use compression::Compression;
pub use error::{Error, Result};
pub use file::{reader::PharReader, writer::PharWriter, PharMetadata};
use header::PharHeader;
pub use name::{EntryName, IntoEntryNameError};
pub use record::FileRecord;
