use std::num::NonZeroU64;

use crate::{compression::Compression, name::EntryName};

/// One stored file inside the archive, as recorded in the trailer.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Compression applied to the entry data.
    pub compression: Compression,

    /// The exact length of the data as written.
    pub length: u64,

    /// A hint for the size of the content when decompressed. Do not trust in absolute terms.
    pub decompressed_length: u64,

    /// The position of the data in the file.
    pub data: NonZeroU64,

    /// Whether the entry contents went through the comment/whitespace stripper.
    pub minified: bool,

    /// The archive-local name of the entry.
    pub name: EntryName,
}

impl FileRecord {
    #[inline(always)]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    #[inline(always)]
    pub fn name(&self) -> &EntryName {
        &self.name
    }
}
