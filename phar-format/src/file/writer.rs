use std::fs::OpenOptions;
use std::io::{prelude::*, BufWriter, SeekFrom};
use std::num::NonZeroU64;
use std::path::Path;

use crate::{
    compression::Compression,
    header::PharHeader,
    name::EntryName,
    record::FileRecord,
    ser::Serialize,
    store::EntryStore,
};

use super::PharMetadata;

/// The archive-writer capability. Fully buffered: nothing touches the
/// filesystem until [`PharWriter::finalize`], so a discarded writer leaves
/// no trace on disk.
#[derive(Debug, Default)]
pub struct PharWriter {
    name: String,
    entries: EntryStore,
    metadata: Vec<u8>,
    stub: Option<String>,
}

impl PharWriter {
    /// Begin a new buffered archive under the given temporary archive name.
    pub fn create<S: Into<String>>(name: S) -> PharWriter {
        PharWriter {
            name: name.into(),
            ..PharWriter::default()
        }
    }

    /// The temporary archive name this writer was opened with.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, name: EntryName, data: Vec<u8>, minified: bool) {
        self.entries.insert(name, data, minified);
    }

    #[inline(always)]
    pub fn has(&self, name: &EntryName) -> bool {
        self.entries.has(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &EntryName> {
        self.entries.names()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Apply the given compression mode to every buffered entry.
    pub fn compress(&mut self, compression: Compression) -> std::io::Result<()> {
        self.entries.compress(compression)
    }

    /// Set the archive-level metadata map. Applied once; a later call
    /// replaces the whole map.
    pub fn set_metadata(&mut self, value: &serde_json::Value) -> std::io::Result<()> {
        self.metadata = serde_json::to_vec(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(())
    }

    /// Set the bootstrap stub. The stub is written as-is ahead of the
    /// payload and is never compressed.
    pub fn set_stub<S: Into<String>>(&mut self, stub: S) {
        self.stub = Some(stub.into());
    }

    /// Write the buffered archive to `path` and return the number of bytes
    /// written. The file must not already exist.
    pub fn finalize<P: AsRef<Path>>(self, path: P) -> std::io::Result<u64> {
        let file = OpenOptions::new()
            .write(true)
            .read(true)
            .create_new(true)
            .open(path.as_ref())?;
        let mut file = BufWriter::new(file);

        let stub = self.stub.unwrap_or_default();
        file.write_all(stub.as_bytes())?;

        let header_pos = stub.len() as u64;
        let mut header = PharHeader::default();
        header.write(&mut file)?;

        let mut records = Vec::with_capacity(self.entries.len());
        for entry in self.entries.iter() {
            let data = file.seek(SeekFrom::Current(0))?;
            file.write_all(&entry.data)?;

            records.push(FileRecord {
                compression: entry.compression,
                length: entry.data.len() as u64,
                decompressed_length: entry.decompressed_length,
                data: NonZeroU64::new(data).unwrap(),
                minified: entry.minified,
                name: entry.name.clone(),
            });
        }

        let trailer_pos = file.seek(SeekFrom::Current(0))?;
        let meta = PharMetadata {
            records,
            metadata: self.metadata,
        };
        meta.write(&mut file)?;
        let end = file.seek(SeekFrom::Current(0))?;

        // Patch the trailer pointer now that its position is known.
        header.trailer = NonZeroU64::new(trailer_pos);
        file.seek(SeekFrom::Start(header_pos))?;
        header.write(&mut file)?;
        file.flush()?;

        let file = file.into_inner()?;
        file.set_len(end)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            bytes = end,
            entries = meta.records.len(),
            "finalized archive"
        );

        Ok(end)
    }
}
