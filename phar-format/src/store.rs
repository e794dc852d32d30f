use crate::{Compression, EntryName};

/// One buffered archive entry, not yet written to disk.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) name: EntryName,
    pub(crate) data: Vec<u8>,
    pub(crate) minified: bool,
    pub(crate) compression: Compression,
    pub(crate) decompressed_length: u64,
}

/// Ordered collection of (name, contents) pairs backing the archive writer.
/// Names are unique; inserting a colliding name overwrites the earlier entry
/// in place, keeping its original position.
#[derive(Debug, Default)]
pub(crate) struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub(crate) fn insert(&mut self, name: EntryName, data: Vec<u8>, minified: bool) {
        let decompressed_length = data.len() as u64;
        let entry = Entry {
            name,
            data,
            minified,
            compression: Compression::Stored,
            decompressed_length,
        };

        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    #[inline(always)]
    pub(crate) fn has(&self, name: &EntryName) -> bool {
        self.entries.iter().any(|e| &e.name == name)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &EntryName> {
        self.entries.iter().map(|e| &e.name)
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Compress every stored entry with the given mode. Raw lengths are kept
    /// as the decompressed-length hints of the eventual records.
    pub(crate) fn compress(&mut self, compression: Compression) -> std::io::Result<()> {
        for entry in self.entries.iter_mut() {
            let raw_length = entry.data.len() as u64;
            let compressed = compression.compress_bytes(&entry.data)?;
            tracing::debug!(
                entry = %entry.name,
                raw = raw_length,
                compressed = compressed.len() as u64,
                "compressed entry"
            );
            entry.data = compressed;
            entry.decompressed_length = raw_length;
            entry.compression = compression;
        }

        Ok(())
    }
}
