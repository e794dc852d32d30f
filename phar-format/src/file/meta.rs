use crate::{EntryName, FileRecord};

/// The archive trailer: entry records plus the archive-level metadata
/// channel (a JSON object; empty when no metadata was set).
#[derive(Debug, Default)]
pub struct PharMetadata {
    pub(crate) records: Vec<FileRecord>,
    pub(crate) metadata: Vec<u8>,
}

impl PharMetadata {
    #[inline(always)]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    #[inline(always)]
    pub fn record(&self, name: &EntryName) -> Option<&FileRecord> {
        self.records.iter().find(|r| &r.name == name)
    }

    /// The metadata map set at build time, if any.
    pub fn value(&self) -> std::io::Result<Option<serde_json::Value>> {
        if self.metadata.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&self.metadata)
            .map(Some)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
