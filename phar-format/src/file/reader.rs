use std::fs::OpenOptions;
use std::io::{prelude::*, Cursor, SeekFrom};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::{de::DeserializeOwned, header::PharHeader, name::EntryName, record::FileRecord};

use super::PharMetadata;

/// Read support for finalized archives: locates the payload behind the
/// plain-text stub and exposes the trailer. Primarily used to verify
/// build output.
#[derive(Debug)]
pub struct PharReader {
    path: PathBuf,
    mmap: Mmap,
    payload: usize,
    header: PharHeader,
    meta: PharMetadata,
}

impl PharReader {
    /// Open a finalized archive. Errors if no payload magic is present or
    /// the trailer cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<PharReader> {
        let file = OpenOptions::new().read(true).open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };

        // The stub length is not recorded anywhere; scan for the magic the
        // way the self-extractor locates its payload divider.
        let payload = twoway::find_bytes(&mmap, crate::header::MAGIC_BYTES).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "no archive payload found")
        })?;

        let mut cursor = Cursor::new(&mmap[..]);
        cursor.seek(SeekFrom::Start(payload as u64))?;
        let header = PharHeader::deserialize_owned(&mut cursor)?;

        let ptr = header
            .trailer
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no trailer found"))?;
        cursor.seek(SeekFrom::Start(ptr.get()))?;
        let meta = PharMetadata::deserialize_owned(&mut cursor)?;

        Ok(PharReader {
            path: path.as_ref().to_path_buf(),
            mmap,
            payload,
            header,
            meta,
        })
    }

    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline(always)]
    pub fn version(&self) -> u8 {
        self.header.version
    }

    #[inline(always)]
    pub fn metadata(&self) -> &PharMetadata {
        &self.meta
    }

    /// The bootstrap text stored ahead of the payload.
    pub fn stub(&self) -> std::io::Result<&str> {
        std::str::from_utf8(&self.mmap[..self.payload])
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    #[inline(always)]
    pub fn has(&self, name: &EntryName) -> bool {
        self.meta.record(name).is_some()
    }

    /// The stored (still compressed) bytes of an entry.
    pub fn read_bytes(&self, record: &FileRecord) -> &[u8] {
        let start = record.data.get() as usize;
        &self.mmap[start..start + record.length as usize]
    }

    /// Decompress an entry into the given writer.
    pub fn decompress<W: Write>(&self, record: &FileRecord, dest: W) -> std::io::Result<()> {
        record
            .compression
            .decompress_write(Cursor::new(self.read_bytes(record)), dest)
    }

    /// Decompress an entry into an owned buffer.
    pub fn extract(&self, record: &FileRecord) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(record.decompressed_length as usize);
        self.decompress(record, &mut buf)?;
        Ok(buf)
    }
}
