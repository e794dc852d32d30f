use std::io::{Read, Result};
use std::num::NonZeroU64;

use byteorder::{LittleEndian, ReadBytesExt};
use fastvlq::ReadVu64Ext;

use crate::compression::constants::*;
use crate::{Compression, EntryName, FileRecord, PharHeader, PharMetadata};

pub(crate) trait DeserializeOwned {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self>
    where
        Self: Sized;
}

impl DeserializeOwned for String {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let len = reader.read_vu64()?;
        let mut buf = vec![0u8; len as usize];
        reader.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl DeserializeOwned for Vec<u8> {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let len = reader.read_vu64()?;
        let mut buf = vec![0u8; len as usize];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl DeserializeOwned for Vec<FileRecord> {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let len = reader.read_vu64()?;
        let mut buf = Vec::with_capacity(len as usize);
        for _ in 0..len {
            buf.push(FileRecord::deserialize_owned(reader)?);
        }
        tracing::debug!(count = len, "deserialized record list");
        Ok(buf)
    }
}

impl DeserializeOwned for EntryName {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(EntryName(String::deserialize_owned(reader)?))
    }
}

impl DeserializeOwned for Compression {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let id = reader.read_u8()?;

        use Compression::*;

        let compression = match id {
            COMPRESSION_STORED => Stored,
            COMPRESSION_DEFLATE => Deflate,
            COMPRESSION_XZ => Xz,
            id => Unknown(id),
        };

        Ok(compression)
    }
}

impl DeserializeOwned for FileRecord {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let compression = Compression::deserialize_owned(reader)?;
        let length = reader.read_u64::<LittleEndian>()?;
        let decompressed_length = reader.read_u64::<LittleEndian>()?;
        let data = reader.read_u64::<LittleEndian>()?;
        let minified = reader.read_u8()? != 0;
        let name = EntryName::deserialize_owned(reader)?;

        let data = NonZeroU64::new(data).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "entry data offset is zero")
        })?;

        Ok(FileRecord {
            compression,
            length,
            decompressed_length,
            data,
            minified,
            name,
        })
    }
}

impl DeserializeOwned for PharHeader {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic_bytes = [0u8; 4];
        reader.read_exact(&mut magic_bytes)?;

        if &magic_bytes != crate::header::MAGIC_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Magic bytes invalid",
            ));
        }

        let version = reader.read_u8()?;
        reader.read_exact(&mut [0u8; 3])?; // skip reserved
        let trailer = reader.read_u64::<LittleEndian>()?;

        Ok(PharHeader {
            magic_bytes,
            version,
            trailer: NonZeroU64::new(trailer),
        })
    }
}

impl DeserializeOwned for PharMetadata {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self> {
        let records = <Vec<FileRecord>>::deserialize_owned(reader)?;
        let metadata = <Vec<u8>>::deserialize_owned(reader)?;

        tracing::debug!(records = records.len(), "deserialized archive trailer");

        Ok(PharMetadata { records, metadata })
    }
}
