use std::io::{Result, Seek, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use fastvlq::WriteVu64Ext;

use crate::{EntryName, FileRecord, PharHeader, PharMetadata};

pub(crate) trait Serialize {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()>;
}

impl Serialize for String {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_vu64(self.len() as u64)?;
        writer.write_all(self.as_bytes())
    }
}

impl Serialize for Vec<u8> {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_vu64(self.len() as u64)?;
        writer.write_all(self)
    }
}

impl Serialize for Vec<FileRecord> {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_vu64(self.len() as u64)?;

        for record in self.iter() {
            record.write(writer)?;
        }
        Ok(())
    }
}

impl Serialize for EntryName {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.0.write(writer)
    }
}

impl Serialize for FileRecord {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.compression.id())?;
        writer.write_u64::<LittleEndian>(self.length)?;
        writer.write_u64::<LittleEndian>(self.decompressed_length)?;
        writer.write_u64::<LittleEndian>(self.data.get())?;
        writer.write_u8(self.minified as u8)?;

        self.name.write(writer)
    }
}

impl Serialize for PharHeader {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.magic_bytes)?;
        writer.write_u8(self.version)?;
        writer.write_all(&[0u8; 3])?; // reserved
        writer.write_u64::<LittleEndian>(self.trailer.map(|x| x.get()).unwrap_or(0))
    }
}

impl Serialize for PharMetadata {
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.records.write(writer)?;
        self.metadata.write(writer)
    }
}
