pub(crate) mod meta;
pub mod reader;
pub mod writer;

pub use self::meta::PharMetadata;

#[cfg(test)]
mod tests {
    use crate::{Compression, EntryName, PharReader, PharWriter};

    fn name(s: &str) -> EntryName {
        EntryName::new(s).unwrap()
    }

    fn create_test_phar(path: &std::path::Path) {
        let mut writer = PharWriter::create("test.phar");
        writer.insert(name("hello.txt"), b"hello\0\0\0".to_vec(), false);
        writer.set_stub("<?php __HALT_COMPILER();");
        writer.finalize(path).unwrap();
    }

    #[test]
    fn create_phar_file() {
        let dir = tempfile::tempdir().unwrap();
        create_test_phar(&dir.path().join("smoketest.phar"));
    }

    #[test]
    fn read_stub_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("read_bytes.phar");
        create_test_phar(&path);

        let reader = PharReader::open(&path).unwrap();
        assert_eq!(reader.stub().unwrap(), "<?php __HALT_COMPILER();");

        let record = reader.metadata().record(&name("hello.txt")).unwrap();
        assert_eq!(record.compression, Compression::Stored);
        assert!(!record.minified);
        assert_eq!(reader.extract(record).unwrap(), b"hello\0\0\0".to_vec());
    }

    #[test]
    fn finalize_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.phar");
        std::fs::write(&path, b"occupied").unwrap();

        let writer = PharWriter::create("test.phar");
        assert!(writer.finalize(&path).is_err());
    }

    #[test]
    fn compressed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compressed.phar");

        let contents =
            "This, this, this, this, this is a compressable string string string string.\n";

        let mut writer = PharWriter::create("test.phar");
        writer.insert(name("a/string.php"), contents.as_bytes().to_vec(), true);
        writer.insert(name("b/string.php"), contents.as_bytes().to_vec(), true);
        writer.compress(Compression::Deflate).unwrap();
        writer.set_stub("<?php __HALT_COMPILER();");
        writer.finalize(&path).unwrap();

        let reader = PharReader::open(&path).unwrap();
        assert_eq!(reader.metadata().records().len(), 2);

        for entry in &["a/string.php", "b/string.php"] {
            let record = reader.metadata().record(&name(entry)).unwrap();
            assert_eq!(record.compression, Compression::Deflate);
            assert_eq!(record.decompressed_length, contents.len() as u64);
            assert_eq!(reader.extract(record).unwrap(), contents.as_bytes());
        }
    }

    #[test]
    fn metadata_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.phar");

        let mut writer = PharWriter::create("test.phar");
        writer.insert(name("main.php"), b"<?php".to_vec(), true);
        writer
            .set_metadata(&serde_json::json!({ "version": "1.0.0" }))
            .unwrap();
        writer.set_stub("<?php __HALT_COMPILER();");
        writer.finalize(&path).unwrap();

        let reader = PharReader::open(&path).unwrap();
        let value = reader.metadata().value().unwrap().unwrap();
        assert_eq!(value["version"], serde_json::json!("1.0.0"));
    }
}
