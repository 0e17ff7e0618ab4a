use std::{
    fmt::{self, Display},
    fs::File,
    io::Read,
    path::Path,
};

use flate2::read::GzDecoder;
use miette::{IntoDiagnostic, WrapErr};

const ZIP_LOCAL_HEADER: &[u8; 4] = b"PK\x03\x04";
const ZIP_EMPTY_ARCHIVE: &[u8; 4] = b"PK\x05\x06";
const GZIP_MAGIC: &[u8; 2] = b"\x1f\x8b";

/// Archive format recognized by file signature
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    /// Detects archive format using leading bytes. File name extension is never considered
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(ZIP_LOCAL_HEADER) || header.starts_with(ZIP_EMPTY_ARCHIVE) {
            Some(ArchiveKind::Zip)
        } else if header.starts_with(GZIP_MAGIC) {
            Some(ArchiveKind::TarGz)
        } else {
            None
        }
    }

    /// Detects format of the file specified
    pub fn detect(path: &Path) -> miette::Result<Option<Self>> {
        let mut header = Vec::with_capacity(ZIP_LOCAL_HEADER.len());
        File::open(path)
            .and_then(|f| f.take(ZIP_LOCAL_HEADER.len() as u64).read_to_end(&mut header))
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Ok(ArchiveKind::sniff(&header))
    }
}

impl Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Zip => write!(f, "zip"),
            ArchiveKind::TarGz => write!(f, "tar.gz"),
        }
    }
}

/// Whether archive structure can be read: zip central directory or the first tar header.
/// Empty tar is readable
#[must_use]
pub fn is_readable(path: &Path, kind: ArchiveKind) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    match kind {
        ArchiveKind::Zip => zip::ZipArchive::new(file).is_ok(),
        ArchiveKind::TarGz => {
            let mut archive = tar::Archive::new(GzDecoder::new(file));
            archive
                .entries()
                .is_ok_and(|mut entries| !matches!(entries.next(), Some(Err(_))))
        }
    }
}

/// Extracts all archive entries into destination directory
pub fn extract(path: &Path, kind: ArchiveKind, destination: &Path) -> miette::Result<()> {
    let file = File::open(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to open archive {}", path.display()))?;

    let extracted = match kind {
        ArchiveKind::Zip => zip::ZipArchive::new(file)
            .and_then(|mut archive| archive.extract(destination))
            .into_diagnostic(),
        ArchiveKind::TarGz => tar::Archive::new(GzDecoder::new(file))
            .unpack(destination)
            .into_diagnostic(),
    };

    extracted.wrap_err_with(|| {
        format!(
            "Failed to extract {kind} archive {} into {}",
            path.display(),
            destination.display()
        )
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use std::io::{Cursor, Write};
    use test_case::test_case;

    pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn gz_bytes(content: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap()
    }

    pub fn tar_gz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test_case(b"PK\x03\x04rest", Some(ArchiveKind::Zip) ; "zip")]
    #[test_case(b"PK\x05\x06", Some(ArchiveKind::Zip) ; "empty zip")]
    #[test_case(b"\x1f\x8b\x08\x00", Some(ArchiveKind::TarGz) ; "gzip")]
    #[test_case(b"<html>", None ; "html")]
    #[test_case(b"PK", None ; "truncated zip")]
    #[test_case(b"", None ; "empty")]
    fn sniff_tests(header: &[u8], expected: Option<ArchiveKind>) {
        // Act
        let actual = ArchiveKind::sniff(header);

        // Assert
        assert_eq!(actual, expected);
    }

    #[test]
    fn detect_ignores_extension() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.zip");
        std::fs::write(&path, tar_gz_bytes(&[("a.txt", "a")])).unwrap();

        // Act
        let kind = ArchiveKind::detect(&path).unwrap();

        // Assert
        assert_eq!(kind, Some(ArchiveKind::TarGz));
    }

    #[test_case(ArchiveKind::Zip ; "zip")]
    #[test_case(ArchiveKind::TarGz ; "tar.gz")]
    fn extract_all_entries(kind: ArchiveKind) {
        // Arrange
        let entries = [("zlib/zlib.h", "header"), ("zlib/README", "readme")];
        let bytes = match kind {
            ArchiveKind::Zip => zip_bytes(&entries),
            ArchiveKind::TarGz => tar_gz_bytes(&entries),
        };
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("download");
        std::fs::write(&archive, bytes).unwrap();
        let destination = dir.path().join("third_party");

        // Act
        let result = extract(&archive, kind, &destination);

        // Assert
        assert!(result.is_ok());
        for (name, content) in entries {
            let actual = std::fs::read_to_string(destination.join(name)).unwrap();
            assert_eq!(actual, content);
        }
    }

    #[test_case(ArchiveKind::Zip, zip_bytes(&[("a.txt", "a")]), true ; "zip")]
    #[test_case(ArchiveKind::TarGz, tar_gz_bytes(&[("a.txt", "a")]), true ; "tar.gz")]
    #[test_case(ArchiveKind::TarGz, gz_bytes(b""), true ; "empty gzip")]
    #[test_case(ArchiveKind::TarGz, gz_bytes(b"plain text, not a tar"), false ; "gzip of text")]
    #[test_case(ArchiveKind::TarGz, gz_bytes(&[b'x'; 1024]), false ; "gzip of long text")]
    #[test_case(ArchiveKind::Zip, b"PK\x03\x04garbage".to_vec(), false ; "corrupted zip")]
    fn is_readable_tests(kind: ArchiveKind, bytes: Vec<u8>, expected: bool) {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("download");
        std::fs::write(&archive, bytes).unwrap();

        // Act
        let actual = is_readable(&archive, kind);

        // Assert
        assert_eq!(actual, expected);
    }

    #[test]
    fn extract_corrupted_zip_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("download");
        std::fs::write(&archive, b"PK\x03\x04garbage").unwrap();

        // Act
        let result = extract(&archive, ArchiveKind::Zip, dir.path());

        // Assert
        assert!(result.is_err());
    }
}
