use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::shared::constants::OCTET_STREAM;

/// A user-chosen file: name, MIME type and a way to get at its bytes.
///
/// Path-backed files are read lazily, the way a browser `File` handle is, so
/// holding a selection costs nothing until a preview or upload reads it.
/// Cloning is cheap; in-memory content is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    source: FileSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl SelectedFile {
    /// Selects a file on disk. The MIME type is derived from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_from_extension(&path).to_string();
        Self {
            name,
            mime_type,
            source: FileSource::Path(path),
        }
    }

    /// Wraps an in-memory buffer. The MIME type is sniffed from the leading
    /// bytes, falling back to the extension of `name`.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let bytes: Vec<u8> = bytes.into();
        let mime_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or_else(|_| mime_from_extension(Path::new(&name)))
            .to_string();
        Self {
            name,
            mime_type,
            source: FileSource::Memory(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Reads the full content.
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => fs::read(path),
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[rstest]
    #[case("photo.jpg", "image/jpeg")]
    #[case("photo.JPEG", "image/jpeg")]
    #[case("crowd.png", "image/png")]
    #[case("scan.webp", "image/webp")]
    #[case("notes.txt", OCTET_STREAM)]
    #[case("no_extension", OCTET_STREAM)]
    fn test_mime_from_path_extension(#[case] name: &str, #[case] expected: &str) {
        let file = SelectedFile::from_path(PathBuf::from("/tmp").join(name));
        assert_eq!(file.mime_type(), expected);
        assert_eq!(file.name(), name);
    }

    #[test]
    fn test_from_bytes_sniffs_content_over_extension() {
        let file = SelectedFile::from_bytes("mislabelled.jpg", PNG_MAGIC.to_vec());
        assert_eq!(file.mime_type(), "image/png");
    }

    #[test]
    fn test_from_bytes_falls_back_to_extension() {
        let file = SelectedFile::from_bytes("photo.jpg", b"not really an image".to_vec());
        assert_eq!(file.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_reads_back_content() {
        let file = SelectedFile::from_bytes("photo.jpg", JPEG_MAGIC.to_vec());
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(file.read().unwrap(), JPEG_MAGIC);
    }

    #[test]
    fn test_from_path_reads_lazily() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        let file = SelectedFile::from_path(&path);

        // Selecting a path does not touch the disk.
        assert!(file.read().is_err());

        fs::write(&path, JPEG_MAGIC).unwrap();
        assert_eq!(file.read().unwrap(), JPEG_MAGIC);
        assert_eq!(file.name(), "photo.jpg");
    }
}
