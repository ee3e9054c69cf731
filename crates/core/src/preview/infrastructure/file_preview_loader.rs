use crate::preview::domain::preview_image::{PreviewError, PreviewImage};
use crate::preview::domain::preview_loader::PreviewLoader;
use crate::shared::selected_file::SelectedFile;

/// Reads the whole file and encodes it as a data URI.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilePreviewLoader;

impl FilePreviewLoader {
    pub fn new() -> Self {
        Self
    }
}

impl PreviewLoader for FilePreviewLoader {
    fn load(&self, file: &SelectedFile) -> Result<PreviewImage, PreviewError> {
        let bytes = file.read().map_err(|e| PreviewError::Read {
            name: file.name().to_string(),
            source: e,
        })?;
        log::debug!(
            "Encoding preview for {} ({} bytes, {})",
            file.name(),
            bytes.len(),
            file.mime_type()
        );
        Ok(PreviewImage::encode(file.mime_type(), &bytes))
    }
}
