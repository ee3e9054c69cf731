use crate::preview::domain::preview_image::{PreviewError, PreviewImage};
use crate::shared::selected_file::SelectedFile;

/// Domain interface for turning a selected file into a displayable preview.
///
/// Called from background workers, hence `Send + Sync`.
pub trait PreviewLoader: Send + Sync {
    fn load(&self, file: &SelectedFile) -> Result<PreviewImage, PreviewError>;
}
