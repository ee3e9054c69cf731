use crate::analysis::domain::people_counter::PeopleCounter;
use crate::form::upload_form::{FormError, PreviewState, SubmitOutcome, UploadForm};
use crate::preview::domain::preview_image::PreviewImage;
use crate::preview::domain::preview_loader::PreviewLoader;
use crate::shared::selected_file::SelectedFile;

/// What a completed cycle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountReport {
    pub people_count: u32,
    /// `None` when no preview was requested or the file could not be previewed.
    pub preview: Option<PreviewImage>,
}

/// Headless run of the upload form: select → preview → submit → result.
///
/// Drives the same [`UploadForm`] the desktop app uses, synchronously.
pub struct CountPeopleUseCase {
    counter: Box<dyn PeopleCounter>,
    preview_loader: Option<Box<dyn PreviewLoader>>,
}

impl CountPeopleUseCase {
    pub fn new(
        counter: Box<dyn PeopleCounter>,
        preview_loader: Option<Box<dyn PreviewLoader>>,
    ) -> Self {
        Self {
            counter,
            preview_loader,
        }
    }

    /// Runs one cycle for `files` (only the first is used). The error is
    /// the message the form would display.
    pub fn execute(
        &self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<CountReport, FormError> {
        let mut form = UploadForm::new();

        if let (Some(ticket), Some(loader)) = (form.select_files(files), &self.preview_loader) {
            form.finish_preview(ticket.id, loader.load(&ticket.file));
        }

        if let SubmitOutcome::Started(ticket) = form.begin_submission() {
            let result = self.counter.count_people(&ticket.file);
            form.finish_submission(ticket.id, result);
        }

        if let Some(error) = form.last_error() {
            return Err(error);
        }

        let people_count = form.people_count().ok_or(FormError::AnalysisFailed)?;
        let preview = match form.preview() {
            PreviewState::Ready(image) => Some(image.clone()),
            _ => None,
        };

        Ok(CountReport {
            people_count,
            preview,
        })
    }
}
