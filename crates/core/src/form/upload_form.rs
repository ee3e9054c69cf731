use std::fmt::Display;

use thiserror::Error;

use crate::preview::domain::preview_image::PreviewImage;
use crate::shared::selected_file::SelectedFile;

/// The two errors a user can see. The texts are fixed; causes go to the log.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please select a file to upload.")]
    NoFileSelected,
    #[error("Error analyzing the image.")]
    AnalysisFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    None,
    Loading,
    Ready(PreviewImage),
    /// The file could not be read for a preview.
    Unavailable,
}

/// Identifies one preview request. Only the latest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(u64);

/// Identifies one submission. Only the one in flight is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// Work order for a background preview job.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    pub id: PreviewId,
    pub file: SelectedFile,
}

/// Work order for a background analysis request.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: SubmissionId,
    pub file: SelectedFile,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The caller must run the request and report back with `finish_submission`.
    Started(SubmissionTicket),
    NoFileSelected,
    /// A request is already in flight; nothing changed.
    AlreadySubmitting,
}

/// State of the image upload form.
///
/// Mutated only by the two user actions (selecting files, submitting) and by
/// the completions of the jobs those actions hand out. Completions carry the
/// id they were issued with; a completion for anything but the latest
/// selection or the in-flight submission is dropped.
#[derive(Debug, Default)]
pub struct UploadForm {
    selected_file: Option<SelectedFile>,
    preview: PreviewState,
    is_submitting: bool,
    last_error: Option<FormError>,
    people_count: Option<u32>,
    selection_seq: u64,
    submission_seq: u64,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<FormError> {
        self.last_error
    }

    pub fn people_count(&self) -> Option<u32> {
        self.people_count
    }

    /// Handles a file-selection event. Only the first file is used; an empty
    /// selection changes nothing.
    ///
    /// Returns the preview job to run for the new file.
    pub fn select_files(
        &mut self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Option<PreviewTicket> {
        let file = files.into_iter().next()?;

        self.selection_seq += 1;
        self.selected_file = Some(file.clone());
        self.preview = PreviewState::Loading;
        self.last_error = None;

        Some(PreviewTicket {
            id: PreviewId(self.selection_seq),
            file,
        })
    }

    /// Applies the outcome of a preview job. Returns `false` if the job
    /// belongs to a superseded selection and was discarded.
    pub fn finish_preview<E: Display>(
        &mut self,
        id: PreviewId,
        result: Result<PreviewImage, E>,
    ) -> bool {
        if id.0 != self.selection_seq {
            log::debug!(
                "Discarding stale preview {} (current selection {})",
                id.0,
                self.selection_seq
            );
            return false;
        }

        self.preview = match result {
            Ok(image) => PreviewState::Ready(image),
            Err(e) => {
                log::warn!("Preview unavailable: {e}");
                PreviewState::Unavailable
            }
        };
        true
    }

    /// Handles a submit request.
    pub fn begin_submission(&mut self) -> SubmitOutcome {
        if self.is_submitting {
            return SubmitOutcome::AlreadySubmitting;
        }

        let Some(file) = self.selected_file.clone() else {
            self.last_error = Some(FormError::NoFileSelected);
            return SubmitOutcome::NoFileSelected;
        };

        self.submission_seq += 1;
        self.is_submitting = true;

        SubmitOutcome::Started(SubmissionTicket {
            id: SubmissionId(self.submission_seq),
            file,
        })
    }

    /// Applies the outcome of the in-flight submission. Success replaces the
    /// count and clears the error; failure shows the generic error and keeps
    /// whatever count was already displayed.
    ///
    /// Returns `false` if `id` is not the in-flight submission.
    pub fn finish_submission<E: Display>(
        &mut self,
        id: SubmissionId,
        result: Result<u32, E>,
    ) -> bool {
        if !self.is_submitting || id.0 != self.submission_seq {
            log::debug!("Ignoring completion of submission {}", id.0);
            return false;
        }

        match result {
            Ok(count) => {
                self.people_count = Some(count);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("Error analyzing the image: {e}");
                self.last_error = Some(FormError::AnalysisFailed);
            }
        }
        self.is_submitting = false;
        true
    }
}
