use crate::form::upload_form::{PreviewState, UploadForm};
use crate::preview::domain::preview_image::PreviewImage;
use crate::shared::constants::{
    FORM_TITLE, NO_FILE_LABEL, PREVIEW_LOADING, PREVIEW_TITLE, PREVIEW_UNAVAILABLE,
    PROCESSING_LABEL, UPLOAD_LABEL,
};

/// Everything the upload form shows, derived from its state.
///
/// Front ends map this onto their own widgets; keeping it a plain value means
/// the same state always renders the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub file_label: String,
    pub file_selected: bool,
    pub submit: SubmitControl,
    pub error: Option<String>,
    pub result: Option<String>,
    pub preview: PreviewPane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPane {
    Hidden,
    Message(&'static str),
    Image {
        title: &'static str,
        image: PreviewImage,
    },
}

pub fn render(form: &UploadForm) -> FormView {
    let file_label = form
        .selected_file()
        .map(|f| f.name().to_string())
        .unwrap_or_else(|| NO_FILE_LABEL.to_string());

    let submit = if form.is_submitting() {
        SubmitControl {
            label: PROCESSING_LABEL,
            enabled: false,
        }
    } else {
        SubmitControl {
            label: UPLOAD_LABEL,
            enabled: true,
        }
    };

    let preview = match form.preview() {
        PreviewState::None => PreviewPane::Hidden,
        PreviewState::Loading => PreviewPane::Message(PREVIEW_LOADING),
        PreviewState::Unavailable => PreviewPane::Message(PREVIEW_UNAVAILABLE),
        PreviewState::Ready(image) => PreviewPane::Image {
            title: PREVIEW_TITLE,
            image: image.clone(),
        },
    };

    FormView {
        title: FORM_TITLE,
        file_label,
        file_selected: form.selected_file().is_some(),
        submit,
        error: form.last_error().map(|e| e.to_string()),
        result: form.people_count().map(|n| format!("People Count: {n}")),
        preview,
    }
}
