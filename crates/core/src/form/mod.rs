pub mod form_view;
pub mod upload_form;
