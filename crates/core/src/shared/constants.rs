/// Analysis endpoint used when no other address is configured.
pub const ANALYZE_ENDPOINT: &str = "http://localhost:5000/analyze";

/// Multipart field name the analysis server reads the image from.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// MIME type for content whose format could not be recognised.
pub const OCTET_STREAM: &str = "application/octet-stream";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp"];

pub const FORM_TITLE: &str = "Upload an Image for People Counting";
pub const UPLOAD_LABEL: &str = "Upload";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const NO_FILE_LABEL: &str = "No file selected";
pub const PREVIEW_TITLE: &str = "Image Preview:";
pub const PREVIEW_LOADING: &str = "Loading preview\u{2026}";
pub const PREVIEW_UNAVAILABLE: &str = "Preview unavailable";
