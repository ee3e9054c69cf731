pub mod preview_image;
pub mod preview_loader;
