pub mod file_preview_loader;
