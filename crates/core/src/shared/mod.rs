pub mod constants;
pub mod selected_file;
