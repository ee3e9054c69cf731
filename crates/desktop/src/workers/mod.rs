pub mod analysis_worker;
pub mod preview_worker;
