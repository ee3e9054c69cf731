pub mod analysis_response;
pub mod people_counter;
