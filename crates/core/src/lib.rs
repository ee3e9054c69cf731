pub mod analysis;
pub mod form;
pub mod pipeline;
pub mod preview;
pub mod shared;
