pub mod report;
pub mod upload;
