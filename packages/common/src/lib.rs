pub mod config;
pub mod hash;
pub mod submission_status;

pub use config::AnalysisAppConfig;
pub use hash::ContentHash;
pub use submission_status::SubmissionStatus;
