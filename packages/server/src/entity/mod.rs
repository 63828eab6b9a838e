pub mod evaluation;
pub mod submission;

pub use evaluation::Evaluation;
pub use submission::Submission;
