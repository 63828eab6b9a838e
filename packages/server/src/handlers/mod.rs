pub mod analysis;
pub mod submission;
pub mod system;
