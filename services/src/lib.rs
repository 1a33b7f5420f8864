pub mod error;
pub mod feedback;
pub mod media;
pub mod submission_coordinator;

pub use error::{SubmissionError, SubmissionResult};
pub use submission_coordinator::{RecordOutcome, SubmissionCoordinator};
