pub mod memory_store;
pub mod sea_orm_store;
pub mod submission_store;

pub use memory_store::InMemorySubmissionStore;
pub use sea_orm_store::SeaOrmSubmissionStore;
pub use submission_store::{
    NewSubmission, StoreFuture, SubmissionFilter, SubmissionPatch, SubmissionRecord,
    SubmissionStore,
};
