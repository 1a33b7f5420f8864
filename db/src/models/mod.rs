pub mod assignment;
pub mod profile;
pub mod submission;

pub use assignment::Entity as Assignment;
pub use profile::Entity as Profile;
pub use submission::Entity as Submission;
