mod assignments_test;
mod feedback_test;
mod media_test;
mod submissions_test;
