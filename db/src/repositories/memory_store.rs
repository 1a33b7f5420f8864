use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{assignment, profile, submission};
use crate::repositories::submission_store::{
    NewSubmission, StoreFuture, SubmissionFilter, SubmissionPatch, SubmissionRecord,
    SubmissionStore,
};

#[derive(Default)]
struct Tables {
    assignments: HashMap<String, assignment::Model>,
    profiles: HashMap<String, profile::Model>,
    submissions: HashMap<String, submission::Model>,
}

/// In-process [`SubmissionStore`] used by unit and route tests.
///
/// Clones share the same tables, so a test can keep a handle for seeding and
/// inspection while the coordinator owns another.
#[derive(Clone, Default)]
pub struct InMemorySubmissionStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_assignment(&self, assignment: assignment::Model) {
        self.tables
            .write()
            .await
            .assignments
            .insert(assignment.id.clone(), assignment);
    }

    pub async fn add_profile(&self, profile: profile::Model) {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.id.clone(), profile);
    }

    /// Snapshot of a single stored row.
    pub async fn submission(&self, id: &str) -> Option<submission::Model> {
        self.tables.read().await.submissions.get(id).cloned()
    }

    pub async fn submission_count(&self) -> usize {
        self.tables.read().await.submissions.len()
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn insert<'a>(&'a self, new: NewSubmission) -> StoreFuture<'a, submission::Model> {
        Box::pin(async move {
            let row = submission::Model {
                id: Uuid::new_v4().to_string(),
                assignment_id: new.assignment_id,
                student_id: new.student_id,
                media_url: None,
                submitted_at: new.submitted_at,
                score: None,
                word_choice_feedback: None,
                body_language_feedback: None,
                filler_word_feedback: None,
                raw_feedback: None,
            };
            self.tables
                .write()
                .await
                .submissions
                .insert(row.id.clone(), row.clone());
            Ok(row)
        })
    }

    fn patch<'a>(
        &'a self,
        id: &'a str,
        patch: SubmissionPatch,
    ) -> StoreFuture<'a, Option<submission::Model>> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            Ok(tables.submissions.get_mut(id).map(|row| {
                patch.apply_to(row);
                row.clone()
            }))
        })
    }

    fn query<'a>(&'a self, filter: SubmissionFilter) -> StoreFuture<'a, Vec<SubmissionRecord>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut records: Vec<SubmissionRecord> = tables
                .submissions
                .values()
                .filter(|row| filter.matches(row))
                .map(|row| SubmissionRecord {
                    submission: row.clone(),
                    assignment: tables.assignments.get(&row.assignment_id).cloned(),
                    student_name: tables.profiles.get(&row.student_id).map(|p| p.name.clone()),
                })
                .collect();
            records.sort_by(|a, b| {
                b.submission
                    .submitted_at
                    .cmp(&a.submission.submitted_at)
                    .then_with(|| a.submission.id.cmp(&b.submission.id))
            });
            Ok(records)
        })
    }

    fn find_assignment<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<assignment::Model>> {
        Box::pin(async move { Ok(self.tables.read().await.assignments.get(id).cloned()) })
    }
}
