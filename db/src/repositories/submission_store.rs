//! Persistence seam for submission rows.
//!
//! [`SubmissionStore`] is the only way the submission pipeline touches storage.
//! It carries no business rules: validation, idempotence decisions and feedback
//! normalization all happen above it. Two implementations ship with this crate:
//!
//! - [`SeaOrmSubmissionStore`](super::sea_orm_store::SeaOrmSubmissionStore) for SQLite via SeaORM.
//! - [`InMemorySubmissionStore`](super::memory_store::InMemorySubmissionStore) for tests.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use sea_orm::{DbErr, prelude::Json};
use serde::Serialize;

use crate::models::{assignment, submission};

/// Boxed future returned by every store operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'a>>;

/// Fields supplied when a provisional submission is inserted.
///
/// The store generates the id; `media_url` and all feedback start empty.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: String,
    pub student_id: String,
    pub submitted_at: DateTime<Utc>,
}

/// A partial update. `None` means "leave the column untouched".
///
/// A patch can never clear a column. `media_url` is only written while the
/// row has none, so an attached URL is never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPatch {
    pub media_url: Option<String>,
    pub score: Option<f64>,
    pub word_choice_feedback: Option<String>,
    pub body_language_feedback: Option<String>,
    pub filler_word_feedback: Option<String>,
    pub raw_feedback: Option<Json>,
}

impl SubmissionPatch {
    pub fn is_empty(&self) -> bool {
        *self == SubmissionPatch::default()
    }

    /// Copies every set field onto `row`, returning whether anything changed.
    pub fn apply_to(&self, row: &mut submission::Model) -> bool {
        let before = row.clone();
        if let Some(url) = &self.media_url {
            if row.media_url.is_none() {
                row.media_url = Some(url.clone());
            }
        }
        if let Some(score) = self.score {
            row.score = Some(score);
        }
        if let Some(text) = &self.word_choice_feedback {
            row.word_choice_feedback = Some(text.clone());
        }
        if let Some(text) = &self.body_language_feedback {
            row.body_language_feedback = Some(text.clone());
        }
        if let Some(text) = &self.filler_word_feedback {
            row.filler_word_feedback = Some(text.clone());
        }
        if let Some(raw) = &self.raw_feedback {
            row.raw_feedback = Some(raw.clone());
        }
        *row != before
    }
}

/// Which rows a listing returns. Results are always ordered by `submitted_at` descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFilter {
    All,
    ByStudent(String),
    ByAssignment(String),
}

impl SubmissionFilter {
    pub fn matches(&self, row: &submission::Model) -> bool {
        match self {
            SubmissionFilter::All => true,
            SubmissionFilter::ByStudent(student_id) => row.student_id == *student_id,
            SubmissionFilter::ByAssignment(assignment_id) => row.assignment_id == *assignment_id,
        }
    }
}

/// A submission row with its assignment and student display data joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub submission: submission::Model,
    pub assignment: Option<assignment::Model>,
    pub student_name: Option<String>,
}

/// Row store for submissions.
///
/// Each coordinator step issues exactly one call; no multi-row transactions are offered.
pub trait SubmissionStore: Send + Sync {
    /// Inserts a provisional row and returns it with its generated id.
    fn insert<'a>(&'a self, new: NewSubmission) -> StoreFuture<'a, submission::Model>;

    /// Applies `patch` to the row with `id`.
    ///
    /// Returns `Ok(None)` when no such row exists. A patch that would not change
    /// any column performs no write and returns the current row. A media URL is
    /// ignored when the row already has one; callers compare the returned row.
    fn patch<'a>(
        &'a self,
        id: &'a str,
        patch: SubmissionPatch,
    ) -> StoreFuture<'a, Option<submission::Model>>;

    /// Lists rows matching `filter`, newest first, with joined display data.
    fn query<'a>(&'a self, filter: SubmissionFilter) -> StoreFuture<'a, Vec<SubmissionRecord>>;

    /// Looks up an assignment, used to validate and annotate submissions.
    fn find_assignment<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<assignment::Model>>;
}
