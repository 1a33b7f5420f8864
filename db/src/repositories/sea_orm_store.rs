use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::models::{
    assignment::{self, Entity as AssignmentEntity},
    profile::{self, Entity as ProfileEntity},
    submission::{self, ActiveModel as SubmissionActiveModel, Column, Entity as SubmissionEntity},
};
use crate::repositories::submission_store::{
    NewSubmission, StoreFuture, SubmissionFilter, SubmissionPatch, SubmissionRecord,
    SubmissionStore,
};

/// [`SubmissionStore`] backed by a SeaORM connection.
#[derive(Clone)]
pub struct SeaOrmSubmissionStore {
    db: DatabaseConnection,
}

impl SeaOrmSubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SubmissionStore for SeaOrmSubmissionStore {
    fn insert<'a>(&'a self, new: NewSubmission) -> StoreFuture<'a, submission::Model> {
        Box::pin(async move {
            let row = SubmissionActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                assignment_id: Set(new.assignment_id),
                student_id: Set(new.student_id),
                media_url: Set(None),
                submitted_at: Set(new.submitted_at),
                score: Set(None),
                word_choice_feedback: Set(None),
                body_language_feedback: Set(None),
                filler_word_feedback: Set(None),
                raw_feedback: Set(None),
            };
            row.insert(&self.db).await
        })
    }

    fn patch<'a>(
        &'a self,
        id: &'a str,
        patch: SubmissionPatch,
    ) -> StoreFuture<'a, Option<submission::Model>> {
        Box::pin(async move {
            let Some(existing) = SubmissionEntity::find_by_id(id.to_owned())
                .one(&self.db)
                .await?
            else {
                return Ok(None);
            };

            let mut preview = existing.clone();
            if !patch.apply_to(&mut preview) {
                return Ok(Some(existing));
            }

            // Only columns the patch changes are marked Set, so a concurrent
            // patch of other columns is not overwritten with stale values.
            let mut active = <SubmissionActiveModel as ActiveModelBehavior>::new();
            let attaching_media = preview.media_url != existing.media_url;
            if attaching_media {
                active.media_url = Set(preview.media_url.clone());
            }
            if let Some(score) = patch.score {
                active.score = Set(Some(score));
            }
            if let Some(text) = patch.word_choice_feedback {
                active.word_choice_feedback = Set(Some(text));
            }
            if let Some(text) = patch.body_language_feedback {
                active.body_language_feedback = Set(Some(text));
            }
            if let Some(text) = patch.filler_word_feedback {
                active.filler_word_feedback = Set(Some(text));
            }
            if let Some(raw) = patch.raw_feedback {
                active.raw_feedback = Set(Some(raw));
            }

            let mut update = SubmissionEntity::update_many()
                .set(active)
                .filter(Column::Id.eq(id));
            if attaching_media {
                update = update.filter(Column::MediaUrl.is_null());
            }
            let result = update.exec(&self.db).await?;
            if result.rows_affected == 0 && attaching_media {
                // Another request attached media first; the caller sees its URL.
                tracing::debug!(submission_id = %id, "Media already attached, patch skipped");
            }

            SubmissionEntity::find_by_id(id.to_owned()).one(&self.db).await
        })
    }

    fn query<'a>(&'a self, filter: SubmissionFilter) -> StoreFuture<'a, Vec<SubmissionRecord>> {
        Box::pin(async move {
            let select = match &filter {
                SubmissionFilter::All => SubmissionEntity::find(),
                SubmissionFilter::ByStudent(student_id) => {
                    SubmissionEntity::find().filter(Column::StudentId.eq(student_id.as_str()))
                }
                SubmissionFilter::ByAssignment(assignment_id) => {
                    SubmissionEntity::find().filter(Column::AssignmentId.eq(assignment_id.as_str()))
                }
            };

            let rows = select
                .order_by_desc(Column::SubmittedAt)
                .find_also_related(AssignmentEntity)
                .all(&self.db)
                .await?;

            let student_ids: Vec<String> = rows
                .iter()
                .map(|(s, _)| s.student_id.clone())
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();

            let names: HashMap<String, String> = if student_ids.is_empty() {
                HashMap::new()
            } else {
                ProfileEntity::find()
                    .filter(profile::Column::Id.is_in(student_ids))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|p| (p.id, p.name))
                    .collect()
            };

            Ok(rows
                .into_iter()
                .map(|(submission, assignment)| SubmissionRecord {
                    student_name: names.get(&submission.student_id).cloned(),
                    submission,
                    assignment,
                })
                .collect())
        })
    }

    fn find_assignment<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<assignment::Model>> {
        Box::pin(async move { AssignmentEntity::find_by_id(id.to_owned()).one(&self.db).await })
    }
}
