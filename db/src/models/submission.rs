use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One student's video response to one assignment.
///
/// A row is created provisionally (no media) and later patched twice by
/// independent flows: once with the backup media URL, and once (or more) with
/// the analysis service's feedback. The three `*_feedback` columns hold the
/// normalized per-category feedback encoded as JSON text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// UUID assigned when the provisional row is inserted.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    /// Public URL of the backup copy. Only ever goes from `None` to `Some`.
    pub media_url: Option<String>,
    /// Set at provisional creation; never updated.
    pub submitted_at: DateTime<Utc>,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub word_choice_feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub body_language_feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub filler_word_feedback: Option<String>,
    /// Supplementary payload from the analysis service, stored verbatim.
    #[sea_orm(column_type = "Json", nullable)]
    pub raw_feedback: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
