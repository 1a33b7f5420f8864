use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An assignment students respond to with a recorded video.
///
/// Assignments are owned by the teacher-facing collaborator; the submission
/// pipeline only reads `title` and `description` to annotate analysis requests.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        title: &str,
        description: &str,
        due_date: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let assignment = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            due_date: Set(due_date),
            created_at: Set(Utc::now()),
        };

        assignment.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    /// All assignments, soonest due first.
    pub async fn all_by_due_date(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::DueDate)
            .all(db)
            .await
    }
}
