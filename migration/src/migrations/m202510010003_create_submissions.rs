use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("submissions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string().not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("assignment_id")).string().not_null())
                    // student_id is issued by the external auth provider.
                    .col(ColumnDef::new(Alias::new("student_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("media_url")).string().null())
                    .col(ColumnDef::new(Alias::new("submitted_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("score")).double().null())
                    .col(ColumnDef::new(Alias::new("word_choice_feedback")).text().null())
                    .col(ColumnDef::new(Alias::new("body_language_feedback")).text().null())
                    .col(ColumnDef::new(Alias::new("filler_word_feedback")).text().null())
                    .col(ColumnDef::new(Alias::new("raw_feedback")).json().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("submissions"), Alias::new("assignment_id"))
                            .to(Alias::new("assignments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_student_submitted_at")
                    .if_not_exists()
                    .table(Alias::new("submissions"))
                    .col(Alias::new("student_id"))
                    .col(Alias::new("submitted_at"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("submissions")).to_owned())
            .await
    }
}
