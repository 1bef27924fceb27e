use sea_orm::entity::prelude::*;

/// Article, video or guide in the learning section.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "learning_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// e.g. "article", "video", "guide"
    pub content_type: String,
    pub category: String,
    /// ISO 639-1 code of the content
    pub language: String,
    /// Comma separated keywords
    pub tags: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_learning_progress::Entity")]
    UserLearningProgress,
}

impl Related<super::user_learning_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLearningProgress.def()
    }
}

created_at_behavior!();
