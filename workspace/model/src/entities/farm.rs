use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A plot of land owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "farms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owner of the farm; every farm-scoped request is checked against it.
    pub user_id: i32,
    pub farm_name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub area_acres: Option<Decimal>,
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::crop::Entity")]
    Crop,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    #[sea_orm(has_many = "super::diary_entry::Entity")]
    DiaryEntry,
    #[sea_orm(has_many = "super::resource_usage::Entity")]
    ResourceUsage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::crop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crop.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl Related<super::diary_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiaryEntry.def()
    }
}

impl Related<super::resource_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourceUsage.def()
    }
}

created_at_behavior!();
