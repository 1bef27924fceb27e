use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// Status given to a crop when none is supplied.
pub const DEFAULT_STATUS: &str = "planted";

/// One planting of a crop on a farm.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crops")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub farm_id: i32,
    pub crop_name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    /// Free-form lifecycle label such as "planted" or "harvested".
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::farm::Entity",
        from = "Column::FarmId",
        to = "super::farm::Column::Id",
        on_delete = "Cascade"
    )]
    Farm,
    #[sea_orm(has_many = "super::yield_record::Entity")]
    YieldRecord,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::yield_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YieldRecord.def()
    }
}

created_at_behavior!();
