use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use std::str::FromStr;

/// Consumables tracked per farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ResourceType {
    #[sea_orm(string_value = "water")]
    Water,
    #[sea_orm(string_value = "fertilizer")]
    Fertilizer,
    #[sea_orm(string_value = "pesticide")]
    Pesticide,
    #[sea_orm(string_value = "electricity")]
    Electricity,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Water => "water",
            ResourceType::Fertilizer => "fertilizer",
            ResourceType::Pesticide => "pesticide",
            ResourceType::Electricity => "electricity",
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "water" => Ok(ResourceType::Water),
            "fertilizer" => Ok(ResourceType::Fertilizer),
            "pesticide" => Ok(ResourceType::Pesticide),
            "electricity" => Ok(ResourceType::Electricity),
            other => Err(format!("Unknown resource type '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resource_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub farm_id: i32,
    pub resource_type: ResourceType,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub quantity: Decimal,
    pub unit: String,
    pub usage_date: NaiveDate,
    pub notes: Option<String>,
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
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

created_at_behavior!();
