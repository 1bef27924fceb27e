use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A wholesale price observed at a mandi on a given day.
/// Reference data: not owned by any user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "market_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub crop_name: String,
    pub mandi_name: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price_per_kg: Decimal,
    pub price_date: NaiveDate,
    pub location: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

created_at_behavior!();
