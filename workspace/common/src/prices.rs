use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One mandi price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketPriceRecord {
    pub id: i32,
    pub crop_name: String,
    /// Wholesale market the price was observed at
    pub mandi_name: String,
    pub price_per_kg: Decimal,
    pub price_date: NaiveDate,
    pub location: Option<String>,
}

/// Latest prices of one crop across mandis, most expensive first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CropPriceGroup {
    pub crop_name: String,
    pub prices: Vec<MarketPriceRecord>,
    pub min_price: Decimal,
    pub max_price: Decimal,
}
