use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sum of expenses of one type on a farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseTotal {
    pub expense_type: String,
    pub total: Decimal,
}

/// Sum of one resource consumed on a farm, per unit of measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceTotal {
    pub resource_type: String,
    pub unit: String,
    pub total: Decimal,
}
