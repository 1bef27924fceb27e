//! Common transport-layer types shared between the server handlers and the
//! compute crate. Keeping them here lets the pure logic in `compute` produce
//! exactly the shapes the API serializes.

mod chat;
mod prices;
mod summary;

pub use chat::{ChatReply, Language};
pub use prices::{CropPriceGroup, MarketPriceRecord};
pub use summary::{ExpenseTotal, ResourceTotal};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by every create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreatedResponse {
    /// Human readable confirmation
    pub message: String,
    /// Identifier of the inserted row
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: i32) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// Body returned for plain acknowledgements (e.g. an upsert that updated a row).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}
