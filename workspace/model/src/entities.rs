//! SeaORM entities for the farm management schema.
//!
//! Every farm-scoped row hangs off `farms.user_id`, which is what the API
//! checks ownership against.

/// Stamps `created_at` on insert when the caller did not set it.
macro_rules! created_at_behavior {
    () => {
        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                if insert && self.created_at.is_not_set() {
                    self.created_at = sea_orm::Set(chrono::Utc::now().naive_utc());
                }
                Ok(self)
            }
        }
    };
}

pub mod crop;
pub mod diary_entry;
pub mod expense;
pub mod farm;
pub mod learning_resource;
pub mod market_price;
pub mod marketplace_listing;
pub mod resource_usage;
pub mod user;
pub mod user_learning_progress;
pub mod yield_record;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::crop::Entity as Crop;
    pub use super::diary_entry::Entity as DiaryEntry;
    pub use super::expense::Entity as Expense;
    pub use super::farm::Entity as Farm;
    pub use super::learning_resource::Entity as LearningResource;
    pub use super::market_price::Entity as MarketPrice;
    pub use super::marketplace_listing::Entity as MarketplaceListing;
    pub use super::resource_usage::Entity as ResourceUsage;
    pub use super::user::Entity as User;
    pub use super::user_learning_progress::Entity as UserLearningProgress;
    pub use super::yield_record::Entity as YieldRecord;
}
