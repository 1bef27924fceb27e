use model::entities::{crop, farm};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::{debug, trace, warn};

use crate::error::{ApiError, ApiResult};

/// Load `farm_id` only if it belongs to `user_id`; anything else is a 403.
pub async fn ensure_farm_owned(
    db: &DatabaseConnection,
    farm_id: i32,
    user_id: i32,
) -> ApiResult<farm::Model> {
    trace!("Checking ownership of farm {} for user {}", farm_id, user_id);

    let owned = farm::Entity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match owned {
        Some(farm) => {
            debug!("Farm {} belongs to user {}", farm_id, user_id);
            Ok(farm)
        }
        None => {
            warn!("Farm {} not found or not owned by user {}", farm_id, user_id);
            Err(ApiError::Forbidden("Farm not found or access denied".to_string()))
        }
    }
}

/// Load `crop_id` only if its farm belongs to `user_id`; anything else is a 403.
pub async fn ensure_crop_owned(
    db: &DatabaseConnection,
    crop_id: i32,
    user_id: i32,
) -> ApiResult<crop::Model> {
    trace!("Checking ownership of crop {} for user {}", crop_id, user_id);

    let owned = crop::Entity::find_by_id(crop_id)
        .inner_join(farm::Entity)
        .filter(farm::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match owned {
        Some(crop) => {
            debug!("Crop {} belongs to user {}", crop_id, user_id);
            Ok(crop)
        }
        None => {
            warn!("Crop {} not found or not owned by user {}", crop_id, user_id);
            Err(ApiError::Forbidden("Crop not found or access denied".to_string()))
        }
    }
}
