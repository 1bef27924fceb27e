use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::{JsonBody, PathParam},
    lenient,
    ownership::ensure_farm_owned,
    validation::{present_id, present_text},
};
use crate::middleware::auth::AuthUser;
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use common::CreatedResponse;
use model::entities::{crop, farm};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for planting a crop on a farm
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCropRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub farm_id: Option<i32>,
    pub crop_name: Option<String>,
    pub variety: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub planting_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub expected_harvest_date: Option<NaiveDate>,
    /// Defaults to `planted`
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CropResponse {
    pub id: i32,
    pub farm_id: i32,
    pub crop_name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<crop::Model> for CropResponse {
    fn from(model: crop::Model) -> Self {
        Self {
            id: model.id,
            farm_id: model.farm_id,
            crop_name: model.crop_name,
            variety: model.variety,
            planting_date: model.planting_date,
            expected_harvest_date: model.expected_harvest_date,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

/// List crops of one of the caller's farms
#[utoipa::path(
    get,
    path = "/api/crops/farm/{farm_id}",
    tag = "crops",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Crops on the farm, empty when not owned", body = Vec<CropResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farm_crops(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CropResponse>>> {
    trace!("Entering get_farm_crops function for farm_id: {}", farm_id);

    let crops = crop::Entity::find()
        .inner_join(farm::Entity)
        .filter(crop::Column::FarmId.eq(farm_id))
        .filter(farm::Column::UserId.eq(user.id))
        .order_by_asc(crop::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} crops for farm {}", crops.len(), farm_id);
    Ok(Json(crops.into_iter().map(CropResponse::from).collect()))
}

/// Add a crop to one of the caller's farms
#[utoipa::path(
    post,
    path = "/api/crops",
    tag = "crops",
    security(("bearer_auth" = [])),
    request_body = CreateCropRequest,
    responses(
        (status = 201, description = "Crop added", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 403, description = "Farm not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_crop(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateCropRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_crop function");

    let (Some(farm_id), Some(crop_name)) = (present_id(request.farm_id), present_text(request.crop_name)) else {
        warn!("Crop creation rejected: missing farm or name");
        return Err(ApiError::validation("Farm ID and crop name are required"));
    };

    ensure_farm_owned(&state.db, farm_id, user.id).await?;

    let status = present_text(request.status).unwrap_or_else(|| crop::DEFAULT_STATUS.to_string());
    debug!("Planting '{}' on farm {} with status {}", crop_name, farm_id, status);

    let new_crop = crop::ActiveModel {
        farm_id: Set(farm_id),
        crop_name: Set(crop_name),
        variety: Set(present_text(request.variety)),
        planting_date: Set(request.planting_date),
        expected_harvest_date: Set(request.expected_harvest_date),
        status: Set(status),
        ..Default::default()
    };
    let crop_model = new_crop.insert(&state.db).await?;

    info!("Crop created with ID: {}", crop_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Crop added successfully", crop_model.id)),
    ))
}
